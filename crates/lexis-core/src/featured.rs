use chrono::{Datelike, NaiveDate};

pub const WORDS_OF_THE_DAY: [&str; 25] = [
    "serendipity",
    "ephemeral",
    "ubiquitous",
    "mellifluous",
    "quintessential",
    "eloquent",
    "resilience",
    "paradigm",
    "panacea",
    "euphoria",
    "luminous",
    "nostalgia",
    "ethereal",
    "serene",
    "enigma",
    "cognizant",
    "benevolent",
    "cacophony",
    "diaphanous",
    "ebullient",
    "fastidious",
    "garrulous",
    "halcyon",
    "ineffable",
    "juxtapose",
];

const SUGGESTION_SUFFIXES: [&str; 5] = ["able", "ful", "ness", "ing", "ed"];

/// Same word all day, from a hash of the `Y-M-D` date string
pub fn word_of_the_day(date: NaiveDate) -> &'static str {
    let key = format!("{}-{}-{}", date.year(), date.month(), date.day());
    // Only the shift truncates to 32 bits; the running sum does not
    let hash = key.chars().fold(0i64, |hash, c| {
        i64::from((hash as i32).wrapping_shl(5)) - hash + i64::from(u32::from(c))
    });

    WORDS_OF_THE_DAY[(hash.unsigned_abs() % WORDS_OF_THE_DAY.len() as u64) as usize]
}

/// Trending terms padded up to `limit` with fallback words
pub fn pad_trending(trending: Vec<String>, fallback: &[String], limit: usize) -> Vec<String> {
    let mut words = trending;
    words.truncate(limit);

    for word in fallback {
        if words.len() >= limit {
            break;
        }
        if !words.contains(word) {
            words.push(word.clone());
        }
    }

    words
}

/// Suffix completions for the search box
pub fn suggestions(query: &str) -> Vec<String> {
    let query = query.trim();
    if query.chars().count() < 2 {
        return Vec::new();
    }

    SUGGESTION_SUFFIXES
        .iter()
        .map(|suffix| format!("{query}{suffix}"))
        .filter(|word| word.chars().count() > 2)
        .collect()
}
