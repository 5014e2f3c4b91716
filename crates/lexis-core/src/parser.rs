//! Line-oriented parser for the five-section generator response.
//!
//! ```text
//! DEFINITIONS
//! • [noun] 1. A tiny thing
//!   - Example: "It was tiny."
//!   - Usage: None
//! EXAMPLES
//! • "It was tiny."
//! SYNONYMS
//! • small, little
//! ANTONYMS
//! • huge
//! ETYMOLOGY
//! Origin: unknown
//! ```
//!
//! Parsing is total: any input yields a usable [`ParseResult`], with
//! placeholder content standing in for whatever could not be read.

use indexmap::{IndexMap, IndexSet};
use lexis_types::{DefinitionGroup, MeaningDetail, ParseResult, UNKNOWN_PART_OF_SPEECH};

pub const NO_DEFINITION_MESSAGE: &str =
    "No definition found. Please try another word or check your spelling.";
pub const NO_EXAMPLES_MESSAGE: &str = "No examples available for this word.";
pub const NO_ETYMOLOGY_MESSAGE: &str = "Etymology information is not available for this word.";

/// Generator's marker for "field not available"
pub const SENTINEL: &str = "None";

const BULLET: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Anything before the first header; ignored
    Preamble,
    Definitions,
    Examples,
    Synonyms,
    Antonyms,
    Etymology,
}

impl Section {
    pub const REQUIRED: [Section; 5] = [
        Section::Definitions,
        Section::Examples,
        Section::Synonyms,
        Section::Antonyms,
        Section::Etymology,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Section::Preamble => "",
            Section::Definitions => "DEFINITIONS",
            Section::Examples => "EXAMPLES",
            Section::Synonyms => "SYNONYMS",
            Section::Antonyms => "ANTONYMS",
            Section::Etymology => "ETYMOLOGY",
        }
    }

    /// Header lines start with the section keyword, in any case
    fn from_header(line: &str) -> Option<Section> {
        Self::REQUIRED.into_iter().find(|section| {
            let keyword = section.keyword();
            line.get(..keyword.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
        })
    }
}

/// `• [noun] 1. meaning`
#[derive(Debug, PartialEq, Eq)]
struct SenseLine<'a> {
    part_of_speech: String,
    meaning: &'a str,
}

/// `- Label: value` beneath a sense
#[derive(Debug, PartialEq, Eq)]
enum Subfield {
    Example(Option<String>),
    Usage(Option<String>),
    Register(Option<String>),
    Synonyms(Vec<String>),
    Antonyms(Vec<String>),
}

fn match_sense(line: &str) -> Option<SenseLine<'_>> {
    let rest = line.strip_prefix(BULLET)?.trim_start();
    let rest = rest.strip_prefix('[')?;
    let (pos, rest) = rest.split_once(']')?;
    let pos = pos.trim();
    if pos.is_empty() {
        return None;
    }

    let rest = rest.trim_start();
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let meaning = rest[digits..].strip_prefix('.')?.trim();
    if meaning.is_empty() {
        return None;
    }

    Some(SenseLine {
        part_of_speech: pos.to_lowercase(),
        meaning,
    })
}

fn match_subfield(line: &str) -> Option<Subfield> {
    let rest = line.strip_prefix('-')?.trim_start();
    let (label, value) = rest.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let subfield = match label.trim().to_ascii_lowercase().as_str() {
        "example" => Subfield::Example(present(strip_quotes(value))),
        "usage" => Subfield::Usage(present(value)),
        "register" => Subfield::Register(present(value)),
        "synonyms" => Subfield::Synonyms(split_list(value)),
        "antonyms" => Subfield::Antonyms(split_list(value)),
        _ => return None,
    };

    Some(subfield)
}

/// Body of a `•` or `-` list line
fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix(BULLET)
        .or_else(|| line.strip_prefix('-'))
        .map(str::trim)
}

fn strip_quotes(value: &str) -> &str {
    const QUOTES: &[char] = &['"', '\'', '“', '”', '‘', '’'];
    value.trim_matches(QUOTES).trim()
}

fn present(value: &str) -> Option<String> {
    if value.is_empty() || value == SENTINEL {
        None
    } else {
        Some(value.to_string())
    }
}

fn is_sentinel(token: &str) -> bool {
    token.eq_ignore_ascii_case(SENTINEL)
}

/// Comma list attached to a single sense; distinct, sentinel-free
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty() && !is_sentinel(item))
        .map(String::from)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Words from a top-level synonym/antonym line
fn split_words(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|word| word.chars().count() > 1)
        .map(String::from)
}

/// Accumulates senses per part of speech in first-seen order
#[derive(Default)]
struct DefinitionBuilder {
    groups: IndexMap<String, Vec<MeaningDetail>>,
    open: Option<(String, MeaningDetail)>,
}

impl DefinitionBuilder {
    fn open_sense(&mut self, sense: SenseLine<'_>) {
        self.flush();
        self.open = Some((sense.part_of_speech, MeaningDetail::new(sense.meaning)));
    }

    fn attach(&mut self, subfield: Subfield) {
        let Some((_, meaning)) = self.open.as_mut() else {
            return;
        };

        match subfield {
            Subfield::Example(example) => meaning.example = example,
            Subfield::Usage(usage) => meaning.usage = usage,
            Subfield::Register(register) => meaning.register = register,
            Subfield::Synonyms(words) => meaning.synonyms = words,
            Subfield::Antonyms(words) => meaning.antonyms = words,
        }
    }

    fn flush(&mut self) {
        if let Some((pos, meaning)) = self.open.take() {
            self.groups.entry(pos).or_default().push(meaning);
        }
    }

    fn finish(mut self) -> Vec<DefinitionGroup> {
        self.flush();
        self.groups
            .into_iter()
            .filter(|(_, meanings)| !meanings.is_empty())
            .map(|(pos, meanings)| DefinitionGroup::new(pos, meanings))
            .collect()
    }
}

/// Fallback used whenever no definition survives parsing or normalization
pub fn unknown_group() -> DefinitionGroup {
    DefinitionGroup::new(
        UNKNOWN_PART_OF_SPEECH,
        vec![MeaningDetail::new(NO_DEFINITION_MESSAGE)],
    )
}

/// Ordered de-duplication, dropping tokens of fewer than two characters
fn distinct(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .filter(|item| item.chars().count() > 1)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

pub fn parse(raw: &str) -> ParseResult {
    let mut section = Section::Preamble;
    let mut definitions = DefinitionBuilder::default();
    let mut examples = Vec::new();
    let mut synonyms = Vec::new();
    let mut antonyms = Vec::new();
    let mut etymology = Vec::new();

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(next) = Section::from_header(line) {
            if section == Section::Definitions && next != Section::Definitions {
                definitions.flush();
            }
            section = next;
            continue;
        }

        match section {
            Section::Preamble => {}
            Section::Definitions => {
                if let Some(sense) = match_sense(line) {
                    definitions.open_sense(sense);
                } else if let Some(subfield) = match_subfield(line) {
                    definitions.attach(subfield);
                } else if line.starts_with(BULLET) {
                    // Malformed sense: close the open one so its subfields
                    // are not attached to the wrong meaning
                    tracing::trace!("Skipping malformed sense: {}", line);
                    definitions.flush();
                } else {
                    tracing::trace!("Skipping definition line: {}", line);
                }
            }
            Section::Examples => {
                if let Some(body) = strip_bullet(line) {
                    let example = strip_quotes(body);
                    if !example.is_empty() {
                        examples.push(example.to_string());
                    }
                }
            }
            Section::Synonyms => {
                if let Some(body) = strip_bullet(line) {
                    synonyms.extend(split_words(body));
                }
            }
            Section::Antonyms => {
                if let Some(body) = strip_bullet(line) {
                    antonyms.extend(split_words(body));
                }
            }
            Section::Etymology => etymology.push(line),
        }
    }

    let mut result = ParseResult {
        definitions: definitions.finish(),
        examples: distinct(examples),
        synonyms: distinct(synonyms),
        antonyms: distinct(antonyms),
        etymology: etymology.join(" ").trim().to_string(),
    };

    result.synonyms.retain(|s| !is_sentinel(s));
    result.antonyms.retain(|a| !is_sentinel(a));

    if result.definitions.is_empty() {
        result.definitions.push(unknown_group());
    }
    if result.examples.is_empty() {
        result.examples.push(NO_EXAMPLES_MESSAGE.to_string());
    }
    if result.etymology.is_empty() {
        result.etymology = NO_ETYMOLOGY_MESSAGE.to_string();
    }

    result
}
