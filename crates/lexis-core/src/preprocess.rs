use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Canonical search key: trimmed, NFKC, single line, lower-cased
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        let text: String = text.nfkc().collect();

        text.replace(['\n', '\r'], " ").trim().to_lowercase()
    }
}

pub struct TermPreprocessor;
impl Preprocessor for TermPreprocessor {}

pub fn normalize_term(text: &str) -> String {
    TermPreprocessor.process(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_term("  Serendipity \n"), "serendipity");
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(normalize_term(" \t\n"), "");
    }

    #[test]
    fn folds_compatibility_forms() {
        // fullwidth latin letters
        assert_eq!(normalize_term("ＷＯＲＤ"), "word");
    }
}
