use lexis_core::parser::Section;

use crate::GenerateError;

/// Instruction sent to the generator for `word`
pub fn prompt_for(word: &str) -> String {
    format!(
        r#"
You are a dictionary API. For the word "{word}", respond in this exact format:

DEFINITIONS
• [noun] 1. First noun definition
  - Example: "Example sentence for first noun definition."
  - Usage: formal
  - Register: standard
  - Synonyms: synonym1, synonym2
  - Antonyms: antonym1, antonym2
• [noun] 2. Second noun definition
  - Example: "Example sentence for second noun definition."
  - Usage: informal
  - Register: colloquial
  - Synonyms: synonym3, synonym4
  - Antonyms: antonym3, antonym4
• [verb] 1. First verb definition
  - Example: "Example sentence for first verb definition."
  - Usage: standard
  - Register: formal
  - Synonyms: synonym5, synonym6
  - Antonyms: antonym5, antonym6

EXAMPLES
• "Complete example sentence one."
• "Complete example sentence two."

SYNONYMS
• synonym1, synonym2, synonym3, synonym4, synonym5, synonym6

ANTONYMS
• antonym1, antonym2, antonym3, antonym4, antonym5, antonym6

ETYMOLOGY
Origin: Word origin
Development: Historical development
Current: Current usage

Respond using exactly this format. Each definition must:
1. Start with a bullet point (•)
2. Include part of speech in square brackets
3. Include a numbered definition
4. Include all subfields (Example, Usage, Register, Synonyms, Antonyms)
If any field is not available, write "None" for that field.
Do not add any extra text or skip any sections."#
    )
}

/// Reject responses lacking any of the five section headers
pub fn validate_sections(text: &str) -> Result<(), GenerateError> {
    match Section::REQUIRED
        .iter()
        .find(|section| !text.contains(section.keyword()))
    {
        Some(missing) => Err(GenerateError::MissingSection(missing.keyword())),
        None => Ok(()),
    }
}
