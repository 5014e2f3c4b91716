use indexmap::IndexMap;
use lexis_types::{
    DefinitionGroup, FlatDefinition, LexicalRecord, MeaningDetail, RawDefinitions, StoredRecord,
    UNKNOWN_PART_OF_SPEECH,
};

use crate::parser::{NO_ETYMOLOGY_MESSAGE, NO_EXAMPLES_MESSAGE, unknown_group};

/// Reconcile either definition shape into grouped form.
///
/// Grouped input passes through untouched. Flat rows are grouped by part of
/// speech in first-seen order. The output is never empty.
pub fn normalize(definitions: RawDefinitions) -> Vec<DefinitionGroup> {
    let groups = match definitions {
        RawDefinitions::Grouped(groups) => groups,
        RawDefinitions::Flat(rows) => group_rows(rows),
    };

    if groups.is_empty() {
        vec![unknown_group()]
    } else {
        groups
    }
}

fn group_rows(rows: Vec<FlatDefinition>) -> Vec<DefinitionGroup> {
    let mut by_pos: IndexMap<String, Vec<MeaningDetail>> = IndexMap::new();

    for row in rows {
        if row.meaning.trim().is_empty() {
            continue;
        }
        let pos = if row.part_of_speech.trim().is_empty() {
            UNKNOWN_PART_OF_SPEECH.to_string()
        } else {
            row.part_of_speech
        };

        by_pos.entry(pos).or_default().push(MeaningDetail {
            meaning: row.meaning,
            example: row.example,
            ..Default::default()
        });
    }

    by_pos
        .into_iter()
        .map(|(pos, meanings)| DefinitionGroup::new(pos, meanings))
        .collect()
}

/// Legacy flat shape; keeps only what that shape can carry
pub fn to_flat(groups: &[DefinitionGroup]) -> Vec<FlatDefinition> {
    groups
        .iter()
        .flat_map(|group| {
            group.meanings.iter().map(|m| FlatDefinition {
                part_of_speech: group.part_of_speech.clone(),
                meaning: m.meaning.clone(),
                example: m.example.clone(),
            })
        })
        .collect()
}

/// Rebuild a canonical record from whatever shape was persisted
pub fn hydrate(stored: StoredRecord) -> LexicalRecord {
    let mut examples = stored.examples;
    if examples.is_empty() {
        examples.push(NO_EXAMPLES_MESSAGE.to_string());
    }

    let etymology = if stored.etymology.trim().is_empty() {
        NO_ETYMOLOGY_MESSAGE.to_string()
    } else {
        stored.etymology
    };

    LexicalRecord {
        definitions: normalize(stored.definitions),
        word: stored.word,
        pronunciation: stored.pronunciation,
        examples,
        synonyms: stored.synonyms,
        antonyms: stored.antonyms,
        etymology,
        timestamp: stored.timestamp,
    }
}
