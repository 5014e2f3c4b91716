use std::fmt::Write;
use std::sync::Arc;

use kanal::AsyncReceiver;
use lexis_types::{AppEvent, FavoriteItem, HistoryItem, LexicalRecord, TrendingEntry};
use serde::Serialize;

use crate::sequencer::RequestSequencer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Text,
    Json,
}

/// Prints whatever the event loop sends; records from superseded searches
/// are dropped.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    sequencer: Arc<RequestSequencer>,
    mode: RenderMode,
) -> anyhow::Result<()> {
    loop {
        let event = app_to_ui_rx.recv().await?;

        match event {
            AppEvent::ShowRecord { ticket, record } => {
                if !sequencer.is_current(ticket) {
                    tracing::debug!("Dropping stale result #{ticket} for {}", record.word);
                    continue;
                }
                println!("{}", render_record(&record, mode)?);
            }
            AppEvent::ShowTrending(entries) => {
                if mode == RenderMode::Text && !entries.is_empty() {
                    println!("{}", render_trending(&entries));
                }
            }
            AppEvent::Status(status) => {
                println!("{status}");
            }
            AppEvent::Shutdown => {
                tracing::info!("UI loop shutting down");
                return Ok(());
            }
            AppEvent::Search(_) => {}
        }
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_record(record: &LexicalRecord, mode: RenderMode) -> anyhow::Result<String> {
    match mode {
        RenderMode::Json => to_json(record),
        RenderMode::Text => Ok(record_text(record)),
    }
}

fn record_text(record: &LexicalRecord) -> String {
    if let Some(message) = record.error_message() {
        return format!("{}: {}", record.word, message);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}  [{}]", record.word, record.pronunciation.text);
    if let Some(audio) = &record.pronunciation.audio_url {
        let _ = writeln!(out, "  audio: {audio}");
    }

    for group in &record.definitions {
        let _ = writeln!(out, "\n{}", group.part_of_speech);
        for (i, detail) in group.meanings.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, detail.meaning);
            if let Some(example) = &detail.example {
                let _ = writeln!(out, "     \"{example}\"");
            }
            if let Some(usage) = &detail.usage {
                let _ = writeln!(out, "     usage: {usage}");
            }
            if let Some(register) = &detail.register {
                let _ = writeln!(out, "     register: {register}");
            }
            if !detail.synonyms.is_empty() {
                let _ = writeln!(out, "     synonyms: {}", detail.synonyms.join(", "));
            }
            if !detail.antonyms.is_empty() {
                let _ = writeln!(out, "     antonyms: {}", detail.antonyms.join(", "));
            }
        }
    }

    let _ = writeln!(out, "\nExamples");
    for example in &record.examples {
        let _ = writeln!(out, "  - {example}");
    }
    if !record.synonyms.is_empty() {
        let _ = writeln!(out, "\nSynonyms: {}", record.synonyms.join(", "));
    }
    if !record.antonyms.is_empty() {
        let _ = writeln!(out, "Antonyms: {}", record.antonyms.join(", "));
    }
    let _ = write!(out, "\nEtymology: {}", record.etymology);

    out
}

pub fn render_trending(entries: &[TrendingEntry]) -> String {
    let words: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({})", e.word, e.count))
        .collect();
    format!("Trending: {}", words.join(", "))
}

pub fn render_history(items: &[HistoryItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}  {}", item.timestamp.format("%Y-%m-%d %H:%M"), item.word))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_favorites(items: &[FavoriteItem]) -> String {
    items
        .iter()
        .map(|item| item.word.clone())
        .collect::<Vec<_>>()
        .join("\n")
}
