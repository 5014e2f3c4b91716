use crate::types::{LexicalRecord, TrendingEntry};

/// Sequence number handed out per search; newer searches get larger tickets.
pub type Ticket = u64;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// User submitted a term for lookup
    Search(String),
    /// Lookup finished for the search holding `ticket`
    ShowRecord {
        ticket: Ticket,
        record: LexicalRecord,
    },
    ShowTrending(Vec<TrendingEntry>),
    Status(String),
    Shutdown,
}
