/// One recorded query. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HistoryEntry {
    pub(crate) user: String,
    /// "YYYY-MM-DD HH:MM"
    pub(crate) timestamp: String,
    pub(crate) airport: String,
    pub(crate) result: String,
}

/// Append-only log of the queries made in one session
#[derive(Debug, Default)]
pub(crate) struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Most recent first. Does not touch the stored order.
    pub(crate) fn list_reversed(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + Clone {
        self.entries.iter().rev()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
