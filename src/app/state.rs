//! Demo screen state owned by the host around the mounted combobox.

/// A confirmed selection as observed by the demo host.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SelectionRecord {
    pub value: String,
    pub at_unix_ms: i64,
}

/// Top-level mutable state of the demo screen.
#[derive(Debug, Default)]
pub struct DemoState {
    pub should_quit: bool,
    pub selections: Vec<SelectionRecord>,
}

impl DemoState {
    pub fn record_selection(&mut self, record: SelectionRecord) {
        self.selections.push(record);
    }

    pub fn last_selection(&self) -> Option<&str> {
        self.selections.last().map(|record| record.value.as_str())
    }
}
