/// Text and focus state of the combobox input field.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    query: String,
    focused: bool,
}

impl QueryInput {
    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
    }

    /// Removes the last character. Returns `false` when there was nothing to remove.
    pub fn backspace(&mut self) -> bool {
        self.query.pop().is_some()
    }

    pub fn set(&mut self, text: &str) {
        self.query.clear();
        self.query.push_str(text);
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }
}
