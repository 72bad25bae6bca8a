use thiserror::Error;

/// Errors raised while constructing a combobox.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ComboboxError {
    /// The builder was finished without a selection callback.
    #[error("combobox requires an on_select callback")]
    MissingOnSelect,
}
