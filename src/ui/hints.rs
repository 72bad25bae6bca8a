//! Footer hint composition for the combobox interaction state.

use crate::{combobox::Combobox, ui::components::footer::Hint};

const QUIT: Hint = Hint::new("C-c", "quit");

pub fn build(combobox: &Combobox) -> Vec<Hint> {
    if combobox.is_disabled() {
        return vec![Hint::new("disabled", ""), QUIT];
    }

    if combobox.is_open() {
        return vec![
            Hint::new("type", "filter"),
            Hint::new("up/down", "move"),
            Hint::new("enter/click", "select"),
            Hint::new("esc", "clear"),
            Hint::new("click input", "close"),
            QUIT,
        ];
    }

    if combobox.is_focused() {
        vec![
            Hint::new("type", "search"),
            Hint::new("tab/click", "open"),
            QUIT,
        ]
    } else {
        vec![Hint::new("tab/click", "focus"), QUIT]
    }
}
