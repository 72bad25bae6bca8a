//! Footer component used for keybinding hints.

use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// A single `[key] description` hint.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Hint {
    pub key: &'static str,
    pub desc: &'static str,
}

impl Hint {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }

    fn width(&self) -> usize {
        // Brackets around the key plus the separating space.
        let key_width = self.key.chars().count() + 2;
        let desc_width = self.desc.chars().count();
        if desc_width == 0 {
            key_width
        } else {
            key_width + 1 + desc_width
        }
    }
}

/// Returns the footer height required to render all hints for the given terminal width.
pub fn required_height(screen_width: u16, hints: &[Hint]) -> u16 {
    let width = usize::from(screen_width.max(1));
    wrap_hints(hints, width).len().max(1) as u16
}

/// Renders keybinding hints in a plain bottom bar.
pub fn render(frame: &mut Frame<'_>, area: Rect, hints: &[Hint]) {
    let width = usize::from(area.width.max(1));
    let rows = wrap_hints(hints, width);
    let text: Vec<Line<'static>> = if rows.is_empty() {
        vec![Line::from(" ")]
    } else {
        rows.iter().map(|row| styled_hint_line(row)).collect()
    };

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn wrap_hints(hints: &[Hint], width: usize) -> Vec<Vec<Hint>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = Vec::<Hint>::new();
    let mut current_width = 0usize;

    for hint in hints {
        let hint_width = hint.width();
        let separator_width = if current.is_empty() { 0 } else { 2 };
        let projected_width = current_width + separator_width + hint_width;

        if projected_width <= width {
            current.push(*hint);
            current_width = projected_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }

        current_width = hint_width.min(width);
        current.push(*hint);
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}

fn styled_hint_line(hints: &[Hint]) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    for (index, hint) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", theme::dim()));
        }
        spans.push(Span::styled(format!("[{}]", hint.key), theme::hint_key()));
        if !hint.desc.is_empty() {
            spans.push(Span::styled(" ", theme::dim()));
            spans.push(Span::styled(hint.desc, theme::dim()));
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::{Hint, required_height, wrap_hints};

    const HINTS: [Hint; 3] = [
        Hint::new("tab", "focus"),
        Hint::new("enter", "select"),
        Hint::new("esc", "dismiss"),
    ];

    #[test]
    fn hints_fit_on_one_line_when_wide() {
        assert_eq!(wrap_hints(&HINTS, 80).len(), 1);
        assert_eq!(required_height(80, &HINTS), 1);
    }

    #[test]
    fn hints_wrap_when_narrow() {
        let rows = wrap_hints(&HINTS, 16);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][0].key, "enter");
    }

    #[test]
    fn no_hints_still_reserve_a_line() {
        assert_eq!(required_height(40, &[]), 1);
    }
}
