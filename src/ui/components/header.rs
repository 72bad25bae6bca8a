//! Header component with app label and current selection.

use crate::ui::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Header payload consumed by the renderer.
#[derive(Debug, Clone)]
pub struct HeaderModel {
    pub app_label: String,
    pub selection: Option<String>,
    pub match_mode: &'static str,
    pub disabled: bool,
}

/// Renders the screen header.
pub fn render(frame: &mut Frame<'_>, area: Rect, model: &HeaderModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut left_spans = vec![Span::styled(format!(" {}", model.app_label), theme::title())];
    match &model.selection {
        Some(selection) => {
            left_spans.push(Span::styled("  selected: ", theme::dim()));
            left_spans.push(Span::styled(selection.clone(), theme::info()));
        }
        None => left_spans.push(Span::styled("  nothing selected", theme::dim())),
    }
    if model.disabled {
        left_spans.push(Span::styled("  (disabled)", theme::disabled()));
    }

    let right = Line::from(vec![
        Span::styled("match ", theme::dim()),
        Span::styled(model.match_mode, theme::text()),
        Span::raw(" "),
    ]);
    let right_width = u16::try_from(right.width()).unwrap_or(u16::MAX);
    let columns =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(right_width)]).split(inner);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), columns[0]);
    frame.render_widget(
        Paragraph::new(right).alignment(Alignment::Right),
        columns[1],
    );
}
