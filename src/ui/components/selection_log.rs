//! Panel listing confirmed selections, newest first.

use crate::{
    app::state::SelectionRecord,
    ui::{
        components::shared::{short_age, short_preview},
        theme,
    },
};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const AGE_COL_WIDTH: usize = 8;

pub fn render(frame: &mut Frame<'_>, area: Rect, selections: &[SelectionRecord], now_ms: i64) {
    let title = Line::from(vec![
        Span::styled(" Selections ", theme::title()),
        Span::styled(format!("({}) ", selections.len()), theme::dim()),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if selections.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled(" No selections yet.", theme::dim())),
            inner,
        );
        return;
    }

    let value_width = usize::from(inner.width).saturating_sub(AGE_COL_WIDTH + 2);
    let lines: Vec<Line<'_>> = selections
        .iter()
        .rev()
        .take(usize::from(inner.height))
        .map(|record| {
            let age = short_age(record.at_unix_ms, now_ms);
            Line::from(vec![
                Span::styled(format!(" {age:<AGE_COL_WIDTH$}"), theme::dim()),
                Span::styled(short_preview(&record.value, value_width), theme::text()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
