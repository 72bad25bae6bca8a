//! Combobox renderer: the input box plus its dropdown panel.

use crate::{
    combobox::{Combobox, ComboboxLayout, DropdownView},
    ui::theme,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Scrollbar,
        ScrollbarOrientation, ScrollbarState,
    },
};

/// Maximum number of option rows shown before the panel scrolls.
pub const MAX_PANEL_ROWS: u16 = 8;

pub struct ComboboxProps<'a> {
    pub title: &'a str,
}

/// Draws the input into `input_area` and, while open, the panel directly
/// beneath it inside `panel_bounds`. Records the drawn layout on the widget
/// for pointer hit-testing.
pub fn render(
    frame: &mut Frame<'_>,
    input_area: Rect,
    panel_bounds: Rect,
    combobox: &mut Combobox,
    props: ComboboxProps<'_>,
) {
    render_input(frame, input_area, combobox, &props);

    if !combobox.is_open() {
        combobox.record_layout(ComboboxLayout {
            input: input_area,
            panel: None,
            list: None,
        });
        return;
    }

    let filtered_len = combobox.filtered_options().len();
    let shows_notfound = filtered_len == 0 && !combobox.query().is_empty();
    let content_rows = if shows_notfound {
        1
    } else {
        u16::try_from(filtered_len)
            .unwrap_or(u16::MAX)
            .clamp(1, MAX_PANEL_ROWS)
    };

    let panel = Rect {
        height: content_rows.saturating_add(2).min(panel_bounds.height),
        ..panel_bounds
    };
    if panel.height < 3 {
        combobox.record_layout(ComboboxLayout {
            input: input_area,
            panel: None,
            list: None,
        });
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::focus_border());
    let inner = block.inner(panel);

    if !shows_notfound {
        combobox.set_viewport_height(inner.height);
    }

    frame.render_widget(Clear, panel);
    frame.render_widget(block, panel);

    let list = match combobox.view() {
        DropdownView::Closed => None,
        DropdownView::NotFound(text) => {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::raw(" "),
                    Span::styled(text.to_owned(), theme::notfound()),
                ])),
                inner,
            );
            None
        }
        DropdownView::List {
            items,
            focused,
            offset,
        } => Some(render_list(frame, inner, &items, focused, offset)),
    };

    // Only the option rows are clickable; the scrollbar column stays panel.
    combobox.record_layout(ComboboxLayout {
        input: input_area,
        panel: Some(panel),
        list,
    });
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    combobox: &Combobox,
    props: &ComboboxProps<'_>,
) {
    let focused = combobox.is_focused() && !combobox.is_disabled();
    let (title_style, border_style) = if combobox.is_disabled() {
        (theme::disabled(), theme::disabled())
    } else if focused {
        (theme::info(), theme::focus_border())
    } else {
        (theme::title(), theme::border())
    };

    let indicator = if combobox.is_open() { "▴ " } else { "▾ " };
    let title = Line::from(vec![
        Span::styled(format!(" {} ", props.title), title_style),
        Span::styled(indicator, theme::dim()),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let (value, value_style) = if combobox.query().is_empty() {
        (combobox.placeholder().to_owned(), theme::dim())
    } else if combobox.is_disabled() {
        (combobox.query().to_owned(), theme::disabled())
    } else {
        (combobox.query().to_owned(), theme::text())
    };

    let mut spans = vec![Span::raw("  "), Span::styled(value, value_style)];
    if focused {
        spans.push(Span::styled("|", theme::info()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Renders the option rows and, when they overflow, a scrollbar in the last
/// column. Returns the area the rows occupy.
fn render_list(
    frame: &mut Frame<'_>,
    area: Rect,
    items: &[&str],
    focused: usize,
    offset: usize,
) -> Rect {
    let (list_area, scrollbar_area) = if items.len() > usize::from(area.height) && area.width > 1
    {
        let columns = Layout::horizontal([Constraint::Min(1), Constraint::Length(1)]).split(area);
        (columns[0], Some(columns[1]))
    } else {
        (area, None)
    };

    let rows: Vec<ListItem<'_>> = items
        .iter()
        .map(|item| ListItem::new(Line::styled(*item, theme::text())))
        .collect();

    let list = List::new(rows)
        .highlight_style(theme::selected())
        .highlight_symbol("▸ ")
        .highlight_spacing(HighlightSpacing::Always);

    let mut list_state = ListState::default()
        .with_offset(offset)
        .with_selected((!items.is_empty()).then_some(focused));
    frame.render_stateful_widget(list, list_area, &mut list_state);

    let Some(scrollbar_area) = scrollbar_area else {
        return list_area;
    };
    let viewport_height = usize::from(list_area.height);
    let max_scroll = items.len().saturating_sub(viewport_height);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_style(theme::dim())
        .thumb_style(theme::title());
    let mut scrollbar_state = ScrollbarState::new(max_scroll.saturating_add(1))
        .viewport_content_length(viewport_height)
        .position(list_state.offset().min(max_scroll));
    frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    list_area
}

#[cfg(test)]
mod tests {
    use super::{ComboboxProps, render};
    use crate::combobox::{Combobox, Transition};
    use ratatui::{
        Terminal,
        backend::TestBackend,
        layout::{Position, Rect},
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    fn combobox(options: &[&str]) -> Combobox {
        Combobox::builder()
            .options(options.iter().copied())
            .placeholder("Search a place...")
            .on_select(|_| {})
            .build()
            .unwrap()
    }

    fn draw(combobox: &mut Combobox, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let input = Rect::new(0, 0, width, 3);
                let below = Rect::new(0, 3, width, height - 3);
                render(
                    frame,
                    input,
                    below,
                    combobox,
                    ComboboxProps { title: "Place" },
                );
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                let mut line = String::new();
                for x in 0..width {
                    line.push_str(buffer[(x, y)].symbol());
                }
                line.trim_end().to_owned()
            })
            .collect()
    }

    #[test]
    fn closed_combobox_shows_placeholder_only() {
        let mut combobox = combobox(&["Kerala", "Kochi"]);
        let lines = draw(&mut combobox, 30, 10);

        assert!(lines[1].contains("Search a place..."));
        assert!(!lines.iter().any(|line| line.contains("Kochi")));
        let layout = combobox.layout().unwrap();
        assert_eq!(layout.panel, None);
    }

    #[test]
    fn open_combobox_lists_options_and_marks_focus() {
        let mut combobox = combobox(&["Kerala", "Kochi", "Kottayam"]);
        combobox.focus();
        combobox.move_down();
        let lines = draw(&mut combobox, 30, 12);

        assert!(lines[4].contains("Kerala"));
        assert!(lines[5].contains("▸ Kochi"));
        assert!(lines[6].contains("Kottayam"));
        assert_eq!(combobox.layout().unwrap().list, Some(Rect::new(1, 4, 28, 3)));
    }

    #[test]
    fn unmatched_query_renders_notfound_text() {
        let mut combobox = Combobox::builder()
            .options(["Kerala"])
            .notfound("nothing here")
            .on_select(|_| {})
            .build()
            .unwrap();
        combobox.focus();
        for ch in "xyz".chars() {
            combobox.input_char(ch);
        }
        let lines = draw(&mut combobox, 30, 10);

        assert!(lines[1].contains("xyz|"));
        assert!(lines[4].contains("nothing here"));
        assert_eq!(combobox.layout().unwrap().list, None);
    }

    #[test]
    fn long_lists_scroll_focused_entry_into_view() {
        let options: Vec<String> = (0..20).map(|index| format!("option {index:02}")).collect();
        let mut combobox = Combobox::builder()
            .options(options)
            .on_select(|_| {})
            .build()
            .unwrap();
        combobox.focus();
        draw(&mut combobox, 30, 14);

        for _ in 0..12 {
            combobox.move_down();
        }
        let lines = draw(&mut combobox, 30, 14);

        assert!(lines.iter().any(|line| line.contains("▸ option 12")));
        assert!(!lines.iter().any(|line| line.contains("option 00")));
        assert_eq!(combobox.scroll_offset(), 5);
    }

    #[test]
    fn scrollbar_column_is_not_an_option_row() {
        let options: Vec<String> = (0..20).map(|index| format!("opt {index}")).collect();
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selected);
        let mut combobox = Combobox::builder()
            .options(options)
            .on_select(move |value| sink.borrow_mut().push(value.to_owned()))
            .build()
            .unwrap();
        combobox.focus();
        draw(&mut combobox, 30, 14);

        let layout = combobox.layout().unwrap();
        assert_eq!(layout.panel, Some(Rect::new(0, 3, 30, 10)));
        assert_eq!(layout.list, Some(Rect::new(1, 4, 27, 8)));

        assert_eq!(
            combobox.handle_pointer_down(Position::new(28, 6)),
            Transition::Ignored
        );
        assert!(combobox.is_open());
        assert!(selected.borrow().is_empty());

        assert_eq!(
            combobox.handle_pointer_down(Position::new(5, 6)),
            Transition::Selected("opt 2".to_owned())
        );
    }
}
