//! Top-level UI composition for the demo screen.

use crate::{
    app::state::DemoState,
    combobox::MountedCombobox,
    ui::components::{
        combobox::{self, ComboboxProps},
        footer,
        header::{self, HeaderModel},
        selection_log,
        shared::now_unix_ms,
    },
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

pub mod components;
mod hints;
pub mod theme;

const LOG_PANEL_WIDTH: u16 = 34;

/// Draws the demo screen using the current wall clock for selection ages.
pub fn render(frame: &mut Frame<'_>, state: &DemoState, mounted: &MountedCombobox) {
    render_at(frame, state, mounted, now_unix_ms());
}

/// Draws the demo screen with an explicit clock, for deterministic output.
pub fn render_at(frame: &mut Frame<'_>, state: &DemoState, mounted: &MountedCombobox, now_ms: i64) {
    let mut widget = mounted.state_mut();
    let hints = hints::build(&widget);

    let root = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(footer::required_height(frame.area().width, &hints)),
    ])
    .split(frame.area());

    header::render(
        frame,
        root[0],
        &HeaderModel {
            app_label: "dropsearch".to_owned(),
            selection: state.last_selection().map(str::to_owned),
            match_mode: widget.match_mode().label(),
            disabled: widget.is_disabled(),
        },
    );

    let body = Layout::horizontal([Constraint::Min(24), Constraint::Length(LOG_PANEL_WIDTH)])
        .split(root[1]);
    let picker = body[0];
    let input_area = Rect {
        height: picker.height.min(3),
        ..picker
    };
    let panel_bounds = Rect {
        y: input_area.bottom(),
        height: picker.height.saturating_sub(input_area.height),
        ..picker
    };

    selection_log::render(frame, body[1], &state.selections, now_ms);
    combobox::render(
        frame,
        input_area,
        panel_bounds,
        &mut widget,
        ComboboxProps { title: "Place" },
    );

    footer::render(frame, root[2], &hints);
}
