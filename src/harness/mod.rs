//! Visual harness for deterministic rendering snapshots.

use crate::app::events::HostMessage;
use crate::app::state::DemoState;
use crate::app::{self, AppConfig};
use crate::combobox::listeners::GlobalListeners;
use crate::combobox::{ComboboxEvent, MountedCombobox};
use crate::config::ComboboxConfig;
use crate::fixtures;
use crate::ui;
use anyhow::Context;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Fixed clock used for selection ages in harness frames.
const HARNESS_NOW_MS: i64 = 1_800_000_000_000;

struct Scenario {
    title: &'static str,
    events: &'static [ComboboxEvent],
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        title: "CLOSED",
        events: &[],
    },
    Scenario {
        title: "OPEN",
        events: &[ComboboxEvent::Focus, ComboboxEvent::ArrowDown],
    },
    Scenario {
        title: "FILTERED",
        events: &[
            ComboboxEvent::Focus,
            ComboboxEvent::Input('k'),
            ComboboxEvent::Input('o'),
            ComboboxEvent::Input('t'),
        ],
    },
    Scenario {
        title: "NOT FOUND",
        events: &[
            ComboboxEvent::Focus,
            ComboboxEvent::Input('x'),
            ComboboxEvent::Input('y'),
            ComboboxEvent::Input('z'),
        ],
    },
    Scenario {
        title: "SELECTED",
        events: &[
            ComboboxEvent::Focus,
            ComboboxEvent::Input('k'),
            ComboboxEvent::Input('o'),
            ComboboxEvent::Input('c'),
            ComboboxEvent::Enter,
        ],
    },
];

/// Renders the demo screen in several interaction states into plain text.
pub fn render_demo_dump(width: u16, height: u16) -> anyhow::Result<String> {
    let mut out = String::new();
    for scenario in SCENARIOS {
        let text = render_scenario(scenario.events, width, height)
            .with_context(|| format!("failed to render {} frame", scenario.title))?;
        out.push_str(&format!("=== {} ===\n{text}\n", scenario.title));
    }
    Ok(out)
}

fn render_scenario(events: &[ComboboxEvent], width: u16, height: u16) -> anyhow::Result<String> {
    let (tx, mut rx) = mpsc::unbounded_channel::<HostMessage>();
    let listeners = GlobalListeners::new();
    let config = AppConfig {
        options: fixtures::demo_options(),
        combobox: ComboboxConfig {
            placeholder: "Search a place...".to_owned(),
            ..ComboboxConfig::default()
        },
    };
    let mounted = app::build_combobox(&config, tx)?.mount(&listeners);
    let mut state = DemoState::default();

    for event in events {
        mounted.state_mut().handle(*event);
    }
    settle(&mut state, &mut rx);

    render_state_to_string(&state, &mounted, width, height)
}

fn settle(state: &mut DemoState, rx: &mut UnboundedReceiver<HostMessage>) {
    app::drain_messages(state, rx);
    for record in &mut state.selections {
        record.at_unix_ms = HARNESS_NOW_MS - 5_000;
    }
}

fn render_state_to_string(
    state: &DemoState,
    mounted: &MountedCombobox,
    width: u16,
    height: u16,
) -> anyhow::Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).context("failed to create test terminal")?;

    terminal
        .draw(|frame| ui::render_at(frame, state, mounted, HARNESS_NOW_MS))
        .context("failed to render frame")?;

    let buffer = terminal.backend().buffer().clone();

    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\n');
    }

    Ok(out)
}
