//! Demo runtime, event loop, and input routing.

pub mod editor;
pub mod events;
pub mod state;

use crate::app::events::HostMessage;
use crate::app::state::DemoState;
use crate::combobox::listeners::{GlobalEvent, GlobalListeners};
use crate::combobox::{Combobox, MountedCombobox};
use crate::config::ComboboxConfig;
use crate::ui;
use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{Stdout, stdout};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

/// Runtime configuration resolved from config file and CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub options: Vec<String>,
    pub combobox: ComboboxConfig,
}

/// Runs the interactive demo.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<HostMessage>();
    let listeners = GlobalListeners::new();
    let mounted = build_combobox(&config, tx)?.mount(&listeners);
    let mut state = DemoState::default();

    info!(
        options = config.options.len(),
        disabled = config.combobox.disabled,
        "starting demo"
    );

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut state, &mounted, &listeners, &mut rx).await;

    restore_terminal(&mut terminal)?;
    drop(mounted);
    info!(selections = state.selections.len(), "demo finished");
    result
}

/// Builds the demo combobox with a callback that forwards selections to `tx`.
pub fn build_combobox(
    config: &AppConfig,
    tx: UnboundedSender<HostMessage>,
) -> anyhow::Result<Combobox> {
    Combobox::builder()
        .options(config.options.iter().cloned())
        .placeholder(config.combobox.placeholder.clone())
        .notfound(config.combobox.notfound.clone())
        .disabled(config.combobox.disabled)
        .match_mode(config.combobox.match_mode)
        .on_select(events::selection_callback(tx))
        .build()
        .context("failed to build demo combobox")
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut DemoState,
    mounted: &MountedCombobox,
    listeners: &GlobalListeners,
    rx: &mut UnboundedReceiver<HostMessage>,
) -> anyhow::Result<()> {
    loop {
        drain_messages(state, rx);

        terminal.draw(|frame| ui::render(frame, state, mounted))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(60))? {
            route_event(state, mounted, listeners, event::read()?);
        }
    }

    Ok(())
}

/// Applies pending host messages to the demo state.
pub fn drain_messages(state: &mut DemoState, rx: &mut UnboundedReceiver<HostMessage>) {
    while let Ok(message) = rx.try_recv() {
        match message {
            HostMessage::Selected(record) => state.record_selection(record),
        }
    }
}

/// Routes one terminal event. Host shortcuts are handled here; every other
/// key press and left click goes to the global listeners.
pub fn route_event(
    state: &mut DemoState,
    mounted: &MountedCombobox,
    listeners: &GlobalListeners,
    event: Event,
) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            route_key(state, mounted, listeners, key);
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => {
            listeners.dispatch(&GlobalEvent::MouseDown { column, row });
        }
        _ => {}
    }
}

fn route_key(
    state: &mut DemoState,
    mounted: &MountedCombobox,
    listeners: &GlobalListeners,
    key: KeyEvent,
) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            debug!("quit requested");
            state.should_quit = true;
        }
        return;
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        return;
    }

    if key.code == KeyCode::Tab {
        mounted.state_mut().focus();
        return;
    }

    listeners.dispatch(&GlobalEvent::Key(key.code));
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;

    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(out);
    let terminal = Terminal::new(backend).context("failed to create ratatui terminal")?;

    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;

    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}
