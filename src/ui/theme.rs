//! Shared styles for the TUI.

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::sync::{OnceLock, RwLock};

/// Base palette selection before per-color overrides are applied.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    /// Follow the terminal/OS appearance.
    #[default]
    Auto,
    Dark,
    Light,
}

impl ThemeMode {
    /// Resolves `Auto` to a concrete palette using OS appearance detection.
    pub fn resolve(self) -> ThemePalette {
        match self {
            Self::Dark => ThemePalette::dark(),
            Self::Light => ThemePalette::light(),
            Self::Auto => match dark_light::detect() {
                Ok(dark_light::Mode::Light) => ThemePalette::light(),
                _ => ThemePalette::dark(),
            },
        }
    }
}

/// Runtime theme palette used by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    pub border: Color,
    pub focus_border: Color,
    pub title: Color,
    pub dim: Color,
    pub text: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub notfound: Color,
    pub disabled: Color,
    pub info: Color,
    pub hint_key: Color,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::dark()
    }
}

impl ThemePalette {
    pub fn dark() -> Self {
        Self {
            border: Color::Rgb(196, 120, 50),
            focus_border: Color::Yellow,
            title: Color::Rgb(235, 170, 90),
            dim: Color::DarkGray,
            text: Color::Rgb(210, 210, 200),
            selected_fg: Color::Black,
            selected_bg: Color::Rgb(226, 180, 92),
            notfound: Color::Rgb(231, 178, 88),
            disabled: Color::Rgb(110, 110, 104),
            info: Color::Cyan,
            hint_key: Color::Yellow,
        }
    }

    pub fn light() -> Self {
        Self {
            border: Color::Rgb(150, 88, 30),
            focus_border: Color::Rgb(176, 120, 0),
            title: Color::Rgb(140, 70, 10),
            dim: Color::Gray,
            text: Color::Rgb(40, 40, 36),
            selected_fg: Color::White,
            selected_bg: Color::Rgb(168, 104, 24),
            notfound: Color::Rgb(160, 90, 20),
            disabled: Color::Rgb(160, 160, 154),
            info: Color::Blue,
            hint_key: Color::Rgb(176, 120, 0),
        }
    }
}

static ACTIVE_THEME: OnceLock<RwLock<ThemePalette>> = OnceLock::new();

fn store() -> &'static RwLock<ThemePalette> {
    ACTIVE_THEME.get_or_init(|| RwLock::new(ThemePalette::default()))
}

fn with_palette<T>(f: impl FnOnce(&ThemePalette) -> T) -> T {
    match store().read() {
        Ok(guard) => f(&guard),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

/// Installs the active runtime theme palette.
pub fn apply(palette: ThemePalette) {
    if let Ok(mut guard) = store().write() {
        *guard = palette;
    }
}

pub fn border() -> Style {
    with_palette(|theme| Style::default().fg(theme.border))
}

pub fn focus_border() -> Style {
    with_palette(|theme| Style::default().fg(theme.focus_border))
}

pub fn title() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD)
    })
}

pub fn dim() -> Style {
    with_palette(|theme| Style::default().fg(theme.dim))
}

pub fn text() -> Style {
    with_palette(|theme| Style::default().fg(theme.text))
}

pub fn selected() -> Style {
    with_palette(|theme| Style::default().fg(theme.selected_fg).bg(theme.selected_bg))
}

pub fn notfound() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.notfound)
            .add_modifier(Modifier::ITALIC)
    })
}

pub fn disabled() -> Style {
    with_palette(|theme| Style::default().fg(theme.disabled))
}

pub fn info() -> Style {
    with_palette(|theme| Style::default().fg(theme.info))
}

pub fn hint_key() -> Style {
    with_palette(|theme| Style::default().fg(theme.hint_key))
}
