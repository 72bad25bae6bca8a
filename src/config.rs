//! User configuration loading from `~/.dropsearch/config.toml`.

use crate::combobox::{DEFAULT_NOTFOUND, MatchMode};
use crate::ui::theme::{ThemeMode, ThemePalette};
use anyhow::{Context, Result, anyhow};
use ratatui::style::Color;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".dropsearch";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "dropsearch.log";

const DEFAULT_CONFIG_TOML: &str = r##"# dropsearch configuration
# Colors accept `#RRGGBB` or named ANSI colors (e.g. "yellow", "dark_gray").

[theme]
# "auto" follows the OS appearance; "dark" or "light" pins a base palette.
mode = "auto"
# border = "#c47832"
# focus_border = "yellow"
# title = "#ebaa5a"
# dim = "dark_gray"
# text = "#d2d2c8"
# selected_fg = "black"
# selected_bg = "#e2b45c"
# notfound = "#e7b258"
# disabled = "#6e6e68"
# info = "cyan"
# hint_key = "yellow"

[combobox]
placeholder = "Search a place..."
notfound = "notfound"
disabled = false
# "substring" or "fuzzy"
match_mode = "substring"

[demo]
options = [
  "Alappuzha",
  "Ernakulam",
  "Idukki",
  "Kannur",
  "Kasaragod",
  "Kerala",
  "Kochi",
  "Kollam",
  "Kottayam",
  "Kozhikode",
  "Malappuram",
  "Palakkad",
  "Pathanamthitta",
  "Thiruvananthapuram",
  "Thrissur",
  "Wayanad",
]

[log]
level = "info"
"##;

/// Application configuration loaded from disk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub theme: ThemePalette,
    pub combobox: ComboboxConfig,
    pub options: Vec<String>,
    pub log_level: String,
}

/// Combobox construction defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboboxConfig {
    pub placeholder: String,
    pub notfound: String,
    pub disabled: bool,
    pub match_mode: MatchMode,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            notfound: DEFAULT_NOTFOUND.to_owned(),
            disabled: false,
            match_mode: MatchMode::Substring,
        }
    }
}

/// Returns the config file path and creates default config if missing.
pub fn ensure_config_file() -> Result<PathBuf> {
    let path = config_path()?;
    ensure_default_config(&path)?;
    Ok(path)
}

/// Returns the path of the log file next to the config file.
pub fn log_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(LOG_FILE))
}

/// Loads configuration from `~/.dropsearch/config.toml`, creating defaults if missing.
pub fn load_or_create() -> Result<AppConfig> {
    let path = ensure_config_file()?;
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;

    parse(&content).with_context(|| format!("invalid configuration in {}", path.display()))
}

/// Parses configuration TOML. Missing tables and keys fall back to defaults.
pub fn parse(content: &str) -> Result<AppConfig> {
    let raw: RawConfig = toml::from_str(content).context("failed to parse TOML")?;
    let theme = raw.theme.into_theme()?;
    let defaults = ComboboxConfig::default();

    Ok(AppConfig {
        theme,
        combobox: ComboboxConfig {
            placeholder: raw.combobox.placeholder.unwrap_or(defaults.placeholder),
            notfound: raw.combobox.notfound.unwrap_or(defaults.notfound),
            disabled: raw.combobox.disabled.unwrap_or(defaults.disabled),
            match_mode: raw.combobox.match_mode.unwrap_or(defaults.match_mode),
        },
        options: raw.demo.options.unwrap_or_default(),
        log_level: raw.log.level.unwrap_or_else(|| "info".to_owned()),
    })
}

fn config_dir() -> Result<PathBuf> {
    let home =
        env::var_os("HOME").ok_or_else(|| anyhow!("HOME environment variable is not set"))?;
    Ok(PathBuf::from(home).join(CONFIG_DIR))
}

fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

fn ensure_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    let dir = path
        .parent()
        .ok_or_else(|| anyhow!("invalid config path: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write default config file {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    theme: RawTheme,
    combobox: RawCombobox,
    demo: RawDemo,
    log: RawLog,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCombobox {
    placeholder: Option<String>,
    notfound: Option<String>,
    disabled: Option<bool>,
    match_mode: Option<MatchMode>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDemo {
    options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLog {
    level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawTheme {
    mode: ThemeMode,
    border: Option<String>,
    focus_border: Option<String>,
    title: Option<String>,
    dim: Option<String>,
    text: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    notfound: Option<String>,
    disabled: Option<String>,
    info: Option<String>,
    hint_key: Option<String>,
}

impl RawTheme {
    fn into_theme(self) -> Result<ThemePalette> {
        let base = self.mode.resolve();

        Ok(ThemePalette {
            border: parse_or_default(self.border, base.border, "theme.border")?,
            focus_border: parse_or_default(
                self.focus_border,
                base.focus_border,
                "theme.focus_border",
            )?,
            title: parse_or_default(self.title, base.title, "theme.title")?,
            dim: parse_or_default(self.dim, base.dim, "theme.dim")?,
            text: parse_or_default(self.text, base.text, "theme.text")?,
            selected_fg: parse_or_default(self.selected_fg, base.selected_fg, "theme.selected_fg")?,
            selected_bg: parse_or_default(self.selected_bg, base.selected_bg, "theme.selected_bg")?,
            notfound: parse_or_default(self.notfound, base.notfound, "theme.notfound")?,
            disabled: parse_or_default(self.disabled, base.disabled, "theme.disabled")?,
            info: parse_or_default(self.info, base.info, "theme.info")?,
            hint_key: parse_or_default(self.hint_key, base.hint_key, "theme.hint_key")?,
        })
    }
}

fn parse_or_default(value: Option<String>, default: Color, field: &str) -> Result<Color> {
    match value {
        Some(raw) => parse_color(raw.trim())
            .with_context(|| format!("invalid color value for `{field}`: {raw}")),
        None => Ok(default),
    }
}

fn parse_color(raw: &str) -> Result<Color> {
    if let Some(hex) = raw.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(anyhow!("hex colors must be in #RRGGBB format"));
        }
        let red = u8::from_str_radix(&hex[0..2], 16).context("invalid red hex channel")?;
        let green = u8::from_str_radix(&hex[2..4], 16).context("invalid green hex channel")?;
        let blue = u8::from_str_radix(&hex[4..6], 16).context("invalid blue hex channel")?;
        return Ok(Color::Rgb(red, green, blue));
    }

    let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    let color = match normalized.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark_gray" | "dark_grey" => Color::DarkGray,
        "light_red" => Color::LightRed,
        "light_green" => Color::LightGreen,
        "light_yellow" => Color::LightYellow,
        "light_blue" => Color::LightBlue,
        "light_magenta" => Color::LightMagenta,
        "light_cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return Err(anyhow!("unsupported color format")),
    };

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CONFIG_TOML, parse, parse_color};
    use crate::combobox::MatchMode;
    use crate::ui::theme::ThemePalette;
    use ratatui::style::Color;

    #[test]
    fn parse_color_supports_hex() {
        assert_eq!(
            parse_color("#112233").unwrap(),
            Color::Rgb(0x11, 0x22, 0x33)
        );
    }

    #[test]
    fn parse_color_supports_named_values() {
        assert_eq!(parse_color("light_yellow").unwrap(), Color::LightYellow);
        assert_eq!(parse_color("dark-gray").unwrap(), Color::DarkGray);
    }

    #[test]
    fn default_config_parses() {
        let config = parse(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.combobox.notfound, "notfound");
        assert_eq!(config.combobox.match_mode, MatchMode::Substring);
        assert!(config.options.contains(&"Kottayam".to_owned()));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let config = parse("[theme]\nmode = \"dark\"\n").unwrap();
        assert!(config.options.is_empty());
        assert_eq!(config.combobox.placeholder, "");
        assert_eq!(config.combobox.notfound, "notfound");
        assert!(!config.combobox.disabled);
        assert_eq!(config.theme, ThemePalette::dark());
    }

    #[test]
    fn overrides_apply_on_top_of_base_palette() {
        let config = parse(
            "[theme]\nmode = \"light\"\nborder = \"#010203\"\n\n[combobox]\nmatch_mode = \"fuzzy\"\ndisabled = true\n",
        )
        .unwrap();
        assert_eq!(config.theme.border, Color::Rgb(1, 2, 3));
        assert_eq!(config.theme.text, ThemePalette::light().text);
        assert_eq!(config.combobox.match_mode, MatchMode::Fuzzy);
        assert!(config.combobox.disabled);
    }

    #[test]
    fn invalid_color_names_the_field() {
        let error = parse("[theme]\nmode = \"dark\"\ntitle = \"chartreuse\"\n").unwrap_err();
        assert!(format!("{error:#}").contains("theme.title"));
    }

    #[test]
    fn unknown_match_mode_is_rejected() {
        assert!(parse("[combobox]\nmatch_mode = \"regex\"\n").is_err());
    }
}
