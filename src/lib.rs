//! dropsearch library crate: a searchable dropdown widget for ratatui.

pub mod app;
pub mod combobox;
pub mod config;
#[cfg(feature = "harness")]
pub mod fixtures;
#[cfg(feature = "harness")]
pub mod harness;
pub mod ui;
