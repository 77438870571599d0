//! Highlighter configuration
//!
//! Values the engine reads once per `configure` call and caches for the
//! next compute pass. Rule sets must never reach for ambient settings in
//! the middle of a pass; everything they need is on this struct.
//!
//! The on-disk format is TOML:
//!
//! ```toml
//! delay-ms = 650
//! tab-width = 4
//! dark-mode = true
//! text-color = "#e0e0e0"
//! font-family = "sans-serif"
//! ```

use std::fs;
use std::path::Path;

use toml::Value;

use crate::error::Result;
use crate::style::Color;

/// Configuration values for one highlighter
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightConfig {
    /// Debounce delay between an edit and the recompute it triggers, in
    /// milliseconds. The engine only publishes this value; debouncing is
    /// owned by the caller.
    pub delay_ms: u64,
    /// Tab width in columns, used for tab-stop replacement spans
    pub tab_width: usize,
    /// Whether the host renders on a dark background
    pub dark_mode: bool,
    /// Base text color of the editing surface
    pub text_color: Color,
    /// Font family of the editing surface; empty means host default
    pub font_family: String,
}

impl HighlightConfig {
    /// Conservative delay for large documents
    pub const LONG_DELAY_MS: u64 = 2400;

    const MIN_DELAY_MS: u64 = 100;
    const MAX_DELAY_MS: u64 = 10_000;

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Parse configuration from a TOML string
    ///
    /// Unknown keys are ignored; recognized keys with out-of-range values
    /// are clamped, and malformed values fall back to the default.
    pub fn parse(contents: &str) -> Result<Self> {
        let table: toml::Table = contents.parse()?;
        let mut config = Self::default();
        config.apply(&table);
        Ok(config)
    }

    fn apply(&mut self, table: &toml::Table) {
        if let Some(value) = table.get("delay-ms").and_then(Value::as_integer) {
            self.delay_ms =
                (value.max(0) as u64).clamp(Self::MIN_DELAY_MS, Self::MAX_DELAY_MS);
        }

        if let Some(value) = table.get("tab-width").and_then(Value::as_integer) {
            self.tab_width = (value.max(0) as usize).clamp(1, 16);
        }

        if let Some(value) = table.get("dark-mode").and_then(Value::as_bool) {
            self.dark_mode = value;
        }

        if let Some(value) = table.get("text-color").and_then(Value::as_str) {
            if let Some(color) = Color::parse(value) {
                self.text_color = color;
            }
        }

        if let Some(value) = table.get("font-family").and_then(Value::as_str) {
            self.font_family = value.to_string();
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            delay_ms: Self::LONG_DELAY_MS,
            tab_width: 4,
            dark_mode: false,
            text_color: Color::BLACK,
            font_family: String::new(),
        }
    }
}
