//! Style types for span-based text rendering
//!
//! This module provides the composable style descriptor attached to
//! highlighting spans, and the draw state it is projected onto when the
//! host renders a character run.

/// A packed ARGB color value (`0xAARRGGBB`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xff00_0000);
    pub const WHITE: Color = Color(0xffff_ffff);
    pub const TRANSPARENT: Color = Color(0);

    /// Create an opaque color from RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xff00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Create a color from ARGB components
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Parse a `#rrggbb` or `#aarrggbb` hex string
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        match hex.len() {
            6 => u32::from_str_radix(hex, 16)
                .ok()
                .map(|v| Self(0xff00_0000 | v)),
            8 => u32::from_str_radix(hex, 16).ok().map(Self),
            _ => None,
        }
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

/// Snapshot of the paint parameters for one character run
///
/// Hosts build one of these per run from their base text appearance and fold
/// the styles of every span covering the run into it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    /// Synthetic bold weight
    pub fake_bold: bool,
    /// Strike-through decoration
    pub strikethrough: bool,
    /// Underline decoration
    pub underline: bool,
    /// Horizontal skew, used to fake italics
    pub skew_x: f32,
    /// Foreground color
    pub color: Color,
    /// Background fill, if any
    pub background: Option<Color>,
    /// Effective text size after scaling
    pub text_size: f32,
    /// Font family override, if any
    pub family: Option<String>,
}

impl DrawState {
    /// Create a draw state with the host's base appearance
    pub fn new(color: Color, text_size: f32) -> Self {
        Self {
            fake_bold: false,
            strikethrough: false,
            underline: false,
            skew_x: 0.0,
            color,
            background: None,
            text_size,
            family: None,
        }
    }
}

/// Skew applied for synthetic italics
const ITALIC_SKEW: f32 = -0.25;

/// A composable character-style descriptor
///
/// Every field is independently optional; `None` means "inherit, do not
/// modify". A configured value doubles as a template: [`instantiate`]
/// stamps a fresh independent copy per rule match, so one descriptor can
/// produce many spans.
///
/// [`instantiate`]: HighlightStyle::instantiate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightStyle {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    /// Multiplier on the inherited text size
    pub text_scale: Option<f32>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

impl HighlightStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    /// Builder: set strike-through
    pub fn with_strike(mut self, strike: bool) -> Self {
        self.strikethrough = Some(strike);
        self
    }

    /// Builder: set the text scale factor
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.text_scale = Some(scale);
        self
    }

    /// Builder: set the foreground color
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Builder: set the background color
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Check whether every field is unset
    ///
    /// An unset descriptor modifies nothing when applied; records carrying
    /// one are dropped at insertion.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Stamp an independent copy of this descriptor
    ///
    /// Rule engines keep one configured template per rule and instantiate it
    /// once per match, so spans never share a live style value.
    pub fn instantiate(&self) -> Self {
        self.clone()
    }

    /// Fold this descriptor into a draw state
    ///
    /// Only set fields are written, in a fixed order (bold, strike,
    /// underline, italic skew, foreground, background, scale) so that
    /// overlapping descriptors compose predictably.
    pub fn apply_to(&self, state: &mut DrawState) {
        if let Some(bold) = self.bold {
            state.fake_bold = bold;
        }
        if let Some(strike) = self.strikethrough {
            state.strikethrough = strike;
        }
        if let Some(underline) = self.underline {
            state.underline = underline;
        }
        if self.italic == Some(true) {
            state.skew_x = ITALIC_SKEW;
        }
        if let Some(color) = self.foreground {
            state.color = color;
        }
        if let Some(color) = self.background {
            state.background = Some(color);
        }
        if let Some(scale) = self.text_scale {
            state.text_size *= scale;
        }
    }
}
