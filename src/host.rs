//! The style-application boundary between the engine and a render buffer
//!
//! The engine never draws. It projects span records onto a host through
//! [`SpanHost`], a deliberately small surface: attach a style over a byte
//! range, detach it by id, report the text. [`StyledBuffer`] is the
//! in-memory reference host, useful for tests and for embedders that render
//! from a plain string.

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::span::{AttachKind, SpanId, SpanStyle};
use crate::style::DrawState;

/// A text buffer that can hold style attachments
///
/// Implementations may hold arbitrarily many simultaneous attachments, but
/// every live dynamic attachment has a rendering cost, so the engine keeps
/// the count down and hosts should expect churn. A host is required to
/// re-measure affected text when a layout-affecting style is attached;
/// that invalidate-on-attach behavior is what the engine's reflow marker
/// relies on.
pub trait SpanHost {
    /// Text length in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The current text snapshot
    fn text(&self) -> &str;

    /// Attach `style` over `range`. Attaching an id that is already
    /// attached replaces its previous range and style.
    fn attach(&mut self, id: SpanId, style: &SpanStyle, range: Range<usize>, attach: AttachKind);

    /// Detach the attachment with this id, if present
    fn detach(&mut self, id: SpanId);
}

/// One live attachment held by a [`StyledBuffer`]
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub id: SpanId,
    pub style: SpanStyle,
    pub range: Range<usize>,
    pub attach: AttachKind,
}

/// In-memory reference host: a string plus its attachments and a cached
/// per-line measurement table
///
/// Measurements stand in for the text metrics a real renderer caches; they
/// are display-cell widths and are recomputed lazily after any layout
/// invalidation.
#[derive(Debug, Default)]
pub struct StyledBuffer {
    text: String,
    attachments: Vec<Attachment>,
    /// Lazily filled display width per line, dropped wholesale on
    /// invalidation
    line_widths: Vec<Option<usize>>,
    reflows: usize,
}

impl StyledBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Attachments in the order they were made
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn attachment(&self, id: SpanId) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.id == id)
    }

    /// How many times cached measurements were invalidated by a
    /// layout-affecting attach
    pub fn reflows(&self) -> usize {
        self.reflows
    }

    /// Replace `range` with `replacement`, the way an editing surface
    /// mutates its backing text
    ///
    /// Out-of-bounds or non-boundary ranges are ignored. Attachments are
    /// not moved; keeping them valid is the span engine's job.
    pub fn splice(&mut self, range: Range<usize>, replacement: &str) {
        if range.start > range.end
            || range.end > self.text.len()
            || !self.text.is_char_boundary(range.start)
            || !self.text.is_char_boundary(range.end)
        {
            return;
        }
        self.text.replace_range(range, replacement);
        self.line_widths.clear();
    }

    /// Measured display width of one line, from cache when warm
    pub fn measure_line(&mut self, line: usize) -> usize {
        if let Some(Some(width)) = self.line_widths.get(line) {
            return *width;
        }
        let width = self
            .text
            .lines()
            .nth(line)
            .map(UnicodeWidthStr::width)
            .unwrap_or(0);
        if self.line_widths.len() <= line {
            self.line_widths.resize(line + 1, None);
        }
        self.line_widths[line] = Some(width);
        width
    }

    /// Whether a measurement for this line is currently cached
    pub fn is_measured(&self, line: usize) -> bool {
        matches!(self.line_widths.get(line), Some(Some(_)))
    }

    /// Fold every attachment covering `position` into a draw state, in
    /// attachment order
    pub fn draw_state_at(&self, position: usize, base: DrawState) -> DrawState {
        let mut state = base;
        for attachment in &self.attachments {
            let covers = attachment.range.contains(&position);
            if covers {
                attachment.style.apply_to(&mut state);
            }
        }
        state
    }

    fn invalidate_layout(&mut self) {
        self.line_widths.clear();
        self.reflows += 1;
    }
}

impl SpanHost for StyledBuffer {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn attach(&mut self, id: SpanId, style: &SpanStyle, range: Range<usize>, attach: AttachKind) {
        self.attachments.retain(|a| a.id != id);
        self.attachments.push(Attachment {
            id,
            style: style.clone(),
            range,
            attach,
        });
        if style.invalidates_layout() {
            self.invalidate_layout();
        }
    }

    fn detach(&mut self, id: SpanId) {
        self.attachments.retain(|a| a.id != id);
    }
}
