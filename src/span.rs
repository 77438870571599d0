//! Span records: one styling annotation over a half-open text range
//!
//! A record couples a style payload with the byte range it covers, a
//! statically decided [`SpanKind`], and the boundary-growth semantics the
//! host applies when text is edited at the span edges.

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::style::{Color, DrawState, HighlightStyle};

/// Engine-assigned handle identifying one attachment at the host boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpanId(u64);

impl SpanId {
    /// Reserved id of the internal zero-effect layout marker used by
    /// [`reflow`](crate::Highlighter::reflow). Never assigned to a record.
    pub const LAYOUT_MARKER: SpanId = SpanId(0);

    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        SpanId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// How a span participates in the apply pipeline
///
/// The kind is decided once, at record construction, and never re-derived
/// from the style payload afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Appearance-only styling, applied and removed per viewport
    Dynamic,
    /// Layout-affecting styling the host re-measures on attach by itself
    StaticLayout,
    /// Layout-affecting styling invisible to the host; the engine must
    /// force a reflow after attaching it
    StaticReflow,
}

impl SpanKind {
    /// Static spans are applied once per computation cycle, never churned
    /// while scrolling
    pub fn is_static(self) -> bool {
        !matches!(self, SpanKind::Dynamic)
    }

    /// Whether attaching this span requires an explicit reflow
    pub fn needs_reflow(self) -> bool {
        matches!(self, SpanKind::StaticReflow)
    }
}

/// Boundary-growth semantics for edits adjacent to a span
///
/// Forwarded verbatim to the host; an exclusive boundary does not absorb
/// text inserted exactly at that edge, an inclusive one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachKind {
    #[default]
    ExclusiveExclusive,
    InclusiveExclusive,
    ExclusiveInclusive,
    InclusiveInclusive,
}

/// The style payload carried by a span record
#[derive(Debug, Clone, PartialEq)]
pub enum SpanStyle {
    /// Composable character styling, safe to churn per viewport
    Highlight(HighlightStyle),
    /// Font family change for the covered range
    Typeface(String),
    /// Fixed-width replacement of the covered range (tab stops)
    Replacement { width: u32 },
    /// Zero-effect marker whose attach/detach cycle forces the host to
    /// re-measure the covered range
    LayoutMarker,
}

impl SpanStyle {
    /// Shorthand for a monospace typeface payload
    pub fn monospace() -> Self {
        SpanStyle::Typeface("monospace".to_string())
    }

    /// Default kind for records carrying this payload
    ///
    /// `Highlight` defaults to dynamic even when it scales text; hosts do
    /// not re-measure for it, so rules that scale visibly large regions
    /// should override the kind to [`SpanKind::StaticReflow`].
    pub fn default_kind(&self) -> SpanKind {
        match self {
            SpanStyle::Highlight(_) => SpanKind::Dynamic,
            SpanStyle::Typeface(_) | SpanStyle::Replacement { .. } | SpanStyle::LayoutMarker => {
                SpanKind::StaticLayout
            }
        }
    }

    /// Whether the host re-measures text when this payload is attached
    pub fn invalidates_layout(&self) -> bool {
        !matches!(self, SpanStyle::Highlight(_))
    }

    /// Whether this payload modifies nothing when applied
    pub fn is_noop(&self) -> bool {
        matches!(self, SpanStyle::Highlight(style) if style.is_unset())
    }

    /// Stamp an independent copy of this payload
    pub fn instantiate(&self) -> Self {
        match self {
            SpanStyle::Highlight(style) => SpanStyle::Highlight(style.instantiate()),
            other => other.clone(),
        }
    }

    /// Fold this payload into a draw state
    pub fn apply_to(&self, state: &mut DrawState) {
        match self {
            SpanStyle::Highlight(style) => style.apply_to(state),
            SpanStyle::Typeface(family) => state.family = Some(family.clone()),
            SpanStyle::Replacement { .. } | SpanStyle::LayoutMarker => {}
        }
    }
}

/// One styling annotation over a half-open byte range
///
/// Offsets are signed: a pending-edit fixup can shift a record negative,
/// in which case it is simply never valid for application until the next
/// recompute discards it. Records are created with non-negative offsets
/// and only turn negative through fixups.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanRecord {
    id: SpanId,
    /// Inclusive start offset
    pub start: isize,
    /// Exclusive end offset
    pub end: isize,
    style: SpanStyle,
    kind: SpanKind,
    attach: AttachKind,
}

impl SpanRecord {
    /// Create a record with the payload's default kind and exclusive
    /// boundary semantics
    pub fn new(style: SpanStyle, start: usize, end: usize) -> Self {
        let kind = style.default_kind();
        Self {
            id: SpanId::next(),
            start: start as isize,
            end: end as isize,
            style,
            kind,
            attach: AttachKind::default(),
        }
    }

    /// Builder: override the span kind
    pub fn with_kind(mut self, kind: SpanKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder: override the boundary-growth semantics
    pub fn with_attach(mut self, attach: AttachKind) -> Self {
        self.attach = attach;
        self
    }

    /// A background-fill record, the usual shape for externally injected
    /// match highlights
    pub fn background(start: usize, end: usize, color: Color) -> Self {
        Self::new(
            SpanStyle::Highlight(HighlightStyle::new().with_background(color)),
            start,
            end,
        )
    }

    pub fn id(&self) -> SpanId {
        self.id
    }

    pub fn style(&self) -> &SpanStyle {
        &self.style
    }

    pub fn kind(&self) -> SpanKind {
        self.kind
    }

    pub fn attach(&self) -> AttachKind {
        self.attach
    }

    /// The covered range, if the record is currently addressable
    pub fn range(&self) -> Option<Range<usize>> {
        if self.start >= 0 && self.end >= self.start {
            Some(self.start as usize..self.end as usize)
        } else {
            None
        }
    }

    /// Zero-width records are permitted as anchor markers and attach no
    /// visible style
    pub fn is_zero_width(&self) -> bool {
        self.start == self.end
    }

    /// Shift both offsets by an edit delta
    pub(crate) fn shift(&mut self, delta: isize) {
        self.start += delta;
        self.end += delta;
    }
}
