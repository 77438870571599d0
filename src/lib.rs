//! Incremental syntax-highlighting span engine for markup editors
//!
//! Editing surfaces and their layout engines degrade badly when a large
//! number of style spans is attached to the text, so this crate does not
//! try to keep the whole document styled at once. The approach is:
//!
//! 1. Compute every span for the text in one rule pass, off the render
//!    thread if the caller wants, into a private scratch buffer
//! 2. Publish the computed set atomically, then attach only the spans
//!    intersecting the current viewport
//! 3. Re-apply as the viewport moves, skipping what is already attached
//!
//! Spans come in two flavors. Dynamic spans are appearance-only and safe
//! to churn while scrolling. Static spans affect text layout; attaching
//! and removing those on the fly makes the text jump around, so they are
//! applied once per computation cycle, and any re-measuring they need is
//! batched into a single reflow instead of one per span.
//!
//! Between rule passes, edits are absorbed by shifting the already
//! computed spans (see [`Highlighter::fixup`]), so a keystroke costs
//! bookkeeping rather than a full regex pass. Adjacent edits merge into
//! one pending shift; the shift is applied lazily, right before anything
//! reads span offsets.
//!
//! Rule sets implement [`SpanGenerator`] and are usually built from
//! [`MatchRule`] pattern rules; see [`dialect`] for the built-in examples.
//! The engine talks to the text buffer only through the [`SpanHost`]
//! trait, and [`StyledBuffer`] is an in-memory host for tests and simple
//! embedders.
//!
//! Keeping the number of simultaneously attached spans low is the whole
//! performance game; prefer one span with a combined [`HighlightStyle`]
//! over stacking several, and keep layout-affecting spans rare.

mod catalog;
mod config;
pub mod dialect;
mod error;
mod fixup;
mod highlighter;
mod host;
mod rules;
mod span;
mod style;

pub use catalog::SpanCatalog;
pub use config::HighlightConfig;
pub use error::{HighlightError, Result};
pub use fixup::PendingFixup;
pub use highlighter::Highlighter;
pub use host::{Attachment, SpanHost, StyledBuffer};
pub use rules::{FnRules, GeneratorContext, MatchRule, SpanGenerator};
pub use span::{AttachKind, SpanId, SpanKind, SpanRecord, SpanStyle};
pub use style::{Color, DrawState, HighlightStyle};
