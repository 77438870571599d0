//! Built-in dialect rule sets
//!
//! These are working rule sets for the most common note formats, and the
//! reference examples for writing new ones. A dialect is just a
//! [`SpanGenerator`](crate::SpanGenerator) built from pattern rules;
//! production deployments typically ship their own.

mod markdown;
mod plaintext;

pub use markdown::Markdown;
pub use plaintext::Plaintext;

use crate::rules::SpanGenerator;
use crate::style::Color;

/// Link blue shared by the built-in dialects
pub(crate) const LINK_COLOR: Color = Color::rgb(0x1e, 0xa3, 0xfd);

/// Pick a built-in dialect from a file extension
///
/// Unknown extensions fall back to plaintext, which still styles links
/// and tab stops.
pub fn for_extension(extension: &str) -> Box<dyn SpanGenerator> {
    match extension.to_ascii_lowercase().as_str() {
        "md" | "markdown" | "mkd" => Box::new(Markdown::new()),
        _ => Box::new(Plaintext::new()),
    }
}
