//! Markdown dialect rule set

use crate::error::Result;
use crate::rules::{GeneratorContext, MatchRule, SpanGenerator};
use crate::span::{SpanKind, SpanStyle};
use crate::style::{Color, HighlightStyle};

const QUOTE_COLOR: Color = Color::rgb(0x68, 0x9f, 0x38);
const PUNCTUATION_COLOR: Color = Color::rgb(0x8a, 0x8a, 0x8a);
const LIST_COLOR: Color = Color::rgb(0xdd, 0x6b, 0x20);

/// Heading scale; headings re-measure, so their spans are applied
/// statically with a batched reflow
const HEADING_SCALE: f32 = 1.27;

fn highlight(style: HighlightStyle) -> SpanStyle {
    SpanStyle::Highlight(style)
}

/// Markdown rule set
pub struct Markdown {
    rules: Vec<MatchRule>,
}

impl Markdown {
    pub fn new() -> Self {
        let mut rules = Vec::new();

        // Headings change text size, so they must not churn with the
        // viewport.
        if let Ok(rule) = MatchRule::new(
            "heading",
            r"(?m)^#{1,6}[ \t].*$",
            highlight(HighlightStyle::new().with_bold(true).with_scale(HEADING_SCALE)),
        ) {
            rules.push(rule.with_kind(SpanKind::StaticReflow));
        }

        if let Ok(rule) = MatchRule::new(
            "bold",
            r"\*\*[^*\n]+\*\*",
            highlight(HighlightStyle::new().with_bold(true)),
        ) {
            rules.push(rule);
        }
        if let Ok(rule) = MatchRule::new(
            "bold-underscore",
            r"__[^_\n]+__",
            highlight(HighlightStyle::new().with_bold(true)),
        ) {
            rules.push(rule);
        }

        if let Ok(rule) = MatchRule::new(
            "italic",
            r"\*[^*\n]+\*",
            highlight(HighlightStyle::new().with_italic(true)),
        ) {
            rules.push(rule);
        }
        if let Ok(rule) = MatchRule::new(
            "italic-underscore",
            r"\b_[^_\n]+_\b",
            highlight(HighlightStyle::new().with_italic(true)),
        ) {
            rules.push(rule);
        }

        if let Ok(rule) = MatchRule::new("inline-code", r"`[^`\n]+`", SpanStyle::monospace()) {
            rules.push(rule);
        }

        if let Ok(rule) = MatchRule::new(
            "strikethrough",
            r"~~[^~\n]+~~",
            highlight(
                HighlightStyle::new()
                    .with_strike(true)
                    .with_foreground(PUNCTUATION_COLOR),
            ),
        ) {
            rules.push(rule);
        }

        // Links style the label and the target differently, via capture
        // groups over one pattern.
        if let Ok(rule) = MatchRule::new(
            "link-label",
            r"\[([^\]\n]+)\]\(([^)\n]+)\)",
            highlight(
                HighlightStyle::new()
                    .with_foreground(super::LINK_COLOR)
                    .with_underline(true),
            ),
        ) {
            rules.push(rule.with_groups(&[1]));
        }
        if let Ok(rule) = MatchRule::new(
            "link-target",
            r"\[([^\]\n]+)\]\(([^)\n]+)\)",
            highlight(
                HighlightStyle::new()
                    .with_foreground(PUNCTUATION_COLOR)
                    .with_italic(true)
                    .with_scale(0.85),
            ),
        ) {
            rules.push(rule.with_groups(&[2]));
        }

        if let Ok(rule) = MatchRule::new(
            "blockquote",
            r"(?m)^>[ \t]?.*$",
            highlight(
                HighlightStyle::new()
                    .with_foreground(QUOTE_COLOR)
                    .with_italic(true),
            ),
        ) {
            rules.push(rule);
        }

        if let Ok(rule) = MatchRule::new(
            "horizontal-rule",
            r"(?m)^(?:---+|\*\*\*+|___+)[ \t]*$",
            highlight(HighlightStyle::new().with_foreground(PUNCTUATION_COLOR)),
        ) {
            rules.push(rule);
        }

        if let Ok(rule) = MatchRule::new(
            "list-marker",
            r"(?m)^[ \t]*([-*+])[ \t]",
            highlight(
                HighlightStyle::new()
                    .with_bold(true)
                    .with_foreground(LIST_COLOR),
            ),
        ) {
            rules.push(rule.with_groups(&[1]));
        }
        if let Ok(rule) = MatchRule::new(
            "ordered-list-marker",
            r"(?m)^[ \t]*(\d+\.)[ \t]",
            highlight(
                HighlightStyle::new()
                    .with_bold(true)
                    .with_foreground(LIST_COLOR),
            ),
        ) {
            rules.push(rule.with_groups(&[1]));
        }

        Self { rules }
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanGenerator for Markdown {
    fn generate_spans(&mut self, ctx: &mut GeneratorContext<'_>) -> Result<()> {
        for rule in &self.rules {
            ctx.apply_rule(rule);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "markdown"
    }
}
