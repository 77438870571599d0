//! Rule engine contract and pattern rules
//!
//! A rule set implements [`SpanGenerator`]: one `generate_spans` pass over
//! the current text snapshot, inserting records through the
//! [`GeneratorContext`] it is handed. The context also carries the helpers
//! that turn a regex plus a style template into one stamped record per
//! match, which is how most dialect rules are written.

use regex::Regex;

use crate::catalog::SpanCatalog;
use crate::config::HighlightConfig;
use crate::error::Result;
use crate::span::{SpanKind, SpanRecord, SpanStyle};
use crate::style::{Color, HighlightStyle};

/// A regex rule stamping one styled span per match
///
/// Rules are templates: the style is instantiated per match, so records
/// never share a live style value. With no capture groups listed the whole
/// match is styled; otherwise each listed group gets its own record.
pub struct MatchRule {
    /// Name for diagnostics
    pub name: String,
    /// Compiled pattern
    pub pattern: Regex,
    /// Style template stamped per match
    pub style: SpanStyle,
    /// Capture groups to style; empty means the whole match
    pub groups: Vec<usize>,
    /// Span kind override; `None` uses the style's default kind
    pub kind: Option<SpanKind>,
}

impl MatchRule {
    /// Compile a rule. Fails only on an invalid pattern.
    pub fn new(name: &str, pattern: &str, style: SpanStyle) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            pattern: Regex::new(pattern)?,
            style,
            groups: Vec::new(),
            kind: None,
        })
    }

    /// Builder: style these capture groups instead of the whole match
    pub fn with_groups(mut self, groups: &[usize]) -> Self {
        self.groups = groups.to_vec();
        self
    }

    /// Builder: override the span kind of stamped records
    pub fn with_kind(mut self, kind: SpanKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Context handed to a rule set for one generation pass
///
/// Gives read access to the text snapshot and the cached configuration,
/// and write access to the scratch buffer of the catalog being computed.
pub struct GeneratorContext<'a> {
    text: &'a str,
    config: &'a HighlightConfig,
    catalog: &'a mut SpanCatalog,
}

impl<'a> GeneratorContext<'a> {
    pub(crate) fn new(
        text: &'a str,
        config: &'a HighlightConfig,
        catalog: &'a mut SpanCatalog,
    ) -> Self {
        Self {
            text,
            config,
            catalog,
        }
    }

    /// The text snapshot being highlighted
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Configuration values cached at the last `configure` call
    pub fn config(&self) -> &HighlightConfig {
        self.config
    }

    /// Insert one record with the style's default kind
    pub fn add_span(&mut self, style: SpanStyle, start: usize, end: usize) {
        self.catalog.insert(SpanRecord::new(style, start, end));
    }

    /// Insert a fully built record
    pub fn add_record(&mut self, record: SpanRecord) {
        self.catalog.insert(record);
    }

    /// Stamp one record per match of `rule` over the text snapshot
    ///
    /// Empty matches and empty groups are skipped; zero-length regex
    /// matches are routine generator output, not an error.
    pub fn apply_rule(&mut self, rule: &MatchRule) {
        let text = self.text;
        if rule.groups.is_empty() {
            for found in rule.pattern.find_iter(text) {
                if found.start() < found.end() {
                    self.stamp(rule, found.start(), found.end());
                }
            }
        } else {
            for captures in rule.pattern.captures_iter(text) {
                for &group in &rule.groups {
                    if let Some(found) = captures.get(group) {
                        if found.start() < found.end() {
                            self.stamp(rule, found.start(), found.end());
                        }
                    }
                }
            }
        }
    }

    /// Stamp one foreground-color record per match
    pub fn color_matches(&mut self, pattern: &Regex, color: Color) {
        self.matches_with(pattern, |start, end| {
            SpanRecord::new(
                SpanStyle::Highlight(HighlightStyle::new().with_foreground(color)),
                start,
                end,
            )
        });
    }

    /// Stamp one monospace-typeface record per match
    pub fn monospace_matches(&mut self, pattern: &Regex) {
        self.matches_with(pattern, |start, end| {
            SpanRecord::new(SpanStyle::monospace(), start, end)
        });
    }

    /// Stamp one fixed-width replacement record per match
    pub fn replacement_matches(&mut self, pattern: &Regex, width: u32) {
        self.matches_with(pattern, |start, end| {
            SpanRecord::new(SpanStyle::Replacement { width }, start, end)
        });
    }

    fn matches_with(&mut self, pattern: &Regex, build: impl Fn(usize, usize) -> SpanRecord) {
        let text = self.text;
        for found in pattern.find_iter(text) {
            if found.start() < found.end() {
                self.catalog.insert(build(found.start(), found.end()));
            }
        }
    }

    fn stamp(&mut self, rule: &MatchRule, start: usize, end: usize) {
        let mut record = SpanRecord::new(rule.style.instantiate(), start, end);
        if let Some(kind) = rule.kind {
            record = record.with_kind(kind);
        }
        self.catalog.insert(record);
    }
}

/// One span-generation pass against the attached text snapshot
///
/// Implementations must assume nothing beyond "the scratch buffer is
/// empty". An `Err` return is caught at the compute boundary, logged, and
/// degrades that pass to zero spans; it never reaches the editing surface.
pub trait SpanGenerator {
    fn generate_spans(&mut self, ctx: &mut GeneratorContext<'_>) -> Result<()>;

    /// Name used in diagnostics when a pass fails
    fn name(&self) -> &str {
        "generic"
    }
}

/// Adapter turning a closure into a [`SpanGenerator`]
///
/// Handy for one-off rule sets and tests; full dialects are usually their
/// own types.
pub struct FnRules<F>(pub F);

impl<F> SpanGenerator for FnRules<F>
where
    F: FnMut(&mut GeneratorContext<'_>) -> Result<()>,
{
    fn generate_spans(&mut self, ctx: &mut GeneratorContext<'_>) -> Result<()> {
        (self.0)(ctx)
    }

    fn name(&self) -> &str {
        "inline"
    }
}
