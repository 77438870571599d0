//! Plaintext dialect: the fallback rule set
//!
//! Even unformatted notes get link styling and tab-stop replacement.

use regex::Regex;

use crate::error::Result;
use crate::rules::{GeneratorContext, MatchRule, SpanGenerator};
use crate::span::SpanStyle;
use crate::style::HighlightStyle;

/// Scale for link text, small enough to read as metadata
const LINK_SCALE: f32 = 0.85;

/// Fallback rule set for plain notes
pub struct Plaintext {
    link: Option<MatchRule>,
    tab: Option<Regex>,
}

impl Plaintext {
    pub fn new() -> Self {
        let link_style = SpanStyle::Highlight(
            HighlightStyle::new()
                .with_foreground(super::LINK_COLOR)
                .with_italic(true)
                .with_scale(LINK_SCALE),
        );
        Self {
            // http/https with required protocol, case-sensitive
            link: MatchRule::new(
                "url",
                r"\bhttps?://(?:[-;:&=+$,\w]+@)?[A-Za-z0-9.-]+(?:/[+~%/.\w-]*)?(?:\?[-+=&;%@.\w]*)?(?:#[.!/\w]*)?",
                link_style,
            )
            .ok(),
            tab: Regex::new(r"\t").ok(),
        }
    }
}

impl Default for Plaintext {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanGenerator for Plaintext {
    fn generate_spans(&mut self, ctx: &mut GeneratorContext<'_>) -> Result<()> {
        if let Some(link) = &self.link {
            ctx.apply_rule(link);
        }
        let tab_width = ctx.config().tab_width as u32;
        if tab_width > 0 {
            if let Some(tab) = &self.tab {
                ctx.replacement_matches(tab, tab_width);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "plaintext"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpanCatalog;
    use crate::config::HighlightConfig;
    use crate::span::SpanKind;

    fn run(text: &str, config: &HighlightConfig) -> SpanCatalog {
        let mut dialect = Plaintext::new();
        let mut catalog = SpanCatalog::new();
        let mut ctx = GeneratorContext::new(text, config, &mut catalog);
        dialect.generate_spans(&mut ctx).unwrap();
        catalog.sort_scratch();
        catalog.commit();
        catalog
    }

    #[test]
    fn test_urls_get_link_spans() {
        let catalog = run(
            "see https://example.com/a/b?q=1 and http://other.net",
            &HighlightConfig::default(),
        );

        assert_eq!(catalog.len(), 2);
        let first = &catalog.records()[0];
        assert_eq!(first.start, 4);
        assert_eq!(first.kind(), SpanKind::Dynamic);
        match first.style() {
            SpanStyle::Highlight(style) => {
                assert_eq!(style.foreground, Some(super::super::LINK_COLOR));
                assert_eq!(style.italic, Some(true));
                assert_eq!(style.text_scale, Some(LINK_SCALE));
            }
            other => panic!("unexpected style {other:?}"),
        }
    }

    #[test]
    fn test_bare_domains_are_not_links() {
        let catalog = run("just example.com here", &HighlightConfig::default());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_tabs_become_replacement_spans() {
        let mut config = HighlightConfig::default();
        config.tab_width = 8;
        let catalog = run("a\tb\tc", &config);

        assert_eq!(catalog.len(), 2);
        for record in catalog.records() {
            assert_eq!(record.style(), &SpanStyle::Replacement { width: 8 });
            assert_eq!(record.kind(), SpanKind::StaticLayout);
        }
    }
}
