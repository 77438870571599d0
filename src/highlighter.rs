//! The highlighting engine: compute, commit, fixup, apply
//!
//! One [`Highlighter`] binds a rule set to a host buffer and owns the span
//! session for it: the catalog of computed records, the pending offset
//! fixup, and the applied-span bookkeeping. The flow is
//! compute → sort → commit → apply; edits between passes are absorbed by
//! the fixup machinery so that a keystroke costs bookkeeping, not a rule
//! pass.

use std::ops::Range;
use std::time::Duration;

use crate::catalog::SpanCatalog;
use crate::config::HighlightConfig;
use crate::fixup::PendingFixup;
use crate::host::SpanHost;
use crate::rules::{GeneratorContext, SpanGenerator};
use crate::span::{AttachKind, SpanId, SpanRecord, SpanStyle};

/// Incremental highlighter bound to one host buffer
pub struct Highlighter<H: SpanHost> {
    rules: Box<dyn SpanGenerator>,
    config: HighlightConfig,
    host: Option<H>,
    catalog: SpanCatalog,
    fixup: PendingFixup,
}

impl<H: SpanHost> Highlighter<H> {
    /// Create a highlighter driving the given rule set, with default
    /// configuration
    pub fn new(rules: Box<dyn SpanGenerator>) -> Self {
        Self::with_config(rules, HighlightConfig::default())
    }

    pub fn with_config(rules: Box<dyn SpanGenerator>, config: HighlightConfig) -> Self {
        Self {
            rules,
            config,
            host: None,
            catalog: SpanCatalog::new(),
            fixup: PendingFixup::new(),
        }
    }

    /// The fallback highlighter used when no dialect matches
    pub fn plaintext() -> Self {
        Self::new(Box::new(crate::dialect::Plaintext::new()))
    }

    /// Cache new configuration values for the next compute pass
    pub fn configure(&mut self, config: HighlightConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Debounce delay the caller should apply between an edit and the
    /// recompute it schedules
    pub fn highlighting_delay(&self) -> Duration {
        Duration::from_millis(self.config.delay_ms)
    }

    // Session binding ---------------------------------------------------

    /// Bind a host buffer, returning the previously bound one
    ///
    /// Rebinding starts a fresh session: catalog, bookkeeping and pending
    /// fixup are cleared. Spans still attached to the previous host are
    /// not detached here; call [`clear_all`](Self::clear_all) first if the
    /// old host lives on.
    pub fn attach(&mut self, host: H) -> Option<H> {
        let previous = self.host.replace(host);
        self.catalog.clear_records();
        self.catalog.clear_scratch();
        self.fixup.clear();
        previous
    }

    /// Unbind the host buffer and tear down the session state
    pub fn detach(&mut self) -> Option<H> {
        let previous = self.host.take();
        self.catalog.clear_records();
        self.catalog.clear_scratch();
        self.fixup.clear();
        previous
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn has_spans(&self) -> bool {
        self.host.is_some() && !self.catalog.is_empty()
    }

    /// The committed records, sorted ascending by start
    pub fn records(&self) -> &[SpanRecord] {
        self.catalog.records()
    }

    pub fn catalog(&self) -> &SpanCatalog {
        &self.catalog
    }

    // Compute and commit ------------------------------------------------

    /// Run the rule set against the current text snapshot, into the
    /// private scratch buffer
    ///
    /// The scratch is not visible to queries or applies until
    /// [`commit`](Self::commit). A fault in the rule set is logged and
    /// degrades this pass to zero spans; it never propagates.
    pub fn compute(&mut self) {
        self.catalog.clear_scratch();

        let Some(host) = self.host.as_ref() else {
            return;
        };
        let text = host.text();
        if text.is_empty() {
            return;
        }

        let mut ctx = GeneratorContext::new(text, &self.config, &mut self.catalog);
        if let Err(error) = self.rules.generate_spans(&mut ctx) {
            tracing::warn!(
                rules = self.rules.name(),
                %error,
                "span generation failed, skipping this pass"
            );
            self.catalog.clear_scratch();
            return;
        }
        self.catalog.sort_scratch();
        tracing::trace!(spans = self.catalog.scratch().len(), "computed span set");
    }

    /// Publish the last computed span set, replacing the live catalog
    ///
    /// Also discards any pending fixup: the fresh catalog was computed
    /// against the current text and needs none. References to previously
    /// attached spans are lost here, so detach them beforehand if the same
    /// host stays bound.
    pub fn commit(&mut self) {
        self.catalog.commit();
        self.fixup.clear();
        tracing::debug!(spans = self.catalog.len(), "committed span catalog");
    }

    /// Compute and immediately commit
    pub fn recompute(&mut self) {
        self.compute();
        self.commit();
    }

    // Fixups ------------------------------------------------------------

    /// Record an edit at `after` that moved subsequent text by `delta`
    /// bytes, shifting computed spans lazily
    pub fn fixup(&mut self, after: usize, delta: isize) {
        self.fixup.record(&mut self.catalog, after as isize, delta);
    }

    /// Text-watcher convenience: `count` bytes replaced the `before`
    /// bytes at `start`
    pub fn fixup_edit(&mut self, start: usize, before: usize, count: usize) {
        self.fixup
            .record(&mut self.catalog, (start + before) as isize, count as isize - before as isize);
    }

    /// Apply the pending fixup now
    ///
    /// The applicators do this on their own; callers only need it before
    /// reading record offsets directly.
    pub fn flush_fixup(&mut self) {
        self.fixup.flush(&mut self.catalog);
    }

    /// The outstanding `(after, delta)` shift, if any
    pub fn pending_fixup(&self) -> Option<(isize, isize)> {
        self.fixup.pending()
    }

    // Applicators -------------------------------------------------------

    /// Attach every dynamic record intersecting the whole buffer
    pub fn apply_dynamic_all(&mut self) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let len = host.len();
        self.apply_dynamic(0..len);
    }

    /// Attach dynamic records intersecting the viewport `range`
    ///
    /// Already applied records are skipped, and records that scrolled out
    /// of the viewport are left attached; detaching is the caller's call,
    /// via [`clear_dynamic`](Self::clear_dynamic), because churning spans
    /// on every small scroll costs more than a few stale attachments.
    /// Invalid ranges are a no-op.
    pub fn apply_dynamic(&mut self, range: Range<usize>) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let len = host.len();
        if range.start > range.end || range.end > len {
            return;
        }
        self.fixup.flush(&mut self.catalog);

        let range_start = range.start as isize;
        let range_end = range.end as isize;
        let mut to_attach = Vec::new();
        for (index, record) in self.catalog.records().iter().enumerate() {
            if record.kind().is_static() {
                continue;
            }
            if record.start >= range_end {
                // Sorted on start, nothing further can intersect.
                break;
            }
            let valid =
                record.start >= 0 && record.end > range_start && record.end <= len as isize;
            if valid && !self.catalog.is_applied(index) {
                to_attach.push(index);
            }
        }

        for &index in &to_attach {
            let record = &self.catalog.records()[index];
            host.attach(
                record.id(),
                record.style(),
                record.start as usize..record.end as usize,
                record.attach(),
            );
        }
        for index in to_attach {
            self.catalog.mark_applied(index);
        }
    }

    /// Attach every static record, once per catalog generation
    ///
    /// If any attached record needs an explicit reflow, exactly one
    /// whole-buffer reflow is triggered afterwards rather than one per
    /// span.
    pub fn apply_static(&mut self) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        if self.catalog.static_applied() {
            return;
        }
        self.fixup.flush(&mut self.catalog);

        let len = host.len();
        let mut needs_reflow = false;
        for record in self.catalog.records() {
            if !record.kind().is_static() {
                continue;
            }
            if let Some(range) = record.range() {
                needs_reflow |= record.kind().needs_reflow();
                host.attach(record.id(), record.style(), range, record.attach());
            }
        }

        if needs_reflow {
            tracing::debug!("reflow after static apply");
            Self::reflow_host(host, 0..len);
        }
        self.catalog.set_static_applied(true);
    }

    /// Detach every currently applied dynamic record
    pub fn clear_dynamic(&mut self) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        for index in self.catalog.applied_descending() {
            if let Some(record) = self.catalog.records().get(index) {
                host.detach(record.id());
            }
        }
        self.catalog.clear_applied();
    }

    /// Detach every static record, optionally reflowing once afterwards
    /// if any removed record affected layout invisibly to the host
    pub fn clear_static(&mut self, reflow: bool) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let mut needs_reflow = false;
        for record in self.catalog.records().iter().rev() {
            if record.kind().is_static() {
                needs_reflow |= record.kind().needs_reflow();
                host.detach(record.id());
            }
        }
        if reflow && needs_reflow {
            let len = host.len();
            Self::reflow_host(host, 0..len);
        }
        self.catalog.set_static_applied(false);
    }

    /// Detach everything and drop the catalog
    pub fn clear_all(&mut self) {
        self.clear_dynamic();
        self.clear_static(true);
        self.catalog.clear_records();
        self.fixup.clear();
    }

    // Reflow ------------------------------------------------------------

    /// Force the host to re-measure the whole buffer
    pub fn reflow_all(&mut self) {
        self.fixup.flush(&mut self.catalog);
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let len = host.len();
        Self::reflow_host(host, 0..len);
    }

    /// Force the host to re-measure `range`; invalid ranges are a no-op
    pub fn reflow(&mut self, range: Range<usize>) {
        self.fixup.flush(&mut self.catalog);
        let Some(host) = self.host.as_mut() else {
            return;
        };
        if range.start > range.end || range.end > host.len() {
            return;
        }
        Self::reflow_host(host, range);
    }

    /// Cycle the zero-effect layout marker over `range`; the host's
    /// invalidate-on-attach behavior does the actual re-measuring
    fn reflow_host(host: &mut H, range: Range<usize>) {
        host.attach(
            SpanId::LAYOUT_MARKER,
            &SpanStyle::LayoutMarker,
            range,
            AttachKind::ExclusiveExclusive,
        );
        host.detach(SpanId::LAYOUT_MARKER);
    }

    // Live-set injection ------------------------------------------------

    /// Splice externally produced records (search-match highlights and the
    /// like) into the live catalog
    ///
    /// Injected records are fixup-subject and vanish on the next commit,
    /// so they need re-injecting after a recompute.
    pub fn inject(&mut self, records: Vec<SpanRecord>) {
        self.catalog.inject(records);
    }

    /// Remove injected records by id, detaching any that were applied
    pub fn remove_injected(&mut self, ids: &[SpanId]) {
        if ids.is_empty() {
            return;
        }
        if let Some(host) = self.host.as_mut() {
            for &index in self.catalog.applied_indices() {
                if let Some(record) = self.catalog.records().get(index) {
                    if ids.contains(&record.id()) {
                        host.detach(record.id());
                    }
                }
            }
        }
        self.catalog.remove_by_ids(ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HighlightError;
    use crate::host::StyledBuffer;
    use crate::rules::{FnRules, MatchRule};
    use crate::span::SpanKind;
    use crate::style::{Color, HighlightStyle};

    fn bold_style() -> SpanStyle {
        SpanStyle::Highlight(HighlightStyle::new().with_bold(true))
    }

    /// Highlighter whose rule set stamps fixed records
    fn fixed_spans(spans: Vec<SpanRecord>) -> Highlighter<StyledBuffer> {
        let mut remaining = Some(spans);
        let generate = move |ctx: &mut GeneratorContext<'_>| -> crate::error::Result<()> {
            let spans = remaining.take().unwrap_or_default();
            for span in &spans {
                ctx.add_record(span.clone());
            }
            remaining = Some(spans);
            Ok(())
        };
        Highlighter::new(Box::new(FnRules(generate)))
    }

    #[test]
    fn test_recompute_publishes_sorted_catalog() {
        let mut highlighter = fixed_spans(vec![
            SpanRecord::new(bold_style(), 30, 40),
            SpanRecord::new(bold_style(), 10, 20),
        ]);
        highlighter.attach(StyledBuffer::new("x".repeat(50)));
        highlighter.recompute();

        let starts: Vec<isize> = highlighter.records().iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![10, 30]);
        assert!(highlighter.has_spans());
    }

    #[test]
    fn test_compute_without_commit_is_invisible() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 0, 5)]);
        highlighter.attach(StyledBuffer::new("hello"));

        highlighter.compute();
        assert!(highlighter.records().is_empty());

        highlighter.commit();
        assert_eq!(highlighter.records().len(), 1);
    }

    #[test]
    fn test_empty_text_computes_nothing() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 0, 5)]);
        highlighter.attach(StyledBuffer::new(""));
        highlighter.recompute();
        assert!(highlighter.records().is_empty());
    }

    #[test]
    fn test_generator_fault_degrades_to_zero_spans() {
        let generate = |ctx: &mut GeneratorContext<'_>| -> crate::error::Result<()> {
            ctx.add_span(bold_style(), 0, 3);
            Err(HighlightError::Generator("rule blew up".into()))
        };
        let mut highlighter: Highlighter<StyledBuffer> =
            Highlighter::new(Box::new(FnRules(generate)));
        highlighter.attach(StyledBuffer::new("some text"));
        highlighter.recompute();

        assert!(highlighter.records().is_empty());
        // The next pass still runs; nothing is poisoned.
        highlighter.recompute();
        assert!(highlighter.records().is_empty());
    }

    #[test]
    fn test_commit_discards_pending_fixup() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 10, 20)]);
        highlighter.attach(StyledBuffer::new("x".repeat(40)));
        highlighter.recompute();

        highlighter.fixup(0, 5);
        assert!(highlighter.pending_fixup().is_some());
        highlighter.recompute();
        assert!(highlighter.pending_fixup().is_none());
        assert_eq!(highlighter.records()[0].start, 10);
    }

    #[test]
    fn test_fixup_shifts_later_spans() {
        let mut highlighter = fixed_spans(vec![
            SpanRecord::new(bold_style(), 10, 20),
            SpanRecord::new(bold_style(), 30, 40),
        ]);
        highlighter.attach(StyledBuffer::new("x".repeat(50)));
        highlighter.recompute();

        highlighter.fixup(25, 5);
        highlighter.flush_fixup();

        let offsets: Vec<(isize, isize)> = highlighter
            .records()
            .iter()
            .map(|r| (r.start, r.end))
            .collect();
        assert_eq!(offsets, vec![(10, 20), (35, 45)]);
    }

    #[test]
    fn test_fixup_edit_maps_text_watcher_args() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 10, 20)]);
        highlighter.attach(StyledBuffer::new("x".repeat(40)));
        highlighter.recompute();

        // Two bytes replaced five at offset 3: delta -3 after offset 8.
        highlighter.fixup_edit(3, 5, 2);
        assert_eq!(highlighter.pending_fixup(), Some((8, -3)));
    }

    #[test]
    fn test_apply_dynamic_respects_viewport() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 10, 15)]);
        highlighter.attach(StyledBuffer::new("x".repeat(20)));
        highlighter.recompute();

        highlighter.apply_dynamic(0..5);
        assert!(highlighter.host().unwrap().attachments().is_empty());

        highlighter.apply_dynamic(0..20);
        let attachments = highlighter.host().unwrap().attachments();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].range, 10..15);
    }

    #[test]
    fn test_apply_dynamic_skips_already_applied() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 2, 6)]);
        highlighter.attach(StyledBuffer::new("x".repeat(10)));
        highlighter.recompute();

        highlighter.apply_dynamic_all();
        highlighter.apply_dynamic_all();
        assert_eq!(highlighter.host().unwrap().attachments().len(), 1);
    }

    #[test]
    fn test_apply_dynamic_skips_static_records() {
        let mut highlighter = fixed_spans(vec![
            SpanRecord::new(bold_style(), 0, 4),
            SpanRecord::new(SpanStyle::monospace(), 5, 9),
        ]);
        highlighter.attach(StyledBuffer::new("x".repeat(10)));
        highlighter.recompute();

        highlighter.apply_dynamic_all();
        let attachments = highlighter.host().unwrap().attachments();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].range, 0..4);
    }

    #[test]
    fn test_apply_dynamic_invalid_range_is_noop() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 0, 4)]);
        highlighter.attach(StyledBuffer::new("x".repeat(10)));
        highlighter.recompute();

        highlighter.apply_dynamic(4..2);
        highlighter.apply_dynamic(0..99);
        assert!(highlighter.host().unwrap().attachments().is_empty());
    }

    #[test]
    fn test_apply_dynamic_flushes_fixup_first() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 4, 8)]);
        highlighter.attach(StyledBuffer::new("x".repeat(20)));
        highlighter.recompute();

        highlighter.fixup(0, 6);
        highlighter.apply_dynamic_all();

        let attachments = highlighter.host().unwrap().attachments();
        assert_eq!(attachments[0].range, 10..14);
        assert!(highlighter.pending_fixup().is_none());
    }

    #[test]
    fn test_apply_static_idempotent_and_batches_reflow() {
        let heading = SpanRecord::new(
            SpanStyle::Highlight(HighlightStyle::new().with_scale(1.3)),
            0,
            7,
        )
        .with_kind(SpanKind::StaticReflow);
        let second = SpanRecord::new(
            SpanStyle::Highlight(HighlightStyle::new().with_scale(1.2)),
            10,
            14,
        )
        .with_kind(SpanKind::StaticReflow);
        let mut highlighter = fixed_spans(vec![heading, second]);
        highlighter.attach(StyledBuffer::new("x".repeat(20)));
        highlighter.recompute();

        highlighter.apply_static();
        assert_eq!(highlighter.host().unwrap().attachments().len(), 2);
        // Two reflow-needing records, one reflow.
        assert_eq!(highlighter.host().unwrap().reflows(), 1);

        highlighter.apply_static();
        assert_eq!(highlighter.host().unwrap().attachments().len(), 2);
        assert_eq!(highlighter.host().unwrap().reflows(), 1);
    }

    #[test]
    fn test_apply_static_without_reflow_spans() {
        // A typeface record re-measures through the host on its own, so
        // the engine adds no marker cycle of its own.
        let mut highlighter = fixed_spans(vec![SpanRecord::new(SpanStyle::monospace(), 0, 4)]);
        highlighter.attach(StyledBuffer::new("x".repeat(10)));
        highlighter.recompute();

        highlighter.apply_static();
        // One layout invalidation from the typeface attach itself.
        assert_eq!(highlighter.host().unwrap().reflows(), 1);
        assert_eq!(highlighter.host().unwrap().attachments().len(), 1);
    }

    #[test]
    fn test_clear_static_reapplies_after_reset() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(SpanStyle::monospace(), 0, 4)]);
        highlighter.attach(StyledBuffer::new("x".repeat(10)));
        highlighter.recompute();

        highlighter.apply_static();
        highlighter.clear_static(false);
        assert!(highlighter.host().unwrap().attachments().is_empty());

        highlighter.apply_static();
        assert_eq!(highlighter.host().unwrap().attachments().len(), 1);
    }

    #[test]
    fn test_clear_dynamic_detaches_everything_applied() {
        let mut highlighter = fixed_spans(vec![
            SpanRecord::new(bold_style(), 0, 3),
            SpanRecord::new(bold_style(), 4, 7),
        ]);
        highlighter.attach(StyledBuffer::new("x".repeat(10)));
        highlighter.recompute();

        highlighter.apply_dynamic_all();
        assert_eq!(highlighter.host().unwrap().attachments().len(), 2);

        highlighter.clear_dynamic();
        assert!(highlighter.host().unwrap().attachments().is_empty());

        // Cleared records can be applied again.
        highlighter.apply_dynamic_all();
        assert_eq!(highlighter.host().unwrap().attachments().len(), 2);
    }

    #[test]
    fn test_reflow_cycles_marker_without_leaving_attachment() {
        let mut highlighter = fixed_spans(vec![]);
        highlighter.attach(StyledBuffer::new("hello world"));

        highlighter.reflow_all();
        assert_eq!(highlighter.host().unwrap().reflows(), 1);
        assert!(highlighter.host().unwrap().attachments().is_empty());

        highlighter.reflow(0..5);
        assert_eq!(highlighter.host().unwrap().reflows(), 2);

        highlighter.reflow(3..1);
        assert_eq!(highlighter.host().unwrap().reflows(), 2);
    }

    #[test]
    fn test_attach_rebinding_starts_fresh_session() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 0, 3)]);
        highlighter.attach(StyledBuffer::new("first"));
        highlighter.recompute();
        highlighter.fixup(0, 2);
        assert!(highlighter.has_spans());

        let previous = highlighter.attach(StyledBuffer::new("second"));
        assert!(previous.is_some());
        assert!(!highlighter.has_spans());
        assert!(highlighter.pending_fixup().is_none());
    }

    #[test]
    fn test_inject_and_remove_search_highlights() {
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 0, 3)]);
        highlighter.attach(StyledBuffer::new("x".repeat(10)));
        highlighter.recompute();
        highlighter.apply_dynamic_all();

        let hit = SpanRecord::background(5, 8, Color::argb(0x60, 0xff, 0xe0, 0));
        let hit_id = hit.id();
        highlighter.inject(vec![hit]);
        assert_eq!(highlighter.records().len(), 2);

        highlighter.apply_dynamic_all();
        assert_eq!(highlighter.host().unwrap().attachments().len(), 2);

        // Injected records ride along with fixups.
        highlighter.fixup(4, 2);
        highlighter.flush_fixup();
        assert_eq!(highlighter.records()[1].start, 7);

        highlighter.remove_injected(&[hit_id]);
        assert_eq!(highlighter.records().len(), 1);
        assert_eq!(highlighter.host().unwrap().attachments().len(), 1);

        // A commit drops any remaining injected state wholesale.
        highlighter.recompute();
        assert_eq!(highlighter.records().len(), 1);
    }

    #[test]
    fn test_end_to_end_bold_static_single_reflow() {
        let rule = MatchRule::new(
            "strong",
            r"\*\*[^*]+\*\*",
            SpanStyle::Highlight(HighlightStyle::new().with_bold(true)),
        )
        .unwrap()
        .with_kind(SpanKind::StaticReflow);
        let generate = move |ctx: &mut GeneratorContext<'_>| -> crate::error::Result<()> {
            ctx.apply_rule(&rule);
            Ok(())
        };
        let mut highlighter: Highlighter<StyledBuffer> =
            Highlighter::new(Box::new(FnRules(generate)));
        highlighter.attach(StyledBuffer::new("plain **bold** text"));

        highlighter.recompute();
        highlighter.apply_static();

        let host = highlighter.host().unwrap();
        assert_eq!(host.attachments().len(), 1);
        assert_eq!(host.attachments()[0].range, 6..14);
        assert_eq!(host.reflows(), 1);
    }

    #[test]
    fn test_end_to_end_typing_then_viewport_apply() {
        // One committed span, then an insert before it, then a viewport
        // apply: the attachment lands at the shifted offsets.
        let mut highlighter = fixed_spans(vec![SpanRecord::new(bold_style(), 6, 10)]);
        highlighter.attach(StyledBuffer::new("plain bold text"));
        highlighter.recompute();

        if let Some(host) = highlighter.host_mut() {
            host.splice(0..0, "> ");
        }
        highlighter.fixup_edit(0, 0, 2);

        highlighter.apply_dynamic_all();
        let host = highlighter.host().unwrap();
        assert_eq!(host.attachments().len(), 1);
        assert_eq!(host.attachments()[0].range, 8..12);
    }
}
