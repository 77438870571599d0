//! Span catalog: the ordered span set for one buffer snapshot
//!
//! The catalog keeps two collections. Generators insert into a private
//! scratch buffer; an explicit commit publishes the scratch as the live,
//! queryable record set. Live records are kept stably sorted ascending by
//! start offset, which is what allows range scans to stop early instead of
//! visiting every record.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::span::{SpanId, SpanRecord};

/// Ordered collection of span records plus the apply-state bookkeeping for
/// the buffer they target
#[derive(Debug, Default)]
pub struct SpanCatalog {
    /// Live records, stably sorted ascending by start
    records: Vec<SpanRecord>,
    /// Records generated for the next commit, private until published
    scratch: Vec<SpanRecord>,
    /// Indices of live records currently attached as dynamic spans
    applied: BTreeSet<usize>,
    /// Whether the static records of this generation have been attached
    static_applied: bool,
}

impl SpanCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the scratch buffer
    ///
    /// Records with an inverted range or a no-op style are dropped, not
    /// rejected with an error; rule sets routinely produce degenerate
    /// matches and those must not break highlighting.
    pub fn insert(&mut self, record: SpanRecord) {
        if record.end < record.start || record.style().is_noop() {
            return;
        }
        self.scratch.push(record);
    }

    /// Stably sort the scratch buffer by start offset
    pub fn sort_scratch(&mut self) {
        self.scratch.sort_by_key(|record| record.start);
    }

    pub fn clear_scratch(&mut self) {
        self.scratch.clear();
    }

    pub(crate) fn scratch(&self) -> &[SpanRecord] {
        &self.scratch
    }

    /// Publish the scratch buffer as the live record set
    ///
    /// Replaces the previous generation atomically and resets the apply
    /// bookkeeping; previously attached records become orphaned and the
    /// caller is responsible for having detached them beforehand.
    pub fn commit(&mut self) {
        self.records = std::mem::take(&mut self.scratch);
        self.applied.clear();
        self.static_applied = false;
    }

    /// The live records, sorted ascending by start
    pub fn records(&self) -> &[SpanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all live records and apply bookkeeping
    pub fn clear_records(&mut self) {
        self.records.clear();
        self.applied.clear();
        self.static_applied = false;
    }

    /// Non-static records intersecting `range`, in ascending-start order
    ///
    /// The scan stops at the first record with `start >= range.end`, which
    /// is valid only because the live set is sorted. A zero-width record
    /// counts as intersecting when it falls strictly inside the range.
    pub fn query_range(&self, range: Range<usize>) -> impl Iterator<Item = &SpanRecord> {
        let start = range.start as isize;
        let end = range.end as isize;
        self.records
            .iter()
            .take_while(move |record| record.start < end)
            .filter(move |record| !record.kind().is_static() && record.end > start)
    }

    /// Shift every record starting strictly after `after` by `delta`
    ///
    /// Walks from the highest start downward and stops at the first record
    /// with `start <= after`; everything before it is unaffected because
    /// the set is sorted.
    pub(crate) fn shift_after(&mut self, after: isize, delta: isize) {
        if delta == 0 {
            return;
        }
        for record in self.records.iter_mut().rev() {
            if record.start <= after {
                break;
            }
            record.shift(delta);
        }
    }

    // Apply bookkeeping -------------------------------------------------

    pub(crate) fn is_applied(&self, index: usize) -> bool {
        self.applied.contains(&index)
    }

    pub(crate) fn mark_applied(&mut self, index: usize) {
        self.applied.insert(index);
    }

    /// Applied indices from highest to lowest, the order in which dynamic
    /// detachment must happen so pending removals stay valid
    pub(crate) fn applied_descending(&self) -> Vec<usize> {
        self.applied.iter().rev().copied().collect()
    }

    pub(crate) fn applied_indices(&self) -> &BTreeSet<usize> {
        &self.applied
    }

    pub(crate) fn clear_applied(&mut self) {
        self.applied.clear();
    }

    pub(crate) fn static_applied(&self) -> bool {
        self.static_applied
    }

    pub(crate) fn set_static_applied(&mut self, applied: bool) {
        self.static_applied = applied;
    }

    // Live-set injection ------------------------------------------------

    /// Splice externally produced records into the live set
    ///
    /// The set is re-sorted and the applied bookkeeping re-indexed by
    /// record id, so attachments made before the injection stay accounted
    /// for. Injected records are subject to fixups and are lost on the
    /// next commit.
    pub fn inject(&mut self, records: Vec<SpanRecord>) {
        if records.is_empty() {
            return;
        }
        let applied_ids = self.applied_ids();
        self.records.extend(records);
        self.records.sort_by_key(|record| record.start);
        self.reindex_applied(&applied_ids);
    }

    /// Remove live records by id
    pub fn remove_by_ids(&mut self, ids: &[SpanId]) {
        if ids.is_empty() {
            return;
        }
        let applied_ids: Vec<SpanId> = self
            .applied_ids()
            .into_iter()
            .filter(|id| !ids.contains(id))
            .collect();
        self.records.retain(|record| !ids.contains(&record.id()));
        self.reindex_applied(&applied_ids);
    }

    fn applied_ids(&self) -> Vec<SpanId> {
        self.applied
            .iter()
            .filter_map(|&index| self.records.get(index))
            .map(|record| record.id())
            .collect()
    }

    fn reindex_applied(&mut self, ids: &[SpanId]) {
        self.applied = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| ids.contains(&record.id()))
            .map(|(index, _)| index)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SpanStyle;
    use crate::style::{Color, HighlightStyle};

    fn bold(start: usize, end: usize) -> SpanRecord {
        SpanRecord::new(
            SpanStyle::Highlight(HighlightStyle::new().with_bold(true)),
            start,
            end,
        )
    }

    fn mono(start: usize, end: usize) -> SpanRecord {
        SpanRecord::new(SpanStyle::monospace(), start, end)
    }

    fn committed(records: Vec<SpanRecord>) -> SpanCatalog {
        let mut catalog = SpanCatalog::new();
        for record in records {
            catalog.insert(record);
        }
        catalog.sort_scratch();
        catalog.commit();
        catalog
    }

    #[test]
    fn test_insert_drops_inverted_range() {
        let mut catalog = SpanCatalog::new();
        catalog.insert(bold(10, 5));
        assert!(catalog.scratch().is_empty());
    }

    #[test]
    fn test_insert_drops_unset_style() {
        let mut catalog = SpanCatalog::new();
        catalog.insert(SpanRecord::new(
            SpanStyle::Highlight(HighlightStyle::new()),
            0,
            5,
        ));
        assert!(catalog.scratch().is_empty());
    }

    #[test]
    fn test_insert_keeps_zero_width() {
        let mut catalog = SpanCatalog::new();
        catalog.insert(bold(5, 5));
        assert_eq!(catalog.scratch().len(), 1);
    }

    #[test]
    fn test_commit_sorts_and_publishes() {
        let catalog = committed(vec![bold(30, 40), bold(10, 20), bold(20, 25)]);
        let starts: Vec<isize> = catalog.records().iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![10, 20, 30]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let first = bold(10, 15);
        let second = bold(10, 30);
        let first_id = first.id();
        let second_id = second.id();
        let catalog = committed(vec![first, second]);
        assert_eq!(catalog.records()[0].id(), first_id);
        assert_eq!(catalog.records()[1].id(), second_id);
    }

    #[test]
    fn test_commit_resets_bookkeeping() {
        let mut catalog = committed(vec![bold(0, 5)]);
        catalog.mark_applied(0);
        catalog.set_static_applied(true);

        catalog.insert(bold(1, 2));
        catalog.commit();

        assert!(catalog.applied_indices().is_empty());
        assert!(!catalog.static_applied());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_query_range_intersections() {
        let catalog = committed(vec![bold(0, 5), bold(10, 20), bold(30, 40)]);

        let hits: Vec<isize> = catalog.query_range(12..32).map(|r| r.start).collect();
        assert_eq!(hits, vec![10, 30]);

        // Touching end-to-start is not an intersection.
        let hits: Vec<isize> = catalog.query_range(5..10).map(|r| r.start).collect();
        assert!(hits.is_empty());

        let hits: Vec<isize> = catalog.query_range(0..100).map(|r| r.start).collect();
        assert_eq!(hits, vec![0, 10, 30]);
    }

    #[test]
    fn test_query_range_skips_static() {
        let catalog = committed(vec![bold(0, 5), mono(1, 4)]);
        let hits: Vec<isize> = catalog.query_range(0..10).map(|r| r.start).collect();
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn test_shift_after_only_affects_later_records() {
        let mut catalog = committed(vec![bold(10, 20), bold(30, 40)]);
        catalog.shift_after(25, 5);

        assert_eq!(catalog.records()[0].start, 10);
        assert_eq!(catalog.records()[0].end, 20);
        assert_eq!(catalog.records()[1].start, 35);
        assert_eq!(catalog.records()[1].end, 45);
    }

    #[test]
    fn test_inject_resorts_and_reindexes_applied() {
        let early = bold(0, 5);
        let late = bold(50, 60);
        let late_id = late.id();
        let mut catalog = committed(vec![early, late]);

        // Mark the later record applied, then inject one that sorts
        // between the two.
        catalog.mark_applied(1);
        catalog.inject(vec![SpanRecord::background(10, 20, Color::WHITE)]);

        assert_eq!(catalog.len(), 3);
        let applied: Vec<usize> = catalog.applied_indices().iter().copied().collect();
        assert_eq!(applied, vec![2]);
        assert_eq!(catalog.records()[2].id(), late_id);
    }

    #[test]
    fn test_remove_by_ids() {
        let keep = bold(0, 5);
        let drop = bold(10, 15);
        let keep_id = keep.id();
        let drop_id = drop.id();
        let mut catalog = committed(vec![keep, drop]);
        catalog.mark_applied(0);
        catalog.mark_applied(1);

        catalog.remove_by_ids(&[drop_id]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].id(), keep_id);
        let applied: Vec<usize> = catalog.applied_indices().iter().copied().collect();
        assert_eq!(applied, vec![0]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn record_strategy() -> impl Strategy<Value = (usize, usize, bool)> {
            (0usize..200, 0usize..40, any::<bool>())
                .prop_map(|(start, len, is_static)| (start, start + len, is_static))
        }

        proptest! {
            #[test]
            fn commit_yields_sorted_records(
                entries in prop::collection::vec(record_strategy(), 0..40)
            ) {
                let mut catalog = SpanCatalog::new();
                for (start, end, is_static) in entries {
                    let record = if is_static {
                        mono(start, end)
                    } else {
                        bold(start, end)
                    };
                    catalog.insert(record);
                }
                catalog.sort_scratch();
                catalog.commit();

                for pair in catalog.records().windows(2) {
                    prop_assert!(pair[0].start <= pair[1].start);
                }
            }

            #[test]
            fn query_range_matches_naive_filter(
                entries in prop::collection::vec(record_strategy(), 0..40),
                query_start in 0usize..250,
                query_len in 0usize..100,
            ) {
                let mut catalog = SpanCatalog::new();
                for (start, end, is_static) in entries {
                    let record = if is_static {
                        mono(start, end)
                    } else {
                        bold(start, end)
                    };
                    catalog.insert(record);
                }
                catalog.sort_scratch();
                catalog.commit();

                let query = query_start..query_start + query_len;
                let scanned: Vec<SpanId> =
                    catalog.query_range(query.clone()).map(|r| r.id()).collect();
                let naive: Vec<SpanId> = catalog
                    .records()
                    .iter()
                    .filter(|r| {
                        !r.kind().is_static()
                            && r.start < query.end as isize
                            && r.end > query.start as isize
                    })
                    .map(|r| r.id())
                    .collect();
                prop_assert_eq!(scanned, naive);
            }
        }
    }
}
