//! Offset fixups: keeping computed spans valid while the user types
//!
//! A full rule pass per keystroke would be far too expensive, so edits are
//! absorbed by shifting the already computed records instead. At most one
//! shift is outstanding at a time; spatially adjacent edits merge into it,
//! a disjoint edit flushes it first. The pending shift must be flushed
//! before anything reads record offsets for rendering.

use crate::catalog::SpanCatalog;

#[derive(Debug, Clone, Copy)]
struct Shift {
    /// Records starting strictly after this offset are affected
    after: isize,
    /// How far their offsets move
    delta: isize,
}

impl Shift {
    /// Whether a new edit's affected region overlaps this shift's.
    ///
    /// `|delta|` stands in for the width of the affected region. That is an
    /// approximation when an edit inserts and deletes different amounts at
    /// once, and downstream behavior depends on it, so it stays.
    fn overlaps(&self, after: isize, delta: isize) -> bool {
        (after >= self.after && after <= self.after + self.delta.abs())
            || (self.after >= after && self.after <= after + delta.abs())
    }
}

/// The at-most-one outstanding offset shift for a catalog
#[derive(Debug, Default)]
pub struct PendingFixup {
    pending: Option<Shift>,
}

impl PendingFixup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The outstanding `(after, delta)` pair, if any
    pub fn pending(&self) -> Option<(isize, isize)> {
        self.pending.map(|shift| (shift.after, shift.delta))
    }

    /// Record an edit: all records starting strictly after `after` will
    /// need their offsets moved by `delta`
    ///
    /// A zero delta is a no-op and is dropped. If the edit overlaps the
    /// pending shift the two merge; otherwise the pending shift is applied
    /// to the catalog first and the new one recorded.
    pub fn record(&mut self, catalog: &mut SpanCatalog, after: isize, delta: isize) {
        if delta == 0 {
            return;
        }
        match self.pending {
            None => self.pending = Some(Shift { after, delta }),
            Some(shift) if shift.overlaps(after, delta) => {
                self.pending = Some(Shift {
                    after: shift.after.min(after),
                    delta: shift.delta + delta,
                });
            }
            Some(_) => {
                self.flush(catalog);
                self.pending = Some(Shift { after, delta });
            }
        }
    }

    /// Apply the pending shift to the catalog and clear it
    pub fn flush(&mut self, catalog: &mut SpanCatalog) {
        if let Some(shift) = self.pending.take() {
            catalog.shift_after(shift.after, shift.delta);
        }
    }

    /// Discard the pending shift without applying it, used when a fresh
    /// catalog generation makes it meaningless
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
