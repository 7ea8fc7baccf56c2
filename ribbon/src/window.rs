use crate::store::{ItemRecord, ItemStore};
use crate::{Extent, ItemSource, WindowRange};

/// Upper bound on records generated on one side by a single coverage pass. Only reachable
/// with a source that keeps measuring items as zero-sized; the side is then frozen until the
/// next reset.
const GROWTH_LIMIT: usize = 10_000;

/// Indices the source has refused to produce, per side. Generation never reaches past them
/// until the next reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Limits {
    pub(crate) low: Option<i64>,
    pub(crate) high: Option<i64>,
}

impl Limits {
    pub(crate) fn refuses(&self, index: i64) -> bool {
        self.low.is_some_and(|low| index <= low) || self.high.is_some_and(|high| index >= high)
    }
}

/// Records generated and evicted by one coverage pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct WindowDelta {
    pub(crate) generated: usize,
    pub(crate) evicted: usize,
}

/// The windowing engine: owns the materialized records and keeps them covering the viewport.
#[derive(Clone, Debug)]
pub(crate) struct Window<T> {
    store: ItemStore<T>,
    limits: Limits,
    max_depth: f64,
    auto_size: bool,
}

fn sanitize(size: Extent) -> Extent {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    Extent {
        main: clean(size.main),
        cross: clean(size.cross),
    }
}

impl<T> Window<T> {
    pub(crate) fn new(auto_size: bool) -> Self {
        Self {
            store: ItemStore::new(),
            limits: Limits::default(),
            max_depth: 0.0,
            auto_size,
        }
    }

    pub(crate) fn store(&self) -> &ItemStore<T> {
        &self.store
    }

    pub(crate) fn limits(&self) -> Limits {
        self.limits
    }

    pub(crate) fn max_depth(&self) -> f64 {
        self.max_depth
    }

    pub(crate) fn range(&self) -> Option<WindowRange> {
        self.store.range()
    }

    fn track_depth(&mut self, depth: f64) {
        if self.auto_size && depth > self.max_depth {
            self.max_depth = depth;
        }
    }

    /// Discards every record and reseeds the window with `index` centered on the logical
    /// origin.
    ///
    /// The source is asked for `index` before anything is discarded: when it refuses, the
    /// window is left untouched and `false` is returned.
    pub(crate) fn reset<S>(&mut self, source: &mut S, index: i64) -> bool
    where
        S: ItemSource<Item = T>,
    {
        let Some(item) = source.generate(index) else {
            rdebug!(index, "reset: seed refused");
            return false;
        };
        let size = sanitize(source.measure(index, &item));

        for record in self.store.drain() {
            let released = record.index();
            source.release(released, record.into_item());
        }
        self.limits = Limits::default();
        self.max_depth = 0.0;

        self.track_depth(size.cross);
        self.store
            .seed(ItemRecord::new(index, item, size, -size.main / 2.0));
        rdebug!(index, extent = size.main, "reset");
        true
    }

    /// Generates the record just below the window. Returns `false` when the low side is
    /// exhausted.
    pub(crate) fn generate_front<S>(&mut self, source: &mut S) -> bool
    where
        S: ItemSource<Item = T>,
    {
        let Some(first) = self.store.first() else {
            return false;
        };
        let anchor = first.anchor_pos();
        let Some(index) = first.index().checked_sub(1) else {
            return false;
        };
        if self.limits.refuses(index) {
            return false;
        }
        let Some(item) = source.generate(index) else {
            rdebug!(index, "low side exhausted");
            self.limits.low = Some(index);
            return false;
        };
        let size = sanitize(source.measure(index, &item));
        self.track_depth(size.cross);
        self.store
            .push_front(ItemRecord::new(index, item, size, anchor - size.main));
        true
    }

    /// Generates the record just above the window. Returns `false` when the high side is
    /// exhausted.
    pub(crate) fn generate_back<S>(&mut self, source: &mut S) -> bool
    where
        S: ItemSource<Item = T>,
    {
        let Some(last) = self.store.last() else {
            return false;
        };
        let anchor = last.end_pos();
        let Some(index) = last.index().checked_add(1) else {
            return false;
        };
        if self.limits.refuses(index) {
            return false;
        }
        let Some(item) = source.generate(index) else {
            rdebug!(index, "high side exhausted");
            self.limits.high = Some(index);
            return false;
        };
        let size = sanitize(source.measure(index, &item));
        self.track_depth(size.cross);
        self.store
            .push_back(ItemRecord::new(index, item, size, anchor));
        true
    }

    fn freeze_low(&mut self) {
        if let Some(index) = self.store.first().and_then(|r| r.index().checked_sub(1)) {
            rwarn!(index, "low side frozen at the growth limit");
            self.limits.low = Some(index);
        }
    }

    fn freeze_high(&mut self) {
        if let Some(index) = self.store.last().and_then(|r| r.index().checked_add(1)) {
            rwarn!(index, "high side frozen at the growth limit");
            self.limits.high = Some(index);
        }
    }

    /// Grows the window until both viewport edges are covered, then evicts records that lie
    /// entirely outside `[0, viewport_extent]`.
    ///
    /// The last remaining record is never evicted.
    pub(crate) fn ensure_covers<S>(
        &mut self,
        source: &mut S,
        offset: f64,
        viewport_extent: f64,
    ) -> WindowDelta
    where
        S: ItemSource<Item = T>,
    {
        let mut delta = WindowDelta::default();

        let mut grown = 0;
        while self
            .store
            .first()
            .is_some_and(|first| offset + first.anchor_pos() > 0.0)
            && self.generate_front(source)
        {
            grown += 1;
            if grown >= GROWTH_LIMIT {
                self.freeze_low();
                break;
            }
        }
        delta.generated += grown;

        let mut grown = 0;
        while self
            .store
            .last()
            .is_some_and(|last| offset + last.end_pos() < viewport_extent)
            && self.generate_back(source)
        {
            grown += 1;
            if grown >= GROWTH_LIMIT {
                self.freeze_high();
                break;
            }
        }
        delta.generated += grown;

        // Scan first, then remove from the ends.
        let len = self.store.len();
        let mut leading = self
            .store
            .iter()
            .take_while(|r| offset + r.end_pos() < 0.0)
            .count();
        let mut trailing = self
            .store
            .iter()
            .rev()
            .take_while(|r| offset + r.anchor_pos() > viewport_extent)
            .count();
        if leading >= len {
            leading = len.saturating_sub(1);
        }
        if trailing >= len {
            trailing = len.saturating_sub(1);
        }
        if leading + trailing >= len {
            trailing = len.saturating_sub(1).saturating_sub(leading);
        }

        for _ in 0..leading {
            if let Some(record) = self.store.pop_front() {
                let index = record.index();
                source.release(index, record.into_item());
            }
        }
        for _ in 0..trailing {
            if let Some(record) = self.store.pop_back() {
                let index = record.index();
                source.release(index, record.into_item());
            }
        }
        delta.evicted = leading + trailing;

        if delta != WindowDelta::default() {
            rtrace!(
                generated = delta.generated,
                evicted = delta.evicted,
                "window updated"
            );
        }
        delta
    }

    /// Extends the window one index at a time until it contains `index`.
    ///
    /// When the source refuses an index on the way, the records generated by this call are
    /// released again and `false` is returned. The refusal itself is remembered.
    pub(crate) fn extend_to<S>(&mut self, source: &mut S, index: i64) -> bool
    where
        S: ItemSource<Item = T>,
    {
        let Some(keep) = self.store.range() else {
            return false;
        };
        let max_depth = self.max_depth;
        loop {
            let Some(range) = self.store.range() else {
                return false;
            };
            if range.contains(index) {
                return true;
            }
            let grew = if index < range.min_index {
                self.generate_front(source)
            } else {
                self.generate_back(source)
            };
            if !grew {
                self.truncate(source, keep);
                self.max_depth = max_depth;
                return false;
            }
        }
    }

    /// Releases every record outside `keep`.
    fn truncate<S>(&mut self, source: &mut S, keep: WindowRange)
    where
        S: ItemSource<Item = T>,
    {
        while self
            .store
            .first()
            .is_some_and(|first| first.index() < keep.min_index && self.store.len() > 1)
        {
            if let Some(record) = self.store.pop_front() {
                let index = record.index();
                source.release(index, record.into_item());
            }
        }
        while self
            .store
            .last()
            .is_some_and(|last| last.index() > keep.max_index && self.store.len() > 1)
        {
            if let Some(record) = self.store.pop_back() {
                let index = record.index();
                source.release(index, record.into_item());
            }
        }
    }

    /// Re-runs measurement for `index` and repacks its neighbours.
    ///
    /// Records on the far side of `pivot` from `index` keep their anchors: when `index` is
    /// below the pivot the record grows or shrinks towards lower indices, otherwise towards
    /// higher ones. Returns the change in extent.
    pub(crate) fn remeasure<S>(&mut self, source: &mut S, index: i64, pivot: i64) -> Option<f64>
    where
        S: ItemSource<Item = T>,
    {
        let range = self.store.range()?;
        let record = self.store.get(index)?;
        let size = sanitize(source.measure(index, record.item()));
        let delta = size.main - record.extent();

        if let Some(record) = self.store.get_mut(index) {
            record.set_size(size);
            if index < pivot {
                let anchor_pos = record.anchor_pos() - delta;
                record.set_anchor_pos(anchor_pos);
            }
        }
        if index < pivot {
            self.store.shift(range.min_index, index - 1, -delta);
        } else {
            self.store.shift(index.saturating_add(1), range.max_index, delta);
        }
        self.track_depth(size.cross);
        rtrace!(index, delta, "remeasure");
        Some(delta)
    }
}
