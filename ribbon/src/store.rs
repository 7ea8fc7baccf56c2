use std::collections::VecDeque;

use crate::{Extent, WindowRange};

/// Layout data for one materialized index.
#[derive(Clone, Debug)]
pub struct ItemRecord<T> {
    index: i64,
    item: T,
    extent: f64,
    depth: f64,
    anchor_pos: f64,
    center_pos: f64,
}

impl<T> ItemRecord<T> {
    pub(crate) fn new(index: i64, item: T, size: Extent, anchor_pos: f64) -> Self {
        Self {
            index,
            item,
            extent: size.main,
            depth: size.cross,
            anchor_pos,
            center_pos: anchor_pos + size.main / 2.0,
        }
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    /// Size along the scroll axis.
    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Size along the cross axis.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Start position in offset-independent coordinates.
    pub fn anchor_pos(&self) -> f64 {
        self.anchor_pos
    }

    pub fn center_pos(&self) -> f64 {
        self.center_pos
    }

    pub fn end_pos(&self) -> f64 {
        self.anchor_pos + self.extent
    }

    pub fn screen_pos(&self, offset: f64) -> f64 {
        offset + self.anchor_pos
    }

    pub(crate) fn into_item(self) -> T {
        self.item
    }

    pub(crate) fn set_anchor_pos(&mut self, anchor_pos: f64) {
        self.anchor_pos = anchor_pos;
        self.center_pos = anchor_pos + self.extent / 2.0;
    }

    pub(crate) fn set_size(&mut self, size: Extent) {
        self.extent = size.main;
        self.depth = size.cross;
        self.center_pos = self.anchor_pos + self.extent / 2.0;
    }
}

/// The contiguous window of item records, indexed by item index.
///
/// Records are only ever added or removed at the ends, so the window can never contain a
/// hole.
#[derive(Clone, Debug)]
pub(crate) struct ItemStore<T> {
    records: VecDeque<ItemRecord<T>>,
    min_index: i64,
}

impl<T> ItemStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            records: VecDeque::new(),
            min_index: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn range(&self) -> Option<WindowRange> {
        let last = self.records.back()?;
        Some(WindowRange {
            min_index: self.min_index,
            max_index: last.index,
        })
    }

    fn slot(&self, index: i64) -> Option<usize> {
        if index < self.min_index {
            return None;
        }
        let slot = usize::try_from(index - self.min_index).ok()?;
        (slot < self.records.len()).then_some(slot)
    }

    pub(crate) fn get(&self, index: i64) -> Option<&ItemRecord<T>> {
        self.slot(index).map(|slot| &self.records[slot])
    }

    pub(crate) fn get_mut(&mut self, index: i64) -> Option<&mut ItemRecord<T>> {
        self.slot(index).map(|slot| &mut self.records[slot])
    }

    pub(crate) fn first(&self) -> Option<&ItemRecord<T>> {
        self.records.front()
    }

    pub(crate) fn last(&self) -> Option<&ItemRecord<T>> {
        self.records.back()
    }

    /// Seeds an empty store.
    pub(crate) fn seed(&mut self, record: ItemRecord<T>) {
        debug_assert!(self.records.is_empty(), "seed into a non-empty store");
        self.min_index = record.index;
        self.records.push_back(record);
    }

    pub(crate) fn push_front(&mut self, record: ItemRecord<T>) {
        debug_assert_eq!(record.index, self.min_index - 1, "push_front must extend by one");
        self.min_index = record.index;
        self.records.push_front(record);
    }

    pub(crate) fn push_back(&mut self, record: ItemRecord<T>) {
        debug_assert!(
            self.records
                .back()
                .is_none_or(|last| last.index + 1 == record.index),
            "push_back must extend by one"
        );
        self.records.push_back(record);
    }

    /// Removes the lowest record. The store keeps the removed index as its lower bound until
    /// the next insertion, so callers must not pop the last record and keep using the store
    /// without reseeding.
    pub(crate) fn pop_front(&mut self) -> Option<ItemRecord<T>> {
        let record = self.records.pop_front()?;
        self.min_index = record.index + 1;
        Some(record)
    }

    pub(crate) fn pop_back(&mut self) -> Option<ItemRecord<T>> {
        self.records.pop_back()
    }

    /// Removes every record, lowest index first.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = ItemRecord<T>> + '_ {
        self.records.drain(..)
    }

    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = &ItemRecord<T>> + '_ {
        self.records.iter()
    }

    /// Shifts the anchors of every record in `[from, to]` by `delta`.
    pub(crate) fn shift(&mut self, from: i64, to: i64, delta: f64) {
        for record in self.records.iter_mut() {
            if (from..=to).contains(&record.index) {
                let anchor_pos = record.anchor_pos + delta;
                record.set_anchor_pos(anchor_pos);
            }
        }
    }
}
