use crate::PlacedItem;
use crate::store::{ItemRecord, ItemStore};

/// Signed distance between a span and a point: negative when the span contains the point,
/// otherwise the gap between them.
pub(crate) fn center_distance(screen_pos: f64, extent: f64, center: f64) -> f64 {
    (screen_pos - center).max(center - (screen_pos + extent))
}

/// The index whose span is closest to straddling the viewport center. Ties go to the lower
/// index.
pub(crate) fn nearest_to_center<T>(
    store: &ItemStore<T>,
    offset: f64,
    viewport_extent: f64,
) -> Option<i64> {
    let center = viewport_extent / 2.0;
    let mut best: Option<(i64, f64)> = None;
    for record in store.iter() {
        let dist = center_distance(record.screen_pos(offset), record.extent(), center);
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((record.index(), dist));
        }
    }
    best.map(|(index, _)| index)
}

/// The index whose center lands closest to the viewport center once the ribbon has coasted
/// to `projected_offset` (an offset already shifted by half the viewport).
pub(crate) fn release_target<T>(store: &ItemStore<T>, projected_offset: f64) -> Option<i64> {
    let mut best: Option<(i64, f64)> = None;
    for record in store.iter() {
        let dist = (projected_offset + record.center_pos()).abs();
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((record.index(), dist));
        }
    }
    best.map(|(index, _)| index)
}

pub(crate) fn placed<T>(record: &ItemRecord<T>, offset: f64, selected_index: i64) -> PlacedItem {
    PlacedItem {
        index: record.index(),
        screen_pos: record.screen_pos(offset),
        extent: record.extent(),
        selected: record.index() == selected_index,
    }
}
