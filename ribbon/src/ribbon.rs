use std::sync::Arc;

use crate::layout;
use crate::motion::{Motion, StepOutcome};
use crate::store::ItemRecord;
use crate::window::Window;
use crate::{
    FrameState, IndexListener, ItemSource, MotionPhase, PlacedItem, Result, RibbonError,
    RibbonOptions, WindowRange,
};

fn check_viewport(extent: f64) -> Result<f64> {
    if extent.is_finite() && extent >= 0.0 {
        Ok(extent)
    } else {
        Err(RibbonError::InvalidViewport { extent })
    }
}

/// An infinitely scrolling ribbon of lazily generated items.
///
/// This type is UI-agnostic:
/// - Items come from an [`ItemSource`], which also measures and positions them.
/// - Your adapter feeds it pointer positions (projected onto the scroll axis), wheel steps,
///   clicks and viewport resizes.
/// - Snap animations advance through [`Ribbon::tick`] (timer driven) or [`Ribbon::step`].
///
/// Only the items overlapping the viewport are materialized. They always form one
/// contiguous run of indices, packed edge to edge.
pub struct Ribbon<S: ItemSource> {
    source: S,
    options: RibbonOptions,
    window: Window<S::Item>,
    motion: Motion,

    offset: f64,
    viewport_extent: f64,
    selected_index: i64,

    selection_listeners: Vec<IndexListener>,
    navigation_listeners: Vec<IndexListener>,
}

impl<S: ItemSource> Ribbon<S> {
    /// Creates a ribbon centered on `options.start_index`.
    ///
    /// Emits one navigated notification for the start index. Fails when the source has no
    /// item at the start index.
    pub fn new(source: S, viewport_extent: f64, options: RibbonOptions) -> Result<Self> {
        let viewport_extent = check_viewport(viewport_extent)?;
        let start_index = options.start_index;
        rdebug!(
            start_index,
            viewport_extent,
            axis = ?options.axis,
            "Ribbon::new"
        );
        let mut ribbon = Self {
            source,
            window: Window::new(options.auto_size),
            motion: Motion::default(),
            offset: viewport_extent / 2.0,
            viewport_extent,
            selected_index: start_index,
            selection_listeners: options.on_selection_changed.iter().cloned().collect(),
            navigation_listeners: options.on_navigated.iter().cloned().collect(),
            options,
        };
        if !ribbon.reset_window(start_index) {
            return Err(RibbonError::SeedRefused { index: start_index });
        }
        ribbon.notify_navigated(start_index);
        Ok(ribbon)
    }

    pub fn options(&self) -> &RibbonOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    pub fn selected_index(&self) -> i64 {
        self.selected_index
    }

    /// Largest cross-axis size among items materialized since the last reset. Hosts use it
    /// to size the ribbon's cross axis. Always 0 when `auto_size` is off.
    pub fn max_depth(&self) -> f64 {
        self.window.max_depth()
    }

    /// Bounds of the materialized window.
    pub fn window(&self) -> WindowRange {
        let range = self.window.range();
        debug_assert!(range.is_some(), "ribbon window is empty");
        range.unwrap_or(WindowRange {
            min_index: self.selected_index,
            max_index: self.selected_index,
        })
    }

    pub fn phase(&self) -> MotionPhase {
        self.motion.phase()
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_snapping()
    }

    /// Target offset and index of the running snap, if any.
    pub fn snap_target(&self) -> Option<(f64, Option<i64>)> {
        self.motion.snap_target()
    }

    pub fn record(&self, index: i64) -> Option<&ItemRecord<S::Item>> {
        self.window.store().get(index)
    }

    /// Materialized records, lowest index first.
    pub fn records(&self) -> impl Iterator<Item = &ItemRecord<S::Item>> + '_ {
        self.window.store().iter()
    }

    pub fn item(&self, index: i64) -> Option<&S::Item> {
        self.record(index).map(ItemRecord::item)
    }

    /// Iterates over the materialized items in screen coordinates, without allocations.
    pub fn for_each_placed_item(&self, mut f: impl FnMut(PlacedItem)) {
        for record in self.window.store().iter() {
            f(layout::placed(record, self.offset, self.selected_index));
        }
    }

    pub fn placed_items(&self) -> Vec<PlacedItem> {
        let mut out = Vec::with_capacity(self.window.store().len());
        self.for_each_placed_item(|it| out.push(it));
        out
    }

    /// Returns a snapshot of the current geometry and motion.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            offset: self.offset,
            viewport_extent: self.viewport_extent,
            selected_index: self.selected_index,
            window: self.window(),
            max_depth: self.max_depth(),
            phase: self.phase(),
        }
    }

    pub fn on_selection_changed(&mut self, f: impl Fn(i64) + Send + Sync + 'static) {
        self.selection_listeners.push(Arc::new(f));
    }

    pub fn on_navigated(&mut self, f: impl Fn(i64) + Send + Sync + 'static) {
        self.navigation_listeners.push(Arc::new(f));
    }

    fn notify_selection(&self, index: i64) {
        for listener in &self.selection_listeners {
            listener(index);
        }
    }

    fn notify_navigated(&self, index: i64) {
        for listener in &self.navigation_listeners {
            listener(index);
        }
    }

    /// Brings the window up to date with the current offset, positions every item and, when
    /// `update_selection` is set, re-evaluates the selection.
    fn update_views(&mut self, update_selection: bool) {
        self.window
            .ensure_covers(&mut self.source, self.offset, self.viewport_extent);

        let mut changed = None;
        match layout::nearest_to_center(self.window.store(), self.offset, self.viewport_extent) {
            Some(nearest) => {
                if update_selection && nearest != self.selected_index {
                    rtrace!(from = self.selected_index, to = nearest, "selection changed");
                    self.selected_index = nearest;
                    changed = Some(nearest);
                }
            }
            None => {
                rwarn!("layout pass over an empty window");
                debug_assert!(false, "layout pass over an empty window");
            }
        }

        for record in self.window.store().iter() {
            self.source.place(
                record.index(),
                record.item(),
                record.screen_pos(self.offset),
                record.index() == self.selected_index,
            );
        }

        if let Some(index) = changed {
            self.notify_selection(index);
        }
    }

    /// Reseeds the window at `index`, centered in the viewport. Returns `false` (leaving
    /// everything untouched) when the source refuses `index`.
    fn reset_window(&mut self, index: i64) -> bool {
        if !self.window.reset(&mut self.source, index) {
            return false;
        }
        let previous = self.selected_index;
        self.offset = self.viewport_extent / 2.0;
        self.selected_index = index;
        self.update_views(true);
        // A pass that moved the selection off the seed has already notified.
        if self.selected_index == index && index != previous {
            self.notify_selection(index);
        }
        true
    }

    /// Re-runs layout without changing the selection.
    pub fn refresh(&mut self) {
        self.update_views(false);
    }

    /// Discards every materialized item and re-centers the ribbon on `index` immediately.
    ///
    /// Cancels any gesture or animation in progress and emits a navigated notification.
    pub fn reset_to_index(&mut self, index: i64) -> Result<()> {
        if self.window.limits().refuses(index) {
            return Err(RibbonError::IndexUnavailable { index });
        }
        if !self.reset_window(index) {
            return Err(RibbonError::IndexUnavailable { index });
        }
        self.motion.cancel();
        self.notify_navigated(index);
        Ok(())
    }

    /// Applies a new viewport extent: the offset shifts by half the change so the content
    /// stays centered, and the selection is left alone.
    pub fn handle_resize(&mut self, viewport_extent: f64) -> Result<()> {
        let viewport_extent = check_viewport(viewport_extent)?;
        let previous = self.viewport_extent;
        self.viewport_extent = viewport_extent;
        self.offset += (viewport_extent - previous) / 2.0;
        rdebug!(from = previous, to = viewport_extent, "resize");
        self.update_views(false);
        Ok(())
    }

    /// Measures `index` again and repacks the window around it. The selected item keeps its
    /// position. Returns `false` when `index` is not materialized.
    pub fn remeasure(&mut self, index: i64) -> bool {
        if self
            .window
            .remeasure(&mut self.source, index, self.selected_index)
            .is_none()
        {
            return false;
        }
        self.update_views(false);
        true
    }

    /// Starts a drag gesture at pointer position `pos` (projected onto the scroll axis).
    ///
    /// Interrupts any running snap.
    pub fn drag_start(&mut self, pos: f64, now_ms: u64) {
        rtrace!(pos, now_ms, "drag_start");
        self.motion.begin_drag(pos, now_ms, self.offset);
    }

    /// Moves the active drag gesture. Returns `false` when no drag is in progress.
    pub fn drag_move(&mut self, pos: f64, now_ms: u64) -> bool {
        let smoothing = self.options.velocity_smoothing;
        let Some(offset) = self.motion.drag_to(pos, now_ms, smoothing) else {
            return false;
        };
        self.offset = offset;
        self.update_views(true);
        true
    }

    /// Ends the active drag gesture and snaps to the item the release velocity carries
    /// towards. Returns the snap target.
    ///
    /// A gesture that never moved counts as a click: the ribbon goes idle and `None` is
    /// returned.
    pub fn drag_end(&mut self) -> Option<i64> {
        let drag = self.motion.end_drag()?;
        if !drag.moved() {
            rtrace!("drag_end without movement");
            return None;
        }
        let projected = self.offset + drag.velocity * self.options.projection_horizon_ms
            - self.viewport_extent / 2.0;
        let target = layout::release_target(self.window.store(), projected)
            .unwrap_or(self.selected_index);
        rdebug!(velocity = drag.velocity, target, "drag_end");
        self.snap_to_index(target);
        Some(target)
    }

    fn snap_to_index(&mut self, index: i64) {
        let Some(record) = self.window.store().get(index) else {
            debug_assert!(false, "snap target {index} is not materialized");
            return;
        };
        let target_offset = self.viewport_extent / 2.0 - record.center_pos();
        self.motion
            .snap(target_offset, Some(index), self.options.tick_interval_ms);
    }

    /// Makes sure `index` is materialized: walks the window towards it one index at a time,
    /// or reseeds the window at `index` when it is farther than the jump tolerance.
    fn bring_into_window(&mut self, index: i64) -> Result<()> {
        let range = self.window();
        if range.contains(index) {
            return Ok(());
        }
        if self.window.limits().refuses(index) {
            return Err(RibbonError::IndexUnavailable { index });
        }

        let distance = range.distance_to(index);
        let tolerance = self.options.jump_tolerance * range.width() as f64;
        if distance as f64 > tolerance {
            rdebug!(index, distance, tolerance, "jump: resetting window");
            if !self.reset_window(index) {
                return Err(RibbonError::IndexUnavailable { index });
            }
            return Ok(());
        }

        if !self.window.extend_to(&mut self.source, index) {
            return Err(RibbonError::IndexUnavailable { index });
        }
        Ok(())
    }

    /// Animates to `index`, centering it in the viewport.
    ///
    /// Does nothing when `index` is already selected. Fails while a drag is in progress or
    /// when the source has no item at `index`; neither failure changes any state.
    pub fn go_to_index(&mut self, index: i64) -> Result<()> {
        if self.motion.is_dragging() {
            return Err(RibbonError::GestureActive);
        }
        if index == self.selected_index {
            return Ok(());
        }
        self.bring_into_window(index)?;
        rdebug!(index, "go_to_index");
        self.snap_to_index(index);
        Ok(())
    }

    /// Animates to an arbitrary offset.
    pub fn go_to_offset(&mut self, offset: f64) -> Result<()> {
        if self.motion.is_dragging() {
            return Err(RibbonError::GestureActive);
        }
        self.motion.snap(offset, None, self.options.tick_interval_ms);
        Ok(())
    }

    /// Scrolls by one wheel step. A positive `delta` scrolls towards higher indices.
    pub fn wheel(&mut self, delta: f64) -> Result<()> {
        if delta == 0.0 || delta.is_nan() {
            return Ok(());
        }
        let step = self.viewport_extent * self.options.scroll_speed;
        let target = if delta > 0.0 {
            self.offset - step
        } else {
            self.offset + step
        };
        self.go_to_offset(target)
    }

    /// Handles a click on a materialized item: interrupts a running snap and navigates to
    /// the clicked item.
    pub fn click_item(&mut self, index: i64) -> Result<()> {
        if !self.options.click_to_navigate {
            return Ok(());
        }
        if self.motion.is_snapping() {
            self.motion.cancel();
            if index == self.selected_index {
                self.snap_to_index(index);
                return Ok(());
            }
        }
        self.go_to_index(index)
    }

    /// Advances the running snap by one tick. Returns `true` while a snap is still running.
    pub fn step(&mut self) -> bool {
        let Some(outcome) = self.motion.step(
            self.offset,
            self.options.ease_factor,
            self.options.snap_epsilon,
        ) else {
            return false;
        };
        match outcome {
            StepOutcome::Moving(offset) => {
                self.offset = offset;
                self.update_views(true);
                true
            }
            StepOutcome::Settled {
                offset,
                target_index,
            } => {
                self.offset = offset;
                self.update_views(true);
                let index = target_index.unwrap_or(self.selected_index);
                rdebug!(index, "navigated");
                self.notify_navigated(index);
                false
            }
        }
    }

    /// Runs every snap tick due by `now_ms` (one per `tick_interval_ms`). The first call
    /// after a snap starts only arms its timer.
    ///
    /// Returns `true` while a snap is still running.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        while self.motion.snap_due(now_ms) {
            if !self.step() {
                return false;
            }
        }
        self.motion.is_snapping()
    }
}

impl<S> core::fmt::Debug for Ribbon<S>
where
    S: ItemSource,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ribbon")
            .field("offset", &self.offset)
            .field("viewport_extent", &self.viewport_extent)
            .field("selected_index", &self.selected_index)
            .field("window", &self.window.range())
            .field("phase", &self.motion.phase())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
