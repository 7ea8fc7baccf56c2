use std::sync::Arc;

use crate::Axis;

/// A callback receiving an item index (selection changes, completed navigations).
pub type IndexListener = Arc<dyn Fn(i64) + Send + Sync>;

/// Configuration for [`crate::Ribbon`].
///
/// The motion constants (`ease_factor`, `snap_epsilon`, `velocity_smoothing`,
/// `projection_horizon_ms`, `tick_interval_ms`, `jump_tolerance`) are tuning knobs; the
/// defaults give the classic "drag, fling, settle" feel at roughly 30 Hz.
#[derive(Clone)]
pub struct RibbonOptions {
    pub axis: Axis,
    /// The index the ribbon is seeded with and initially centered on.
    pub start_index: i64,

    /// Track the largest cross-axis size of materialized items (see
    /// [`crate::Ribbon::max_depth`]).
    pub auto_size: bool,
    /// Whether [`crate::Ribbon::click_item`] navigates to the clicked item.
    pub click_to_navigate: bool,

    /// Fraction of the remaining distance covered per snap tick.
    pub ease_factor: f64,
    /// A snap completes once the offset is closer than this to its target.
    pub snap_epsilon: f64,
    /// Weight kept from the previous velocity estimate on each drag move.
    pub velocity_smoothing: f64,
    /// How far ahead (in ms) a release velocity is extrapolated to pick the snap target.
    pub projection_horizon_ms: f64,
    /// Snap animation period.
    pub tick_interval_ms: u64,
    /// `go_to_index` resets the window instead of walking to the target when the target is
    /// farther than `jump_tolerance * window_width` from the window.
    pub jump_tolerance: f64,
    /// Wheel step as a fraction of the viewport extent.
    pub scroll_speed: f64,

    /// Fired when the selected index changes.
    pub on_selection_changed: Option<IndexListener>,
    /// Fired when a navigation (snap) completes, and once after construction.
    pub on_navigated: Option<IndexListener>,
}

impl Default for RibbonOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            start_index: 0,
            auto_size: true,
            click_to_navigate: true,
            ease_factor: 0.5,
            snap_epsilon: 3.0,
            velocity_smoothing: 0.75,
            projection_horizon_ms: 100.0,
            tick_interval_ms: 33,
            jump_tolerance: 2.0,
            scroll_speed: 0.15,
            on_selection_changed: None,
            on_navigated: None,
        }
    }
}

impl RibbonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_start_index(mut self, start_index: i64) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn with_auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }

    pub fn with_click_to_navigate(mut self, click_to_navigate: bool) -> Self {
        self.click_to_navigate = click_to_navigate;
        self
    }

    /// Clamped to `(0, 1]`; a factor of 1 jumps straight to the target.
    pub fn with_ease_factor(mut self, ease_factor: f64) -> Self {
        self.ease_factor = ease_factor.clamp(f64::EPSILON, 1.0);
        self
    }

    pub fn with_snap_epsilon(mut self, snap_epsilon: f64) -> Self {
        self.snap_epsilon = snap_epsilon.max(0.0);
        self
    }

    pub fn with_velocity_smoothing(mut self, velocity_smoothing: f64) -> Self {
        self.velocity_smoothing = velocity_smoothing.clamp(0.0, 1.0);
        self
    }

    pub fn with_projection_horizon_ms(mut self, projection_horizon_ms: f64) -> Self {
        self.projection_horizon_ms = projection_horizon_ms;
        self
    }

    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms.max(1);
        self
    }

    pub fn with_jump_tolerance(mut self, jump_tolerance: f64) -> Self {
        self.jump_tolerance = jump_tolerance.max(0.0);
        self
    }

    pub fn with_scroll_speed(mut self, scroll_speed: f64) -> Self {
        self.scroll_speed = scroll_speed;
        self
    }

    pub fn with_on_selection_changed(
        mut self,
        on_selection_changed: Option<impl Fn(i64) + Send + Sync + 'static>,
    ) -> Self {
        self.on_selection_changed = on_selection_changed.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_navigated(
        mut self,
        on_navigated: Option<impl Fn(i64) + Send + Sync + 'static>,
    ) -> Self {
        self.on_navigated = on_navigated.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for RibbonOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RibbonOptions")
            .field("axis", &self.axis)
            .field("start_index", &self.start_index)
            .field("auto_size", &self.auto_size)
            .field("click_to_navigate", &self.click_to_navigate)
            .field("ease_factor", &self.ease_factor)
            .field("snap_epsilon", &self.snap_epsilon)
            .field("velocity_smoothing", &self.velocity_smoothing)
            .field("projection_horizon_ms", &self.projection_horizon_ms)
            .field("tick_interval_ms", &self.tick_interval_ms)
            .field("jump_tolerance", &self.jump_tolerance)
            .field("scroll_speed", &self.scroll_speed)
            .finish_non_exhaustive()
    }
}
