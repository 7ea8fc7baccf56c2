/// The axis the ribbon scrolls along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// Projects a 2-D point onto this axis.
    pub fn project(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Horizontal => x,
            Self::Vertical => y,
        }
    }
}

/// Measured size of an item.
///
/// - `main` is the size along the scroll axis (width for a horizontal ribbon)
/// - `cross` is the size along the other axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub main: f64,
    pub cross: f64,
}

impl Extent {
    pub fn new(main: f64, cross: f64) -> Self {
        Self { main, cross }
    }
}

/// Inclusive bounds of the materialized window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub min_index: i64,
    pub max_index: i64, // inclusive
}

impl WindowRange {
    /// Number of materialized indices. Never zero.
    pub fn width(&self) -> u64 {
        self.max_index.abs_diff(self.min_index) + 1
    }

    pub fn contains(&self, index: i64) -> bool {
        (self.min_index..=self.max_index).contains(&index)
    }

    /// Distance from `index` to the nearest bound, or 0 when inside.
    pub fn distance_to(&self, index: i64) -> u64 {
        if index < self.min_index {
            self.min_index.abs_diff(index)
        } else if index > self.max_index {
            index.abs_diff(self.max_index)
        } else {
            0
        }
    }
}

/// A materialized item positioned on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    pub index: i64,
    /// Start position along the scroll axis, relative to the viewport.
    pub screen_pos: f64,
    /// Size along the scroll axis.
    pub extent: f64,
    pub selected: bool,
}

impl PlacedItem {
    pub fn end(&self) -> f64 {
        self.screen_pos + self.extent
    }
}

/// Coarse phase of the motion state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionPhase {
    #[default]
    Idle,
    Dragging,
    Snapping,
}
