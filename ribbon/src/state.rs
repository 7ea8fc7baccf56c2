use crate::{MotionPhase, WindowRange};

/// A lightweight snapshot of the ribbon's geometry and motion.
///
/// Useful for renderers that want to diff frames, and for diagnostics. With
/// `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub offset: f64,
    pub viewport_extent: f64,
    pub selected_index: i64,
    pub window: WindowRange,
    /// Largest cross-axis size seen since the last reset (0 when auto-size is off).
    pub max_depth: f64,
    pub phase: MotionPhase,
}
