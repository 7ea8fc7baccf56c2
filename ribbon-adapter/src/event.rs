use ribbon::Axis;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// A host input event, in the host's 2-D coordinates.
///
/// Only the component along the ribbon's axis is used. Touch events carry the first touch
/// point; additional touches are the host's business.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        button: PointerButton,
        time_ms: u64,
    },
    PointerMove {
        x: f64,
        y: f64,
        time_ms: u64,
    },
    PointerUp {
        time_ms: u64,
    },
    TouchStart {
        x: f64,
        y: f64,
        time_ms: u64,
    },
    TouchMove {
        x: f64,
        y: f64,
        time_ms: u64,
    },
    TouchEnd {
        time_ms: u64,
    },
    /// A wheel notch. Positive `delta` scrolls towards higher indices.
    Wheel {
        delta: f64,
    },
    /// A click at a position relative to the ribbon's viewport; the item under it is looked
    /// up when the event is dispatched.
    Click {
        x: f64,
        y: f64,
    },
    /// A click the host has already attributed to an item.
    ItemClick {
        index: i64,
    },
    /// The ribbon's viewport was resized; `width`/`height` are its new outer size.
    Resize {
        width: f64,
        height: f64,
    },
}

impl InputEvent {
    /// The event's position projected onto `axis`, for events that carry one.
    pub fn position(&self, axis: Axis) -> Option<f64> {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::TouchStart { x, y, .. }
            | Self::TouchMove { x, y, .. }
            | Self::Click { x, y } => Some(axis.project(x, y)),
            _ => None,
        }
    }
}
