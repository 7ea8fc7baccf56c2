//! A headless, infinitely scrolling ribbon.
//!
//! For host-side input dispatch and timer driving, see the `ribbon-adapter` crate.
//!
//! The ribbon lays out an unbounded, integer-indexed sequence of items along one axis. Item
//! `start_index` begins centered in the viewport; items on either side are generated on
//! demand and evicted once they scroll fully out of view. The crate covers:
//!
//! - lazy bidirectional windowing over a contiguous run of materialized indices
//! - an offset-independent anchor model, packed edge to edge, converted to screen positions
//! - selection of the item covering the viewport center
//! - momentum drag, inertial snap targeting and exponential ease-to-target animation
//!
//! It is UI-agnostic. A host is expected to provide:
//! - an [`ItemSource`] (generator, measurement, placement)
//! - the viewport extent along the scroll axis
//! - pointer positions projected onto that axis, with timestamps
//! - a periodic call to [`Ribbon::tick`] while [`Ribbon::is_animating`]
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod layout;
mod motion;
mod options;
mod ribbon;
mod source;
mod state;
mod store;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use error::{Result, RibbonError};
pub use options::{IndexListener, RibbonOptions};
pub use ribbon::Ribbon;
pub use source::{FnSource, ItemSource, source_fn};
pub use state::FrameState;
pub use store::ItemRecord;
pub use types::{Axis, Extent, MotionPhase, PlacedItem, WindowRange};
