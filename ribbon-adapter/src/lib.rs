//! Host-side utilities for the `ribbon` crate.
//!
//! The `ribbon` crate is UI-agnostic and only understands scalar positions along its axis.
//! This crate provides the small, framework-neutral glue an adapter needs:
//!
//! - Host input events (pointer, touch, wheel, click, resize) projected onto the ribbon's
//!   axis and routed according to the ribbon's current motion state
//! - Timer driving for snap animations
//! - A shared, non-reentrant handle for callback-heavy hosts
//!
//! This crate is intentionally framework-agnostic (no DOM/winit bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod event;
mod shared;


pub use controller::{Controller, Dispatch};
pub use event::{InputEvent, PointerButton};
pub use shared::{SharedRibbon, WeakRibbon};
