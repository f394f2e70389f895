//! Decorative page behaviors: viewport containment, scroll centering, and
//! mouse-driven hue rotation.
//!
//! The core is host-agnostic geometry and a small state machine, `no_std`
//! compatible. The `web` feature binds it to the DOM through `web-sys`.
//!
//! # Modules
//!
//! - [`adjust`] — `keep-inside`: one-pixel-per-frame margin correction against the viewport
//! - [`geometry`] — Horizontal bounds and the initial centering offset
//! - [`scroll`] — `center-me` and `center-me-horizontally` scroll requests
//! - [`hue`] — Pointer position to `hue-rotate` filter
//! - `web` — Browser binding (feature `web`)

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(feature = "web"), forbid(unsafe_code))]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod adjust;
pub mod geometry;
pub mod hue;
pub mod scroll;
#[cfg(feature = "web")]
pub mod web;

pub use adjust::{
    Config, ContainmentAdjuster, FrameScheduler, InitialOffset, Pass, Target, Trigger, Viewport,
};
pub use geometry::{Bounds, centering_offset};
pub use scroll::{Align, ScrollBehavior, ScrollCentering, ScrollRequest};
