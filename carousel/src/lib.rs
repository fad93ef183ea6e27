//! A headless keyline carousel layout engine.
//!
//! For adapter-level utilities (animated keyline transitions, tweens, focal anchoring), see the
//! `carousel-adapter` crate.
//!
//! A carousel places items along one scroll axis so that they grow, shrink, and get masked as
//! they travel across the viewport. The geometry is described by *keylines*: reference points
//! that say how large an item is and how much of it is hidden when its center reaches that
//! point. This crate provides:
//! - [`KeylineStateBuilder`]: validates a hand-written keyline arrangement
//! - [`Strategy`]: derives an arrangement (start- or center-aligned) from a measured item size
//! - [`CarouselLayout`]: maps a scroll offset to attach/detach decisions and per-item placement
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the first item's unmasked size and the viewport extent
//! - scroll deltas
//! - a [`CarouselHost`] that attaches, detaches, and positions item views
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod arrangement;
mod builder;
mod debug;
mod error;
mod host;
mod keyline;
mod layout;
mod math;
mod options;
mod recycler;
mod state;
mod strategy;
mod types;

#[cfg(test)]
mod tests;

pub use arrangement::{Arrangement, ArrangementTargets};
pub use builder::KeylineStateBuilder;
pub use debug::{DebugKeyline, DebugOverlay};
pub use error::{BuildError, CarouselError, LerpError};
pub use host::{CarouselHost, NoopHost};
pub use keyline::{Keyline, KeylineSample, KeylineState, ShiftedKeylineState};
pub use layout::CarouselLayout;
pub use options::CarouselOptions;
pub use recycler::AttachedSet;
pub use state::LayoutSnapshot;
pub use strategy::{Strategy, StrategyParams};
pub use types::{AttachedRange, ItemPlacement, LayoutDirection, MaskRect, Orientation};
