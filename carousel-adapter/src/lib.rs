//! Adapter utilities for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic and focuses on keyline geometry and layout state. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Animated keyline transitions (e.g. viewport resize without layout jumps)
//! - Tween-based smooth scrolling to an item
//! - Focal anchoring (keep the focused item focused across data changes)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod controller;
mod transition;
mod tween;


pub use anchor::{FocalAnchor, apply_focal_anchor, capture_focal_anchor};
pub use controller::Controller;
pub use transition::KeylineTransition;
pub use tween::{Easing, Tween};
