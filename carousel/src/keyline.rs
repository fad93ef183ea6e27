use alloc::vec::Vec;

use crate::math::{self, lerp, progress};
use crate::{KeylineStateBuilder, LerpError};

/// A reference point along the scroll axis that defines how an item is sized and masked when its
/// end-to-end position reaches `location`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyline {
    /// Position in the end-to-end model (every item laid out at full size).
    pub location: f32,
    /// Center of the masked item in the actual layout.
    pub offset_location: f32,
    /// Fraction of the item hidden, in `[0, 1]`.
    pub mask: f32,
    pub masked_item_size: f32,
    /// Amount of the masked item that falls outside the viewport.
    pub cutoff: f32,
    pub is_focal: bool,
    pub is_anchor: bool,
}

/// Interpolated geometry for a position inside a [`KeylineState`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeylineSample {
    pub offset_location: f32,
    pub mask: f32,
    pub masked_item_size: f32,
    pub cutoff: f32,
}

/// An ordered, validated set of keylines.
///
/// Instances are produced by [`KeylineStateBuilder::build`], [`KeylineState::reverse`], and
/// [`KeylineState::lerp`]; all of them uphold the builder's invariants:
/// - at least one focal keyline, all focal keylines contiguous and full-size
/// - masked sizes never grow moving away from the focal range
/// - anchors only at either end
/// - keylines sorted by location
///
/// With `feature = "serde"`, this type implements `Serialize` only.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeylineState {
    pub(crate) item_size: f32,
    pub(crate) viewport_extent: f32,
    pub(crate) leading_padding: f32,
    pub(crate) keylines: Vec<Keyline>,
    pub(crate) first_focal_index: usize,
    pub(crate) last_focal_index: usize,
}

impl KeylineState {
    /// The unmasked item size every keyline is derived from.
    pub fn item_size(&self) -> f32 {
        self.item_size
    }

    pub fn viewport_extent(&self) -> f32 {
        self.viewport_extent
    }

    pub fn leading_padding(&self) -> f32 {
        self.leading_padding
    }

    pub fn keylines(&self) -> &[Keyline] {
        &self.keylines
    }

    pub fn len(&self) -> usize {
        self.keylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keylines.is_empty()
    }

    pub fn first_focal_index(&self) -> usize {
        self.first_focal_index
    }

    pub fn last_focal_index(&self) -> usize {
        self.last_focal_index
    }

    pub fn first_focal_keyline(&self) -> &Keyline {
        &self.keylines[self.first_focal_index]
    }

    pub fn last_focal_keyline(&self) -> &Keyline {
        &self.keylines[self.last_focal_index]
    }

    pub fn first_keyline(&self) -> &Keyline {
        &self.keylines[0]
    }

    pub fn last_keyline(&self) -> &Keyline {
        &self.keylines[self.keylines.len() - 1]
    }

    /// Number of keylines in the focal range.
    pub fn focal_count(&self) -> usize {
        self.last_focal_index - self.first_focal_index + 1
    }

    /// Mirrors this state for right-to-left layout.
    ///
    /// Every offset is reflected about the viewport midpoint, the keyline order is reversed, and
    /// the locations are recomputed. Reversing twice yields the original state.
    pub fn reverse(&self, viewport_extent: f32) -> KeylineState {
        let n = self.keylines.len();
        let last = n - 1;
        let mut keylines = Vec::with_capacity(n);
        for k in self.keylines.iter().rev() {
            keylines.push(Keyline {
                offset_location: viewport_extent - k.offset_location,
                ..*k
            });
        }
        let first_focal_index = last - self.last_focal_index;
        let last_focal_index = last - self.first_focal_index;
        let leading_padding = -self.leading_padding;
        KeylineStateBuilder::assign_locations(
            &mut keylines,
            first_focal_index,
            self.item_size,
            leading_padding,
        );
        cdebug!(
            keylines = n,
            extent = viewport_extent,
            "KeylineState::reverse"
        );
        KeylineState {
            item_size: self.item_size,
            viewport_extent,
            leading_padding,
            keylines,
            first_focal_index,
            last_focal_index,
        }
    }

    /// Interpolates between two compatible states.
    ///
    /// `progress` is clamped to `[0, 1]`. Both states must have the same keyline count, the same
    /// focal range, and anchors in the same positions.
    pub fn lerp(
        from: &KeylineState,
        to: &KeylineState,
        progress: f32,
    ) -> Result<KeylineState, LerpError> {
        from.check_compatible(to)?;
        let t = progress.clamp(0.0, 1.0);
        let keylines = from
            .keylines
            .iter()
            .zip(&to.keylines)
            .map(|(a, b)| Keyline {
                location: lerp(a.location, b.location, t),
                offset_location: lerp(a.offset_location, b.offset_location, t),
                mask: lerp(a.mask, b.mask, t),
                masked_item_size: lerp(a.masked_item_size, b.masked_item_size, t),
                cutoff: lerp(a.cutoff, b.cutoff, t),
                is_focal: a.is_focal,
                is_anchor: a.is_anchor,
            })
            .collect();
        Ok(KeylineState {
            item_size: lerp(from.item_size, to.item_size, t),
            viewport_extent: lerp(from.viewport_extent, to.viewport_extent, t),
            leading_padding: lerp(from.leading_padding, to.leading_padding, t),
            keylines,
            first_focal_index: from.first_focal_index,
            last_focal_index: from.last_focal_index,
        })
    }

    /// Returns `Ok(())` when `self` and `other` can be passed to [`KeylineState::lerp`].
    pub fn check_compatible(&self, other: &KeylineState) -> Result<(), LerpError> {
        if self.keylines.len() != other.keylines.len() {
            return Err(LerpError::KeylineCountMismatch {
                from: self.keylines.len(),
                to: other.keylines.len(),
            });
        }
        if self.first_focal_index != other.first_focal_index
            || self.last_focal_index != other.last_focal_index
        {
            return Err(LerpError::FocalRangeMismatch {
                from_first: self.first_focal_index,
                from_last: self.last_focal_index,
                to_first: other.first_focal_index,
                to_last: other.last_focal_index,
            });
        }
        if let Some(index) = self
            .keylines
            .iter()
            .zip(&other.keylines)
            .position(|(a, b)| a.is_anchor != b.is_anchor)
        {
            return Err(LerpError::AnchorMismatch { index });
        }
        Ok(())
    }

    /// Returns a copy with every `location` moved by `by`.
    ///
    /// Offsets, masks, and sizes are untouched: a translated state describes the same on-screen
    /// arrangement seen from a different scroll position.
    pub fn translated(&self, by: f32) -> KeylineState {
        let mut out = self.clone();
        for k in &mut out.keylines {
            k.location += by;
        }
        out
    }

    /// Borrows this state as a translated view without copying it.
    pub fn shifted(&self, shift: f32) -> ShiftedKeylineState<'_> {
        ShiftedKeylineState { base: self, shift }
    }

    /// Index of the keyline pair bracketing `location`.
    ///
    /// Returns `(before, after)`; a position exactly on a keyline resolves to that keyline as
    /// `before`. Outside the outer keylines both indices point at the outer pair.
    pub fn bracket(&self, location: f32) -> (usize, usize) {
        let n = self.keylines.len();
        if n == 1 {
            return (0, 0);
        }
        let p = self.keylines.partition_point(|k| k.location <= location);
        if p == 0 {
            (0, 1)
        } else if p >= n {
            (n - 2, n - 1)
        } else {
            (p - 1, p)
        }
    }

    /// Interpolated geometry for an item whose end-to-end center is at `location`.
    ///
    /// Between two keylines every field is interpolated linearly. Beyond the outer keylines the
    /// offset keeps the slope of the outer pair while mask and size hold the outer keyline's
    /// values.
    pub fn interpolate(&self, location: f32) -> KeylineSample {
        let (i, j) = self.bracket(location);
        let a = &self.keylines[i];
        let b = &self.keylines[j];

        let first = self.first_keyline();
        let last = self.last_keyline();
        let outer = if location < first.location {
            Some(first)
        } else if location > last.location {
            Some(last)
        } else {
            None
        };

        if let Some(k) = outer {
            let slope = if i == j {
                1.0
            } else {
                let span = b.location - a.location;
                if math::abs(span) <= f32::EPSILON {
                    1.0
                } else {
                    (b.offset_location - a.offset_location) / span
                }
            };
            return KeylineSample {
                offset_location: k.offset_location + (location - k.location) * slope,
                mask: k.mask,
                masked_item_size: k.masked_item_size,
                cutoff: k.cutoff,
            };
        }

        let t = progress(a.location, b.location, location);
        KeylineSample {
            offset_location: lerp(a.offset_location, b.offset_location, t),
            mask: lerp(a.mask, b.mask, t),
            masked_item_size: lerp(a.masked_item_size, b.masked_item_size, t),
            cutoff: lerp(a.cutoff, b.cutoff, t),
        }
    }
}

/// A [`KeylineState`] viewed through a translation applied on read.
///
/// The layout engine hands these out for the current scroll offset instead of storing a shifted
/// copy per scroll position.
#[derive(Clone, Copy, Debug)]
pub struct ShiftedKeylineState<'a> {
    base: &'a KeylineState,
    shift: f32,
}

impl<'a> ShiftedKeylineState<'a> {
    pub fn base(&self) -> &'a KeylineState {
        self.base
    }

    pub fn shift(&self) -> f32 {
        self.shift
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn keyline(&self, index: usize) -> Option<Keyline> {
        self.base.keylines.get(index).map(|k| Keyline {
            location: k.location + self.shift,
            ..*k
        })
    }

    pub fn keylines(&self) -> impl Iterator<Item = Keyline> + 'a {
        let shift = self.shift;
        self.base.keylines.iter().map(move |k| Keyline {
            location: k.location + shift,
            ..*k
        })
    }

    pub fn interpolate(&self, location: f32) -> KeylineSample {
        self.base.interpolate(location - self.shift)
    }

    pub fn to_state(&self) -> KeylineState {
        self.base.translated(self.shift)
    }
}
