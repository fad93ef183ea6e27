use alloc::vec::Vec;

use crate::math::{self, approx_eq};
use crate::{BuildError, Keyline, KeylineState};

#[derive(Clone, Copy, Debug)]
struct PendingKeyline {
    offset: f32,
    mask: f32,
    masked_item_size: f32,
    is_focal: bool,
    is_anchor: bool,
}

/// Collects keylines in spatial order and validates them into a [`KeylineState`].
///
/// Keylines must be added from the leading edge to the trailing edge. Validation is deferred to
/// [`KeylineStateBuilder::build`], which either returns a complete state or an error; nothing is
/// partially built.
#[derive(Clone, Debug)]
pub struct KeylineStateBuilder {
    item_size: f32,
    viewport_extent: f32,
    leading_padding: f32,
    pending: Vec<PendingKeyline>,
}

impl KeylineStateBuilder {
    pub fn new(item_size: f32, viewport_extent: f32) -> Self {
        Self {
            item_size,
            viewport_extent,
            leading_padding: 0.0,
            pending: Vec::new(),
        }
    }

    /// Shifts every computed `location` by `padding`.
    pub fn leading_padding(mut self, padding: f32) -> Self {
        self.leading_padding = padding;
        self
    }

    /// Adds a keyline centered at `offset`.
    ///
    /// Keylines with a non-positive masked size are ignored.
    pub fn add_keyline(
        mut self,
        offset: f32,
        mask: f32,
        masked_item_size: f32,
        is_focal: bool,
    ) -> Self {
        self.push(offset, mask, masked_item_size, is_focal, false);
        self
    }

    /// Adds `count` adjacent keylines of the same size, the first one centered at `offset`.
    pub fn add_keyline_range(
        mut self,
        offset: f32,
        mask: f32,
        masked_item_size: f32,
        count: usize,
        is_focal: bool,
    ) -> Self {
        for i in 0..count {
            self.push(
                offset + masked_item_size * i as f32,
                mask,
                masked_item_size,
                is_focal,
                false,
            );
        }
        self
    }

    /// Adds an anchor keyline. Anchors are only valid as the first or last keyline.
    pub fn add_anchor_keyline(mut self, offset: f32, mask: f32, masked_item_size: f32) -> Self {
        self.push(offset, mask, masked_item_size, false, true);
        self
    }

    fn push(
        &mut self,
        offset: f32,
        mask: f32,
        masked_item_size: f32,
        is_focal: bool,
        is_anchor: bool,
    ) {
        if masked_item_size <= 0.0 {
            cwarn!(offset, masked_item_size, "KeylineStateBuilder: ignoring empty keyline");
            return;
        }
        self.pending.push(PendingKeyline {
            offset,
            mask,
            masked_item_size,
            is_focal,
            is_anchor,
        });
    }

    pub fn build(self) -> Result<KeylineState, BuildError> {
        if !self.item_size.is_finite() || self.item_size <= 0.0 {
            return Err(BuildError::InvalidItemSize(self.item_size));
        }
        if !self.viewport_extent.is_finite() || self.viewport_extent <= 0.0 {
            return Err(BuildError::InvalidViewportExtent(self.viewport_extent));
        }

        let pending = &self.pending;
        let n = pending.len();

        for (index, k) in pending.iter().enumerate() {
            if !(0.0..=1.0).contains(&k.mask) {
                return Err(BuildError::MaskOutOfRange { index, mask: k.mask });
            }
            if k.is_anchor && index != 0 && index != n - 1 {
                return Err(BuildError::MisplacedAnchor { index });
            }
            if index > 0 && k.offset < pending[index - 1].offset {
                return Err(BuildError::UnsortedKeylines { index });
            }
        }

        let first_focal_index = pending
            .iter()
            .position(|k| k.is_focal)
            .ok_or(BuildError::NoFocalKeyline)?;
        let last_focal_index = pending
            .iter()
            .rposition(|k| k.is_focal)
            .ok_or(BuildError::NoFocalKeyline)?;

        for index in first_focal_index..=last_focal_index {
            let k = &pending[index];
            if !k.is_focal {
                return Err(BuildError::NonContiguousFocal { index });
            }
            if !approx_eq(k.masked_item_size, self.item_size) {
                return Err(BuildError::FocalSizeMismatch {
                    index,
                    expected: self.item_size,
                    found: k.masked_item_size,
                });
            }
            if math::abs(k.mask) > math::EPSILON {
                return Err(BuildError::FocalMaskNonZero {
                    index,
                    mask: k.mask,
                });
            }
        }

        // Sizes may only shrink moving away from the focal range.
        for index in 0..first_focal_index {
            let tolerance = math::EPSILON * self.item_size;
            if pending[index].masked_item_size > pending[index + 1].masked_item_size + tolerance {
                return Err(BuildError::NonMonotonicMask { index });
            }
        }
        for index in last_focal_index + 1..n {
            let tolerance = math::EPSILON * self.item_size;
            if pending[index].masked_item_size > pending[index - 1].masked_item_size + tolerance {
                return Err(BuildError::NonMonotonicMask { index });
            }
        }

        let extent = self.viewport_extent;
        let mut keylines: Vec<Keyline> = pending
            .iter()
            .map(|k| Keyline {
                location: 0.0,
                offset_location: k.offset,
                mask: k.mask,
                masked_item_size: k.masked_item_size,
                cutoff: cutoff(k.offset, k.masked_item_size, extent),
                is_focal: k.is_focal,
                is_anchor: k.is_anchor,
            })
            .collect();
        Self::assign_locations(
            &mut keylines,
            first_focal_index,
            self.item_size,
            self.leading_padding,
        );

        cdebug!(
            keylines = n,
            first_focal_index,
            last_focal_index,
            item_size = self.item_size,
            extent,
            "KeylineStateBuilder::build"
        );

        Ok(KeylineState {
            item_size: self.item_size,
            viewport_extent: extent,
            leading_padding: self.leading_padding,
            keylines,
            first_focal_index,
            last_focal_index,
        })
    }

    /// Places every keyline in the end-to-end model, pivoting on the first focal keyline.
    pub(crate) fn assign_locations(
        keylines: &mut [Keyline],
        first_focal_index: usize,
        item_size: f32,
        leading_padding: f32,
    ) {
        let pivot = keylines[first_focal_index].offset_location;
        for (i, k) in keylines.iter_mut().enumerate() {
            let steps = i as f32 - first_focal_index as f32;
            k.location = pivot + steps * item_size + leading_padding;
        }
    }
}

fn cutoff(offset: f32, masked_item_size: f32, extent: f32) -> f32 {
    let half = masked_item_size / 2.0;
    let before = (half - offset).max(0.0);
    let after = (offset + half - extent).max(0.0);
    before.max(after).min(masked_item_size)
}
