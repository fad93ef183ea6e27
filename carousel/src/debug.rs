use alloc::vec::Vec;

use crate::ShiftedKeylineState;

/// One keyline as reported to visualization tooling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugKeyline {
    pub location: f32,
    pub offset_location: f32,
    pub mask: f32,
    pub masked_item_size: f32,
    pub is_focal: bool,
    pub is_anchor: bool,
}

/// The current keylines, as of the layout's scroll offset.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugOverlay {
    pub scroll_offset: f32,
    pub keylines: Vec<DebugKeyline>,
}

impl DebugOverlay {
    pub(crate) fn capture(state: &ShiftedKeylineState<'_>, scroll_offset: f32) -> Self {
        let keylines = state
            .keylines()
            .map(|k| DebugKeyline {
                location: k.location,
                offset_location: k.offset_location,
                mask: k.mask,
                masked_item_size: k.masked_item_size,
                is_focal: k.is_focal,
                is_anchor: k.is_anchor,
            })
            .collect();
        Self {
            scroll_offset,
            keylines,
        }
    }

    /// `(location, mask)` pairs in keyline order.
    pub fn location_mask_pairs(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.keylines.iter().map(|k| (k.location, k.mask))
    }
}
