#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::RightToLeft)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Where and how an attached item should be drawn for the current scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPlacement {
    pub index: usize,
    /// Center of the masked item along the scroll axis, relative to the viewport start.
    pub center: f32,
    /// Unmasked size along the scroll axis.
    pub item_size: f32,
    pub masked_size: f32,
    pub mask: f32,
    /// Amount of the masked item outside the viewport.
    pub cutoff: f32,
}

impl ItemPlacement {
    /// Start of the unmasked item along the scroll axis.
    pub fn unmasked_start(&self) -> f32 {
        self.center - self.item_size / 2.0
    }

    pub fn masked_start(&self) -> f32 {
        self.center - self.masked_size / 2.0
    }

    pub fn masked_end(&self) -> f32 {
        self.center + self.masked_size / 2.0
    }

    /// The visible part of the item in item-local coordinates.
    ///
    /// The mask is centered: equal amounts are hidden on both ends of the scroll axis. `cross` is
    /// the item's size on the other axis.
    pub fn mask_rect(&self, orientation: Orientation, cross: f32) -> MaskRect {
        let inset = (self.item_size - self.masked_size) / 2.0;
        match orientation {
            Orientation::Horizontal => MaskRect {
                left: inset,
                top: 0.0,
                right: inset + self.masked_size,
                bottom: cross,
            },
            Orientation::Vertical => MaskRect {
                left: 0.0,
                top: inset,
                right: cross,
                bottom: inset + self.masked_size,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl MaskRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Indexes kept attached by the last fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachedRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl AttachedRange {
    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}
