use crate::{LayoutDirection, Orientation, Strategy};

/// Configuration for [`crate::CarouselLayout`].
///
/// All fields are plain values; adapters typically build one with the `with_*` helpers and
/// hand it to `CarouselLayout::new`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselOptions {
    pub item_count: usize,
    pub strategy: Strategy,
    pub direction: LayoutDirection,
    pub orientation: Orientation,
    /// Extra distance past the outer keylines within which items stay attached.
    pub buffer: f32,
    /// Space before the first item in the end-to-end model.
    pub leading_padding: f32,
    /// Index brought into the focal range by the first measure.
    pub initial_index: usize,
}

impl CarouselOptions {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            strategy: Strategy::default(),
            direction: LayoutDirection::LeftToRight,
            orientation: Orientation::Horizontal,
            buffer: 0.0,
            leading_padding: 0.0,
            initial_index: 0,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_buffer(mut self, buffer: f32) -> Self {
        self.buffer = buffer.max(0.0);
        self
    }

    pub fn with_leading_padding(mut self, padding: f32) -> Self {
        self.leading_padding = padding;
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self::new(0)
    }
}
