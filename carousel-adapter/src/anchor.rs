use core::fmt;

use carousel::{CarouselHost, CarouselLayout};

/// The identity of the focused item, used to keep it focused across data or viewport changes.
///
/// Typical use cases:
/// - viewport resize (the strategy produces a new keyline state and new scroll bounds)
/// - insertions before the focused item
#[derive(Clone, PartialEq, Eq)]
pub struct FocalAnchor<K> {
    pub key: K,
}

impl<K: fmt::Debug> fmt::Debug for FocalAnchor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocalAnchor").field("key", &self.key).finish()
    }
}

/// Captures an anchor for the item closest to the leading focal keyline.
///
/// Returns `None` before the first measure or when the carousel is empty.
pub fn capture_focal_anchor<K>(
    layout: &CarouselLayout,
    mut index_to_key: impl FnMut(usize) -> K,
) -> Option<FocalAnchor<K>> {
    let index = layout.focal_index()?;
    Some(FocalAnchor {
        key: index_to_key(index),
    })
}

/// Scrolls so the anchored item is focal again, then fills.
///
/// The adapter must provide a `key_to_index` mapping for the *current* dataset.
///
/// Returns `true` when the anchor was successfully applied.
pub fn apply_focal_anchor<K>(
    layout: &mut CarouselLayout,
    anchor: &FocalAnchor<K>,
    mut key_to_index: impl FnMut(&K) -> Option<usize>,
    host: &mut impl CarouselHost,
) -> bool {
    let Some(index) = key_to_index(&anchor.key) else {
        return false;
    };
    layout.scroll_to_index(index, host).is_some()
}
