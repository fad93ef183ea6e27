/// A lightweight, serializable snapshot of the layout's scroll state.
///
/// Keyline states are not stored; restoring a snapshot re-runs the strategy for the recorded
/// item size and viewport.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSnapshot {
    pub scroll_offset: f32,
    pub viewport_extent: f32,
    /// The measured item size, `None` before the first measure.
    pub item_size: Option<f32>,
}
