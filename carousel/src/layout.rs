use crate::math::{ceil_index, floor, floor_index};
use crate::{
    AttachedRange, AttachedSet, CarouselError, CarouselHost, CarouselOptions, DebugOverlay,
    ItemPlacement, KeylineState, LayoutDirection, LayoutSnapshot, ShiftedKeylineState, Strategy,
};

/// A headless carousel layout engine.
///
/// This type does not hold any UI objects:
/// - the host reports the first item's size and the viewport extent
/// - scrolling is driven through [`CarouselLayout::scroll_by`]
/// - attach/detach decisions and per-item geometry are pushed to a [`CarouselHost`]
///
/// Item positions live in the end-to-end model: item `i` is centered at `(i + 0.5) * item_size`
/// (mirrored for right-to-left). Keyline locations carry the leading padding, so the padding
/// offsets the items against the keylines. The canonical keyline state is never rewritten while
/// scrolling; the current state is that canonical state translated against the scroll offset on
/// read.
#[derive(Clone, Debug)]
pub struct CarouselLayout {
    options: CarouselOptions,
    viewport_extent: f32,
    measured_item_size: Option<f32>,
    keyline_state: Option<KeylineState>,
    scroll_offset: f32,
    min_scroll: f32,
    max_scroll: f32,
    attached: AttachedSet,
    attached_range: AttachedRange,
}

impl CarouselLayout {
    pub fn new(options: CarouselOptions) -> Self {
        cdebug!(
            item_count = options.item_count,
            reversed = options.direction.is_reversed(),
            "CarouselLayout::new"
        );
        Self {
            options,
            viewport_extent: 0.0,
            measured_item_size: None,
            keyline_state: None,
            scroll_offset: 0.0,
            min_scroll: 0.0,
            max_scroll: 0.0,
            attached: AttachedSet::new(),
            attached_range: AttachedRange::default(),
        }
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn item_count(&self) -> usize {
        self.options.item_count
    }

    pub fn viewport_extent(&self) -> f32 {
        self.viewport_extent
    }

    /// The size reported by [`CarouselLayout::on_first_measure`].
    pub fn measured_item_size(&self) -> Option<f32> {
        self.measured_item_size
    }

    pub fn is_measured(&self) -> bool {
        self.keyline_state.is_some()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn min_scroll(&self) -> f32 {
        self.min_scroll
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    pub fn clamp_scroll_offset(&self, offset: f32) -> f32 {
        if offset.is_nan() {
            return self.scroll_offset;
        }
        offset.clamp(self.min_scroll, self.max_scroll)
    }

    /// The canonical keyline state, with layout direction applied.
    pub fn keyline_state(&self) -> Option<&KeylineState> {
        self.keyline_state.as_ref()
    }

    pub fn attached(&self) -> &AttachedSet {
        &self.attached
    }

    /// Attached indices in ascending order.
    pub fn attached_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.attached.iter()
    }

    pub fn is_attached(&self, index: usize) -> bool {
        self.attached.contains(index)
    }

    /// The range applied by the last [`CarouselLayout::fill`].
    pub fn attached_range(&self) -> AttachedRange {
        self.attached_range
    }

    fn sign(&self) -> f32 {
        if self.options.direction.is_reversed() {
            -1.0
        } else {
            1.0
        }
    }

    /// Translation from the canonical state to the state for scroll offset `offset`.
    fn shift_for(&self, offset: f32) -> f32 {
        -self.sign() * offset
    }

    /// Builds the initial keyline state and brings `initial_index` into the focal range.
    ///
    /// Construction errors from the strategy are returned as-is and leave the layout unmeasured.
    pub fn on_first_measure(
        &mut self,
        item_size: f32,
        viewport_extent: f32,
    ) -> Result<(), CarouselError> {
        let state = self.build_state(item_size, viewport_extent)?;
        self.measured_item_size = Some(item_size);
        self.viewport_extent = viewport_extent;
        self.adopt_keyline_state(state);
        self.scroll_offset = self
            .offset_for_index(self.options.initial_index)
            .unwrap_or(self.min_scroll);
        cdebug!(
            item_size,
            viewport_extent,
            scroll_offset = self.scroll_offset,
            min_scroll = self.min_scroll,
            max_scroll = self.max_scroll,
            "CarouselLayout::on_first_measure"
        );
        Ok(())
    }

    /// Runs the configured strategy without touching the layout.
    ///
    /// Returns the state the layout would adopt for `item_size` and `viewport_extent`.
    pub fn build_state(
        &self,
        item_size: f32,
        viewport_extent: f32,
    ) -> Result<KeylineState, CarouselError> {
        let state = self
            .options
            .strategy
            .keyline_state(
                item_size,
                viewport_extent,
                self.options.item_count,
                self.options.leading_padding,
            )
            .inspect_err(|_err| {
                cwarn!(error = %_err, item_size, viewport_extent, "strategy rejected");
            })?;
        if self.options.direction.is_reversed() {
            Ok(state.reverse(viewport_extent))
        } else {
            Ok(state)
        }
    }

    fn rebuild(&mut self) -> Result<(), CarouselError> {
        let Some(item_size) = self.measured_item_size else {
            return Ok(());
        };
        let state = self.build_state(item_size, self.viewport_extent)?;
        self.adopt_keyline_state(state);
        Ok(())
    }

    /// Replaces the canonical keyline state, recomputes scroll bounds, and clamps the offset.
    ///
    /// The state must already be oriented for the layout direction. This is how animated
    /// transitions feed interpolated states into the layout.
    pub fn adopt_keyline_state(&mut self, state: KeylineState) {
        self.viewport_extent = state.viewport_extent();
        self.keyline_state = Some(state);
        self.update_scroll_bounds();
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        ctrace!(
            min_scroll = self.min_scroll,
            max_scroll = self.max_scroll,
            scroll_offset = self.scroll_offset,
            "CarouselLayout::adopt_keyline_state"
        );
    }

    fn update_scroll_bounds(&mut self) {
        let Some(state) = &self.keyline_state else {
            self.min_scroll = 0.0;
            self.max_scroll = 0.0;
            return;
        };
        let last = self.options.item_count.saturating_sub(1);
        let first_focal = state.first_focal_keyline().location;
        let last_focal = state.last_focal_keyline().location;
        let (min, max) = if self.options.direction.is_reversed() {
            (
                last_focal - item_center(state, 0, true),
                first_focal - item_center(state, last, true),
            )
        } else {
            (
                item_center(state, 0, false) - first_focal,
                item_center(state, last, false) - last_focal,
            )
        };
        self.min_scroll = min;
        self.max_scroll = max.max(min);
    }

    /// Center of item `index` in the end-to-end model, or `None` before the first measure.
    pub fn item_center(&self, index: usize) -> Option<f32> {
        let state = self.keyline_state.as_ref()?;
        Some(item_center(
            state,
            index,
            self.options.direction.is_reversed(),
        ))
    }

    /// Scrolls by `delta`, clamped to the scroll bounds, then fills.
    ///
    /// Returns the delta actually consumed. Before the first measure nothing scrolls.
    pub fn scroll_by(&mut self, delta: f32, host: &mut impl CarouselHost) -> f32 {
        if self.keyline_state.is_none() || delta.is_nan() {
            return 0.0;
        }
        let target = self.clamp_scroll_offset(self.scroll_offset + delta);
        let consumed = target - self.scroll_offset;
        self.scroll_offset = target;
        ctrace!(delta, consumed, scroll_offset = target, "CarouselLayout::scroll_by");
        self.fill(host);
        consumed
    }

    /// Jumps to `offset` (clamped) and fills. Returns the applied offset.
    pub fn scroll_to_offset(&mut self, offset: f32, host: &mut impl CarouselHost) -> f32 {
        if self.keyline_state.is_none() {
            return self.scroll_offset;
        }
        self.scroll_offset = self.clamp_scroll_offset(offset);
        ctrace!(scroll_offset = self.scroll_offset, "CarouselLayout::scroll_to_offset");
        self.fill(host);
        self.scroll_offset
    }

    /// Brings `index` into the focal range. Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, host: &mut impl CarouselHost) -> Option<f32> {
        let offset = self.offset_for_index(index)?;
        Some(self.scroll_to_offset(offset, host))
    }

    /// Indexes that should be attached at scroll offset `offset`.
    ///
    /// An item is included when its unmasked extent overlaps the span from the leading keyline
    /// (or viewport start) to the trailing keyline (or viewport end), widened by the buffer.
    pub fn range_for_offset(&self, offset: f32) -> AttachedRange {
        let Some(state) = &self.keyline_state else {
            return AttachedRange::default();
        };
        let count = self.options.item_count;
        let size = state.item_size();
        let extent = state.viewport_extent();
        let buffer = self.options.buffer;

        let lo = state.first_keyline().location.min(0.0) - buffer;
        let hi = state.last_keyline().location.max(extent) + buffer;

        let (from, to) = if self.options.direction.is_reversed() {
            (extent + offset - hi, extent + offset - lo)
        } else {
            (lo + offset, hi + offset)
        };

        let start_index = floor_index(from / size, count);
        let end_index = ceil_index(to / size, count).max(start_index);
        AttachedRange {
            start_index,
            end_index,
        }
    }

    /// Attaches every index inside the buffered keyline span, detaches the rest, and places each
    /// attached item.
    ///
    /// Calling `fill` again without scrolling produces the same attached set and placements.
    pub fn fill(&mut self, host: &mut impl CarouselHost) -> AttachedRange {
        let range = if self.keyline_state.is_some() {
            self.range_for_offset(self.scroll_offset)
        } else {
            AttachedRange::default()
        };
        self.attached.sync(range, &mut *host);
        self.attached_range = range;
        ctrace!(
            start_index = range.start_index,
            end_index = range.end_index,
            scroll_offset = self.scroll_offset,
            "CarouselLayout::fill"
        );
        for index in self.attached.iter() {
            if let Some(placement) = self.placement_for_index(index) {
                host.place(&placement);
            }
        }
        range
    }

    /// Detaches every attached item.
    pub fn detach_all(&mut self, host: &mut impl CarouselHost) {
        self.attached.clear(&mut *host);
        self.attached_range = AttachedRange::default();
    }

    /// The canonical state translated for scroll offset `offset`.
    ///
    /// Locations move against the offset (with it for right-to-left); offsets, masks, and sizes
    /// are unchanged.
    pub fn keyline_state_for_scroll_offset(&self, offset: f32) -> Option<KeylineState> {
        let state = self.keyline_state.as_ref()?;
        Some(state.translated(self.shift_for(offset)))
    }

    /// The canonical state viewed at the current scroll offset.
    pub fn current_keyline_state(&self) -> Option<ShiftedKeylineState<'_>> {
        let state = self.keyline_state.as_ref()?;
        Some(state.shifted(self.shift_for(self.scroll_offset)))
    }

    /// The keyline state item `index` is laid out against at the current scroll offset.
    ///
    /// Every item shares the same translated state; `None` for out-of-range indexes or before
    /// the first measure.
    pub fn keyline_state_for_index(&self, index: usize) -> Option<KeylineState> {
        if index >= self.options.item_count {
            return None;
        }
        self.keyline_state_for_scroll_offset(self.scroll_offset)
    }

    /// Scroll offset (clamped) that puts item `index` on the leading focal keyline.
    pub fn offset_for_index(&self, index: usize) -> Option<f32> {
        if index >= self.options.item_count {
            return None;
        }
        let state = self.keyline_state.as_ref()?;
        let reversed = self.options.direction.is_reversed();
        let center = item_center(state, index, reversed);
        let offset = if reversed {
            state.last_focal_keyline().location - center
        } else {
            center - state.first_focal_keyline().location
        };
        Some(self.clamp_scroll_offset(offset))
    }

    /// The item currently closest to the leading focal keyline.
    pub fn focal_index(&self) -> Option<usize> {
        let state = self.keyline_state.as_ref()?;
        if self.options.item_count == 0 {
            return None;
        }
        let size = state.item_size();
        let steps = if self.options.direction.is_reversed() {
            let location = state.last_focal_keyline().location - self.scroll_offset;
            (state.viewport_extent() - location) / size - 0.5
        } else {
            let location = state.first_focal_keyline().location + self.scroll_offset;
            location / size - 0.5
        };
        Some(floor_index(floor(steps + 0.5), self.options.item_count - 1))
    }

    /// Interpolated geometry for item `index` at the current scroll offset.
    pub fn placement_for_index(&self, index: usize) -> Option<ItemPlacement> {
        if index >= self.options.item_count {
            return None;
        }
        let state = self.keyline_state.as_ref()?;
        let center = item_center(state, index, self.options.direction.is_reversed());
        // `center + shift` is the item in the viewport; the shifted frame moves it by `shift`
        // once more.
        let shift = self.shift_for(self.scroll_offset);
        let sample = state.shifted(shift).interpolate(center + 2.0 * shift);
        Some(ItemPlacement {
            index,
            center: sample.offset_location,
            item_size: state.item_size(),
            masked_size: sample.masked_item_size,
            mask: sample.mask,
            cutoff: sample.cutoff,
        })
    }

    /// Calls `f` with the placement of every attached item, in ascending index order.
    pub fn for_each_placement(&self, mut f: impl FnMut(ItemPlacement)) {
        for index in self.attached.iter() {
            if let Some(p) = self.placement_for_index(index) {
                f(p);
            }
        }
    }

    pub fn debug_overlay(&self) -> Option<DebugOverlay> {
        let state = self.current_keyline_state()?;
        Some(DebugOverlay::capture(&state, self.scroll_offset))
    }

    pub fn set_viewport_extent(&mut self, viewport_extent: f32) -> Result<(), CarouselError> {
        self.update_options_with(|layout| layout.viewport_extent = viewport_extent)
    }

    pub fn set_item_count(&mut self, item_count: usize) -> Result<(), CarouselError> {
        self.update_options_with(|layout| layout.options.item_count = item_count)
    }

    pub fn set_layout_direction(
        &mut self,
        direction: LayoutDirection,
    ) -> Result<(), CarouselError> {
        self.update_options_with(|layout| layout.options.direction = direction)
    }

    pub fn set_strategy(&mut self, strategy: Strategy) -> Result<(), CarouselError> {
        self.update_options_with(|layout| layout.options.strategy = strategy)
    }

    pub fn set_leading_padding(&mut self, padding: f32) -> Result<(), CarouselError> {
        self.update_options_with(|layout| layout.options.leading_padding = padding)
    }

    pub fn set_buffer(&mut self, buffer: f32) {
        self.options.buffer = buffer.max(0.0);
    }

    /// Applies `f`, then re-runs the strategy when measured.
    ///
    /// On a construction error the previous configuration and keyline state are restored.
    fn update_options_with(&mut self, f: impl FnOnce(&mut Self)) -> Result<(), CarouselError> {
        let prev_options = self.options;
        let prev_extent = self.viewport_extent;
        f(self);
        if let Err(err) = self.rebuild() {
            self.options = prev_options;
            self.viewport_extent = prev_extent;
            return Err(err);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            scroll_offset: self.scroll_offset,
            viewport_extent: self.viewport_extent,
            item_size: self.measured_item_size,
        }
    }

    /// Restores a snapshot taken by [`CarouselLayout::snapshot`].
    ///
    /// The keyline state is rebuilt from the recorded sizes and the offset is clamped to the new
    /// bounds. Attached items are left to the next [`CarouselLayout::fill`].
    pub fn restore_snapshot(&mut self, snapshot: LayoutSnapshot) -> Result<(), CarouselError> {
        match snapshot.item_size {
            Some(item_size) => {
                let state = self.build_state(item_size, snapshot.viewport_extent)?;
                self.measured_item_size = Some(item_size);
                self.adopt_keyline_state(state);
            }
            None => {
                self.measured_item_size = None;
                self.keyline_state = None;
                self.viewport_extent = snapshot.viewport_extent;
                self.update_scroll_bounds();
            }
        }
        self.scroll_offset = self.clamp_scroll_offset(snapshot.scroll_offset);
        cdebug!(
            scroll_offset = self.scroll_offset,
            viewport_extent = self.viewport_extent,
            "CarouselLayout::restore_snapshot"
        );
        Ok(())
    }
}

fn item_center(state: &KeylineState, index: usize, reversed: bool) -> f32 {
    let along = (index as f32 + 0.5) * state.item_size();
    if reversed {
        state.viewport_extent() - along
    } else {
        along
    }
}
