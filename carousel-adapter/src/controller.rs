use carousel::{CarouselError, CarouselHost, CarouselLayout, CarouselOptions};

use crate::{
    Easing, FocalAnchor, KeylineTransition, Tween, apply_focal_anchor, capture_focal_anchor,
};

/// A framework-neutral controller that wraps a `carousel::CarouselLayout` and provides common
/// adapter workflows (animated viewport changes, tween-driven scrolling).
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_first_measure` / `on_viewport_extent` / `on_scroll` when UI events occur
/// - `tick(now_ms, host)` each frame/timer tick while `is_animating()` is true
#[derive(Clone, Debug)]
pub struct Controller {
    layout: CarouselLayout,
    tween: Option<Tween>,
    transition: Option<KeylineTransition>,
    focused: Option<usize>,
}

impl Controller {
    pub fn new(options: CarouselOptions) -> Self {
        Self::from_layout(CarouselLayout::new(options))
    }

    pub fn from_layout(layout: CarouselLayout) -> Self {
        Self {
            layout,
            tween: None,
            transition: None,
            focused: None,
        }
    }

    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut CarouselLayout {
        &mut self.layout
    }

    pub fn into_layout(self) -> CarouselLayout {
        self.layout
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some() || self.transition.is_some()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Stops any scroll tween. A running keyline transition jumps to its target state.
    pub fn cancel_animation(&mut self, host: &mut impl CarouselHost) {
        self.tween = None;
        if let Some(transition) = self.transition.take() {
            self.layout.adopt_keyline_state(transition.to_state().clone());
            self.refocus(host);
        }
    }

    pub fn on_first_measure(
        &mut self,
        item_size: f32,
        viewport_extent: f32,
        host: &mut impl CarouselHost,
    ) -> Result<(), CarouselError> {
        self.layout.on_first_measure(item_size, viewport_extent)?;
        self.layout.fill(host);
        Ok(())
    }

    /// Call this when the viewport is resized.
    ///
    /// The strategy runs for the new extent. When the new keyline state has the same shape as
    /// the current one, the change is animated over `duration_ms` and `true` is returned;
    /// otherwise the new state is adopted immediately. The focused item stays focused either
    /// way.
    pub fn on_viewport_extent(
        &mut self,
        viewport_extent: f32,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
        host: &mut impl CarouselHost,
    ) -> Result<bool, CarouselError> {
        let (Some(item_size), Some(current)) = (
            self.layout.measured_item_size(),
            self.layout.keyline_state().cloned(),
        ) else {
            self.layout.set_viewport_extent(viewport_extent)?;
            return Ok(false);
        };

        let from = match self.transition.take() {
            Some(running) => running.sample(now_ms)?,
            None => current,
        };
        let target = self.layout.build_state(item_size, viewport_extent)?;
        self.tween = None;
        if self.focused.is_none() {
            self.focused = self.layout.focal_index();
        }

        match KeylineTransition::new(from, target.clone(), now_ms, duration_ms, easing) {
            Ok(transition) => {
                self.transition = Some(transition);
                self.tick(now_ms, host);
                Ok(true)
            }
            Err(_) => {
                self.layout.adopt_keyline_state(target);
                self.refocus(host);
                self.focused = None;
                Ok(false)
            }
        }
    }

    /// Call this when the user scrolls (e.g. wheel/drag).
    ///
    /// This cancels any active tween. Returns the consumed delta.
    pub fn on_scroll(&mut self, delta: f32, host: &mut impl CarouselHost) -> f32 {
        self.tween = None;
        self.focused = None;
        self.layout.scroll_by(delta, host)
    }

    /// Advances the controller.
    ///
    /// - If a keyline transition is active, adopts the interpolated state and keeps the focused
    ///   item focused.
    /// - If a tween is active, moves the scroll offset.
    ///
    /// Returns the new scroll offset while animating, `None` otherwise.
    pub fn tick(&mut self, now_ms: u64, host: &mut impl CarouselHost) -> Option<f32> {
        if !self.is_animating() {
            return None;
        }

        if let Some(transition) = &self.transition {
            let done = transition.is_done(now_ms);
            let state = match transition.sample(now_ms) {
                Ok(state) => state,
                Err(_) => transition.to_state().clone(),
            };
            self.layout.adopt_keyline_state(state);
            if done {
                self.transition = None;
            }
            self.refocus(host);
            if done {
                self.focused = None;
            }
        }

        if let Some(tween) = self.tween {
            let off = tween.sample(now_ms);
            self.layout.scroll_to_offset(off, host);
            if tween.is_done(now_ms) {
                self.tween = None;
            }
        }

        Some(self.layout.scroll_offset())
    }

    fn refocus(&mut self, host: &mut impl CarouselHost) {
        match self.focused {
            Some(index) if self.layout.scroll_to_index(index, &mut *host).is_some() => {}
            _ => {
                self.layout.fill(host);
            }
        }
    }

    /// Brings `index` into focus immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_index(&mut self, index: usize, host: &mut impl CarouselHost) -> Option<f32> {
        self.tween = None;
        self.focused = None;
        self.layout.scroll_to_index(index, host)
    }

    /// Applies a scroll-to-offset immediately (no animation).
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_offset(&mut self, offset: f32, host: &mut impl CarouselHost) -> f32 {
        self.tween = None;
        self.focused = None;
        self.layout.scroll_to_offset(offset, host)
    }

    /// Starts a tween that brings `index` into focus.
    ///
    /// Returns the clamped target offset, or `None` for an unknown index.
    pub fn start_tween_to_index(
        &mut self,
        index: usize,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Option<f32> {
        let to = self.layout.offset_for_index(index)?;
        Some(self.start_tween_to_offset(to, now_ms, duration_ms, easing))
    }

    /// Starts a tween to an offset.
    ///
    /// Returns the clamped target offset.
    pub fn start_tween_to_offset(
        &mut self,
        offset: f32,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f32 {
        let to = self.layout.clamp_scroll_offset(offset);
        let from = self.layout.scroll_offset();
        self.focused = None;
        self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing));
        to
    }

    pub fn capture_focal_anchor<K>(
        &self,
        index_to_key: impl FnMut(usize) -> K,
    ) -> Option<FocalAnchor<K>> {
        capture_focal_anchor(&self.layout, index_to_key)
    }

    /// Applies a previously captured anchor.
    ///
    /// This cancels any active tween.
    pub fn apply_focal_anchor<K>(
        &mut self,
        anchor: &FocalAnchor<K>,
        key_to_index: impl FnMut(&K) -> Option<usize>,
        host: &mut impl CarouselHost,
    ) -> bool {
        self.tween = None;
        self.focused = None;
        apply_focal_anchor(&mut self.layout, anchor, key_to_index, host)
    }
}
