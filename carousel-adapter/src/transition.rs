use carousel::{KeylineState, LerpError};

use crate::{Easing, Tween};

/// An animated change from one keyline state to another, e.g. while the viewport is resized.
///
/// Construction fails when the two states cannot be interpolated; callers should then adopt the
/// target state directly.
#[derive(Clone, Debug, PartialEq)]
pub struct KeylineTransition {
    from: KeylineState,
    to: KeylineState,
    timing: Tween,
}

impl KeylineTransition {
    pub fn new(
        from: KeylineState,
        to: KeylineState,
        start_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Result<Self, LerpError> {
        from.check_compatible(&to)?;
        Ok(Self {
            from,
            to,
            timing: Tween::new(0.0, 1.0, start_ms, duration_ms, easing),
        })
    }

    pub fn from_state(&self) -> &KeylineState {
        &self.from
    }

    pub fn to_state(&self) -> &KeylineState {
        &self.to
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.timing.is_done(now_ms)
    }

    /// The interpolated state at `now_ms`; exactly the target once the transition is done.
    pub fn sample(&self, now_ms: u64) -> Result<KeylineState, LerpError> {
        if self.is_done(now_ms) {
            return Ok(self.to.clone());
        }
        KeylineState::lerp(&self.from, &self.to, self.timing.progress(now_ms))
    }
}
