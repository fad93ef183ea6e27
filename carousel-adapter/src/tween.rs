/// Eased interpolation of a scalar (a scroll offset or transition progress) over a time window.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms) as f32;
        self.easing.apply(elapsed / self.duration_ms as f32)
    }

    /// Value at `now_ms`. Exactly `to` once the window has elapsed.
    pub fn sample(&self, now_ms: u64) -> f32 {
        if self.is_done(now_ms) {
            return self.to;
        }
        self.from + (self.to - self.from) * self.progress(now_ms)
    }

    /// Restarts from the current value toward `to`, keeping the easing.
    pub fn retarget(&mut self, now_ms: u64, to: f32, duration_ms: u64) {
        *self = Self::new(self.sample(now_ms), to, now_ms, duration_ms, self.easing);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
    /// Material's standard curve, `cubic-bezier(0.4, 0, 0.2, 1)`.
    #[default]
    FastOutSlowIn,
}

impl Easing {
    /// Maps linear progress to eased progress. `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => (3.0 - 2.0 * t) * t * t,
            Self::EaseInOutCubic if t < 0.5 => 4.0 * t * t * t,
            Self::EaseInOutCubic => {
                let rest = 2.0 - 2.0 * t;
                1.0 - rest * rest * rest / 2.0
            }
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluates a CSS-style cubic bezier with endpoints `(0, 0)` and `(1, 1)` at `x`.
///
/// `x1` and `x2` must lie in `[0, 1]` so the curve is monotonic in x; the parameter is found by
/// bisection.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let axis = |p1: f32, p2: f32, s: f32| {
        let r = 1.0 - s;
        3.0 * r * r * s * p1 + 3.0 * r * s * s * p2 + s * s * s
    };
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    let mut s = x;
    for _ in 0..32 {
        let at = axis(x1, x2, s);
        let err = if at > x { at - x } else { x - at };
        if err < 1e-6 {
            break;
        }
        if at < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    axis(y1, y2, s)
}
