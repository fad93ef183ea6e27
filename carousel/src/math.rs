//! Float helpers that work without `std`.

/// Tolerance used when comparing keyline geometry.
pub(crate) const EPSILON: f32 = 1e-4;

#[inline]
pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Fraction of the way `value` sits between `from` and `to`.
///
/// Returns 0 for a degenerate span.
#[inline]
pub(crate) fn progress(from: f32, to: f32, value: f32) -> f32 {
    let span = to - from;
    if abs(span) <= f32::EPSILON {
        return 0.0;
    }
    (value - from) / span
}

#[inline]
pub(crate) fn abs(v: f32) -> f32 {
    if v < 0.0 { -v } else { v }
}

#[inline]
pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    abs(a - b) <= EPSILON * 1f32.max(abs(a)).max(abs(b))
}

pub(crate) fn floor(v: f32) -> f32 {
    let t = v as i64 as f32;
    if t > v { t - 1.0 } else { t }
}

pub(crate) fn ceil(v: f32) -> f32 {
    let t = v as i64 as f32;
    if t < v { t + 1.0 } else { t }
}

/// Floors `v` into `0..=max`.
pub(crate) fn floor_index(v: f32, max: usize) -> usize {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    let f = floor(v);
    if f >= max as f32 { max } else { f as usize }
}

/// Ceils `v` into `0..=max`.
pub(crate) fn ceil_index(v: f32, max: usize) -> usize {
    if v.is_nan() || v <= 0.0 {
        return 0;
    }
    if !v.is_finite() {
        return max;
    }
    let c = ceil(v);
    if c >= max as f32 { max } else { c as usize }
}
