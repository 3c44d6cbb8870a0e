/// Linear interpolation with the parameter clamped to `[0, 1]`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    from + (to - from) * t
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

/// Clamps `value` into `[min, max]`, reporting which bound was hit.
///
/// The lower bound is checked first, so an inverted interval resolves to `min`.
pub fn clamp_to_bounds(value: f32, min: f32, max: f32) -> (f32, Option<Bound>) {
    if value < min {
        (min, Some(Bound::Lower))
    } else if value > max {
        (max, Some(Bound::Upper))
    } else {
        (value, None)
    }
}
