//! Safe casting utilities for turning client coordinates into device coordinates

/// Round and clamp f64 into `[min, max]`
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i32_clamp(value: f64, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.round().clamp(f64::from(min), f64::from(max));
    (clamped as i32).clamp(min, max)
}

/// Round and clamp f64 into the i16 range X11 uses for root coordinates
#[must_use]
pub fn f64_to_i16_clamp(value: f64) -> i16 {
    let wide = f64_to_i32_clamp(value, i32::from(i16::MIN), i32::from(i16::MAX));
    i16::try_from(wide).unwrap_or(if wide < 0 { i16::MIN } else { i16::MAX })
}
