//! Lossy numeric conversions and bound clamping.
//!
//! Every conversion here saturates into the target range instead of wrapping.
//! `NaN` becomes zero and infinities become the respective bound.

/// Saturating `u64` → `i64`.
pub fn lossy_u64_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Saturating `f64` → `i64`, rounding to the nearest integer.
#[allow(clippy::cast_possible_truncation)]
pub fn lossy_f64_to_i64(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    // `as` saturates at the integer bounds, infinities included.
    value.round() as i64
}

/// Saturating `f64` → `u8`, truncating toward zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lossy_f64_to_u8(value: f64) -> u8 {
    // `as` saturates into 0..=255 and maps NaN to 0.
    value as u8
}

/// `i64` → `f64`. Magnitudes above 2^53 lose precision.
#[allow(clippy::cast_precision_loss)]
pub fn lossy_i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Clamp an integer into optional bounds.
///
/// A missing bound leaves that side open. When `min > max` the max wins, so
/// the result always satisfies `value <= max`.
///
/// ```
/// use gcfeeder_schema::coerce::clamp_integer;
///
/// assert_eq!(clamp_integer(300, Some(0), Some(255)), 255);
/// assert_eq!(clamp_integer(-4, Some(0), None), 0);
/// assert_eq!(clamp_integer(5, Some(10), Some(2)), 2);
/// ```
pub fn clamp_integer(value: i64, min: Option<i64>, max: Option<i64>) -> i64 {
    let mut clamped = value;
    if let Some(min) = min {
        clamped = clamped.max(min);
    }
    if let Some(max) = max {
        clamped = clamped.min(max);
    }
    clamped
}

/// Clamp a float into optional bounds. `NaN` is treated as zero first.
pub fn clamp_number(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut clamped = if value.is_nan() { 0.0 } else { value };
    if let Some(min) = min.filter(|m| !m.is_nan()) {
        clamped = clamped.max(min);
    }
    if let Some(max) = max.filter(|m| !m.is_nan()) {
        clamped = clamped.min(max);
    }
    clamped
}
