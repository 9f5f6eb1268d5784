//! Integer linear interpolation between value ranges.
//!
//! # Example
//! ```rust
//! use orover_core::utils::math::scale;
//! assert_eq!(scale::percent_to_magnitude(50), 128);
//! assert_eq!(scale::to_device(scale::percent_to_magnitude(99)), 252);
//! ```

/// Top of the percentage range carried by `M` commands.
pub const PERCENT_MAX: i32 = 100;
/// Top of the motor driver speed range.
pub const MAGNITUDE_MAX: i32 = 255;

/// Map `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Rounds half away from zero. Inputs outside the source range are
/// extrapolated, not clamped. `in_min` and `in_max` must differ.
pub fn map(
    x: i32,
    in_min: i32,
    in_max: i32,
    out_min: i32,
    out_max: i32,
) -> i32 {
    let num = (x - in_min) * (out_max - out_min);
    let den = in_max - in_min;
    let half = den.abs() / 2;
    let q = if (num >= 0) == (den > 0) {
        (num.abs() + half) / den.abs()
    } else {
        -((num.abs() + half) / den.abs())
    };
    q + out_min
}

/// Percentage (0..=100) to driver magnitude (0..=255).
pub fn percent_to_magnitude(percent: i32) -> i32 {
    map(percent, 0, PERCENT_MAX, 0, MAGNITUDE_MAX)
}

/// Saturate a mapped magnitude into what the motor driver accepts.
pub fn to_device(magnitude: i32) -> u8 {
    magnitude.clamp(0, MAGNITUDE_MAX) as u8
}
