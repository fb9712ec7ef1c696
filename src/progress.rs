//! Progress of a countdown as a normalized fraction.
//!
//! The engine only exposes the fraction of time left. Geometry belongs to the
//! renderer: a ring of circumference `c` draws its stroke with an offset of
//! `c * (1 - fraction)`, see [`stroke_offset`].
//!
//! ```rust
//! use bubbletea_countdown::progress::{fraction, stroke_offset};
//!
//! let f = fraction(25, 100);
//! assert_eq!(f, 0.25);
//! assert_eq!(stroke_offset(200.0, f), 150.0);
//! ```

/// Fraction of the run that is still left, in `[0, 1]`.
///
/// A zero `total_ticks` reads as finished.
///
/// # Arguments
///
/// * `remaining_ticks` - Ticks left in the run
/// * `total_ticks` - Ticks in a full run
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::progress::fraction;
///
/// assert_eq!(fraction(100, 100), 1.0);
/// assert_eq!(fraction(0, 100), 0.0);
/// assert_eq!(fraction(0, 0), 0.0);
/// ```
pub fn fraction(remaining_ticks: u64, total_ticks: u64) -> f64 {
    if total_ticks == 0 {
        return 0.0;
    }
    (remaining_ticks as f64 / total_ticks as f64).clamp(0.0, 1.0)
}

/// Dash offset for an arc of `track_length` that empties as time runs out.
///
/// # Arguments
///
/// * `track_length` - Length of the full track, e.g. a ring's circumference
/// * `fraction` - Fraction of time left; clamped to `[0, 1]`
pub fn stroke_offset(track_length: f64, fraction: f64) -> f64 {
    track_length * (1.0 - fraction.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_bounds() {
        assert_eq!(fraction(100, 100), 1.0);
        assert_eq!(fraction(0, 100), 0.0);
        assert_eq!(fraction(50, 100), 0.5);
    }

    #[test]
    fn test_fraction_clamps_transient_overflow() {
        assert_eq!(fraction(150, 100), 1.0);
    }

    #[test]
    fn test_fraction_zero_total() {
        assert_eq!(fraction(0, 0), 0.0);
    }

    #[test]
    fn test_stroke_offset() {
        assert_eq!(stroke_offset(100.0, 1.0), 0.0);
        assert_eq!(stroke_offset(100.0, 0.0), 100.0);
        assert_eq!(stroke_offset(100.0, 0.75), 25.0);
        assert_eq!(stroke_offset(100.0, 2.0), 0.0);
    }
}
