//! Angular distance and distance-to-score mapping
//!
//! Pure functions over hue angles in degrees. Rounding is half-up
//! (`f64::round` on non-negative values), so a raw score of 2.5 becomes 3.

use crate::consts::{HALF_WHEEL_DEGREES, WHEEL_DEGREES};

/// Shortest-arc distance between two angles, always in [0, 180]
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % WHEEL_DEGREES;
    d.min(WHEEL_DEGREES - d)
}

/// Points for a guess `distance_deg` away from the target
///
/// `max_score` at distance 0, falling linearly to 0 at 180 degrees.
pub fn inverse_score(distance_deg: f64, max_score: u32) -> u32 {
    let raw = f64::from(max_score) * (1.0 - distance_deg / HALF_WHEEL_DEGREES);
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    raw.round() as u32
}

/// Score gain for a guess at `guess` against `target`
#[inline]
pub fn score_guess(guess: f64, target: f64, max_score: u32) -> u32 {
    inverse_score(circular_distance(guess, target), max_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance_wraps_short_way() {
        assert_eq!(circular_distance(10.0, 350.0), 20.0);
        assert_eq!(circular_distance(350.0, 10.0), 20.0);
        assert_eq!(circular_distance(0.0, 180.0), 180.0);
        assert_eq!(circular_distance(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_distance_unnormalized_inputs() {
        assert_eq!(circular_distance(720.0, 0.0), 0.0);
        assert_eq!(circular_distance(-10.0, 10.0), 20.0);
    }

    #[test]
    fn test_inverse_score_anchors() {
        assert_eq!(inverse_score(0.0, 100), 100);
        assert_eq!(inverse_score(180.0, 100), 0);
        assert_eq!(inverse_score(90.0, 100), 50);
        assert_eq!(inverse_score(250.0, 100), 0);
    }

    #[test]
    fn test_inverse_score_rounds_half_up() {
        // Raw values land exactly on .5
        assert_eq!(inverse_score(90.0, 1), 1); // 0.5
        assert_eq!(inverse_score(90.0, 3), 2); // 1.5
        assert_eq!(inverse_score(90.0, 5), 3); // 2.5, banker's would give 2
        assert_eq!(inverse_score(45.0, 2), 2); // 1.5
        assert_eq!(inverse_score(135.0, 2), 1); // 0.5
    }

    #[test]
    fn test_zero_max_score() {
        assert_eq!(inverse_score(0.0, 0), 0);
    }

    #[test]
    fn test_score_guess() {
        assert_eq!(score_guess(90.0, 90.0, 100), 100);
        assert_eq!(score_guess(180.0, 0.0, 100), 0);
        assert_eq!(score_guess(0.0, 270.0, 100), 50);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric_and_bounded(a in 0.0f64..360.0, b in 0.0f64..360.0) {
            let d = circular_distance(a, b);
            prop_assert_eq!(d, circular_distance(b, a));
            prop_assert!((0.0..=180.0).contains(&d));
        }

        #[test]
        fn distance_to_self_is_zero(a in 0.0f64..360.0) {
            prop_assert_eq!(circular_distance(a, a), 0.0);
        }

        #[test]
        fn score_never_increases_with_distance(
            d1 in 0.0f64..=180.0,
            d2 in 0.0f64..=180.0,
            max in 0u32..1000,
        ) {
            let (near, far) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
            prop_assert!(inverse_score(near, max) >= inverse_score(far, max));
            prop_assert!(inverse_score(near, max) <= max);
        }
    }
}
