//! Coordinate finalization: clamp to the compass bounds, round to cents

use super::scoring::ScoreAccumulator;

pub const COORDINATE_LIMIT: f64 = 10.0;

/// Clamp each axis to [-10, 10] and round to two decimals
pub fn finalize(acc: ScoreAccumulator) -> (f64, f64) {
    (finalize_axis(acc.x), finalize_axis(acc.y))
}

/// Round half away from zero on the scaled value; NaN becomes 0
pub fn finalize_axis(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    let clamped = value.clamp(-COORDINATE_LIMIT, COORDINATE_LIMIT);
    (clamped * 100.0).round() / 100.0
}
