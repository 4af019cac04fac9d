//! Shared angular helpers for vedic calculations.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Shortest arc between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let d = normalize_360(a - b);
    if d > 180.0 { 360.0 - d } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_both_directions() {
        assert!(normalize_360(0.0).abs() < 1e-15);
        assert!((normalize_360(360.0) - 0.0).abs() < 1e-15);
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-15);
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
        assert!((normalize_360(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn separation_takes_short_arc() {
        assert!((angular_separation(10.0, 350.0) - 20.0).abs() < 1e-10);
        assert!((angular_separation(350.0, 10.0) - 20.0).abs() < 1e-10);
        assert!((angular_separation(0.0, 180.0) - 180.0).abs() < 1e-10);
        assert!((angular_separation(100.0, 40.0) - 60.0).abs() < 1e-10);
    }
}
