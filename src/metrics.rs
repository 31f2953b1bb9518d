//! Derived physical indices: heat index and fire-danger score

/// Apparent temperature from air temperature (°F) and relative humidity (%),
/// using the NOAA Rothfusz regression.
///
/// Below 80 °F the regression is invalid and the plain temperature is the
/// defined result. Within the low-humidity (R<13, 80..=112 °F) and
/// high-humidity (R>85, 80..=87 °F) windows the standard adjustments apply;
/// the two windows cannot overlap.
#[must_use]
pub fn heat_index(temp_f: f64, humidity: f64) -> f64 {
    if temp_f < 80.0 {
        return temp_f;
    }

    let t = temp_f;
    let r = humidity;
    let mut hi = -42.379 + 2.04901523 * t + 10.14333127 * r
        - 0.22475541 * t * r
        - 0.00683783 * t * t
        - 0.05481717 * r * r
        + 0.00122874 * t * t * r
        + 0.00085282 * t * r * r
        - 0.00000199 * t * t * r * r;

    if r < 13.0 && (80.0..=112.0).contains(&t) {
        hi -= ((13.0 - r) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
    } else if r > 85.0 && (80.0..=87.0).contains(&t) {
        hi += ((r - 85.0) / 10.0) * ((87.0 - t) / 5.0);
    }

    hi
}

/// Fire-danger score on a 0..=10 scale from temperature (°F), relative
/// humidity (%) and sustained wind speed (mph).
///
/// Three independent bands accumulate: temperature 90/80/70 °F, humidity
/// 20/30/40/50 % (drier is worse), wind 25/15/10 mph. The sum is clamped
/// at 10.
#[must_use]
pub fn fire_danger(temp_f: f64, humidity: f64, wind_mph: f64) -> u8 {
    let mut score = 0u8;

    score += if temp_f >= 90.0 {
        3
    } else if temp_f >= 80.0 {
        2
    } else if temp_f >= 70.0 {
        1
    } else {
        0
    };

    score += if humidity <= 20.0 {
        4
    } else if humidity <= 30.0 {
        3
    } else if humidity <= 40.0 {
        2
    } else if humidity <= 50.0 {
        1
    } else {
        0
    };

    score += if wind_mph >= 25.0 {
        3
    } else if wind_mph >= 15.0 {
        2
    } else if wind_mph >= 10.0 {
        1
    } else {
        0
    };

    score.min(10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(79.9, 10.0)]
    #[case(79.9, 50.0)]
    #[case(79.9, 95.0)]
    #[case(32.0, 100.0)]
    fn test_heat_index_identity_below_80(#[case] t: f64, #[case] r: f64) {
        assert_eq!(heat_index(t, r), t);
    }

    #[test]
    fn test_heat_index_matches_noaa_reference() {
        // Rothfusz regression at 95 °F / 50 % evaluates to 105.2; the
        // published NOAA table rounds this cell to 105.
        let hi = heat_index(95.0, 50.0);
        assert!((hi - 105.2).abs() < 0.1, "got {hi}");
    }

    #[test]
    fn test_heat_index_low_humidity_adjustment_lowers_value() {
        let unadjusted = heat_index(95.0, 13.0);
        let adjusted = heat_index(95.0, 10.0);
        // Lower humidity already lowers the regression; the adjustment must
        // not push the value back above the unadjusted curve.
        assert!(adjusted < unadjusted);
    }

    #[test]
    fn test_heat_index_high_humidity_adjustment_raises_value() {
        // At 85 °F the adjustment window is active for R>85.
        let at_window_edge = heat_index(85.0, 85.0);
        let inside_window = heat_index(85.0, 90.0);
        assert!(inside_window > at_window_edge);
    }

    #[test]
    fn test_fire_danger_clamped_to_ten() {
        assert_eq!(fire_danger(100.0, 5.0, 40.0), 10);
    }

    #[rstest]
    #[case(60.0, 60.0, 5.0, 0)]
    #[case(72.0, 60.0, 5.0, 1)]
    #[case(92.0, 45.0, 12.0, 5)]
    #[case(95.0, 15.0, 30.0, 10)]
    fn test_fire_danger_bands(
        #[case] t: f64,
        #[case] h: f64,
        #[case] w: f64,
        #[case] expected: u8,
    ) {
        assert_eq!(fire_danger(t, h, w), expected);
    }

    #[test]
    fn test_fire_danger_monotonic_in_temperature() {
        let mut last = 0;
        for t in (50..120).step_by(5) {
            let score = fire_danger(f64::from(t), 45.0, 12.0);
            assert!(score >= last);
            last = score;
        }
    }

    #[test]
    fn test_fire_danger_monotonic_as_humidity_drops() {
        let mut last = 0;
        for h in (0..100).rev().step_by(5) {
            let score = fire_danger(85.0, f64::from(h), 12.0);
            assert!(score >= last);
            last = score;
        }
    }

    #[test]
    fn test_fire_danger_monotonic_in_wind() {
        let mut last = 0;
        for w in (0..60).step_by(5) {
            let score = fire_danger(85.0, 45.0, f64::from(w));
            assert!(score >= last);
            last = score;
        }
    }
}
