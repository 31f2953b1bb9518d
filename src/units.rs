//! Unit conversions between provider-native and canonical units

#[must_use]
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

#[must_use]
pub fn ms_to_mph(ms: f64) -> f64 {
    ms * 2.237
}

#[must_use]
pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh * 0.621371
}

#[must_use]
pub fn mph_to_kmh(mph: f64) -> f64 {
    mph / 0.621371
}

#[must_use]
pub fn meters_to_miles(m: f64) -> f64 {
    m * 0.000621371
}

/// Round to one decimal place, matching the serialized precision of the
/// canonical record.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 32.0)]
    #[case(22.0, 71.6)]
    #[case(100.0, 212.0)]
    #[case(-40.0, -40.0)]
    fn test_celsius_to_fahrenheit(#[case] c: f64, #[case] f: f64) {
        assert!((celsius_to_fahrenheit(c) - f).abs() < 1e-9);
    }

    #[test]
    fn test_ms_to_mph() {
        assert!((ms_to_mph(5.0) - 11.185).abs() < 1e-9);
    }

    #[rstest]
    #[case(1.0)]
    #[case(12.5)]
    #[case(100.0)]
    fn test_kmh_mph_round_trip(#[case] x: f64) {
        assert!((mph_to_kmh(kmh_to_mph(x)) - x).abs() < 1e-9);
        assert!((kmh_to_mph(mph_to_kmh(x)) - x).abs() < 1e-9);
    }

    #[test]
    fn test_meters_to_miles() {
        assert!((meters_to_miles(10000.0) - 6.21371).abs() < 1e-9);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(71.6111), 71.6);
        assert_eq!(round1(11.185), 11.2);
    }
}
