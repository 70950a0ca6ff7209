#[cfg(test)]
mod ephemeris_tests {
    use crate::geo::ephemeris::*;

    fn hours_close(actual: f64, expected: f64, tolerance_minutes: f64) -> bool {
        (actual - expected).abs() * 60.0 <= tolerance_minutes
    }

    /// Day numbers count from 2000 Jan 0.
    #[test]
    fn test_days_since_epoch() {
        assert_eq!(days_since_epoch(1999, 12, 31), 0);
        assert_eq!(days_since_epoch(2000, 1, 1), 1);
        assert_eq!(days_since_epoch(2000, 3, 1), 61);
        assert_eq!(days_since_epoch(2024, 1, 1), 8767);
    }

    #[test]
    fn test_normalize_ranges() {
        assert_eq!(normalize(370.0), 10.0);
        assert_eq!(normalize(-10.0), 350.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize180(190.0), -170.0);
        assert_eq!(normalize180(-190.0), 170.0);
        assert_eq!(normalize180(180.0), -180.0);
    }

    #[test]
    fn test_declination_at_solstices_and_equinox() {
        let june = sun_ra_decl(days_since_epoch(2024, 6, 21) as f64 + 0.5);
        assert!((june.declination() - 23.43).abs() < 0.1, "{}", june.declination());

        let december = sun_ra_decl(days_since_epoch(2024, 12, 21) as f64 + 0.5);
        assert!((december.declination() + 23.43).abs() < 0.1);

        let march = sun_ra_decl(days_since_epoch(2024, 3, 20) as f64 + 0.5);
        assert!(march.declination().abs() < 0.5);
    }

    /// Perihelion in early January, aphelion in early July.
    #[test]
    fn test_sun_distance_extremes() {
        let perihelion = sun_position(days_since_epoch(2024, 1, 3) as f64 + 0.5);
        assert!((perihelion.distance_au - 0.9833).abs() < 0.001);

        let aphelion = sun_position(days_since_epoch(2024, 7, 4) as f64 + 0.5);
        assert!((aphelion.distance_au - 1.0167).abs() < 0.001);

        let unit = perihelion.sin_longitude.powi(2) + perihelion.cos_longitude.powi(2);
        assert!((unit - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sidereal_time_is_normalized() {
        for d in [-5000.0, -1.5, 0.0, 0.5, 8766.25, 20000.0] {
            let gmst = sidereal_time_greenwich0(d);
            assert!((0.0..360.0).contains(&gmst), "GMST0 {gmst} out of range for d={d}");
        }
    }

    /// At the equator on an equinox the sun rises and sets six solar hours
    /// either side of its transit, give or take refraction.
    #[test]
    fn test_equinox_at_equator() {
        for lon in [0.0, 90.0, -120.0] {
            let result = sun_rise_set(2024, 3, 20, lon, 0.0);
            assert_eq!(result.code, RiseSetCode::Normal);

            let noon = result.midday();
            assert!(hours_close(result.rise, noon - 6.0, 10.0), "rise {} at {lon}", result.rise);
            assert!(hours_close(result.set, noon + 6.0, 10.0), "set {} at {lon}", result.set);
            // Transit stays within the equation of time of mean noon.
            assert!(hours_close(noon, 12.0 - lon / 15.0, 17.0), "noon {noon} at {lon}");
        }
    }

    #[test]
    fn test_polar_day_and_night() {
        let summer = sun_rise_set(2024, 6, 21, 0.0, 89.0);
        assert_eq!(summer.code, RiseSetCode::AlwaysAbove);
        assert!((summer.set - summer.rise - 24.0).abs() < 1e-9);
        assert!((summer.midday() - 12.0).abs() < 0.25);
        assert_eq!(day_length_standard(2024, 6, 21, 0.0, 89.0), 24.0);

        let winter = sun_rise_set(2024, 12, 21, 0.0, 89.0);
        assert_eq!(winter.code, RiseSetCode::AlwaysBelow);
        assert_eq!(winter.rise, winter.set);
        assert_eq!(day_length_standard(2024, 12, 21, 0.0, 89.0), 0.0);
    }

    /// Lugano, 46°N 8°57'E: long midsummer day, twilight outside sunrise/sunset.
    #[test]
    fn test_mid_latitude_summer() {
        let (lon, lat) = (8.95, 46.0);
        let sun = sun_rise_set(2024, 6, 21, lon, lat);
        assert_eq!(sun.code, RiseSetCode::Normal);
        assert!(hours_close(sun.rise, 3.56, 5.0), "rise {}", sun.rise);
        assert!(hours_close(sun.set, 19.31, 5.0), "set {}", sun.set);

        let civil = civil_twilight(2024, 6, 21, lon, lat);
        let astro = astronomical_twilight(2024, 6, 21, lon, lat);
        assert!(civil.rise < sun.rise && civil.set > sun.set);
        assert!(astro.code == RiseSetCode::AlwaysAbove || astro.rise < civil.rise);

        let standard = day_length_standard(2024, 6, 21, lon, lat);
        assert!((standard - (sun.set - sun.rise)).abs() < 0.01);
        assert!(day_length_civil(2024, 6, 21, lon, lat) > standard);
        assert!(day_length_astronomical(2024, 6, 21, lon, lat) >= day_length_civil(2024, 6, 21, lon, lat));
    }

    #[test]
    fn test_times_are_not_wrapped() {
        // Far east: the morning falls on the previous UTC day.
        let result = sun_rise_set(2024, 3, 20, 170.0, 0.0);
        assert!(result.rise < 0.0, "rise {}", result.rise);
        assert!(result.set > 0.0 && result.set < 12.0);
    }

    #[test]
    fn test_northern_summer() {
        assert!(is_northern_summer(2024, 6, 1));
        assert!(is_northern_summer(2024, 4, 15));
        assert!(!is_northern_summer(2024, 11, 1));
        assert!(!is_northern_summer(2025, 1, 15));
    }

    #[test]
    fn test_rising_longitude_on_equator() {
        // Sunrise at Greenwich on the equinox happens close to 06:04 UTC.
        let at_sunrise = rising_longitude_on_equator(2024, 3, 20, 6.0 + 4.0 / 60.0);
        assert!(at_sunrise.abs() < 1.0, "{at_sunrise}");

        // Six hours later the sunrise line has moved 90° west.
        let later = rising_longitude_on_equator(2024, 3, 20, 12.0 + 4.0 / 60.0);
        assert!((later + 90.0).abs() < 1.0, "{later}");

        let wrapped = rising_longitude_on_equator(2024, 3, 20, 20.0);
        assert!((-180.0..180.0).contains(&wrapped));
    }

    #[test]
    fn test_rise_set_is_deterministic() {
        let a = rise_set(2031, 2, 14, -122.4, 37.8, AltitudeThreshold::CIVIL_TWILIGHT);
        let b = rise_set(2031, 2, 14, -122.4, 37.8, AltitudeThreshold::CIVIL_TWILIGHT);
        assert_eq!(a.rise.to_bits(), b.rise.to_bits());
        assert_eq!(a.set.to_bits(), b.set.to_bits());
        assert_eq!(a.code, b.code);
    }

    /// Property-based tests
    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: day length matches the rise/set span for the same threshold
            #[test]
            fn prop_day_length_matches_rise_set(
                lat in -60.0..=60.0f64,
                lon in -180.0..180.0f64,
                month in 1u32..=12,
                day in 1u32..=28
            ) {
                let rs = rise_set(2020, month, day, lon, lat, AltitudeThreshold::SUNRISE_SUNSET);
                let len = day_length(2020, month, day, lon, lat, AltitudeThreshold::SUNRISE_SUNSET);
                prop_assert!((len - (rs.set - rs.rise)).abs() < 1e-6);
            }

            /// Property: lower thresholds give longer days
            #[test]
            fn prop_twilight_extends_day(
                lat in -89.0..=89.0f64,
                lon in -180.0..180.0f64,
                month in 1u32..=12,
                day in 1u32..=28
            ) {
                let standard = day_length_standard(2010, month, day, lon, lat);
                let civil = day_length_civil(2010, month, day, lon, lat);
                let astro = day_length_astronomical(2010, month, day, lon, lat);
                prop_assert!(standard <= civil + 1e-9);
                prop_assert!(civil <= astro + 1e-9);
                prop_assert!((0.0..=24.0).contains(&astro));
            }
        }
    }
}
