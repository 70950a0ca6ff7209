//! Low-precision solar ephemeris: sun position, sidereal time, rise/set and day length.
//!
//! The orbital elements are the usual linear-in-time approximation valid for
//! a few decades either side of 2000, good to a fraction of a degree. Angles
//! are in degrees throughout; times are UTC decimal hours.
//!
//! Polar day and polar night are ordinary outcomes, reported through
//! [`RiseSetCode`] rather than errors. The diurnal-arc cosine is range-checked
//! before `acos` ever sees it.
//!
//! Eastern longitude and northern latitude are positive.

use serde::Serialize;

const RAD_DEG: f64 = 180.0 / std::f64::consts::PI;

fn sind(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cosd(x: f64) -> f64 {
    x.to_radians().cos()
}

fn acosd(x: f64) -> f64 {
    x.acos().to_degrees()
}

fn atan2d(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Reduce an angle into [0, 360).
pub fn normalize(x: f64) -> f64 {
    x - 360.0 * (x / 360.0).floor()
}

/// Reduce an angle into [-180, 180).
pub fn normalize180(x: f64) -> f64 {
    x - 360.0 * (x / 360.0 + 0.5).floor()
}

/// Days since 2000 Jan 0.0, integer arithmetic with truncating division.
pub fn days_since_epoch(year: i32, month: i32, day: i32) -> i32 {
    367 * year - 7 * (year + (month + 9) / 12) / 4 + 275 * month / 9 + day - 730530
}

/// Sun's true ecliptic longitude (as sine and cosine) and distance in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    pub sin_longitude: f64,
    pub cos_longitude: f64,
    pub distance_au: f64,
}

/// Sun's equatorial coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEquatorial {
    /// Right ascension in degrees, (-180, 180]
    pub right_ascension: f64,
    pub sin_declination: f64,
    pub cos_declination: f64,
    pub distance_au: f64,
}

impl SunEquatorial {
    pub fn declination(&self) -> f64 {
        atan2d(self.sin_declination, self.cos_declination)
    }
}

pub fn sun_position(d: f64) -> SunPosition {
    let mean_anomaly = -3.9530 + 0.9856002585 * d;
    let perihelion = 282.9404 + 4.70935e-5 * d;
    let e = 0.016709 - 1.151e-9 * d;

    // Kepler's equation, first order in e
    let eccentric =
        mean_anomaly + e * RAD_DEG * sind(mean_anomaly) * (1.0 + e * cosd(mean_anomaly));

    let x = cosd(eccentric) - e;
    let y = (1.0 - e * e).sqrt() * sind(eccentric);
    let r = (x * x + y * y).sqrt();

    // Rotate the true anomaly (x/r, y/r) by the perihelion longitude.
    let (sin_v, cos_v) = (y / r, x / r);
    let (sin_w, cos_w) = (sind(perihelion), cosd(perihelion));

    SunPosition {
        sin_longitude: sin_v * cos_w + cos_v * sin_w,
        cos_longitude: cos_v * cos_w - sin_v * sin_w,
        distance_au: r,
    }
}

/// Obliquity of the ecliptic in degrees.
pub fn obliquity(d: f64) -> f64 {
    23.4393 - 3.563e-7 * d
}

pub fn sun_ra_decl(d: f64) -> SunEquatorial {
    let pos = sun_position(d);
    let obl = obliquity(d);

    // Ecliptic latitude of the sun is taken as zero.
    let x = pos.cos_longitude;
    let z = pos.sin_longitude * sind(obl);
    let y = pos.sin_longitude * cosd(obl);

    SunEquatorial {
        right_ascension: atan2d(y, x),
        sin_declination: z,
        cos_declination: (1.0 - z * z).sqrt(),
        distance_au: pos.distance_au,
    }
}

/// Greenwich mean sidereal time at 0h UT, in degrees.
pub fn sidereal_time_greenwich0(d: f64) -> f64 {
    normalize((180.0 + 356.0470 + 282.9404) + (0.9856002585 + 4.70935e-5) * d)
}

/// Altitude the sun's centre must cross, plus whether to correct for the upper limb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AltitudeThreshold {
    pub altitude_deg: f64,
    pub upper_limb_correction: bool,
}

impl AltitudeThreshold {
    /// Upper limb 35 arc minutes below the horizon (refraction included).
    pub const SUNRISE_SUNSET: Self = Self {
        altitude_deg: -35.0 / 60.0,
        upper_limb_correction: true,
    };
    /// Centre 6° below the horizon.
    pub const CIVIL_TWILIGHT: Self = Self {
        altitude_deg: -6.0,
        upper_limb_correction: false,
    };
    /// Centre 18° below the horizon.
    pub const ASTRONOMICAL_TWILIGHT: Self = Self {
        altitude_deg: -18.0,
        upper_limb_correction: false,
    };
    /// Geometric horizon, centre of the disk.
    pub const HORIZON: Self = Self {
        altitude_deg: 0.0,
        upper_limb_correction: false,
    };

    /// Threshold actually solved for, given the sun's distance.
    fn effective_altitude(&self, distance_au: f64) -> f64 {
        if self.upper_limb_correction {
            self.altitude_deg - 0.2666 / distance_au
        } else {
            self.altitude_deg
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiseSetCode {
    Normal,
    /// Sun stays above the threshold all day.
    AlwaysAbove,
    /// Sun stays below the threshold all day.
    AlwaysBelow,
}

/// Crossing times in UTC decimal hours, not wrapped into [0, 24).
///
/// With `AlwaysAbove` the times are `tsouth - 12` and `tsouth + 12`; with
/// `AlwaysBelow` both equal `tsouth`. Never literal 0 and 24.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiseSetResult {
    pub code: RiseSetCode,
    pub rise: f64,
    pub set: f64,
}

impl RiseSetResult {
    /// Time the sun crosses the meridian.
    pub fn midday(&self) -> f64 {
        (self.rise + self.set) / 2.0
    }
}

/// Cosine of the diurnal-arc half angle for the given threshold.
fn diurnal_arc_cosine(altitude: f64, latitude: f64, sin_decl: f64, cos_decl: f64) -> f64 {
    (sind(altitude) - sind(latitude) * sin_decl) / (cosd(latitude) * cos_decl)
}

/// Days since epoch at local mean noon for the given longitude.
fn local_noon(year: i32, month: u32, day: u32, lon: f64) -> f64 {
    days_since_epoch(year, month as i32, day as i32) as f64 + 0.5 - lon / 360.0
}

pub fn rise_set(
    year: i32,
    month: u32,
    day: u32,
    lon: f64,
    lat: f64,
    threshold: AltitudeThreshold,
) -> RiseSetResult {
    let d = local_noon(year, month, day, lon);
    let sidereal = normalize(sidereal_time_greenwich0(d) + 180.0 + lon);
    let sun = sun_ra_decl(d);

    let tsouth = 12.0 - normalize180(sidereal - sun.right_ascension) / 15.0;
    let altitude = threshold.effective_altitude(sun.distance_au);
    let cost = diurnal_arc_cosine(altitude, lat, sun.sin_declination, sun.cos_declination);

    let (code, t) = if cost >= 1.0 {
        (RiseSetCode::AlwaysBelow, 0.0)
    } else if cost <= -1.0 {
        (RiseSetCode::AlwaysAbove, 12.0)
    } else {
        (RiseSetCode::Normal, acosd(cost) / 15.0)
    };

    RiseSetResult {
        code,
        rise: tsouth - t,
        set: tsouth + t,
    }
}

/// Hours the sun spends above the threshold: 0, 24, or twice the diurnal arc.
pub fn day_length(
    year: i32,
    month: u32,
    day: u32,
    lon: f64,
    lat: f64,
    threshold: AltitudeThreshold,
) -> f64 {
    let d = local_noon(year, month, day, lon);
    let sun = sun_ra_decl(d);
    let altitude = threshold.effective_altitude(sun.distance_au);
    let cost = diurnal_arc_cosine(altitude, lat, sun.sin_declination, sun.cos_declination);

    if cost >= 1.0 {
        0.0
    } else if cost <= -1.0 {
        24.0
    } else {
        2.0 / 15.0 * acosd(cost)
    }
}

// # Presets

pub fn sun_rise_set(year: i32, month: u32, day: u32, lon: f64, lat: f64) -> RiseSetResult {
    rise_set(year, month, day, lon, lat, AltitudeThreshold::SUNRISE_SUNSET)
}

pub fn civil_twilight(year: i32, month: u32, day: u32, lon: f64, lat: f64) -> RiseSetResult {
    rise_set(year, month, day, lon, lat, AltitudeThreshold::CIVIL_TWILIGHT)
}

pub fn astronomical_twilight(year: i32, month: u32, day: u32, lon: f64, lat: f64) -> RiseSetResult {
    rise_set(year, month, day, lon, lat, AltitudeThreshold::ASTRONOMICAL_TWILIGHT)
}

pub fn day_length_standard(year: i32, month: u32, day: u32, lon: f64, lat: f64) -> f64 {
    day_length(year, month, day, lon, lat, AltitudeThreshold::SUNRISE_SUNSET)
}

pub fn day_length_civil(year: i32, month: u32, day: u32, lon: f64, lat: f64) -> f64 {
    day_length(year, month, day, lon, lat, AltitudeThreshold::CIVIL_TWILIGHT)
}

pub fn day_length_astronomical(year: i32, month: u32, day: u32, lon: f64, lat: f64) -> f64 {
    day_length(year, month, day, lon, lat, AltitudeThreshold::ASTRONOMICAL_TWILIGHT)
}

/// Whether it is spring or summer in the northern hemisphere.
pub fn is_northern_summer(year: i32, month: u32, day: u32) -> bool {
    day_length(year, month, day, 0.0, 50.0, AltitudeThreshold::HORIZON) > 12.0
}

/// Longitude, in [-180, 180), where the sun is rising on the equator at `hour` UTC.
pub fn rising_longitude_on_equator(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let greenwich = sun_rise_set(year, month, day, 0.0, 0.0);
    normalize180((greenwich.rise - hour) * 15.0)
}
