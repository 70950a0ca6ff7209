//! Geographic calculations: map projection and the solar ephemeris.
//!
//! ## Module Structure
//!
//! - [`projection`]: Equirectangular mapping between canvas pixels and longitude/latitude
//! - [`ephemeris`]: Sun position, sidereal time, rise/set times and day length
//!
//! Both modules are pure: no clock, no I/O, no shared state. The current time
//! always arrives as an explicit [`crate::Instant`] parameter.

pub mod ephemeris;
pub mod projection;

pub use ephemeris::{
    AltitudeThreshold, RiseSetCode, RiseSetResult, astronomical_twilight, civil_twilight,
    day_length, day_length_astronomical, day_length_civil, day_length_standard,
    is_northern_summer, rise_set, rising_longitude_on_equator, sun_rise_set,
};
pub use projection::{Canvas, GeoPoint, PixelPoint};

#[cfg(test)]
mod tests;
