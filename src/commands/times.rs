//! `earthview times`: sunrise, sunset and twilight for one location.

use anyhow::Result;
use serde::Serialize;

use crate::Instant;
use crate::geo::ephemeris::{self, RiseSetCode, RiseSetResult};

/// Everything the command reports, also the shape of the `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct SunTimes {
    pub date: String,
    pub longitude: f64,
    pub latitude: f64,
    pub sun: RiseSetResult,
    pub civil: RiseSetResult,
    pub astronomical: RiseSetResult,
    pub midday: f64,
    pub day_length: f64,
    pub day_length_civil: f64,
    pub day_length_astronomical: f64,
    pub northern_summer: bool,
    /// Longitude where the sun is rising on the equator at `instant`.
    pub rising_longitude: f64,
    pub instant: Instant,
}

impl SunTimes {
    pub fn compute(longitude: f64, latitude: f64, instant: &Instant) -> Self {
        let (y, m, d) = (instant.year, instant.month, instant.day);
        let sun = ephemeris::sun_rise_set(y, m, d, longitude, latitude);

        Self {
            date: format!("{y:04}-{m:02}-{d:02}"),
            longitude,
            latitude,
            sun,
            civil: ephemeris::civil_twilight(y, m, d, longitude, latitude),
            astronomical: ephemeris::astronomical_twilight(y, m, d, longitude, latitude),
            midday: sun.midday(),
            day_length: ephemeris::day_length_standard(y, m, d, longitude, latitude),
            day_length_civil: ephemeris::day_length_civil(y, m, d, longitude, latitude),
            day_length_astronomical: ephemeris::day_length_astronomical(
                y, m, d, longitude, latitude,
            ),
            northern_summer: ephemeris::is_northern_summer(y, m, d),
            rising_longitude: ephemeris::rising_longitude_on_equator(
                y,
                m,
                d,
                instant.decimal_hours(),
            ),
            instant: *instant,
        }
    }
}

/// `HH:MM` for a UTC decimal hour, wrapped into the day.
pub fn format_hours(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    let minutes = minutes.rem_euclid(24 * 60);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// `Xh YYm` for a duration in hours.
pub fn format_length(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

fn describe(result: &RiseSetResult) -> String {
    match result.code {
        RiseSetCode::Normal => format!(
            "{} to {} UTC",
            format_hours(result.rise),
            format_hours(result.set)
        ),
        RiseSetCode::AlwaysAbove => "sun never sets below this altitude".to_string(),
        RiseSetCode::AlwaysBelow => "sun never rises above this altitude".to_string(),
    }
}

pub fn handle_times_command(
    longitude: f64,
    latitude: f64,
    date: Option<&str>,
    json: bool,
    debug_enabled: bool,
) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        anyhow::bail!("longitude must be between -180 and 180 degrees (got {longitude})");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        anyhow::bail!("latitude must be between -90 and 90 degrees (got {latitude})");
    }

    // A date without a time means "that day, now-ish" for the rising longitude.
    let now = Instant::now_utc();
    let instant = match date {
        Some(text) => {
            let day = Instant::parse(text)?;
            Instant::new(day.year, day.month, day.day, now.hour, now.minute)?
        }
        None => now,
    };

    let times = SunTimes::compute(longitude, latitude, &instant);

    if json {
        println!("{}", serde_json::to_string_pretty(&times)?);
        return Ok(());
    }

    log_version!();
    if debug_enabled {
        log_pipe!();
        log_debug!("Computing for {} UTC", instant);
    }
    log_block_start!(
        "Sun times for {:.4}°, {:.4}° on {}",
        longitude,
        latitude,
        times.date
    );
    log_indented!("Sunrise/sunset:       {}", describe(&times.sun));
    log_indented!("Civil twilight:       {}", describe(&times.civil));
    log_indented!("Astronomical twilight: {}", describe(&times.astronomical));
    log_indented!("Solar noon:           {} UTC", format_hours(times.midday));
    log_block_start!("Day length");
    log_indented!("Standard:     {}", format_length(times.day_length));
    log_indented!("Civil:        {}", format_length(times.day_length_civil));
    log_indented!("Astronomical: {}", format_length(times.day_length_astronomical));
    log_block_start!(
        "Northern hemisphere: {}",
        if times.northern_summer {
            "spring/summer"
        } else {
            "autumn/winter"
        }
    );
    log_decorated!(
        "At {} UTC the sun is rising on the equator at {:.1}°",
        format_hours(instant.decimal_hours()),
        times.rising_longitude
    );
    log_end!();

    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("times - Print sunrise, sunset and twilight times");
    log_block_start!("Usage: earthview times <lon> <lat> [YYYY-MM-DD] [--json]");
    log_block_start!("Arguments:");
    log_indented!("<lon>         Longitude in degrees, east positive (-180 to 180)");
    log_indented!("<lat>         Latitude in degrees, north positive (-90 to 90)");
    log_indented!("YYYY-MM-DD    Date to compute for (default: today, UTC)");
    log_block_start!("Options:");
    log_indented!("--json        Print the results as JSON");
    log_block_start!("Examples:");
    log_indented!("earthview times 8.95 46.0");
    log_indented!("earthview times -74.006 40.7128 2024-12-21 --json");
    log_end!();
}
