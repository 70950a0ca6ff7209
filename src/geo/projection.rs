//! Equirectangular map projection between canvas pixels and geographic coordinates.
//!
//! Longitude runs left to right from -180° to +180°, latitude top to bottom
//! from +90° to -90°. Both directions are constant-time and infallible:
//! longitudes wrap, latitudes clamp.

use serde::Serialize;

/// Geographic coordinate in degrees. East and north are positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Canvas coordinate. Tracing probes cells a few pixels outside the canvas,
/// so negative and past-the-edge values are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Size of the projected map, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Zero dimensions are raised to one pixel.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
            height: if height == 0 { 1 } else { height },
        }
    }

    /// Whether the pixel lies on the visible canvas.
    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as i64) < self.width as i64 && (p.y as i64) < self.height as i64
    }

    /// Nearest visible pixel.
    pub fn clamp(&self, p: PixelPoint) -> PixelPoint {
        PixelPoint {
            x: p.x.clamp(0, (self.width as i32 - 1).max(0)),
            y: p.y.clamp(0, (self.height as i32 - 1).max(0)),
        }
    }

    /// Chebyshev distance from the pixel to the visible canvas, 0 when inside.
    pub fn distance_outside(&self, p: PixelPoint) -> u32 {
        let clamped = self.clamp(p);
        (p.x - clamped.x).unsigned_abs().max((p.y - clamped.y).unsigned_abs())
    }

    pub fn pixel_to_geo(&self, p: PixelPoint) -> GeoPoint {
        let w = self.width as f64;
        let h = self.height as f64;
        // Wrapping in [0, 360) first keeps probes left of the canvas on the far east side.
        let longitude = (p.x as f64 * 360.0 / w).rem_euclid(360.0) - 180.0;
        let latitude = (90.0 - p.y as f64 * 180.0 / h).clamp(-90.0, 90.0);
        GeoPoint {
            longitude,
            latitude,
        }
    }

    pub fn geo_to_pixel(&self, g: GeoPoint) -> PixelPoint {
        let w = self.width as f64;
        let h = self.height as f64;
        let lon = (g.longitude + 180.0).rem_euclid(360.0);
        let lat = g.latitude.clamp(-90.0, 90.0);

        let x = (lon / 360.0 * w).round() as i64 % self.width.max(1) as i64;
        let y = ((90.0 - lat) / 180.0 * h).round() as i64;
        PixelPoint {
            x: x as i32,
            y: y.min(self.height as i64 - 1).max(0) as i32,
        }
    }
}
