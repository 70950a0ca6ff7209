//! Day/night classification of canvas pixels.

use crate::Instant;
use crate::geo::{AltitudeThreshold, Canvas, GeoPoint, PixelPoint, RiseSetCode, rise_set};

/// Anything the contour tracer can probe: "is this pixel inside the region?"
pub trait PixelPredicate {
    fn is_inside(&self, p: PixelPoint) -> bool;
}

impl<F> PixelPredicate for F
where
    F: Fn(PixelPoint) -> bool,
{
    fn is_inside(&self, p: PixelPoint) -> bool {
        self(p)
    }
}

/// Whether the sun is above `threshold` at `geo` at the given instant.
///
/// The rise/set window is computed for the instant's UTC date, so around the
/// date line the window may start before 0h or end after 24h. The time of day
/// is tested against the window shifted by a day either way.
pub fn is_lit(instant: &Instant, geo: GeoPoint, threshold: AltitudeThreshold) -> bool {
    let window = rise_set(
        instant.year,
        instant.month,
        instant.day,
        geo.longitude,
        geo.latitude,
        threshold,
    );

    match window.code {
        RiseSetCode::AlwaysAbove => true,
        RiseSetCode::AlwaysBelow => false,
        RiseSetCode::Normal => {
            let hm = instant.decimal_hours();
            [hm, hm + 24.0, hm - 24.0]
                .iter()
                .any(|&t| window.rise < t && t < window.set)
        }
    }
}

/// Classifies canvas pixels for one instant and one altitude threshold.
#[derive(Debug, Clone, Copy)]
pub struct SolarClassifier {
    canvas: Canvas,
    instant: Instant,
    threshold: AltitudeThreshold,
}

impl SolarClassifier {
    pub fn new(canvas: Canvas, instant: Instant, threshold: AltitudeThreshold) -> Self {
        Self {
            canvas,
            instant,
            threshold,
        }
    }

    pub fn is_lit_at(&self, geo: GeoPoint) -> bool {
        is_lit(&self.instant, geo, self.threshold)
    }
}

impl PixelPredicate for SolarClassifier {
    fn is_inside(&self, p: PixelPoint) -> bool {
        self.is_lit_at(self.canvas.pixel_to_geo(p))
    }
}

/// Restricts a predicate to the canvas plus a margin.
///
/// Pixels within `margin` of the canvas take the value of the nearest canvas
/// pixel; pixels further out are outside. A region that covers the whole
/// border therefore still has a closed outline just beyond the canvas edge.
#[derive(Debug)]
pub struct Bounded<'a, P: ?Sized> {
    inner: &'a P,
    canvas: Canvas,
    margin: u32,
}

impl<'a, P: PixelPredicate + ?Sized> Bounded<'a, P> {
    pub fn new(inner: &'a P, canvas: Canvas, margin: u32) -> Self {
        Self {
            inner,
            canvas,
            margin,
        }
    }
}

impl<P: PixelPredicate + ?Sized> PixelPredicate for Bounded<'_, P> {
    fn is_inside(&self, p: PixelPoint) -> bool {
        if self.canvas.distance_outside(p) > self.margin {
            return false;
        }
        self.inner.is_inside(self.canvas.clamp(p))
    }
}
