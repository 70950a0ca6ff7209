//! Paints the day and twilight regions of a frame onto a drawing surface.

use anyhow::{Context, Result};

use super::classifier::SolarClassifier;
use super::contour::{Contour, TraceOptions, trace_contours};
use crate::Instant;
use crate::config::Config;
use crate::geo::AltitudeThreshold;

/// Minimal path-and-clip drawing interface the renderer draws through.
#[cfg_attr(test, mockall::automock)]
pub trait RenderSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    /// Intersect the clip region with the current path and clear the path.
    fn clip(&mut self);
    /// Paint the clip region with the overlay colour at the given opacity.
    fn paint_with_alpha(&mut self, alpha: f64);
}

/// Traced regions for one frame, ready to paint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameRegions {
    pub day: Vec<Contour>,
    pub twilight: Vec<Contour>,
}

#[derive(Debug, Clone, Copy)]
pub struct TerminatorRenderer {
    options: TraceOptions,
    alpha: f64,
    twilight: AltitudeThreshold,
    debug_enabled: bool,
}

impl TerminatorRenderer {
    pub fn new(options: TraceOptions, alpha: f64, twilight: AltitudeThreshold) -> Self {
        Self {
            options,
            alpha,
            twilight,
            debug_enabled: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.trace_options(),
            config.overlay_alpha(),
            config.twilight().threshold(),
        )
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_enabled = enabled;
        self
    }

    pub fn options(&self) -> &TraceOptions {
        &self.options
    }

    /// Outlines of the region where the sun is above `threshold`.
    pub fn region(&self, instant: &Instant, threshold: AltitudeThreshold) -> Result<Vec<Contour>> {
        let classifier = SolarClassifier::new(self.options.canvas, *instant, threshold);
        let contours = trace_contours(&classifier, self.options.default_hint(), &self.options)
            .with_context(|| {
                format!(
                    "Failed to trace the {}° region at {}",
                    threshold.altitude_deg, instant
                )
            })?;

        if self.debug_enabled {
            log_debug!(
                "{}° region: {} contour(s), {} vertices",
                threshold.altitude_deg,
                contours.len(),
                contours.iter().map(Contour::len).sum::<usize>()
            );
        }

        Ok(contours)
    }

    /// Trace both regions of a frame. Nothing is drawn if either fails.
    pub fn trace_frame(&self, instant: &Instant) -> Result<FrameRegions> {
        Ok(FrameRegions {
            day: self.region(instant, AltitudeThreshold::SUNRISE_SUNSET)?,
            twilight: self.region(instant, self.twilight)?,
        })
    }

    /// Overlay daylight, then twilight, at the configured opacity.
    ///
    /// Where both overlap the surface ends up brighter than where only
    /// twilight applies.
    pub fn render<S: RenderSurface + ?Sized>(&self, instant: &Instant, surface: &mut S) -> Result<()> {
        let frame = self.trace_frame(instant)?;
        self.paint(&frame, surface);
        Ok(())
    }

    pub fn paint<S: RenderSurface + ?Sized>(&self, frame: &FrameRegions, surface: &mut S) {
        self.paint_region(&frame.day, surface);
        self.paint_region(&frame.twilight, surface);
    }

    fn paint_region<S: RenderSurface + ?Sized>(&self, contours: &[Contour], surface: &mut S) {
        if contours.is_empty() {
            return;
        }

        // Vertices are cell anchors; draw through cell centres.
        let half = self.options.step as f64 / 2.0;

        surface.save();
        surface.begin_path();
        for contour in contours {
            let mut points = contour.points().iter();
            let Some(first) = points.next() else {
                continue;
            };
            surface.move_to(first.x as f64 + half, first.y as f64 + half);
            for p in points {
                surface.line_to(p.x as f64 + half, p.y as f64 + half);
            }
            surface.close_path();
        }
        surface.clip();
        surface.paint_with_alpha(self.alpha);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Canvas;
    use crate::terminator::contour::even_odd_contains;
    use mockall::predicate::*;

    fn renderer() -> TerminatorRenderer {
        TerminatorRenderer::new(
            TraceOptions::new(Canvas::new(72, 36), 2, 3),
            0.25,
            AltitudeThreshold::CIVIL_TWILIGHT,
        )
    }

    fn equinox_noon() -> Instant {
        Instant::parse("2024-03-20 12:00").unwrap()
    }

    /// Records calls in order.
    #[derive(Default)]
    struct Recorder(Vec<&'static str>);

    impl RenderSurface for Recorder {
        fn save(&mut self) {
            self.0.push("save");
        }
        fn restore(&mut self) {
            self.0.push("restore");
        }
        fn begin_path(&mut self) {
            self.0.push("begin_path");
        }
        fn move_to(&mut self, _x: f64, _y: f64) {
            self.0.push("move_to");
        }
        fn line_to(&mut self, _x: f64, _y: f64) {}
        fn close_path(&mut self) {
            self.0.push("close_path");
        }
        fn clip(&mut self) {
            self.0.push("clip");
        }
        fn paint_with_alpha(&mut self, _alpha: f64) {
            self.0.push("paint");
        }
    }

    #[test]
    fn test_each_region_is_clipped_and_painted_once() {
        let mut surface = MockRenderSurface::new();
        surface.expect_save().times(2).return_const(());
        surface.expect_begin_path().times(2).return_const(());
        surface.expect_move_to().times(2).return_const(());
        surface.expect_line_to().return_const(());
        surface.expect_close_path().times(2).return_const(());
        surface.expect_clip().times(2).return_const(());
        surface
            .expect_paint_with_alpha()
            .with(eq(0.25))
            .times(2)
            .return_const(());
        surface.expect_restore().times(2).return_const(());

        renderer().render(&equinox_noon(), &mut surface).unwrap();
    }

    #[test]
    fn test_call_order() {
        let mut surface = Recorder::default();
        renderer().render(&equinox_noon(), &mut surface).unwrap();

        let region = [
            "save",
            "begin_path",
            "move_to",
            "close_path",
            "clip",
            "paint",
            "restore",
        ];
        assert_eq!(surface.0, [region, region].concat());
    }

    #[test]
    fn test_vertices_are_shifted_to_cell_centres() {
        let frame = renderer().trace_frame(&equinox_noon()).unwrap();
        let first = frame.day[0].points()[0];

        let mut surface = MockRenderSurface::new();
        surface.expect_save().return_const(());
        surface.expect_begin_path().return_const(());
        surface
            .expect_move_to()
            .with(eq(first.x as f64 + 1.0), eq(first.y as f64 + 1.0))
            .times(1)
            .return_const(());
        surface.expect_line_to().return_const(());
        surface.expect_close_path().return_const(());
        surface.expect_clip().return_const(());
        surface.expect_paint_with_alpha().return_const(());
        surface.expect_restore().return_const(());

        renderer().paint(
            &FrameRegions {
                day: frame.day,
                twilight: Vec::new(),
            },
            &mut surface,
        );
    }

    #[test]
    fn test_empty_regions_draw_nothing() {
        // No expectations: any call panics.
        let mut surface = MockRenderSurface::new();
        renderer().paint(&FrameRegions::default(), &mut surface);
    }

    #[test]
    fn test_day_region_contains_subsolar_point() {
        let frame = renderer().trace_frame(&equinox_noon()).unwrap();
        assert_eq!(frame.day.len(), 1);
        assert!(frame.day[0].is_closed());
        // Subsolar point near (0°, 0°) is the canvas centre.
        assert!(even_odd_contains(&frame.day, 36.0, 18.0));
        assert!(!even_odd_contains(&frame.day, 1.0, 18.0));
    }
}
