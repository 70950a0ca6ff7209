//! Day/night terminator: pixel classification, outline tracing and painting.
//!
//! ## Module Structure
//!
//! - [`classifier`]: Decides whether the sun is up at a pixel for a given instant
//! - [`contour`]: Marching-squares tracer producing closed outlines of a pixel region
//! - [`renderer`]: Traces the day and twilight regions and paints them through a
//!   [`RenderSurface`]
//!
//! A frame is traced completely before anything is drawn, so a tracing
//! failure leaves the surface untouched.

pub mod classifier;
pub mod contour;
pub mod renderer;

pub use classifier::{Bounded, PixelPredicate, SolarClassifier, is_lit};
pub use contour::{Contour, TraceOptions, TraceOutcome, even_odd_contains, trace, trace_contours};
pub use renderer::{FrameRegions, RenderSurface, TerminatorRenderer};
