//! Application-wide constants and default values.
//!
//! Groups the canvas defaults, tracer tuning, animation pacing and the
//! validation limits applied to `earthview.toml`.

// # Canvas

pub const DEFAULT_CANVAS_WIDTH: u32 = 720;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 360;

pub const MINIMUM_CANVAS_WIDTH: u32 = 16;
pub const MAXIMUM_CANVAS_WIDTH: u32 = 8192;
pub const MINIMUM_CANVAS_HEIGHT: u32 = 8;
pub const MAXIMUM_CANVAS_HEIGHT: u32 = 4096;

// # Contour tracing

/// Cell size of the marching-squares grid, in pixels
pub const DEFAULT_GRID_STEP: u32 = 4;
pub const MINIMUM_GRID_STEP: u32 = 1;
pub const MAXIMUM_GRID_STEP: u32 = 64;

/// Band outside the canvas that the bounded classifier clamps onto the edge
pub const DEFAULT_TRACE_MARGIN: u32 = 5;
pub const MINIMUM_TRACE_MARGIN: u32 = 1;
pub const MAXIMUM_TRACE_MARGIN: u32 = 64;

/// Multiplier on the number of grid cells allowed before a trace is declared stuck
pub const TRACE_ITERATION_FACTOR: u64 = 4;

// # Overlay

pub const DEFAULT_OVERLAY_ALPHA: f64 = 0.25;
pub const MINIMUM_OVERLAY_ALPHA: f64 = 0.0;
pub const MAXIMUM_OVERLAY_ALPHA: f64 = 1.0;

// # Animation

/// Simulated minutes added to the clock on every animation frame
pub const DEFAULT_SPEED_MINUTES: u32 = 10;
pub const MAXIMUM_SPEED_MINUTES: u32 = 1440;

pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 100;
pub const MINIMUM_FRAME_INTERVAL_MS: u64 = 10;
pub const MAXIMUM_FRAME_INTERVAL_MS: u64 = 10_000;

// # Files

pub const CONFIG_DIR_NAME: &str = "earthview";
pub const CONFIG_FILE_NAME: &str = "earthview.toml";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
