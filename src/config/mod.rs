//! Configuration for canvas size, tracer resolution, overlay and animation pacing.
//!
//! Settings come from `earthview.toml`, looked up in the platform configuration
//! directory (`~/.config/earthview/` on Linux) or in the directory passed with
//! `--config`. The file is optional: every field has a default, and a missing
//! file simply means all defaults.
//!
//! ```toml
//! #[Canvas]
//! canvas_width = 720        # Map width in pixels (16-8192)
//! canvas_height = 360       # Map height in pixels (8-4096)
//!
//! #[Tracing]
//! grid_step = 4             # Marching-squares cell size in pixels (1-64)
//! trace_margin = 5          # Band outside the canvas treated as the edge (1-64)
//!
//! #[Overlay]
//! overlay_alpha = 0.25      # Opacity of each painted region (0.0-1.0)
//! twilight = "civil"        # Second band: "civil" or "astronomical"
//!
//! #[Animation]
//! speed_minutes = 10        # Simulated minutes per frame (0-1440)
//! frame_interval_ms = 100   # Wall-clock delay between frames (10-10000)
//! ```
//!
//! Values are range-checked on load; an out-of-range field is an error naming
//! the field and its limits.

pub mod loading;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::*;
use crate::geo::{AltitudeThreshold, Canvas};
use crate::terminator::TraceOptions;

pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Which twilight band is painted on top of daylight.
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Twilight {
    /// Sun centre down to 6° below the horizon.
    #[default]
    Civil,
    /// Sun centre down to 18° below the horizon.
    Astronomical,
}

impl Twilight {
    pub fn threshold(self) -> AltitudeThreshold {
        match self {
            Twilight::Civil => AltitudeThreshold::CIVIL_TWILIGHT,
            Twilight::Astronomical => AltitudeThreshold::ASTRONOMICAL_TWILIGHT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Twilight::Civil => "civil",
            Twilight::Astronomical => "astronomical",
        }
    }
}

/// Contents of `earthview.toml`. Unset fields fall back to the defaults in
/// [`crate::constants`] through the accessor methods.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub canvas_width: Option<u32>,
    pub canvas_height: Option<u32>,
    pub grid_step: Option<u32>,
    pub trace_margin: Option<u32>,
    pub overlay_alpha: Option<f64>,
    pub twilight: Option<Twilight>,
    pub speed_minutes: Option<u32>,
    pub frame_interval_ms: Option<u64>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        loading::load()
    }

    pub fn load_from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        loading::load_from_path(path)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(
            self.canvas_width.unwrap_or(DEFAULT_CANVAS_WIDTH),
            self.canvas_height.unwrap_or(DEFAULT_CANVAS_HEIGHT),
        )
    }

    pub fn grid_step(&self) -> u32 {
        self.grid_step.unwrap_or(DEFAULT_GRID_STEP)
    }

    pub fn trace_margin(&self) -> u32 {
        self.trace_margin.unwrap_or(DEFAULT_TRACE_MARGIN)
    }

    pub fn trace_options(&self) -> TraceOptions {
        TraceOptions::new(self.canvas(), self.grid_step(), self.trace_margin())
    }

    pub fn overlay_alpha(&self) -> f64 {
        self.overlay_alpha.unwrap_or(DEFAULT_OVERLAY_ALPHA)
    }

    pub fn twilight(&self) -> Twilight {
        self.twilight.unwrap_or_default()
    }

    pub fn speed_minutes(&self) -> u32 {
        self.speed_minutes.unwrap_or(DEFAULT_SPEED_MINUTES)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.unwrap_or(DEFAULT_FRAME_INTERVAL_MS))
    }

    /// Print the effective settings as an indented block.
    pub fn log_config(&self, source: &str) {
        let canvas = self.canvas();
        log_block_start!("Loaded {}", source);
        log_indented!("Canvas: {}x{} px", canvas.width, canvas.height);
        log_indented!(
            "Grid step: {} px, margin: {} px",
            self.grid_step(),
            self.trace_margin()
        );
        log_indented!("Overlay alpha: {}", self.overlay_alpha());
        log_indented!("Twilight band: {}", self.twilight().as_str());
        log_indented!(
            "Animation: {} min/frame every {} ms",
            self.speed_minutes(),
            self.frame_interval().as_millis()
        );
    }
}
