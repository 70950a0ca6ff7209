//! Range checks for configuration values.

use anyhow::Result;

use super::Config;
use crate::constants::*;

/// Reject values the tracer or the animation loop cannot work with.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(width) = config.canvas_width
        && !(MINIMUM_CANVAS_WIDTH..=MAXIMUM_CANVAS_WIDTH).contains(&width)
    {
        anyhow::bail!(
            "canvas_width ({}) must be between {} and {} pixels",
            width,
            MINIMUM_CANVAS_WIDTH,
            MAXIMUM_CANVAS_WIDTH
        );
    }

    if let Some(height) = config.canvas_height
        && !(MINIMUM_CANVAS_HEIGHT..=MAXIMUM_CANVAS_HEIGHT).contains(&height)
    {
        anyhow::bail!(
            "canvas_height ({}) must be between {} and {} pixels",
            height,
            MINIMUM_CANVAS_HEIGHT,
            MAXIMUM_CANVAS_HEIGHT
        );
    }

    if let Some(step) = config.grid_step
        && !(MINIMUM_GRID_STEP..=MAXIMUM_GRID_STEP).contains(&step)
    {
        anyhow::bail!(
            "grid_step ({}) must be between {} and {} pixels",
            step,
            MINIMUM_GRID_STEP,
            MAXIMUM_GRID_STEP
        );
    }

    if let Some(margin) = config.trace_margin
        && !(MINIMUM_TRACE_MARGIN..=MAXIMUM_TRACE_MARGIN).contains(&margin)
    {
        anyhow::bail!(
            "trace_margin ({}) must be between {} and {} pixels",
            margin,
            MINIMUM_TRACE_MARGIN,
            MAXIMUM_TRACE_MARGIN
        );
    }

    // A cell larger than the canvas leaves nothing to trace.
    let canvas = config.canvas();
    if config.grid_step() >= canvas.width.min(canvas.height) {
        anyhow::bail!(
            "grid_step ({}) must be smaller than the canvas ({}x{})",
            config.grid_step(),
            canvas.width,
            canvas.height
        );
    }

    if let Some(alpha) = config.overlay_alpha
        && !(MINIMUM_OVERLAY_ALPHA..=MAXIMUM_OVERLAY_ALPHA).contains(&alpha)
    {
        anyhow::bail!(
            "overlay_alpha ({}) must be between {} and {}",
            alpha,
            MINIMUM_OVERLAY_ALPHA,
            MAXIMUM_OVERLAY_ALPHA
        );
    }

    if let Some(speed) = config.speed_minutes
        && speed > MAXIMUM_SPEED_MINUTES
    {
        anyhow::bail!(
            "speed_minutes ({}) must be at most {} (one simulated day per frame)",
            speed,
            MAXIMUM_SPEED_MINUTES
        );
    }

    if let Some(interval) = config.frame_interval_ms
        && !(MINIMUM_FRAME_INTERVAL_MS..=MAXIMUM_FRAME_INTERVAL_MS).contains(&interval)
    {
        anyhow::bail!(
            "frame_interval_ms ({}) must be between {} and {} milliseconds",
            interval,
            MINIMUM_FRAME_INTERVAL_MS,
            MAXIMUM_FRAME_INTERVAL_MS
        );
    }

    Ok(())
}
