//! Single-frame rendering and the terminal animation loop.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{Write, stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::Instant;
use crate::geo::rising_longitude_on_equator;
use crate::logger::Log;
use crate::surface::TerminalSurface;
use crate::terminator::TerminatorRenderer;

/// Status line shown under the map.
fn status_line(instant: &Instant) -> String {
    let rising = rising_longitude_on_equator(
        instant.year,
        instant.month,
        instant.day,
        instant.decimal_hours(),
    );
    format!("{instant} UTC   sunrise on the equator at {rising:.1}°")
}

/// Draw one frame for `--at` (or now) and print it.
pub fn handle_render_command(at: Option<&str>, debug_enabled: bool) -> Result<()> {
    log_version!();
    if debug_enabled {
        log_pipe!();
        log_debug!("Debug mode enabled - showing tracer details");
    }

    let config = super::load_config(debug_enabled)?;
    let instant = super::resolve_instant(at)?;
    let renderer = TerminatorRenderer::from_config(&config).with_debug(debug_enabled);

    let mut surface = TerminalSurface::fit_to_terminal(config.canvas());
    renderer
        .render(&instant, &mut surface)
        .context("Failed to render the terminator")?;

    log_block_start!("{}", status_line(&instant));
    log_end!();
    for line in surface.to_lines() {
        println!("{line}");
    }

    Ok(())
}

/// Restores the terminal when the animation ends, however it ends.
struct ScreenGuard;

impl ScreenGuard {
    fn enter() -> Result<Self> {
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))
            .context("Failed to prepare the terminal")?;
        Ok(Self)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
    }
}

/// Options of the `animate` command after applying config defaults.
#[derive(Debug, Clone, Copy)]
pub struct AnimateOptions {
    pub speed_minutes: u32,
    pub frames: Option<u64>,
    pub interval: std::time::Duration,
}

pub fn handle_animate_command(
    at: Option<&str>,
    speed: Option<u32>,
    frames: Option<u64>,
    debug_enabled: bool,
) -> Result<()> {
    log_version!();
    let config = super::load_config(debug_enabled)?;
    if let Some(speed) = speed {
        crate::config::validation::validate_config(&crate::config::Config {
            speed_minutes: Some(speed),
            ..config.clone()
        })?;
    }

    let start = super::resolve_instant(at)?;
    let options = AnimateOptions {
        speed_minutes: speed.unwrap_or(config.speed_minutes()),
        frames,
        interval: config.frame_interval(),
    };
    let renderer = TerminatorRenderer::from_config(&config).with_debug(debug_enabled);

    // Flag flips to true on Ctrl+C or SIGTERM.
    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&stop))
        .context("Failed to register SIGINT handler")?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&stop))
        .context("Failed to register SIGTERM handler")?;

    let last = {
        let _screen = ScreenGuard::enter()?;
        let mut surface = TerminalSurface::fit_to_terminal(config.canvas());
        run_animation(&renderer, &mut surface, start, options, &stop)
    };
    Log::set_simulated_instant(None);

    let last = last?;
    log_block_start!("Animation stopped at {} UTC", last);
    log_end!();
    Ok(())
}

/// Advance the simulated clock frame by frame until stopped. Returns the
/// instant of the last frame drawn.
fn run_animation(
    renderer: &TerminatorRenderer,
    surface: &mut TerminalSurface,
    start: Instant,
    options: AnimateOptions,
    stop: &AtomicBool,
) -> Result<Instant> {
    let mut out = stdout();
    let mut instant = start;
    let mut drawn = 0u64;

    loop {
        Log::set_simulated_instant(Some(instant));

        // The whole frame is traced before the surface is touched.
        let frame = renderer
            .trace_frame(&instant)
            .with_context(|| format!("Failed to render frame {}", drawn + 1))?;

        surface.clear();
        renderer.paint(&frame, surface);
        surface.draw(&mut out)?;
        queue!(
            out,
            MoveTo(0, surface.rows() + 1),
            Clear(ClearType::CurrentLine),
            Print(status_line(&instant)),
            MoveTo(0, surface.rows() + 2),
            Print("Ctrl+C to stop")
        )?;
        out.flush()?;
        drawn += 1;

        if stop.load(Ordering::SeqCst) || options.frames.is_some_and(|n| drawn >= n) {
            return Ok(instant);
        }

        thread::sleep(options.interval);
        if stop.load(Ordering::SeqCst) {
            return Ok(instant);
        }
        instant.advance_minutes(options.speed_minutes as i64);
    }
}

pub fn display_help() {
    log_version!();
    log_block_start!("animate - Run the day/night cycle in the terminal");
    log_block_start!("Usage: earthview animate [--at <time>] [--speed <min>] [--frames <n>]");
    log_block_start!("Options:");
    log_indented!("--at <time>      Start instant, \"YYYY-MM-DD HH:MM\" UTC (default: now)");
    log_indented!("--speed <min>    Simulated minutes per frame (default: speed_minutes)");
    log_indented!("--frames <n>     Stop after n frames (default: run until Ctrl+C)");
    log_block_start!("Description:");
    log_indented!("Redraws the sunlit and twilight regions on every frame while the");
    log_indented!("simulated clock advances. Frame pacing comes from frame_interval_ms");
    log_indented!("in earthview.toml.");
    log_end!();
}

pub fn display_render_help() {
    log_version!();
    log_block_start!("earthview - Draw the current day/night terminator");
    log_block_start!("Usage: earthview [--at <time>] [--config <dir>] [--debug]");
    log_block_start!("Description:");
    log_indented!("Shades the part of the map where the sun is up, and the twilight band");
    log_indented!("around it, for a single instant. Without --at the current UTC time is used.");
    log_end!();
}
