//! # Earthview Library
//!
//! Day/night terminator for an equirectangular world map: the solar
//! ephemeris, the pixel classifier, the marching-squares outline tracer and
//! the renderer that paints the sunlit and twilight regions.
//!
//! ## Architecture
//!
//! - **Geographic**: `geo` holds the map projection and the solar ephemeris
//! - **Terminator**: `terminator` classifies pixels, traces region outlines
//!   and paints them through a `RenderSurface`
//! - **Clock**: `instant` is the simulated UTC time the renderer reads; the
//!   caller owns it and advances it between frames
//! - **Presentation**: `surface` rasterises onto terminal character cells
//! - **Configuration**: `config` for TOML-based settings
//! - **Commands**: `commands` for the binary's subcommands
//! - **Infrastructure**: argument parsing, logging and constants

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod geo;
pub mod instant;
pub mod surface;
pub mod terminator;

pub use instant::Instant;
pub use terminator::{RenderSurface, TerminatorRenderer};
