use std::time::Duration;

use log::warn;

use crate::error::{MazeError, Result};

pub const DEFAULT_SURFACE_W: u32 = 400;
pub const DEFAULT_SURFACE_H: u32 = 400;
pub const DEFAULT_STEP: u32 = 20;
pub const DEFAULT_MARKER_SIZE: u32 = 20;
pub const DEFAULT_LEVELS: u32 = 3;
pub const DEFAULT_GRID_W: u32 = DEFAULT_SURFACE_W / DEFAULT_STEP;
pub const DEFAULT_GRID_H: u32 = DEFAULT_SURFACE_H / DEFAULT_STEP;
/// Largest grid side accepted, in cells.
pub const MAX_GRID_SIDE: usize = 512;
pub const DEFAULT_ADVANCE_DELAY_TICKS: u32 = 2;
pub const DEFAULT_TICK_MS: u64 = 70;
pub const DEFAULT_RENDER_FPS: u64 = 60;

/// Fixed game parameters, chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Drawing surface width in pixels.
    pub surface_width: u32,
    /// Drawing surface height in pixels.
    pub surface_height: u32,
    /// Pixels per grid unit.
    pub cell_step: u32,
    /// Side of the player and exit markers, in pixels.
    pub marker_size: u32,
    pub levels: u32,
    /// Ticks between a level win and the next level.
    pub advance_delay_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: DEFAULT_SURFACE_W,
            surface_height: DEFAULT_SURFACE_H,
            cell_step: DEFAULT_STEP,
            marker_size: DEFAULT_MARKER_SIZE,
            levels: DEFAULT_LEVELS,
            advance_delay_ticks: DEFAULT_ADVANCE_DELAY_TICKS,
        }
    }
}

impl GameConfig {
    /// Config whose surface is exactly `width` x `height` grid units.
    /// Oversized products saturate and are refused by [`GameConfig::validate`].
    pub fn with_grid(width: u32, height: u32, cell_step: u32) -> Self {
        Self {
            surface_width: width.saturating_mul(cell_step),
            surface_height: height.saturating_mul(cell_step),
            cell_step,
            marker_size: cell_step,
            ..Self::default()
        }
    }

    pub fn grid_width(&self) -> usize {
        (self.surface_width / self.cell_step.max(1)) as usize
    }

    pub fn grid_height(&self) -> usize {
        (self.surface_height / self.cell_step.max(1)) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.cell_step == 0 {
            return Err(invalid("cell step must be positive"));
        }
        if self.marker_size == 0 {
            return Err(invalid("marker size must be positive"));
        }
        if self.levels == 0 {
            return Err(invalid("at least one level is required"));
        }
        // Pixel positions are i32.
        if self.surface_width > i32::MAX as u32 || self.surface_height > i32::MAX as u32 {
            return Err(invalid("surface does not fit in pixel coordinates"));
        }
        if self.grid_width() > MAX_GRID_SIDE || self.grid_height() > MAX_GRID_SIDE {
            return Err(MazeError::InvalidConfig {
                reason: format!(
                    "grid {}x{} exceeds {MAX_GRID_SIDE} cells per side",
                    self.grid_width(),
                    self.grid_height()
                ),
            });
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> MazeError {
    MazeError::InvalidConfig {
        reason: reason.to_string(),
    }
}

/// Front-end pacing, read from `MAZE_TICK_MS` and `MAZE_FPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub tick: Duration,
    pub frame: Duration,
}

pub fn read_pacing() -> Pacing {
    let tick_ms = read_positive_env("MAZE_TICK_MS").unwrap_or(DEFAULT_TICK_MS);
    let render_fps = read_positive_env("MAZE_FPS").unwrap_or(DEFAULT_RENDER_FPS);
    Pacing {
        tick: Duration::from_millis(tick_ms),
        frame: Duration::from_micros(1_000_000 / render_fps.max(1)),
    }
}

fn read_positive_env(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match parse_positive(&raw) {
        Some(v) => Some(v),
        None => {
            warn!("ignoring {name}={raw:?}: expected a positive integer");
            None
        }
    }
}

fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|v| *v > 0)
}
