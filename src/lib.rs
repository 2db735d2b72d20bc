//! Procedurally generated grid maze game.
//!
//! [`maze`] carves perfect mazes, [`session`] runs the level sequence on top
//! of them, and [`render`] draws a session to a terminal.

pub mod components;
pub mod config;
pub mod error;
pub mod level;
pub mod maze;
pub mod player;
pub mod render;
pub mod session;

pub use components::{Direction, Marker, Position};
pub use config::GameConfig;
pub use error::{MazeError, Result};
pub use maze::{Grid, Maze, MazeGenerator, RandomSource, RngSource};
pub use session::{GameEvent, GameSession, MoveOutcome, Phase};
