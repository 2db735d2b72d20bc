use thiserror::Error;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("maze grid must be at least 3x3, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("generated maze leaves exit {end:?} unreachable from start {start:?}")]
    Unreachable {
        start: (usize, usize),
        end: (usize, usize),
    },

    #[error("level {level} is outside 1..={max}")]
    InvalidLevel { level: u32, max: u32 },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
