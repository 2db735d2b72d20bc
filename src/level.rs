use log::info;

use crate::components::Position;
use crate::config::GameConfig;
use crate::error::Result;
use crate::maze::{Grid, MazeGenerator, RandomSource};

/// One level's maze and its pixel-space start and exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelData {
    pub number: u32,
    pub grid: Grid,
    pub player_start: Position,
    pub exit: Position,
}

pub fn create_level<S: RandomSource + ?Sized>(
    generator: &MazeGenerator,
    config: &GameConfig,
    rng: &mut S,
    number: u32,
) -> Result<LevelData> {
    let maze = generator.generate(rng)?;
    let player_start = Position::from_cell(maze.start, config.cell_step);
    let exit = Position::from_cell(maze.end, config.cell_step);
    info!(
        "level {number} generated, start {:?}, exit {:?}",
        player_start, exit
    );
    Ok(LevelData {
        number,
        grid: maze.grid,
        player_start,
        exit,
    })
}
