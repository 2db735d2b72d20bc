//! Game session: one player walking through a fixed run of levels.
//!
//! The session never sleeps or draws. The caller feeds it moves, asks it to
//! resolve wins after each move, and drives the pause between levels with
//! [`GameSession::tick`].

use log::{debug, info};

use crate::components::{Direction, Marker, Position};
use crate::config::GameConfig;
use crate::error::{MazeError, Result};
use crate::level::{create_level, LevelData};
use crate::maze::{Grid, MazeGenerator, RandomSource};
use crate::player::is_valid_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Won; waiting `remaining_ticks` before advancing.
    LevelComplete { remaining_ticks: u32 },
    AllLevelsComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Rejected,
    /// The session is not accepting moves right now.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    LevelWon { level: u32 },
    LevelStarted { level: u32 },
    AllLevelsWon,
}

impl GameEvent {
    pub fn message(&self) -> String {
        match self {
            GameEvent::LevelWon { level } => format!("You won level {level}!"),
            GameEvent::LevelStarted { level } => format!("Level {level}"),
            GameEvent::AllLevelsWon => "Congratulations! You completed all levels!".to_string(),
        }
    }
}

pub struct GameSession<S> {
    config: GameConfig,
    generator: MazeGenerator,
    rng: S,
    level: LevelData,
    player: Position,
    phase: Phase,
}

impl<S: RandomSource> GameSession<S> {
    pub fn new(config: GameConfig, mut rng: S) -> Result<Self> {
        config.validate()?;
        let generator = MazeGenerator::new(config.grid_width(), config.grid_height())?;
        let level = create_level(&generator, &config, &mut rng, 1)?;
        Ok(Self {
            config,
            generator,
            rng,
            player: level.player_start,
            level,
            phase: Phase::Playing,
        })
    }

    /// Replaces the whole level state. On error the current level is kept.
    pub fn reset_to_level(&mut self, n: u32) -> Result<()> {
        if n == 0 || n > self.config.levels {
            return Err(MazeError::InvalidLevel {
                level: n,
                max: self.config.levels,
            });
        }
        let level = create_level(&self.generator, &self.config, &mut self.rng, n)?;
        self.player = level.player_start;
        self.level = level;
        self.phase = Phase::Playing;
        Ok(())
    }

    pub fn attempt_move(&mut self, dir: Direction) -> MoveOutcome {
        if self.phase != Phase::Playing {
            return MoveOutcome::Ignored;
        }
        let candidate = self.player.stepped(dir, self.config.cell_step);
        if is_valid_move(&self.level.grid, self.config.cell_step, candidate) {
            self.player = candidate;
            MoveOutcome::Moved
        } else {
            debug!("rejected move {:?} to ({}, {})", dir, candidate.x, candidate.y);
            MoveOutcome::Rejected
        }
    }

    /// One key press: a move, then the win check for the cell it landed on.
    /// Once a win latches, later moves in the same batch are `Ignored`.
    pub fn handle_move(&mut self, dir: Direction) -> (MoveOutcome, Option<GameEvent>) {
        let outcome = self.attempt_move(dir);
        let event = match outcome {
            MoveOutcome::Moved => self.resolve_win(),
            MoveOutcome::Rejected | MoveOutcome::Ignored => None,
        };
        (outcome, event)
    }

    /// Whether the player marker overlaps the exit marker.
    pub fn check_win(&self) -> bool {
        let player = Marker::new(self.player, self.config.marker_size);
        let exit = Marker::new(self.level.exit, self.config.marker_size);
        player.overlaps(&exit)
    }

    /// Latches a win. Yields `LevelWon` at most once per level.
    pub fn resolve_win(&mut self) -> Option<GameEvent> {
        if self.phase != Phase::Playing || !self.check_win() {
            return None;
        }
        info!("level {} complete", self.level.number);
        self.phase = Phase::LevelComplete {
            remaining_ticks: self.config.advance_delay_ticks,
        };
        Some(GameEvent::LevelWon {
            level: self.level.number,
        })
    }

    /// Counts down a pending advance and performs it when due.
    pub fn tick(&mut self) -> Result<Option<GameEvent>> {
        match self.phase {
            Phase::LevelComplete { remaining_ticks } if remaining_ticks > 0 => {
                self.phase = Phase::LevelComplete {
                    remaining_ticks: remaining_ticks - 1,
                };
                Ok(None)
            }
            Phase::LevelComplete { .. } => self.advance(),
            Phase::Playing | Phase::AllLevelsComplete => Ok(None),
        }
    }

    /// Leaves `LevelComplete` now, skipping any remaining delay.
    pub fn advance(&mut self) -> Result<Option<GameEvent>> {
        if !matches!(self.phase, Phase::LevelComplete { .. }) {
            return Ok(None);
        }
        let current = self.level.number;
        if current < self.config.levels {
            self.reset_to_level(current + 1)?;
            Ok(Some(GameEvent::LevelStarted { level: current + 1 }))
        } else {
            info!("all {} levels complete", self.config.levels);
            self.phase = Phase::AllLevelsComplete;
            Ok(Some(GameEvent::AllLevelsWon))
        }
    }
}

impl<S> GameSession<S> {
    pub fn level(&self) -> u32 {
        self.level.number
    }

    pub fn max_level(&self) -> u32 {
        self.config.levels
    }

    pub fn grid(&self) -> &Grid {
        &self.level.grid
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn exit(&self) -> Position {
        self.level.exit
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level_complete(&self) -> bool {
        self.phase != Phase::Playing
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::AllLevelsComplete
    }
}
