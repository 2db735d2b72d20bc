use crossterm::event::KeyCode;

use crate::components::{Direction, Position};
use crate::maze::Grid;

/// Whether the player may stand at `candidate`: in bounds and on an open cell.
pub fn is_valid_move(grid: &Grid, step: u32, candidate: Position) -> bool {
    match candidate.to_cell(step) {
        Some((x, y)) => grid.is_open(x, y),
        None => false,
    }
}

/// Input source: arrow keys and vi keys. Everything else is not for the core.
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::test_support::FirstChoice;
    use crate::maze::MazeGenerator;

    #[test]
    fn moves_are_checked_against_grid() {
        let maze = MazeGenerator::new(7, 7)
            .unwrap()
            .generate(&mut FirstChoice)
            .unwrap();
        // (1,1) -> (2,1) is the first carved passage.
        assert!(is_valid_move(&maze.grid, 10, Position::new(20, 10)));
        assert!(!is_valid_move(&maze.grid, 10, Position::new(10, 0)));
        assert!(!is_valid_move(&maze.grid, 10, Position::new(-10, 10)));
        assert!(!is_valid_move(&maze.grid, 10, Position::new(70, 10)));
    }

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(direction_for_key(KeyCode::Up), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Char('h')), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::Right), Some(Direction::Right));
        assert_eq!(direction_for_key(KeyCode::Char('q')), None);
        assert_eq!(direction_for_key(KeyCode::Enter), None);
    }
}
