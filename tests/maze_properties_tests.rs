use maze_game::{
    Direction, GameConfig, GameSession, MazeGenerator, MoveOutcome, Position, RngSource,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

proptest! {
    #[test]
    fn exit_is_reachable(width in 3usize..40, height in 3usize..40, seed in any::<u64>()) {
        let maze = MazeGenerator::new(width, height)
            .unwrap()
            .generate(&mut RngSource(StdRng::seed_from_u64(seed)))
            .unwrap();
        prop_assert!(maze.grid.connects(maze.start, maze.end));
    }

    #[test]
    fn maze_is_a_spanning_tree(width in 3usize..40, height in 3usize..40, seed in any::<u64>()) {
        let maze = MazeGenerator::new(width, height)
            .unwrap()
            .generate(&mut RngSource(StdRng::seed_from_u64(seed)))
            .unwrap();
        let open: Vec<_> = maze.grid.open_cells().collect();
        let rooms = open.iter().filter(|(x, y)| x % 2 == 1 && y % 2 == 1).count();
        let passages = open.len() - rooms;
        prop_assert!(open.iter().all(|(x, y)| x % 2 == 1 || y % 2 == 1));
        prop_assert_eq!(passages + 1, rooms);

        let reach = maze.grid.reachable_from(maze.start);
        prop_assert!(open.iter().all(|&(x, y)| reach[y][x]));
    }

    #[test]
    fn moves_stay_on_open_cells(
        width in 3u32..30,
        height in 3u32..30,
        seed in any::<u64>(),
        moves in prop::collection::vec(direction(), 0..200),
    ) {
        let config = GameConfig::with_grid(width, height, 20);
        let mut session = GameSession::new(config, RngSource(StdRng::seed_from_u64(seed))).unwrap();
        for dir in moves {
            let before = session.player();
            let target = before.stepped(dir, 20);
            let target_open = target
                .to_cell(20)
                .map(|(x, y)| session.grid().is_open(x, y))
                .unwrap_or(false);
            match session.attempt_move(dir) {
                MoveOutcome::Moved => {
                    prop_assert!(target_open);
                    prop_assert_eq!(session.player(), target);
                }
                MoveOutcome::Rejected => {
                    prop_assert!(!target_open);
                    prop_assert_eq!(session.player(), before);
                }
                MoveOutcome::Ignored => prop_assert_eq!(session.player(), before),
            }
            let (x, y) = session.player().to_cell(20).unwrap();
            prop_assert!(x < width as usize && y < height as usize);
            prop_assert!(session.grid().is_open(x, y));
            session.resolve_win();
        }
    }

    #[test]
    fn level_never_exceeds_maximum(seed in any::<u64>(), levels in 1u32..5) {
        use Direction::{Down, Left, Right, Up};

        // A 5x5 maze has four rooms joined by three of four possible passages;
        // this walk reaches (3,3) whichever passage is missing.
        let walk = [Right, Right, Down, Down, Left, Left, Up, Up, Down, Down, Right, Right];
        let config = GameConfig { levels, ..GameConfig::with_grid(5, 5, 10) };
        let mut session = GameSession::new(config, RngSource(StdRng::seed_from_u64(seed))).unwrap();
        let mut wins = 0u32;
        while !session.is_finished() {
            prop_assert_eq!(session.player(), Position::new(10, 10));
            for dir in walk {
                session.attempt_move(dir);
                if session.resolve_win().is_some() {
                    wins += 1;
                    break;
                }
            }
            prop_assert!(session.level_complete());
            prop_assert!(session.level() <= levels);
            while session.level_complete() && !session.is_finished() {
                session.tick().unwrap();
            }
        }
        prop_assert_eq!(wins, levels);
        prop_assert_eq!(session.level(), levels);
    }
}
