use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, ExecutableCommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use maze_game::config::{
    read_pacing, GameConfig, DEFAULT_GRID_H, DEFAULT_GRID_W, DEFAULT_LEVELS, DEFAULT_STEP,
    MAX_GRID_SIDE,
};
use maze_game::player::direction_for_key;
use maze_game::render::{render_finished, Renderer};
use maze_game::{GameEvent, GameSession, MazeGenerator, MoveOutcome, Result, RngSource};

type Session = GameSession<RngSource<StdRng>>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Walk a random maze to its exit, level after level")]
struct Args {
    /// Maze width in grid cells
    #[arg(
        short = 'W',
        long,
        default_value_t = DEFAULT_GRID_W,
        value_parser = clap::value_parser!(u32).range(3..=MAX_GRID_SIDE as i64)
    )]
    width: u32,

    /// Maze height in grid cells
    #[arg(
        short = 'H',
        long,
        default_value_t = DEFAULT_GRID_H,
        value_parser = clap::value_parser!(u32).range(3..=MAX_GRID_SIDE as i64)
    )]
    height: u32,

    /// Pixels per grid cell
    #[arg(long, default_value_t = DEFAULT_STEP, value_parser = clap::value_parser!(u32).range(1..=1000))]
    step: u32,

    /// Number of levels to clear
    #[arg(short, long, default_value_t = DEFAULT_LEVELS, value_parser = clap::value_parser!(u32).range(1..))]
    levels: u32,

    /// Seed for reproducible mazes
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print one generated maze and exit
    #[arg(long)]
    dump: bool,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            levels: self.levels,
            ..GameConfig::with_grid(self.width, self.height, self.step)
        }
    }

    fn rng(&self) -> RngSource<StdRng> {
        match self.seed {
            Some(seed) => RngSource(StdRng::seed_from_u64(seed)),
            None => RngSource(StdRng::from_entropy()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    info!("starting with {args:?}");

    let config = args.config();
    config.validate()?;

    if args.dump {
        let generator = MazeGenerator::new(config.grid_width(), config.grid_height())?;
        let maze = generator.generate(&mut args.rng())?;
        print!("{}", maze.grid);
        return Ok(());
    }

    let session = GameSession::new(config, args.rng())?;

    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;
    run(&mut stdout, session)
}

/// Raw mode plus alternate screen, undone on drop even if setup fails halfway.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

fn run(stdout: &mut Stdout, mut session: Session) -> Result<()> {
    let pacing = read_pacing();
    let mut renderer = Renderer::new(session.grid().width(), session.grid().height());
    let mut last_tick = Instant::now();

    // Start and exit coincide on the smallest grids.
    if let Some(event) = session.resolve_win() {
        renderer.notify(event.message());
    }

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Enter | KeyCode::Esc => renderer.dismiss(),
                    code => {
                        if let Some(dir) = direction_for_key(code) {
                            match session.handle_move(dir) {
                                (_, Some(event)) => {
                                    info!("{}", event.message());
                                    renderer.notify(event.message());
                                }
                                (MoveOutcome::Moved, None) => renderer.dismiss(),
                                _ => {}
                            }
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= pacing.tick {
            last_tick = Instant::now();
            if let Some(event) = session.tick()? {
                info!("{}", event.message());
                if event == GameEvent::AllLevelsWon {
                    let size = terminal::size()?;
                    renderer.render(stdout, &session, size)?;
                    render_finished(stdout, &session, &event.message(), size)?;
                    return wait_for_quit();
                }
                // A fresh level; the win message stays up until the player moves or closes it.
                if let Some(event) = session.resolve_win() {
                    renderer.notify(event.message());
                }
            }
        }

        renderer.render(stdout, &session, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < pacing.frame {
            thread::sleep(pacing.frame - elapsed);
        }
    }
}

fn wait_for_quit() -> Result<()> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}
