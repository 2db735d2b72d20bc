//! Randomized depth-first backtracking maze generation.

use std::collections::VecDeque;
use std::fmt;

use log::debug;
use rand::Rng;

use crate::error::{MazeError, Result};

pub const MIN_SIDE: usize = 3;

/// Picks an index in `0..len`. `len` is always at least 1.
pub trait RandomSource {
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Adapts any `rand` generator to [`RandomSource`].
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Open/wall lattice. `true` means passable.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    pub fn closed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![false; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Out-of-bounds cells read as walls.
    pub fn is_open(&self, x: usize, y: usize) -> bool {
        self.in_bounds(x, y) && self.cells[y][x]
    }

    fn open(&mut self, x: usize, y: usize) {
        self.cells[y][x] = true;
    }

    pub fn open_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.cells[y][x])
    }

    /// Breadth-first flood over open cells from `start`.
    pub fn reachable_from(&self, start: (usize, usize)) -> Vec<Vec<bool>> {
        let mut seen = vec![vec![false; self.width]; self.height];
        if !self.is_open(start.0, start.1) {
            return seen;
        }
        let mut q = VecDeque::new();
        seen[start.1][start.0] = true;
        q.push_back(start);
        while let Some((x, y)) = q.pop_front() {
            for (dx, dy) in [(0isize, -1isize), (0, 1), (-1, 0), (1, 0)] {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if !self.is_open(nx, ny) || seen[ny][nx] {
                    continue;
                }
                seen[ny][nx] = true;
                q.push_back((nx, ny));
            }
        }
        seen
    }

    pub fn connects(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        self.in_bounds(to.0, to.1) && self.reachable_from(from)[to.1][to.0]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &open in row {
                f.write_str(if open { "." } else { "#" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid {}x{}\n{}", self.width, self.height, self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub start: (usize, usize),
    pub end: (usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeGenerator {
    width: usize,
    height: usize,
}

impl MazeGenerator {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn start(&self) -> (usize, usize) {
        (1, 1)
    }

    /// Last room one step in from the border, rounded down to odd parity.
    pub fn end(&self) -> (usize, usize) {
        (last_room(self.width), last_room(self.height))
    }

    pub fn generate<S: RandomSource + ?Sized>(&self, rng: &mut S) -> Result<Maze> {
        debug!("generating {}x{} maze", self.width, self.height);
        let mut grid = Grid::closed(self.width, self.height);
        let start = self.start();
        let end = self.end();

        grid.open(start.0, start.1);
        let mut stack = vec![start];

        while let Some(&(x, y)) = stack.last() {
            let neighbors = self.unvisited_neighbors(&grid, x, y);
            if neighbors.is_empty() {
                stack.pop();
                continue;
            }
            let (nx, ny) = neighbors[rng.choose_index(neighbors.len())];
            grid.open((x + nx) / 2, (y + ny) / 2);
            grid.open(nx, ny);
            stack.push((nx, ny));
        }

        if !grid.connects(start, end) {
            return Err(MazeError::Unreachable { start, end });
        }
        debug!("maze ready, exit at {:?}", end);
        Ok(Maze { grid, start, end })
    }

    // Order is left, right, up, down.
    fn unvisited_neighbors(&self, grid: &Grid, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut neighbors = Vec::with_capacity(4);
        if x >= 3 && !grid.is_open(x - 2, y) {
            neighbors.push((x - 2, y));
        }
        if x + 2 <= self.width - 2 && !grid.is_open(x + 2, y) {
            neighbors.push((x + 2, y));
        }
        if y >= 3 && !grid.is_open(x, y - 2) {
            neighbors.push((x, y - 2));
        }
        if y + 2 <= self.height - 2 && !grid.is_open(x, y + 2) {
            neighbors.push((x, y + 2));
        }
        neighbors
    }
}

fn last_room(side: usize) -> usize {
    let inner = side - 2;
    if inner % 2 == 1 {
        inner
    } else {
        inner - 1
    }
}
