//! Geometry shared by the generator, the session and the renderer.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit delta in grid space; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Pixel-space position. Always a multiple of the cell step once committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Saturates instead of wrapping; validated configs never get that far.
    pub fn from_cell(cell: (usize, usize), step: u32) -> Self {
        let step = clamp_i32(step as usize);
        Self {
            x: clamp_i32(cell.0).saturating_mul(step),
            y: clamp_i32(cell.1).saturating_mul(step),
        }
    }

    /// Grid cell under this position, or `None` for negative coordinates.
    pub fn to_cell(self, step: u32) -> Option<(usize, usize)> {
        let step = step as i32;
        if step <= 0 || self.x < 0 || self.y < 0 {
            return None;
        }
        Some(((self.x / step) as usize, (self.y / step) as usize))
    }

    pub fn stepped(self, dir: Direction, step: u32) -> Self {
        let (dx, dy) = dir.delta();
        let step = clamp_i32(step as usize);
        Self {
            x: self.x.saturating_add(dx * step),
            y: self.y.saturating_add(dy * step),
        }
    }
}

fn clamp_i32(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Axis-aligned square marker drawn at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub origin: Position,
    pub size: u32,
}

impl Marker {
    pub fn new(origin: Position, size: u32) -> Self {
        Self { origin, size }
    }

    /// Strict interval overlap on both axes; shared edges do not count.
    pub fn overlaps(&self, other: &Marker) -> bool {
        let (ax0, ay0) = (self.origin.x as i64, self.origin.y as i64);
        let (bx0, by0) = (other.origin.x as i64, other.origin.y as i64);
        let (ax1, ay1) = (ax0 + self.size as i64, ay0 + self.size as i64);
        let (bx1, by1) = (bx0 + other.size as i64, by0 + other.size as i64);
        ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1
    }
}
