//! Maze grid, recursive-backtracker carving and goal placement.

use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

/// Grid dimension. Must stay odd so carving in steps of 2 keeps the
/// outer ring solid.
pub const GRID_SIZE: usize = 15;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

/// Square cell grid, immutable once generated.
#[derive(Clone)]
pub struct Maze {
    size: usize,
    cells: Vec<Cell>,
}

/// One solid cell as a world-space obstacle: unit footprint centered on
/// the cell, so half extent is 0.5 on each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Wall {
    pub x: f32,
    pub z: f32,
}

pub const WALL_HALF_EXTENT: f32 = 0.5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenError {
    #[error("maze size {size} is invalid: need an odd dimension of at least 5")]
    BadSize { size: usize },

    #[error("no open cell available for goal placement")]
    NoOpenGoalCell,
}

impl Maze {
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn at(&self, col: usize, row: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub fn is_open(&self, col: usize, row: usize) -> bool {
        col < self.size && row < self.size && self.at(col, row) == Cell::Open
    }

    /// Solid cell at world position, out-of-bounds counts as solid.
    #[inline]
    pub fn is_solid_world(&self, wx: f32, wz: f32) -> bool {
        let i = wx.floor() as isize;
        let j = wz.floor() as isize;
        if i < 0 || j < 0 {
            return true;
        }
        !self.is_open(i as usize, j as usize)
    }

    /// Wall instances for collision and scene setup, one per solid cell,
    /// centered at (col + 0.5, row + 0.5).
    pub fn walls(&self) -> Vec<Wall> {
        let mut out = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.at(col, row) == Cell::Wall {
                    out.push(Wall {
                        x: col as f32 + 0.5,
                        z: row as f32 + 0.5,
                    });
                }
            }
        }
        out
    }

    #[inline]
    fn set(&mut self, col: usize, row: usize, cell: Cell) {
        self.cells[row * self.size + col] = cell;
    }
}

// Candidate neighbors two cells away, as (dcol, drow).
const DIRS: [(isize, isize); 4] = [(0, -2), (0, 2), (-2, 0), (2, 0)];

/// Carve a labyrinth with a randomized depth-first backtracker.
///
/// Every cell starts solid; carving opens the start cell (1, 1) and walks
/// to unvisited neighbors two cells away in freshly shuffled order,
/// opening the cell in between. Uses an explicit frame stack instead of
/// call recursion (worst-case depth is on the order of size²/4) but keeps
/// the same depth-first order: one branch is exhausted before the parent
/// tries its next shuffled direction.
pub fn generate<R: Rng>(size: usize, rng: &mut R) -> Result<Maze, GenError> {
    if size < 5 || size % 2 == 0 {
        return Err(GenError::BadSize { size });
    }

    let mut maze = Maze {
        size,
        cells: vec![Cell::Wall; size * size],
    };
    maze.set(1, 1, Cell::Open);

    // Frame: cell plus its shuffled directions and how many were tried.
    let mut stack: Vec<((usize, usize), [(isize, isize); 4], usize)> = Vec::new();
    let mut dirs = DIRS;
    dirs.shuffle(rng);
    stack.push(((1, 1), dirs, 0));

    loop {
        let Some(frame) = stack.last_mut() else { break };
        let (col, row) = frame.0;
        let mut carved = None;
        while frame.2 < frame.1.len() {
            let (dc, dr) = frame.1[frame.2];
            frame.2 += 1;
            let nc = col as isize + dc;
            let nr = row as isize + dr;
            // strictly inside the border, still unvisited
            if nc <= 0 || nr <= 0 || nc >= size as isize - 1 || nr >= size as isize - 1 {
                continue;
            }
            let (nc, nr) = (nc as usize, nr as usize);
            if maze.at(nc, nr) != Cell::Wall {
                continue;
            }
            let mid = (
                (col as isize + dc / 2) as usize,
                (row as isize + dr / 2) as usize,
            );
            maze.set(mid.0, mid.1, Cell::Open);
            maze.set(nc, nr, Cell::Open);
            carved = Some((nc, nr));
            break;
        }
        match carved {
            Some(cell) => {
                let mut ndirs = DIRS;
                ndirs.shuffle(rng);
                stack.push((cell, ndirs, 0));
            }
            None => {
                stack.pop();
            }
        }
    }

    Ok(maze)
}

/// Place the goal at the center of the far-corner cell (size-2, size-2),
/// or on the nearest open cell to that corner when the corner itself is
/// solid. Errors out instead of ever placing the goal inside a wall.
pub fn place_goal(maze: &Maze) -> Result<(f32, f32), GenError> {
    let n = maze.size();
    let target = (n - 2, n - 2);
    if maze.is_open(target.0, target.1) {
        return Ok(cell_center(target));
    }

    // Ring search outward from the intended corner; first ring with any
    // open cell wins, closest cell within it.
    warn!(
        "goal corner ({}, {}) is solid, searching for nearest open cell",
        target.0, target.1
    );
    for radius in 1..n as isize {
        let mut best: Option<((usize, usize), isize)> = None;
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr.abs() != radius && dc.abs() != radius {
                    continue; // interior of the ring was already scanned
                }
                let c = target.0 as isize + dc;
                let r = target.1 as isize + dr;
                if c < 0 || r < 0 || c >= n as isize || r >= n as isize {
                    continue;
                }
                if !maze.is_open(c as usize, r as usize) {
                    continue;
                }
                let d2 = dc * dc + dr * dr;
                if best.map(|(_, bd)| d2 < bd).unwrap_or(true) {
                    best = Some(((c as usize, r as usize), d2));
                }
            }
        }
        if let Some((cell, _)) = best {
            return Ok(cell_center(cell));
        }
    }
    Err(GenError::NoOpenGoalCell)
}

#[inline]
fn cell_center((col, row): (usize, usize)) -> (f32, f32) {
    (col as f32 + 0.5, row as f32 + 0.5)
}
