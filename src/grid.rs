/*
 * Grid Automaton Module
 *
 * Competitive Game of Life on a toroidal grid. Cells carry one of four
 * species labels or are empty, and every step applies the rules to all
 * cells simultaneously (double-buffered):
 *
 * - An empty cell with 3 or more neighbors of a single species is born
 *   into the majority species; ties are broken uniformly at random.
 * - A living cell dies outside [2,3] same-species neighbors, and also
 *   dies when its 8-neighborhood carries more than 2 distinct labels
 *   (empty counts as a label) - mixed borders are lethal.
 *
 * The automaton owns its own seeded RNG for tie-breaking, so identical
 * seeds replay identical runs.
 */

use nannou::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

// Closed set of cell labels with a fixed color table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Empty,
    Red,
    Blue,
    Green,
    Yellow,
}

impl CellType {
    pub const SPECIES: [CellType; 4] =
        [CellType::Red, CellType::Blue, CellType::Green, CellType::Yellow];

    // The empty color switches when paused; that is purely cosmetic
    pub fn color(self, paused: bool) -> Rgb<u8> {
        match self {
            CellType::Empty => {
                if paused {
                    rgb(148, 147, 150)
                } else {
                    rgb(248, 247, 230)
                }
            }
            CellType::Red => rgb(243, 45, 81),
            CellType::Blue => rgb(81, 45, 243),
            CellType::Green => rgb(45, 243, 81),
            CellType::Yellow => rgb(243, 245, 10),
        }
    }
}

pub struct GridAutomaton {
    width: usize,
    height: usize,
    // Row-major, cells[y * width + x]
    cells: Vec<CellType>,
    rng: ChaCha8Rng,
}

impl GridAutomaton {
    pub fn new(width: usize, height: usize, seed: u64) -> Result<Self, crate::ConfigError> {
        if width == 0 || height == 0 {
            return Err(crate::ConfigError::InvalidGridDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![CellType::Empty; width * height],
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<CellType> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn live_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != CellType::Empty).count()
    }

    // The 8-neighborhood with toroidal wraparound
    fn neighbors(&self, x: usize, y: usize) -> [CellType; 8] {
        let left = (x + self.width - 1) % self.width;
        let right = (x + 1) % self.width;
        let up = (y + self.height - 1) % self.height;
        let down = (y + 1) % self.height;

        [
            self.cells[up * self.width + left],
            self.cells[up * self.width + x],
            self.cells[up * self.width + right],
            self.cells[y * self.width + left],
            self.cells[y * self.width + right],
            self.cells[down * self.width + left],
            self.cells[down * self.width + x],
            self.cells[down * self.width + right],
        ]
    }

    // Apply one simultaneous step of the rules. No-op while paused.
    pub fn update(&mut self, paused: bool) {
        if paused {
            return;
        }

        let mut next = self.cells.clone();

        for y in 0..self.height {
            for x in 0..self.width {
                let current = self.cells[y * self.width + x];
                let neighbors = self.neighbors(x, y);

                if current == CellType::Empty {
                    if let Some(species) = self.birth_species(&neighbors) {
                        next[y * self.width + x] = species;
                    }
                } else if Self::dies(current, &neighbors) {
                    next[y * self.width + x] = CellType::Empty;
                }
            }
        }

        self.cells = next;
    }

    // Majority species with at least 3 neighbors, random choice among ties
    fn birth_species(&mut self, neighbors: &[CellType; 8]) -> Option<CellType> {
        let mut counts = [0usize; CellType::SPECIES.len()];
        for neighbor in neighbors {
            if let Some(i) = CellType::SPECIES.iter().position(|s| s == neighbor) {
                counts[i] += 1;
            }
        }

        let max_count = *counts.iter().max().unwrap();
        if max_count < 3 {
            return None;
        }

        let tied: Vec<CellType> = CellType::SPECIES
            .iter()
            .zip(&counts)
            .filter(|(_, &count)| count == max_count)
            .map(|(&species, _)| species)
            .collect();

        tied.choose(&mut self.rng).copied()
    }

    fn dies(current: CellType, neighbors: &[CellType; 8]) -> bool {
        let same = neighbors.iter().filter(|&&n| n == current).count();
        if !(2..=3).contains(&same) {
            // Underpopulation or overpopulation
            return true;
        }

        // Strict homogeneity: more than 2 distinct labels around the cell
        // is lethal even when the same-species count is fine
        let mut seen: Vec<CellType> = Vec::with_capacity(3);
        for &n in neighbors {
            if !seen.contains(&n) {
                seen.push(n);
                if seen.len() > 2 {
                    return true;
                }
            }
        }

        false
    }

    pub fn reset(&mut self) {
        self.cells.fill(CellType::Empty);
    }

    pub fn place_cell(&mut self, x: usize, y: usize, cell_type: CellType) -> Result<(), GridError> {
        self.slot(x, y).map(|i| self.cells[i] = cell_type)
    }

    pub fn remove_cell(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        self.slot(x, y).map(|i| self.cells[i] = CellType::Empty)
    }

    fn slot(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x < self.width && y < self.height {
            Ok(y * self.width + x)
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    // Draw one colored square per cell; the window origin is centered, the
    // grid origin is its top-left corner
    pub fn draw(&self, draw: &Draw, window_rect: Rect, cell_size: f32, paused: bool) {
        for y in 0..self.height {
            for x in 0..self.width {
                let color = self.cells[y * self.width + x].color(paused);
                let px = window_rect.left() + (x as f32 + 0.5) * cell_size;
                let py = window_rect.top() - (y as f32 + 0.5) * cell_size;

                draw.rect()
                    .x_y(px, py)
                    .w_h(cell_size, cell_size)
                    .color(color);
            }
        }
    }
}
