/*
 * Configuration Module
 *
 * Construction-time configuration for the simulation: grid dimensions,
 * flock sizing, force gains, and the base random seed, gathered in one
 * place and validated before any component is built. Invalid sizes are
 * rejected up front instead of surfacing later as NaN trajectories or
 * empty-population divisions.
 */

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("flock population must be at least 1, got {0}")]
    InvalidFlockSize(usize),
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidGridDimensions { width: usize, height: usize },
}

// Per-flock construction parameters
#[derive(Debug, Clone, Copy)]
pub struct FlockConfig {
    pub count: usize,
    pub separation_gain: f32,
    pub cohesion_gain: f32,
    pub alignment_gain: f32,
    pub neighbor_radius: f32,
    // Compute pairwise distance rows on the rayon pool
    pub parallel: bool,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            count: 5,
            separation_gain: 1.0,
            cohesion_gain: 1.0,
            alignment_gain: 1.0,
            neighbor_radius: 200.0,
            parallel: false,
        }
    }
}

impl FlockConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count < 1 {
            return Err(ConfigError::InvalidFlockSize(self.count));
        }
        Ok(())
    }
}

// Whole-simulation configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size: f32,
    pub flock: FlockConfig,
    // Base seed; each component derives its own stream from it
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: 150,
            grid_height: 150,
            cell_size: 5.0,
            flock: FlockConfig::default(),
            seed: 0xF10C,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::InvalidGridDimensions {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        self.flock.validate()
    }

    // Independent RNG streams per component, derived from the base seed
    pub fn derive_seed(&self, stream: u64) -> u64 {
        self.seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}
