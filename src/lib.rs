/*
 * Flocklife - Module Definitions
 *
 * This file defines the module structure for the simulation.
 * The crate combines three systems driven by a single frame loop:
 * flocking agent squads, a competitive cellular automaton grid,
 * and straight-line projectiles fired by the agents.
 */

// Re-export key components for easier access
pub use app::Model;
pub use config::{ConfigError, FlockConfig, SimConfig};
pub use debug::DebugInfo;
pub use flock::FlockSimulator;
pub use grid::{CellType, GridAutomaton, GridError};
pub use params::SimulationParams;
pub use player::Player;
pub use projectile::{Projectile, ProjectileSet};

// Define modules
pub mod vecfield;
pub mod flock;
pub mod projectile;
pub mod grid;
pub mod player;
pub mod config;
pub mod params;
pub mod debug;
pub mod app;
pub mod input;
pub mod ui;
pub mod renderer;

// Constants
pub const AGENT_SIZE: f32 = 10.0;
pub const PROJECTILE_SIZE: f32 = 7.0;
// One simulation step per frame, independent of wall-clock elapsed time
pub const FIXED_DT: f32 = 1.0 / 30.0;
