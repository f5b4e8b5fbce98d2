/*
 * Application Module
 *
 * The frame-loop collaborator: owns the window model and drives every
 * component once per frame in a fixed order - input sampling, player
 * step, player flock step, enemy flock step, grid step, projectile step -
 * and only then lets the view read the state. Everything runs on the
 * update thread; there are no free-running worker threads, so rendering
 * can never observe a half-stepped frame.
 *
 * The timestep is fixed at FIXED_DT per frame regardless of wall-clock
 * time, which keeps runs with equal seeds and inputs reproducible.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{FlockConfig, SimConfig};
use crate::debug::DebugInfo;
use crate::flock::FlockSimulator;
use crate::grid::GridAutomaton;
use crate::params::SimulationParams;
use crate::player::{Player, PLAYER_THRUST};
use crate::projectile::ProjectileSet;
use crate::{input, renderer, ui, FIXED_DT};

const PLAYER_FLOCK_COLOR: (u8, u8, u8) = (233, 10, 10);
const ENEMY_FLOCK_COLOR: (u8, u8, u8) = (0, 0, 255);
const PLAYER_COLOR: (u8, u8, u8) = (243, 45, 81);

// Main model for the application
pub struct Model {
    pub config: SimConfig,
    pub grid: GridAutomaton,
    pub flock_player: FlockSimulator,
    pub flock_enemy: FlockSimulator,
    pub player: Player,
    pub projectiles: ProjectileSet,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    // Grid/world extent in pixels (square world)
    pub world_extent: f32,
    // Stream for flock rebuilds; components own their own derived streams
    rng: ChaCha8Rng,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = SimConfig::default();
    config.validate().expect("default configuration is valid");

    let world_extent = config.grid_width as f32 * config.cell_size;
    let window_height = config.grid_height as f32 * config.cell_size;

    // Create the main window sized to the grid
    let window_id = app
        .new_window()
        .title("Flocklife")
        .size(world_extent as u32, window_height as u32)
        .view(renderer::view)
        .key_pressed(input::key_pressed)
        .mouse_pressed(input::mouse_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let grid = GridAutomaton::new(config.grid_width, config.grid_height, config.derive_seed(0))
        .expect("validated grid dimensions");

    let mut rng = ChaCha8Rng::seed_from_u64(config.derive_seed(1));
    let params = SimulationParams::default();

    let (r, g, b) = PLAYER_COLOR;
    let mut player_rng = ChaCha8Rng::seed_from_u64(config.derive_seed(2));
    let player = Player::new(pt2(0.0, 0.0), rgb(r, g, b), &mut player_rng);

    let (flock_player, flock_enemy) =
        build_flocks(&config.flock, world_extent, &mut rng);

    log::info!(
        "simulation ready: {}x{} grid, {} agents per flock, seed {:#x}",
        config.grid_width,
        config.grid_height,
        config.flock.count,
        config.seed
    );

    Model {
        config,
        grid,
        flock_player,
        flock_enemy,
        player,
        projectiles: ProjectileSet::new(),
        params,
        egui,
        debug_info: DebugInfo::default(),
        world_extent,
        rng,
    }
}

// Build the player squad and the enemy squad at opposite spawn corners
fn build_flocks(
    config: &FlockConfig,
    world_extent: f32,
    rng: &mut ChaCha8Rng,
) -> (FlockSimulator, FlockSimulator) {
    let (pr, pg, pb) = PLAYER_FLOCK_COLOR;
    let (er, eg, eb) = ENEMY_FLOCK_COLOR;

    let flock_player = FlockSimulator::new(config, pt2(0.0, 0.0), rgb(pr, pg, pb), rng)
        .expect("validated flock configuration");
    let flock_enemy = FlockSimulator::new(
        config,
        pt2(world_extent - 150.0, world_extent - 150.0),
        rgb(er, eg, eb),
        rng,
    )
    .expect("validated flock configuration");

    (flock_player, flock_enemy)
}

// Update the model: one fixed simulation step per frame
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    // Update UI and pick up parameter changes
    let (reset_flocks, reset_grid) =
        ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);
    let (size_changed, gains_changed) = model.params.detect_changes();

    if reset_grid {
        model.grid.reset();
        log::info!("grid reset");
    }

    if reset_flocks || size_changed {
        let flock_config = flock_config_from_params(model);
        let (flock_player, flock_enemy) =
            build_flocks(&flock_config, model.world_extent, &mut model.rng);
        model.flock_player = flock_player;
        model.flock_enemy = flock_enemy;
        log::info!("flocks rebuilt with {} agents each", flock_config.count);
    } else if gains_changed {
        for flock in [&mut model.flock_player, &mut model.flock_enemy] {
            flock.set_gains(
                model.params.separation_gain,
                model.params.cohesion_gain,
                model.params.alignment_gain,
                model.params.neighbor_radius,
            );
        }
    }

    // Sample held movement keys into a player acceleration
    let keys = &app.keys.down;
    let ax = (keys.contains(&Key::D) as i32 - keys.contains(&Key::A) as i32) as f32;
    let ay = (keys.contains(&Key::S) as i32 - keys.contains(&Key::W) as i32) as f32;
    let player_accel = vec2(ax, ay) * PLAYER_THRUST;

    // Sequential per-frame stepping; the view only runs after this returns
    model.player.update(FIXED_DT, player_accel, model.world_extent);

    if model.params.show_flocks {
        model
            .flock_player
            .update(FIXED_DT, Some(model.player.position));

        // The enemy squad pursues a read-only snapshot of the player squad
        model
            .flock_enemy
            .set_adversary_positions(model.flock_player.positions().to_vec());
        let pursuit = model.flock_enemy.adversary_centroid();
        model.flock_enemy.update(FIXED_DT, pursuit);

        if model.params.enforce_speed_limit {
            model.flock_player.clamp_speed(model.params.speed_limit);
            model.flock_enemy.clamp_speed(model.params.speed_limit);
        }
    }

    model.grid.update(model.params.paused);
    model.projectiles.update(FIXED_DT);

    model.debug_info.live_cells = model.grid.live_cell_count();
    model.debug_info.projectiles_in_flight = model.projectiles.len();
    model.debug_info.steps += 1;
}

pub fn flock_config_from_params(model: &Model) -> FlockConfig {
    FlockConfig {
        count: model.params.flock_size,
        separation_gain: model.params.separation_gain,
        cohesion_gain: model.params.cohesion_gain,
        alignment_gain: model.params.alignment_gain,
        neighbor_radius: model.params.neighbor_radius,
        parallel: model.params.enable_parallel,
    }
}

// Fire a volley: one projectile per flock agent seeded with that agent's
// position and velocity, plus one from the player. Solo fire shoots from
// the player only.
pub fn fire(model: &mut Model) {
    if model.params.group_fire {
        let positions = model.flock_player.positions().to_vec();
        let velocities = model.flock_player.velocities().to_vec();
        for (position, velocity) in positions.into_iter().zip(velocities) {
            model.projectiles.spawn(position, velocity);
        }
    }
    model
        .projectiles
        .spawn(model.player.position, model.player.velocity);
}
