//! Integration tests driving the simulation components through the same
//! sequential per-frame order the windowed app uses, without a window.

use nannou::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use flocklife::{
    CellType, FlockConfig, FlockSimulator, GridAutomaton, Player, ProjectileSet, SimConfig,
    FIXED_DT,
};

// One headless stand-in for the windowed frame loop
struct Harness {
    grid: GridAutomaton,
    flock_player: FlockSimulator,
    flock_enemy: FlockSimulator,
    player: Player,
    projectiles: ProjectileSet,
    world_extent: f32,
}

impl Harness {
    fn new(seed: u64) -> Self {
        let mut config = SimConfig::default();
        config.seed = seed;
        config.grid_width = 40;
        config.grid_height = 40;
        config.flock.count = 8;
        config.validate().unwrap();

        let world_extent = config.grid_width as f32 * config.cell_size;

        let grid =
            GridAutomaton::new(config.grid_width, config.grid_height, config.derive_seed(0))
                .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(config.derive_seed(1));
        let flock_player =
            FlockSimulator::new(&config.flock, pt2(0.0, 0.0), rgb(233, 10, 10), &mut rng)
                .unwrap();
        let flock_enemy = FlockSimulator::new(
            &config.flock,
            pt2(world_extent - 50.0, world_extent - 50.0),
            rgb(0, 0, 255),
            &mut rng,
        )
        .unwrap();
        let mut player_rng = ChaCha8Rng::seed_from_u64(config.derive_seed(2));
        let player = Player::new(pt2(10.0, 10.0), rgb(243, 45, 81), &mut player_rng);

        Self {
            grid,
            flock_player,
            flock_enemy,
            player,
            projectiles: ProjectileSet::new(),
            world_extent,
        }
    }

    // Frame order: player, player flock, enemy flock, grid, projectiles
    fn step(&mut self, paused: bool, player_accel: Vec2) {
        self.player
            .update(FIXED_DT, player_accel, self.world_extent);
        self.flock_player
            .update(FIXED_DT, Some(self.player.position));
        self.flock_enemy
            .set_adversary_positions(self.flock_player.positions().to_vec());
        let pursuit = self.flock_enemy.adversary_centroid();
        self.flock_enemy.update(FIXED_DT, pursuit);
        self.grid.update(paused);
        self.projectiles.update(FIXED_DT);
    }

    fn fire_volley(&mut self) {
        let positions = self.flock_player.positions().to_vec();
        let velocities = self.flock_player.velocities().to_vec();
        for (position, velocity) in positions.into_iter().zip(velocities) {
            self.projectiles.spawn(position, velocity);
        }
    }
}

#[test]
fn full_run_keeps_state_finite_and_aligned() {
    let mut harness = Harness::new(12345);
    harness.grid.place_cell(5, 5, CellType::Green).unwrap();
    harness.grid.place_cell(6, 5, CellType::Green).unwrap();
    harness.grid.place_cell(7, 5, CellType::Green).unwrap();

    for frame in 0..300 {
        let accel = if frame % 30 < 15 {
            vec2(500.0, 0.0)
        } else {
            vec2(0.0, 500.0)
        };
        if frame == 10 {
            harness.fire_volley();
        }
        harness.step(false, accel);
    }

    for flock in [&harness.flock_player, &harness.flock_enemy] {
        assert_eq!(flock.positions().len(), 8);
        assert_eq!(flock.velocities().len(), 8);
        for (p, v) in flock.positions().iter().zip(flock.velocities()) {
            assert!(p.is_finite(), "position {:?}", p);
            assert!(v.is_finite(), "velocity {:?}", v);
        }
    }

    // The volley expired long ago; the set retired every projectile
    assert!(harness.projectiles.is_empty());
}

#[test]
fn identical_seeds_replay_identical_runs() {
    let mut a = Harness::new(777);
    let mut b = Harness::new(777);

    for harness in [&mut a, &mut b] {
        harness.grid.place_cell(3, 3, CellType::Red).unwrap();
        harness.grid.place_cell(4, 3, CellType::Red).unwrap();
        harness.grid.place_cell(5, 3, CellType::Red).unwrap();
        harness.grid.place_cell(4, 5, CellType::Blue).unwrap();
        harness.grid.place_cell(5, 5, CellType::Blue).unwrap();
        harness.grid.place_cell(6, 5, CellType::Blue).unwrap();
    }

    for frame in 0..200 {
        let accel = vec2((frame % 7) as f32 * 100.0, (frame % 3) as f32 * -100.0);
        a.step(false, accel);
        b.step(false, accel);
    }

    assert_eq!(a.flock_player.positions(), b.flock_player.positions());
    assert_eq!(a.flock_enemy.positions(), b.flock_enemy.positions());
    assert_eq!(a.player.position, b.player.position);
    assert_eq!(a.grid.cells(), b.grid.cells());
}

#[test]
fn paused_frames_freeze_the_grid_but_not_the_agents() {
    let mut harness = Harness::new(42);
    harness.grid.place_cell(8, 8, CellType::Yellow).unwrap();
    harness.grid.place_cell(9, 8, CellType::Yellow).unwrap();
    harness.grid.place_cell(8, 9, CellType::Yellow).unwrap();
    harness.grid.place_cell(9, 9, CellType::Yellow).unwrap();

    let cells_before = harness.grid.cells().to_vec();
    let flock_before = harness.flock_player.positions().to_vec();

    for _ in 0..20 {
        harness.step(true, vec2(500.0, 0.0));
    }

    assert_eq!(harness.grid.cells(), &cells_before[..]);
    assert_ne!(harness.flock_player.positions(), &flock_before[..]);
}

#[test]
fn enemy_flock_pursues_the_player_flock() {
    let mut config = FlockConfig::default();
    config.count = 6;

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut pursuer =
        FlockSimulator::new(&config, pt2(600.0, 600.0), rgb(0, 0, 255), &mut rng).unwrap();

    let quarry: Vec<Point2> = vec![pt2(0.0, 0.0), pt2(20.0, 0.0), pt2(0.0, 20.0)];
    let quarry_centroid = pt2(20.0 / 3.0, 20.0 / 3.0);

    let start_gap = centroid(pursuer.positions()).distance(quarry_centroid);

    for _ in 0..60 {
        pursuer.set_adversary_positions(quarry.clone());
        let target = pursuer.adversary_centroid();
        pursuer.update(FIXED_DT, target);
    }

    let end_gap = centroid(pursuer.positions()).distance(quarry_centroid);
    assert!(
        end_gap < start_gap,
        "pursuer did not close in: {} -> {}",
        start_gap,
        end_gap
    );
}

fn centroid(points: &[Point2]) -> Point2 {
    let mut sum = Vec2::ZERO;
    for p in points {
        sum += *p;
    }
    sum / points.len() as f32
}
