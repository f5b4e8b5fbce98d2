/*
 * Flock Simulator Module
 *
 * The numerical core of the simulation. A FlockSimulator owns one squad of
 * agents as parallel position/velocity/acceleration arrays and advances
 * them with a fixed-step update:
 *
 * 1. Separation: pushes agents away from the flock centroid, scaled by the
 *    reciprocal of the aggregate pairwise distance - a packed flock
 *    separates harder than a spread-out one.
 * 2. Cohesion: steers each agent's velocity toward the scaled mean flock
 *    velocity (k_coh * V_mean - v_i).
 * 3. Alignment: steers each agent's position toward the scaled mean flock
 *    position (k_align * X_mean - x_i).
 * 4. Follow: a spring toward an externally supplied target point.
 *
 * Note the cohesion term reads the velocity mean and the alignment term the
 * position mean; the roles look swapped against the usual naming, but this
 * matches the tuned behavior and is kept literally.
 *
 * Integration is semi-implicit Euler: velocity first, then position from
 * the new velocity. That ordering is what keeps the spring terms stable at
 * the fixed timestep - do not reorder it.
 */

use nannou::prelude::*;
use rand::Rng;
use rayon::prelude::*;

use crate::config::{ConfigError, FlockConfig};
use crate::vecfield;
use crate::AGENT_SIZE;

// Fixed multiplier on the separation term
const SEPARATION_SCALE: f32 = 10.0;
// Follow spring constant
const FOLLOW_GAIN: f32 = 0.5;

pub struct FlockSimulator {
    positions: Vec<Point2>,
    velocities: Vec<Vec2>,
    accelerations: Vec<Vec2>,
    // Recomputed every step; only read back by the debug overlay
    neighbor_counts: Vec<usize>,
    separation_gain: f32,
    cohesion_gain: f32,
    alignment_gain: f32,
    neighbor_radius: f32,
    parallel: bool,
    // Read-only snapshot of the opposing flock, used for targeting
    adversary_positions: Option<Vec<Point2>>,
    pub color: Rgb<u8>,
}

impl FlockSimulator {
    // Spawn `config.count` agents scattered around `spawn` with randomized
    // initial velocities. Rejects an empty population: the mean and
    // aggregate-distance terms are singular for N = 0.
    pub fn new(
        config: &FlockConfig,
        spawn: Point2,
        color: Rgb<u8>,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let n = config.count;

        let mut positions = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);

        for _ in 0..n {
            let x = spawn.x + rng.gen_range(0.0..100.0);
            let y = spawn.y + rng.gen_range(0.0..100.0);
            positions.push(pt2(x, y));

            let vx = rng.gen_range(-10.0..10.0);
            let vy = rng.gen_range(-10.0..10.0);
            velocities.push(vec2(vx, vy));
        }

        Ok(Self {
            positions,
            velocities,
            accelerations: vec![Vec2::ZERO; n],
            neighbor_counts: vec![1; n],
            separation_gain: config.separation_gain,
            cohesion_gain: config.cohesion_gain,
            alignment_gain: config.alignment_gain,
            neighbor_radius: config.neighbor_radius,
            parallel: config.parallel,
            adversary_positions: None,
            color,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Point2] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    pub fn neighbor_counts(&self) -> &[usize] {
        &self.neighbor_counts
    }

    // Advance one fixed step. The only method that mutates simulation
    // state; accessors and draw are read-only.
    pub fn update(&mut self, dt: f32, follow_target: Option<Point2>) {
        let n = self.positions.len();

        // Flock means
        let mut x_mean = Vec2::ZERO;
        let mut v_mean = Vec2::ZERO;
        for i in 0..n {
            x_mean += self.positions[i];
            v_mean += self.velocities[i];
        }
        x_mean /= n as f32;
        v_mean /= n as f32;

        // Pairwise geometry. The distance rows are independent, so the
        // parallel path fans them out and joins before anything reads them.
        let delta = vecfield::pairwise_delta(&self.positions);
        let dist = if self.parallel && n > 1 {
            let mut dist = vec![0.0f32; n * n];
            dist.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                for (j, entry) in row.iter_mut().enumerate() {
                    *entry = if i == j {
                        vecfield::DISTANCE_EPSILON
                    } else {
                        delta[i * n + j].length()
                    };
                }
            });
            dist
        } else {
            vecfield::pairwise_distance(&delta, n)
        };

        let mask = vecfield::neighbor_mask(&dist, n, self.neighbor_radius);
        self.neighbor_counts = vecfield::neighbor_counts(&mask, n);

        // Aggregate squared-distance sums for the separation denominator
        let distance_sums = vecfield::squared_distance_column_sums(&dist, n);

        for i in 0..n {
            let sum = distance_sums[i].max(vecfield::DISTANCE_EPSILON);
            let separation =
                SEPARATION_SCALE * self.separation_gain * (self.positions[i] - x_mean) / sum;

            // Velocity-mean and position-mean terms, kept literally
            let cohesion = self.cohesion_gain * v_mean - self.velocities[i];
            let alignment = self.alignment_gain * x_mean - self.positions[i];

            let follow = match follow_target {
                Some(target) => FOLLOW_GAIN * (target - self.positions[i]),
                None => Vec2::ZERO,
            };

            self.accelerations[i] = follow + alignment + cohesion + separation;
        }

        // Semi-implicit Euler: velocity first, new velocity moves the position
        for i in 0..n {
            self.velocities[i] += self.accelerations[i] * dt;
            self.positions[i] += self.velocities[i] * dt;
        }
    }

    // Optional post-step clamp. Deliberately not called from update():
    // the stepping path runs unclamped, matching the tuned behavior.
    pub fn clamp_speed(&mut self, limit: f32) {
        for v in &mut self.velocities {
            let speed = v.length();
            if speed > limit {
                *v *= limit / speed;
            }
        }
    }

    // Store a read-only snapshot of the opposing flock's positions
    pub fn set_adversary_positions(&mut self, positions: Vec<Point2>) {
        self.adversary_positions = Some(positions);
    }

    // Centroid of the last adversary snapshot, used as a pursuit target
    pub fn adversary_centroid(&self) -> Option<Point2> {
        let adversaries = self.adversary_positions.as_ref()?;
        if adversaries.is_empty() {
            return None;
        }
        let mut centroid = Vec2::ZERO;
        for p in adversaries {
            centroid += *p;
        }
        Some(centroid / adversaries.len() as f32)
    }

    // Live-retune the force weights from the UI without rebuilding the flock
    pub fn set_gains(&mut self, separation: f32, cohesion: f32, alignment: f32, radius: f32) {
        self.separation_gain = separation;
        self.cohesion_gain = cohesion;
        self.alignment_gain = alignment;
        self.neighbor_radius = radius;
    }

    // Draw each agent as a filled square. Simulation coordinates have a
    // top-left origin; the window origin is centered.
    pub fn draw(&self, draw: &Draw, window_rect: Rect) {
        for position in &self.positions {
            draw.rect()
                .x_y(window_rect.left() + position.x, window_rect.top() - position.y)
                .w_h(AGENT_SIZE, AGENT_SIZE)
                .color(self.color);
        }
    }
}
