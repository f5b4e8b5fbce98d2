/*
 * Player Module
 *
 * The directly controlled agent: a point mass steered by held keys. Unlike
 * the flock agents it carries a hard speed cap inside its stepping path,
 * so holding a key settles at a constant cruise speed instead of running
 * away. Wraps at the world edges.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::AGENT_SIZE;

pub const PLAYER_SPEED_LIMIT: f32 = 100.0;
// Acceleration applied per held movement key
pub const PLAYER_THRUST: f32 = 500.0;

pub struct Player {
    pub position: Point2,
    pub velocity: Vec2,
    pub color: Rgb<u8>,
}

impl Player {
    pub fn new(start: Point2, color: Rgb<u8>, rng: &mut impl Rng) -> Self {
        Self {
            position: start,
            velocity: vec2(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)),
            color,
        }
    }

    // Same velocity-first integration as the flock, plus the speed cap
    pub fn update(&mut self, dt: f32, accel: Vec2, world_extent: f32) {
        self.velocity += accel * dt;

        let speed = self.velocity.length();
        if speed > PLAYER_SPEED_LIMIT {
            self.velocity *= PLAYER_SPEED_LIMIT / speed;
        }

        self.position += self.velocity * dt;

        // Wrap into [0, world_extent) on both axes
        self.position.x = self.position.x.rem_euclid(world_extent);
        self.position.y = self.position.y.rem_euclid(world_extent);
    }

    pub fn draw(&self, draw: &Draw, window_rect: Rect) {
        // Player coordinates are grid-space (top-left origin); the window
        // origin is centered
        let x = window_rect.left() + self.position.x;
        let y = window_rect.top() - self.position.y;

        draw.rect()
            .x_y(x, y)
            .w_h(AGENT_SIZE, AGENT_SIZE)
            .color(self.color);
    }
}
