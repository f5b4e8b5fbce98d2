/*
 * Projectile Module
 *
 * Straight-line kinematics for fired shots. Each projectile is an
 * independent point: its direction is normalized once at creation and
 * never re-normalized, its position advances by direction * speed * dt,
 * and an integer lifetime counts down once per step. Projectiles do not
 * remove themselves; the owning ProjectileSet retires the expired ones
 * after each update. No collision detection here.
 */

use nannou::prelude::*;

use crate::PROJECTILE_SIZE;

pub const PROJECTILE_SPEED: f32 = 1000.0;
pub const PROJECTILE_LIFETIME: u32 = 6;

const PROJECTILE_COLOR: (u8, u8, u8) = (220, 180, 140);

#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub position: Point2,
    // Unit vector, fixed at construction
    pub direction: Vec2,
    pub speed: f32,
    pub remaining_life: u32,
}

impl Projectile {
    // Seed direction comes from the firing agent's velocity; an agent at
    // rest fires along +x rather than producing a NaN direction.
    pub fn new(position: Point2, seed_direction: Vec2) -> Self {
        let length = seed_direction.length();
        let direction = if length > 1e-5 {
            seed_direction / length
        } else {
            vec2(1.0, 0.0)
        };

        Self {
            position,
            direction,
            speed: PROJECTILE_SPEED,
            remaining_life: PROJECTILE_LIFETIME,
        }
    }

    fn step(&mut self, dt: f32) {
        self.position += self.direction * self.speed * dt;
        self.remaining_life = self.remaining_life.saturating_sub(1);
    }
}

// Owner of all in-flight projectiles
#[derive(Default)]
pub struct ProjectileSet {
    projectiles: Vec<Projectile>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, position: Point2, seed_direction: Vec2) {
        self.projectiles.push(Projectile::new(position, seed_direction));
    }

    // Advance every projectile one step, then retire the expired ones.
    // Expiry is the set's job, not the projectile's.
    pub fn update(&mut self, dt: f32) {
        for projectile in &mut self.projectiles {
            projectile.step(dt);
        }
        self.projectiles.retain(|p| p.remaining_life > 0);
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    // Draw each projectile, wrapped into the world so shots re-enter from
    // the opposite edge instead of flying off-screen. Simulation
    // coordinates have a top-left origin; the window origin is centered.
    pub fn draw(&self, draw: &Draw, window_rect: Rect, world_extent: f32) {
        let (r, g, b) = PROJECTILE_COLOR;

        for projectile in &self.projectiles {
            let x = projectile.position.x.rem_euclid(world_extent);
            let y = projectile.position.y.rem_euclid(world_extent);

            draw.rect()
                .x_y(window_rect.left() + x, window_rect.top() - y)
                .w_h(PROJECTILE_SIZE, PROJECTILE_SIZE)
                .color(rgb(r, g, b));
        }
    }
}
