//! Loop driver
//!
//! Advances a session by the wall-clock time elapsed since the previous
//! step: ship thrust, sprite integration, collisions, obstacle replenishment.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::obstacle::Obstacle;
use super::sprite::{self, Playfield};
use super::state::{GameEvent, World};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Playfield edge an obstacle enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl World {
    /// Advance the session to `now_ms` (host uptime in milliseconds).
    ///
    /// Does nothing while the world is unfocused.
    pub fn step(&mut self, now_ms: u64) {
        if !self.focused {
            return;
        }

        let dt = match self.last_step_time {
            Some(last) => now_ms.saturating_sub(last) as f32 * 0.001,
            None => 0.0,
        };
        self.last_step_time = Some(now_ms.max(self.last_step_time.unwrap_or(0)));

        let field = self.playfield;
        let (max_thrust, max_speed) = (self.tuning.max_ship_thrust, self.tuning.max_ship_speed);

        let ship = self.ensure_ship();
        ship.accelerate(dt, max_thrust, max_speed);
        if !ship.step(dt, &field) {
            log::info!("Ship lost, starting over");
            self.reset();
        }

        self.bullets.retain_mut(|bullet| bullet.step(dt, &field));
        self.obstacles.retain_mut(|obstacle| obstacle.step(dt, &field));

        self.resolve_collisions();
        self.replenish_obstacles();
    }

    /// Bullets against obstacles, then the ship against obstacles.
    ///
    /// A bullet destroys at most one obstacle per step, and at most one
    /// ship collision is processed per step.
    pub(crate) fn resolve_collisions(&mut self) {
        for bullet in &mut self.bullets {
            for obstacle in &mut self.obstacles {
                if sprite::collides_with(&bullet.body, &obstacle.body) {
                    bullet.destroy();
                    obstacle.destroy();
                    log::debug!("Obstacle destroyed at {:?}", obstacle.body.pos);
                    self.events.push(GameEvent::ObstacleDestroyed {
                        pos: obstacle.body.pos,
                        by_ship: false,
                    });
                    break;
                }
            }
        }

        let Some(ship) = &mut self.ship else {
            return;
        };
        for obstacle in &mut self.obstacles {
            if sprite::collides_with(&obstacle.body, &ship.body) {
                obstacle.destroy();
                ship.destroy();
                log::debug!("Ship destroyed at {:?}", ship.body.pos);
                self.events.push(GameEvent::ObstacleDestroyed {
                    pos: obstacle.body.pos,
                    by_ship: true,
                });
                self.events.push(GameEvent::ShipDestroyed { pos: ship.body.pos });
                break;
            }
        }
    }

    /// Top obstacles back up to [`MAX_OBSTACLES`].
    ///
    /// Each new obstacle gets [`MAX_SPAWN_ATTEMPTS`] tries to find an edge
    /// position far enough from the ship; when none works, replenishment
    /// stops for this step.
    pub(crate) fn replenish_obstacles(&mut self) {
        let field = self.playfield;
        let ship_pos = self.ship.as_ref().map(|s| s.body.pos);
        let min_distance = self.tuning.ship_size * SPAWN_CLEARANCE_SHIP_SIZES;
        let (min_size, max_size) = (self.tuning.min_obstacle_size, self.tuning.max_obstacle_size);
        let (min_speed, max_speed) = (self.tuning.min_obstacle_speed, self.tuning.max_obstacle_speed);

        while self.obstacles.len() < MAX_OBSTACLES {
            let size = random_in(&mut self.rng, min_size, max_size);

            let rng = &mut self.rng;
            let placed = first_accepted(
                MAX_SPAWN_ATTEMPTS,
                || random_edge_point(rng, &field),
                |pos| ship_pos.is_none_or(|ship| ship.distance(pos) >= min_distance),
            );

            let Some(pos) = placed else {
                log::debug!("No clear spawn position, skipping replenishment this step");
                break;
            };

            let direction = random_in(&mut self.rng, 0.0, TAU);
            let speed = random_in(&mut self.rng, min_speed, max_speed);
            let vel = polar_to_cartesian(speed, direction);

            log::debug!("Obstacle spawned at {:?} (size {:.1})", pos, size);
            self.events.push(GameEvent::ObstacleSpawned { pos, size });
            self.obstacles.push(Obstacle::new(pos, vel, size));
        }
    }
}

/// Uniform point on a uniformly chosen playfield edge line
fn random_edge_point<R: Rng>(rng: &mut R, field: &Playfield) -> Vec2 {
    let edge = match rng.random_range(0..4u8) {
        0 => Edge::Left,
        1 => Edge::Right,
        2 => Edge::Top,
        _ => Edge::Bottom,
    };
    match edge {
        Edge::Left => Vec2::new(0.0, random_in(rng, 0.0, field.height)),
        Edge::Right => Vec2::new(field.width, random_in(rng, 0.0, field.height)),
        Edge::Top => Vec2::new(random_in(rng, 0.0, field.width), 0.0),
        Edge::Bottom => Vec2::new(random_in(rng, 0.0, field.width), field.height),
    }
}

/// First proposal `accept` allows, trying at most `attempts` times
fn first_accepted(
    attempts: u32,
    mut propose: impl FnMut() -> Vec2,
    accept: impl Fn(Vec2) -> bool,
) -> Option<Vec2> {
    (0..attempts).map(|_| propose()).find(|&pos| accept(pos))
}

/// Uniform sample in `[min, max]`; degenerate ranges return `min`
fn random_in<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}
