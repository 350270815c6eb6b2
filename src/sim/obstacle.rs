//! Enemy sprite that drifts across a toroidal playfield

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::{self, Body, Playfield, SpriteKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
}

impl Obstacle {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            body: Body::new(pos, vel, size),
        }
    }

    /// Returns `false` only once the destroy animation has completed
    pub fn step(&mut self, dt: f32, field: &Playfield) -> bool {
        if !sprite::step_body(&mut self.body, dt, SpriteKind::Obstacle.destroy_anim_duration()) {
            return false;
        }
        sprite::wrap_at_playfield_boundary(&mut self.body, field);
        true
    }

    pub fn destroy(&mut self) {
        sprite::destroy(&mut self.body, SpriteKind::Obstacle.destroy_anim_duration());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_wraps_instead_of_expiring() {
        let field = Playfield::new(200.0, 100.0);
        let mut obstacle = Obstacle::new(Vec2::new(190.0, 50.0), Vec2::new(40.0, 0.0), 10.0);
        assert!(obstacle.step(1.0, &field));
        // 230 >= 210, wrapped by 220
        assert!((obstacle.body.pos.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_destroyed_obstacle_expires() {
        let field = Playfield::new(200.0, 100.0);
        let mut obstacle = Obstacle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 10.0);
        obstacle.destroy();
        assert!(obstacle.step(0.2, &field));
        assert!(!obstacle.step(0.1, &field));
    }
}
