//! Projectile sprite

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::{self, Body, Playfield, SpriteKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            body: Body::new(pos, vel, size),
        }
    }

    /// Returns `false` when the bullet has left the playfield or finished
    /// its destroy animation
    pub fn step(&mut self, dt: f32, field: &Playfield) -> bool {
        if !sprite::step_body(&mut self.body, dt, SpriteKind::Bullet.destroy_anim_duration()) {
            return false;
        }
        !sprite::is_outside_playfield(&self.body, field)
    }

    pub fn destroy(&mut self) {
        sprite::destroy(&mut self.body, SpriteKind::Bullet.destroy_anim_duration());
    }
}
