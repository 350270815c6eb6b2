//! Shared sprite physics and collision helpers
//!
//! Every sprite kind carries a [`Body`]. Behavior common to all kinds is
//! implemented as free functions over the body so that ships, bullets and
//! obstacles only add what differs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Playfield bounds (current view size in pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether a point lies inside `[0, width) x [0, height)`
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width && pos.y >= 0.0 && pos.y < self.height
    }
}

/// Sprite kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Ship,
    Bullet,
    Obstacle,
}

impl SpriteKind {
    /// Seconds taken by the destroy animation
    pub fn destroy_anim_duration(&self) -> f32 {
        match self {
            SpriteKind::Ship => SHIP_DESTROY_DURATION,
            SpriteKind::Bullet => BULLET_DESTROY_DURATION,
            SpriteKind::Obstacle => OBSTACLE_DESTROY_DURATION,
        }
    }

    /// Tag used in render instance records
    pub fn tag(&self) -> u32 {
        match self {
            SpriteKind::Ship => 0,
            SpriteKind::Bullet => 1,
            SpriteKind::Obstacle => 2,
        }
    }
}

/// Position, velocity and lifecycle state shared by every sprite
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    /// Center position (pixels)
    pub pos: Vec2,
    /// Velocity (pixels/second)
    pub vel: Vec2,
    /// Collision radius (pixels)
    pub size: f32,
    pub destroyed: bool,
    /// 0.0 - 1.0, only advances once destroyed
    pub destroy_anim_progress: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            destroyed: false,
            destroy_anim_progress: 0.0,
        }
    }
}

/// Integrate position and advance the destroy animation.
///
/// Returns `false` once the destroy animation has completed, meaning the
/// sprite should be removed from its owning collection.
pub fn step_body(body: &mut Body, dt: f32, destroy_duration: f32) -> bool {
    body.pos += body.vel * dt;

    if body.destroyed {
        if destroy_duration > 0.0 {
            body.destroy_anim_progress += dt / destroy_duration;
        } else {
            body.destroy_anim_progress = 1.0;
        }
        if body.destroy_anim_progress >= 1.0 {
            return false;
        }
    }
    true
}

/// Mark a body destroyed and initialize its destroy animation
pub fn destroy(body: &mut Body, destroy_duration: f32) {
    body.destroyed = true;
    step_body(body, 0.0, destroy_duration);
}

/// Approximate collision test between two live bodies.
///
/// Not an exact circle intersection: the threshold is the larger size plus
/// half the smaller one.
pub fn collides_with(a: &Body, b: &Body) -> bool {
    if a.destroyed || b.destroyed {
        return false;
    }
    let max_size = a.size.max(b.size);
    let min_size = a.size.min(b.size);
    a.pos.distance(b.pos) <= max_size + min_size * 0.5
}

pub fn is_outside_playfield(body: &Body, field: &Playfield) -> bool {
    !field.contains(body.pos)
}

/// Toroidal wrap: a body fully past one edge reappears past the opposite one
pub fn wrap_at_playfield_boundary(body: &mut Body, field: &Playfield) {
    if !body.pos.is_finite() {
        return;
    }
    body.pos.x = wrap_axis(body.pos.x, body.size, field.width);
    body.pos.y = wrap_axis(body.pos.y, body.size, field.height);
}

/// Map `v` into `[-size, extent + size)`; values already inside are untouched
fn wrap_axis(v: f32, size: f32, extent: f32) -> f32 {
    let span = extent + size * 2.0;
    if span <= 0.0 || (v >= -size && v < extent + size) {
        return v;
    }
    let offset = (v + size).rem_euclid(span);
    // rem_euclid can round up to exactly `span`
    if offset >= span { -size } else { offset - size }
}
