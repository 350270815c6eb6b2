//! Player ship: heading-based thrust with toroidal wraparound

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::Bullet;
use super::sprite::{self, Body, Playfield, SpriteKind};
use crate::consts::HEADING_DEADZONE;
use crate::polar_to_cartesian;

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    /// Desired thrust direction, each axis in [-1, 1]
    heading: Vec2,
    /// Polar form of `heading`, kept when the stick returns to rest
    heading_angle: f32,
    heading_magnitude: f32,
}

impl Ship {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO, size),
            heading: Vec2::ZERO,
            heading_angle: 0.0,
            heading_magnitude: 0.0,
        }
    }

    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    pub fn heading_angle(&self) -> f32 {
        self.heading_angle
    }

    pub fn heading_magnitude(&self) -> f32 {
        self.heading_magnitude
    }

    pub fn set_heading(&mut self, x: f32, y: f32) {
        self.heading = Vec2::new(clamp_axis(x), clamp_axis(y));
        self.update_heading();
    }

    pub fn set_heading_x(&mut self, x: f32) {
        self.heading.x = clamp_axis(x);
        self.update_heading();
    }

    pub fn set_heading_y(&mut self, y: f32) {
        self.heading.y = clamp_axis(y);
        self.update_heading();
    }

    fn update_heading(&mut self) {
        let magnitude = self.heading.length();
        if magnitude > HEADING_DEADZONE {
            self.heading_angle = self.heading.y.atan2(self.heading.x);
            self.heading_magnitude = magnitude.min(1.0);
        } else {
            self.heading_magnitude = 0.0;
        }
    }

    /// Apply thrust along the heading, then clamp speed to `max_speed`
    pub fn accelerate(&mut self, dt: f32, max_thrust: f32, max_speed: f32) {
        let thrust = self.heading_magnitude * max_thrust;
        self.body.vel += polar_to_cartesian(thrust * dt, self.heading_angle);

        let speed = self.body.vel.length();
        if speed > max_speed && speed > 0.0 {
            self.body.vel *= max_speed / speed;
        }
    }

    /// Returns `false` once the destroy animation has completed
    pub fn step(&mut self, dt: f32, field: &Playfield) -> bool {
        if !sprite::step_body(&mut self.body, dt, SpriteKind::Ship.destroy_anim_duration()) {
            return false;
        }
        sprite::wrap_at_playfield_boundary(&mut self.body, field);
        true
    }

    pub fn destroy(&mut self) {
        sprite::destroy(&mut self.body, SpriteKind::Ship.destroy_anim_duration());
    }

    /// Nose point where bullets leave the ship
    pub fn nose(&self) -> Vec2 {
        self.body.pos + polar_to_cartesian(self.body.size, self.heading_angle)
    }

    /// Bullet velocity: ship momentum plus `relative_speed` along the heading
    pub fn bullet_velocity(&self, relative_speed: f32) -> Vec2 {
        self.body.vel + polar_to_cartesian(relative_speed, self.heading_angle)
    }

    /// Spawn a bullet from the nose
    pub fn fire(&self, bullet_size: f32, bullet_speed: f32) -> Bullet {
        Bullet::new(self.nose(), self.bullet_velocity(bullet_speed), bullet_size)
    }

    /// Zero heading and velocity (used when input focus is lost)
    pub fn stop(&mut self) {
        self.heading = Vec2::ZERO;
        self.heading_magnitude = 0.0;
        self.body.vel = Vec2::ZERO;
    }
}

fn clamp_axis(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_polar_form() {
        let mut ship = Ship::new(Vec2::ZERO, 10.0);
        ship.set_heading(0.0, 1.0);
        assert!((ship.heading_angle() - FRAC_PI_2).abs() < 1e-5);
        assert!((ship.heading_magnitude() - 1.0).abs() < 1e-5);

        ship.set_heading_x(-1.0);
        ship.set_heading_y(0.0);
        assert!((ship.heading_angle() - PI).abs() < 1e-5);
    }

    #[test]
    fn test_deadzone_keeps_angle() {
        let mut ship = Ship::new(Vec2::ZERO, 10.0);
        ship.set_heading(0.0, -1.0);
        let angle = ship.heading_angle();

        ship.set_heading(0.05, 0.05);
        assert_eq!(ship.heading_angle(), angle);
        assert_eq!(ship.heading_magnitude(), 0.0);
    }

    #[test]
    fn test_heading_clamped() {
        let mut ship = Ship::new(Vec2::ZERO, 10.0);
        ship.set_heading(3.0, -7.0);
        assert_eq!(ship.heading(), Vec2::new(1.0, -1.0));
        assert!(ship.heading_magnitude() <= 1.0);
    }

    #[test]
    fn test_accelerate_clamps_speed() {
        let mut ship = Ship::new(Vec2::ZERO, 10.0);
        ship.set_heading(1.0, 0.0);
        for _ in 0..100 {
            ship.accelerate(0.016, 5000.0, 300.0);
            assert!(ship.body.vel.length() <= 300.0 + 1e-3);
        }
        assert!((ship.body.vel.length() - 300.0).abs() < 1e-2);
        assert!(ship.body.vel.x > 0.0);
    }

    #[test]
    fn test_no_thrust_at_rest() {
        let mut ship = Ship::new(Vec2::ZERO, 10.0);
        ship.accelerate(1.0, 100.0, 1000.0);
        assert_eq!(ship.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_thrust_from_center_moves_right() {
        let field = Playfield::new(800.0, 600.0);
        let center = field.center();
        let mut ship = Ship::new(center, 10.0);
        ship.set_heading(1.0, 0.0);

        ship.accelerate(1.0, 20.0, 50.0);
        ship.accelerate(1.0, 20.0, 50.0);
        assert!(ship.step(1.0, &field));
        assert!(ship.step(1.0, &field));

        assert!(ship.body.pos.x > center.x);
        assert!(ship.body.vel.length() <= 50.0);
    }

    #[test]
    fn test_bullet_inherits_momentum() {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0), 10.0);
        ship.set_heading(0.0, 1.0);
        ship.body.vel = Vec2::new(5.0, 0.0);

        let bullet = ship.fire(2.0, 50.0);
        assert!((bullet.body.pos - Vec2::new(100.0, 110.0)).length() < 1e-4);
        assert!((bullet.body.vel - Vec2::new(5.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn test_destroyed_ship_expires() {
        let field = Playfield::new(800.0, 600.0);
        let mut ship = Ship::new(field.center(), 10.0);
        ship.destroy();
        assert!(ship.step(0.5, &field));
        assert!(!ship.step(0.5, &field));
    }
}
