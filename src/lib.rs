//! Controller Arcade - a joystick-driven arcade shooter
//!
//! Core modules:
//! - `demo`: Scripted pilot that plays through the input layer
//! - `sim`: Deterministic simulation (sprites, physics, collisions, input mapping)
//! - `snapshot`: Read-only per-frame view for a rendering collaborator
//! - `tuning`: Data-driven game balance

pub mod demo;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use snapshot::{Frame, SpriteInstance};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Maximum live obstacles in a session
    pub const MAX_OBSTACLES: usize = 12;
    /// Placement attempts per obstacle before replenishment gives up for the step
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10;
    /// Obstacles never spawn closer than this many ship sizes to the ship
    pub const SPAWN_CLEARANCE_SHIP_SIZES: f32 = 4.0;

    /// Heading magnitude below which the previous heading angle is kept
    pub const HEADING_DEADZONE: f32 = 0.1;

    /// Destroy animation durations (seconds)
    pub const SHIP_DESTROY_DURATION: f32 = 1.0;
    pub const BULLET_DESTROY_DURATION: f32 = 0.125;
    pub const OBSTACLE_DESTROY_DURATION: f32 = 0.25;

    /// Nominal host frame interval (~60 Hz)
    pub const FRAME_INTERVAL_MS: u64 = 16;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_polar_to_cartesian_axis() {
        let p = polar_to_cartesian(10.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);

        let p = polar_to_cartesian(3.0, -FRAC_PI_2);
        assert!((p.y + 3.0).abs() < 1e-5);
    }
}
