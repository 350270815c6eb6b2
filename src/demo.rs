//! Demo pilot
//!
//! Plays the game by synthesizing the same input events a controller would
//! produce: it steers the stick toward the nearest obstacle and taps fire
//! at a fixed cadence.

use glam::Vec2;

use crate::sim::{Axis, AxisSample, InputDevice, InputEvent, InputSource, Key, MotionEvent, World};

/// Stick deflection used while chasing a target
const CHASE_DEFLECTION: f32 = 0.6;

#[derive(Debug, Clone)]
pub struct Autopilot {
    pub device: InputDevice,
    pub fire_interval_ms: u64,
    last_fire_ms: Option<u64>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(250)
    }
}

impl Autopilot {
    pub fn new(fire_interval_ms: u64) -> Self {
        Self {
            device: InputDevice::gamepad("autopilot"),
            fire_interval_ms,
            last_fire_ms: None,
        }
    }

    /// Stick position aimed at the nearest live obstacle (centered if none)
    pub fn aim(&self, world: &World) -> Vec2 {
        let Some(ship) = &world.ship else {
            return Vec2::ZERO;
        };
        world
            .obstacles
            .iter()
            .filter(|o| !o.body.destroyed)
            .map(|o| o.body.pos - ship.body.pos)
            .min_by(|a, b| {
                a.length_squared()
                    .partial_cmp(&b.length_squared())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|to_target| to_target.normalize_or_zero() * CHASE_DEFLECTION)
            .unwrap_or(Vec2::ZERO)
    }

    /// Feed one frame of input at `now_ms`. Returns whether fire was pressed.
    pub fn drive(&mut self, world: &mut World, now_ms: u64) -> bool {
        let stick = self.aim(world);
        let motion = InputEvent::Motion(MotionEvent {
            device: &self.device,
            source: InputSource::Joystick,
            history: Vec::new(),
            current: AxisSample::new(now_ms)
                .with(Axis::X, stick.x)
                .with(Axis::Y, stick.y),
        });
        world.handle_input(&motion);

        let due = self
            .last_fire_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.fire_interval_ms);
        if !due || stick == Vec2::ZERO {
            return false;
        }
        self.last_fire_ms = Some(now_ms);
        world.handle_input(&InputEvent::KeyDown {
            key: Key::ButtonA,
            repeat_count: 0,
            time_ms: now_ms,
        });
        world.handle_input(&InputEvent::KeyUp {
            key: Key::ButtonA,
            time_ms: now_ms,
        });
        true
    }
}
