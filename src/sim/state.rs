//! Session state
//!
//! A `World` owns every sprite in one play session. Nothing else mutates
//! the ship, bullets or obstacles; hosts feed it input and time and read
//! back snapshots.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bullet::Bullet;
use super::input::DpadState;
use super::obstacle::Obstacle;
use super::ship::Ship;
use super::sprite::Playfield;
use crate::tuning::Tuning;

/// Notable simulation events, drained by the host once per frame
/// (haptics, sound, score keeping)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BulletFired { pos: Vec2 },
    ObstacleSpawned { pos: Vec2, size: f32 },
    ObstacleDestroyed { pos: Vec2, by_ship: bool },
    ShipDestroyed { pos: Vec2 },
    /// A new ship was created at the center (session start or reset)
    SessionReset,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    pub playfield: Playfield,
    pub tuning: Tuning,
    pub ship: Option<Ship>,
    pub bullets: Vec<Bullet>,
    pub obstacles: Vec<Obstacle>,
    /// Directional keys currently held
    pub dpad: DpadState,
    /// Timestamp (ms) of the previous step; `None` means the next step has dt = 0
    pub(crate) last_step_time: Option<u64>,
    pub(crate) focused: bool,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl World {
    pub fn new(playfield: Playfield, tuning: Tuning, seed: u64) -> Self {
        Self {
            playfield,
            tuning,
            ship: None,
            bullets: Vec::new(),
            obstacles: Vec::new(),
            dpad: DpadState::default(),
            last_step_time: None,
            focused: true,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Start a fresh session: new ship at the center, no bullets or obstacles
    pub fn reset(&mut self) {
        self.ship = None;
        self.bullets.clear();
        self.obstacles.clear();
        self.ensure_ship();
        log::info!(
            "Session reset ({}x{})",
            self.playfield.width,
            self.playfield.height
        );
    }

    /// The ship, created lazily on first use
    pub fn ensure_ship(&mut self) -> &mut Ship {
        let (center, size) = (self.playfield.center(), self.tuning.ship_size);
        let events = &mut self.events;
        self.ship.get_or_insert_with(|| {
            events.push(GameEvent::SessionReset);
            Ship::new(center, size)
        })
    }

    /// The view changed size; the session starts over in the new bounds
    pub fn resize(&mut self, width: f32, height: f32) {
        log::info!("Playfield resized to {}x{}", width, height);
        self.playfield = Playfield::new(width, height);
        self.last_step_time = None;
        self.reset();
    }

    /// Focus loss stops the ship and pauses timing so no large dt accumulates
    pub fn set_focus(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if focused {
            log::info!("Focus regained");
        } else {
            log::info!("Focus lost, stopping ship");
            if let Some(ship) = &mut self.ship {
                ship.stop();
            }
            self.dpad = DpadState::default();
        }
        self.last_step_time = None;
    }

    /// Fire a bullet from the ship's nose (no-op without a live ship)
    pub fn fire(&mut self) {
        let Some(ship) = &self.ship else {
            return;
        };
        if ship.body.destroyed {
            return;
        }
        let bullet = ship.fire(self.tuning.bullet_size, self.tuning.bullet_speed);
        self.events.push(GameEvent::BulletFired { pos: bullet.body.pos });
        self.bullets.push(bullet);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(Playfield::new(800.0, 600.0), Tuning::default(), 7)
    }

    #[test]
    fn test_ensure_ship_creates_at_center() {
        let mut w = world();
        assert!(w.ship.is_none());
        let pos = w.ensure_ship().body.pos;
        assert_eq!(pos, Vec2::new(400.0, 300.0));
        assert_eq!(w.drain_events(), vec![GameEvent::SessionReset]);
    }

    #[test]
    fn test_reset_replaces_ship_once() {
        let mut w = world();
        w.ensure_ship().body.pos = Vec2::new(10.0, 10.0);
        w.fire();
        w.drain_events();

        w.reset();
        assert_eq!(w.ship.as_ref().map(|s| s.body.pos), Some(Vec2::new(400.0, 300.0)));
        assert!(w.bullets.is_empty());
        assert_eq!(w.drain_events(), vec![GameEvent::SessionReset]);

        // An existing ship is returned as is
        w.ensure_ship();
        assert!(w.drain_events().is_empty());
    }

    #[test]
    fn test_fire_requires_live_ship() {
        let mut w = world();
        w.fire();
        assert!(w.bullets.is_empty());

        w.ensure_ship();
        w.fire();
        assert_eq!(w.bullets.len(), 1);

        if let Some(ship) = &mut w.ship {
            ship.destroy();
        }
        w.fire();
        assert_eq!(w.bullets.len(), 1);
    }

    #[test]
    fn test_resize_resets_session() {
        let mut w = world();
        w.ensure_ship();
        w.fire();
        w.obstacles.push(Obstacle::new(Vec2::ZERO, Vec2::ZERO, 10.0));

        w.resize(400.0, 200.0);
        assert!(w.bullets.is_empty());
        assert!(w.obstacles.is_empty());
        assert_eq!(w.ship.as_ref().map(|s| s.body.pos), Some(Vec2::new(200.0, 100.0)));
    }

    #[test]
    fn test_focus_loss_stops_ship() {
        let mut w = world();
        w.ensure_ship().body.vel = Vec2::new(50.0, 0.0);
        w.dpad.left = true;
        w.last_step_time = Some(1000);

        w.set_focus(false);
        let ship = w.ship.as_ref().unwrap();
        assert_eq!(ship.body.vel, Vec2::ZERO);
        assert_eq!(ship.heading(), Vec2::ZERO);
        assert!(!w.dpad.any());
        assert!(w.last_step_time.is_none());
    }
}
