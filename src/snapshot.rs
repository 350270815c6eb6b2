//! Per-frame read-only view of a session
//!
//! Renderers never touch `World` directly; they take a `Frame` once per
//! frame and upload its instance records as-is.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::sim::{Body, SpriteKind, World};

/// One sprite as the renderer sees it
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: f32,
    /// 0 while alive, rising to 1 over the destroy animation
    pub destroy_progress: f32,
    /// Heading angle in radians (ships only, 0 otherwise)
    pub heading: f32,
    /// See [`SpriteKind::tag`]
    pub kind: u32,
}

impl SpriteInstance {
    pub fn from_body(body: &Body, kind: SpriteKind, heading: f32) -> Self {
        Self {
            position: body.pos.to_array(),
            size: body.size,
            destroy_progress: body.destroy_anim_progress.clamp(0.0, 1.0),
            heading,
            kind: kind.tag(),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub ship: Option<SpriteInstance>,
    pub bullets: Vec<SpriteInstance>,
    pub obstacles: Vec<SpriteInstance>,
}

impl Frame {
    /// All instances in draw order (obstacles, bullets, ship on top)
    pub fn instances(&self) -> Vec<SpriteInstance> {
        self.obstacles
            .iter()
            .chain(self.bullets.iter())
            .chain(self.ship.iter())
            .copied()
            .collect()
    }

    /// Raw bytes of [`Frame::instances`] for a GPU instance buffer
    pub fn instance_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.instances()).to_vec()
    }
}

impl World {
    pub fn snapshot(&self) -> Frame {
        Frame {
            width: self.playfield.width,
            height: self.playfield.height,
            ship: self
                .ship
                .as_ref()
                .map(|s| SpriteInstance::from_body(&s.body, SpriteKind::Ship, s.heading_angle())),
            bullets: self
                .bullets
                .iter()
                .map(|b| SpriteInstance::from_body(&b.body, SpriteKind::Bullet, 0.0))
                .collect(),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| SpriteInstance::from_body(&o.body, SpriteKind::Obstacle, 0.0))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Playfield;
    use crate::tuning::Tuning;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 24);
    }

    #[test]
    fn test_snapshot_matches_world() {
        let mut world = World::new(Playfield::new(640.0, 480.0), Tuning::default(), 11);
        world.step(0);
        world.fire();

        let frame = world.snapshot();
        assert_eq!(frame.width, 640.0);
        assert_eq!(frame.obstacles.len(), world.obstacles.len());
        assert_eq!(frame.bullets.len(), 1);
        let ship = frame.ship.unwrap();
        assert_eq!(ship.position, [320.0, 240.0]);
        assert_eq!(ship.kind, SpriteKind::Ship.tag());

        let instances = frame.instances();
        assert_eq!(instances.len(), world.obstacles.len() + 2);
        assert_eq!(instances.last().map(|i| i.kind), Some(0));
        assert_eq!(frame.instance_bytes().len(), instances.len() * 24);
    }

    #[test]
    fn test_frame_serializes() {
        let world = World::new(Playfield::new(100.0, 100.0), Tuning::default(), 1);
        let json = serde_json::to_string(&world.snapshot()).unwrap();
        let frame: Frame = serde_json::from_str(&json).unwrap();
        assert!(frame.ship.is_none());
        assert_eq!(frame.height, 100.0);
    }
}
