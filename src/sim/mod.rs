//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Elapsed time comes from host timestamps only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod bullet;
pub mod input;
pub mod obstacle;
pub mod ship;
pub mod sprite;
pub mod state;
pub mod step;

pub use bullet::Bullet;
pub use input::{
    Axis, AxisSample, DpadState, InputDevice, InputEvent, InputSource, Key, MotionEvent,
    MotionRange, centered_axis, joystick_heading,
};
pub use obstacle::Obstacle;
pub use ship::Ship;
pub use sprite::{Body, Playfield, SpriteKind, collides_with, wrap_at_playfield_boundary};
pub use state::{GameEvent, World};
