//! Input mapping
//!
//! Keyboard/D-pad keys and joystick axis samples both feed the ship heading.
//! Hosts translate their native events into [`InputEvent`] and dispatch them
//! with [`World::handle_input`].

use serde::{Deserialize, Serialize};

use super::state::World;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    DpadLeft,
    DpadRight,
    DpadUp,
    DpadDown,
    DpadCenter,
    ButtonA,
    ButtonX,
    Space,
    Enter,
    /// Any other host key code
    Other(u32),
}

impl Key {
    pub fn is_fire(&self) -> bool {
        matches!(
            self,
            Key::DpadCenter | Key::ButtonA | Key::ButtonX | Key::Space | Key::Enter
        )
    }
}

/// Directional keys currently held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DpadState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DpadState {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Horizontal heading implied by held keys; opposing keys cancel
    fn axis_x(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    fn axis_y(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Joystick axis identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    /// Secondary stick horizontal on many controllers
    Z,
    /// Secondary stick vertical on many controllers
    Rz,
    HatX,
    HatY,
}

/// Axis lookup order for horizontal heading
pub const X_AXES: [Axis; 3] = [Axis::X, Axis::HatX, Axis::Z];
/// Axis lookup order for vertical heading
pub const Y_AXES: [Axis; 3] = [Axis::Y, Axis::HatY, Axis::Rz];

/// Range reported by a device for one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionRange {
    pub min: f32,
    pub max: f32,
    /// Values within `[-flat, flat]` are treated as centered
    pub flat: f32,
}

impl MotionRange {
    pub fn new(min: f32, max: f32, flat: f32) -> Self {
        Self { min, max, flat }
    }
}

/// An input device and the axis ranges it reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputDevice {
    pub name: String,
    ranges: Vec<(Axis, MotionRange)>,
}

impl InputDevice {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ranges: Vec::new(),
        }
    }

    /// Typical dual-stick gamepad: two sticks plus a hat
    pub fn gamepad(name: impl Into<String>) -> Self {
        let stick = MotionRange::new(-1.0, 1.0, 0.1);
        let hat = MotionRange::new(-1.0, 1.0, 0.0);
        Self::new(name)
            .with_range(Axis::X, stick)
            .with_range(Axis::Y, stick)
            .with_range(Axis::Z, stick)
            .with_range(Axis::Rz, stick)
            .with_range(Axis::HatX, hat)
            .with_range(Axis::HatY, hat)
    }

    pub fn with_range(mut self, axis: Axis, range: MotionRange) -> Self {
        self.ranges.retain(|(a, _)| *a != axis);
        self.ranges.push((axis, range));
        self
    }

    pub fn motion_range(&self, axis: Axis) -> Option<&MotionRange> {
        self.ranges.iter().find(|(a, _)| *a == axis).map(|(_, r)| r)
    }
}

/// Axis values at one instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisSample {
    pub time_ms: u64,
    values: Vec<(Axis, f32)>,
}

impl AxisSample {
    pub fn new(time_ms: u64) -> Self {
        Self {
            time_ms,
            values: Vec::new(),
        }
    }

    pub fn with(mut self, axis: Axis, value: f32) -> Self {
        self.values.retain(|(a, _)| *a != axis);
        self.values.push((axis, value));
        self
    }

    pub fn value(&self, axis: Axis) -> Option<f32> {
        self.values.iter().find(|(a, _)| *a == axis).map(|(_, v)| *v)
    }
}

/// Source class of a motion event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    Joystick,
    Touchscreen,
    Mouse,
}

/// A batch of joystick samples: optional history (oldest first) plus the current one
#[derive(Debug, Clone)]
pub struct MotionEvent<'a> {
    pub device: &'a InputDevice,
    pub source: InputSource,
    pub history: Vec<AxisSample>,
    pub current: AxisSample,
}

#[derive(Debug, Clone)]
pub enum InputEvent<'a> {
    KeyDown {
        key: Key,
        repeat_count: u32,
        time_ms: u64,
    },
    KeyUp {
        key: Key,
        time_ms: u64,
    },
    Motion(MotionEvent<'a>),
}

/// Axis value with the device's flat region removed.
///
/// Unknown axes, zero-width ranges and missing values all read as 0.
pub fn centered_axis(device: &InputDevice, sample: &AxisSample, axis: Axis) -> f32 {
    let Some(range) = device.motion_range(axis) else {
        return 0.0;
    };
    if range.max - range.min <= 0.0 {
        return 0.0;
    }
    let Some(value) = sample.value(axis) else {
        return 0.0;
    };
    if value.is_finite() && value.abs() > range.flat {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// First non-zero value among `axes`
fn first_active(device: &InputDevice, sample: &AxisSample, axes: &[Axis]) -> f32 {
    axes.iter()
        .map(|&axis| centered_axis(device, sample, axis))
        .find(|v| *v != 0.0)
        .unwrap_or(0.0)
}

/// Heading `(x, y)` read from one joystick sample
pub fn joystick_heading(device: &InputDevice, sample: &AxisSample) -> (f32, f32) {
    (
        first_active(device, sample, &X_AXES),
        first_active(device, sample, &Y_AXES),
    )
}

impl World {
    /// Apply one input event. Returns whether the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent<'_>) -> bool {
        if !self.focused {
            return false;
        }
        match event {
            InputEvent::KeyDown {
                key,
                repeat_count,
                time_ms,
            } => {
                if *repeat_count != 0 {
                    return false;
                }
                let handled = self.key_down(*key);
                if handled {
                    self.step(*time_ms);
                }
                handled
            }
            InputEvent::KeyUp { key, time_ms } => {
                let handled = self.key_up(*key);
                if handled {
                    self.step(*time_ms);
                }
                handled
            }
            InputEvent::Motion(motion) => self.joystick_motion(motion),
        }
    }

    fn key_down(&mut self, key: Key) -> bool {
        let ship = self.ensure_ship();
        match key {
            Key::DpadLeft => {
                ship.set_heading_x(-1.0);
                self.dpad.left = true;
            }
            Key::DpadRight => {
                ship.set_heading_x(1.0);
                self.dpad.right = true;
            }
            Key::DpadUp => {
                ship.set_heading_y(-1.0);
                self.dpad.up = true;
            }
            Key::DpadDown => {
                ship.set_heading_y(1.0);
                self.dpad.down = true;
            }
            key if key.is_fire() => self.fire(),
            _ => return false,
        }
        true
    }

    fn key_up(&mut self, key: Key) -> bool {
        match key {
            Key::DpadLeft => self.dpad.left = false,
            Key::DpadRight => self.dpad.right = false,
            Key::DpadUp => self.dpad.up = false,
            Key::DpadDown => self.dpad.down = false,
            key if key.is_fire() => return true,
            _ => return false,
        }

        let dpad = self.dpad;
        let ship = self.ensure_ship();
        match key {
            Key::DpadLeft | Key::DpadRight => ship.set_heading_x(dpad.axis_x()),
            _ => ship.set_heading_y(dpad.axis_y()),
        }
        true
    }

    /// Replays historical samples in order, then the current one; each
    /// sample sets the heading and steps the world at its own timestamp.
    fn joystick_motion(&mut self, motion: &MotionEvent<'_>) -> bool {
        if motion.source != InputSource::Joystick {
            return false;
        }
        if self.dpad.any() {
            return false;
        }

        for sample in motion.history.iter().chain(std::iter::once(&motion.current)) {
            let (x, y) = joystick_heading(motion.device, sample);
            self.ensure_ship().set_heading(x, y);
            self.step(sample.time_ms);
        }
        true
    }
}
