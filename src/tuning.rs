//! Data-driven game balance
//!
//! Sizes and speeds scale with screen density so the game plays the same on
//! small and large displays. A JSON file can override any field.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Density assumed when the host reports none
pub const DEFAULT_DENSITY: f32 = 2.0;

/// Host frame rate the thrust constant was balanced against.
///
/// `max_ship_thrust` is an acceleration that `Ship::accelerate` scales by dt,
/// so a zero-dt step adds no thrust. The default equals one per-frame
/// impulse at this rate.
const THRUST_REFERENCE_HZ: f32 = 60.0;

/// Game balance values (pixels, pixels/second, pixels/second²)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ship_size: f32,
    /// Thrust acceleration at full stick deflection
    pub max_ship_thrust: f32,
    pub max_ship_speed: f32,
    pub bullet_size: f32,
    /// Bullet speed relative to the ship
    pub bullet_speed: f32,
    pub min_obstacle_size: f32,
    pub max_obstacle_size: f32,
    pub min_obstacle_speed: f32,
    pub max_obstacle_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_density(DEFAULT_DENSITY)
    }
}

impl Tuning {
    /// Derive balance from display density (pixels per density-independent pixel)
    pub fn from_density(density: f32) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            DEFAULT_DENSITY
        };
        let base_size = density * 5.0;
        let base_speed = base_size * 3.0;

        Self {
            ship_size: base_size * 2.0,
            max_ship_thrust: base_speed * 0.25 * THRUST_REFERENCE_HZ,
            max_ship_speed: base_speed * 12.0,
            bullet_size: base_size,
            bullet_speed: base_speed * 12.0,
            min_obstacle_size: base_size * 2.0,
            max_obstacle_size: base_size * 12.0,
            min_obstacle_speed: base_speed,
            max_obstacle_speed: base_speed * 3.0,
        }
    }

    /// Parse tuning overrides; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Load tuning from a JSON file, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Repair values that would break the simulation (negative sizes, inverted ranges)
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let fix = |value: f32, fallback: f32, name: &str| -> f32 {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                log::warn!("Tuning {} = {} is invalid, using {}", name, value, fallback);
                fallback
            }
        };

        self.ship_size = fix(self.ship_size, defaults.ship_size, "ship_size");
        self.max_ship_thrust = fix(self.max_ship_thrust, defaults.max_ship_thrust, "max_ship_thrust");
        self.max_ship_speed = fix(self.max_ship_speed, defaults.max_ship_speed, "max_ship_speed");
        self.bullet_size = fix(self.bullet_size, defaults.bullet_size, "bullet_size");
        self.bullet_speed = fix(self.bullet_speed, defaults.bullet_speed, "bullet_speed");
        self.min_obstacle_size = fix(self.min_obstacle_size, defaults.min_obstacle_size, "min_obstacle_size");
        self.max_obstacle_size = fix(self.max_obstacle_size, defaults.max_obstacle_size, "max_obstacle_size");
        self.min_obstacle_speed = fix(self.min_obstacle_speed, defaults.min_obstacle_speed, "min_obstacle_speed");
        self.max_obstacle_speed = fix(self.max_obstacle_speed, defaults.max_obstacle_speed, "max_obstacle_speed");

        if self.min_obstacle_size > self.max_obstacle_size {
            std::mem::swap(&mut self.min_obstacle_size, &mut self.max_obstacle_size);
        }
        if self.min_obstacle_speed > self.max_obstacle_speed {
            std::mem::swap(&mut self.min_obstacle_speed, &mut self.max_obstacle_speed);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_scaling() {
        let t = Tuning::from_density(1.0);
        assert_eq!(t.ship_size, 10.0);
        assert_eq!(t.bullet_size, 5.0);
        assert_eq!(t.max_ship_speed, 180.0);
        assert_eq!(t.min_obstacle_speed, 15.0);
        assert_eq!(t.max_obstacle_speed, 45.0);

        let t2 = Tuning::from_density(2.0);
        assert_eq!(t2.ship_size, 2.0 * t.ship_size);
    }

    #[test]
    fn test_bad_density_uses_default() {
        assert_eq!(Tuning::from_density(0.0), Tuning::default());
        assert_eq!(Tuning::from_density(f32::NAN), Tuning::default());
    }

    #[test]
    fn test_partial_json_override() {
        let t = Tuning::from_json(r#"{ "ship_size": 33.0 }"#).unwrap();
        assert_eq!(t.ship_size, 33.0);
        assert_eq!(t.bullet_speed, Tuning::default().bullet_speed);
    }

    #[test]
    fn test_inverted_ranges_are_repaired() {
        let t = Tuning::from_json(r#"{ "min_obstacle_size": 90.0, "max_obstacle_size": 10.0, "bullet_size": -1.0 }"#)
            .unwrap();
        assert_eq!(t.min_obstacle_size, 10.0);
        assert_eq!(t.max_obstacle_size, 90.0);
        assert_eq!(t.bullet_size, Tuning::default().bullet_size);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let t = Tuning::load_or_default(Path::new("/nonexistent/controller-arcade-tuning.json"));
        assert_eq!(t, Tuning::default());
    }
}
