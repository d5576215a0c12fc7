use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// Constants of the navigation task.
///
/// Every field has a default (see [`NavConfig::default`]), so a JSON file
/// only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub max_speed: f32,
    pub acceleration: f32,
    /// Degrees per step.
    pub turn_rate: f32,
    /// Seconds of motion integrated by a move action.
    pub time_step: f32,
    pub sensor_range: f32,
    /// Full field of view, degrees.
    pub sensor_angle: f32,
    pub collision_distance: f32,
    pub boundary_min: f32,
    pub boundary_max: f32,
    /// Inset from the world edges for the start and goal corners.
    pub boundary_offset: f32,
    pub initial_orientation: f32,
    pub reward_collision: f32,
    pub reward_goal: f32,
    pub reward_step: f32,
    /// Attached to non-terminal transitions.
    pub discount: f32,
    pub obstacles: Vec<Vec2>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            acceleration: 2.0,
            turn_rate: 45.0,
            time_step: 0.1,
            sensor_range: 100.0,
            sensor_angle: 120.0,
            collision_distance: 1.0,
            boundary_min: 0.0,
            boundary_max: 200.0,
            boundary_offset: 10.0,
            initial_orientation: 0.0,
            reward_collision: -10.0,
            reward_goal: 10.0,
            reward_step: 1.0,
            discount: 0.9,
            obstacles: vec![
                Vec2::new(20.0, 20.0),
                Vec2::new(40.0, 40.0),
                Vec2::new(60.0, 60.0),
            ],
        }
    }
}

impl NavConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: NavConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_obstacles<I>(mut self, obstacles: I) -> Self
    where
        I: IntoIterator<Item = Vec2>,
    {
        self.obstacles = obstacles.into_iter().collect();
        self
    }

    /// Lower bound of the inset square the robot must stay in.
    pub fn inner_min(&self) -> f32 {
        self.boundary_min + self.boundary_offset
    }

    /// Upper bound of the inset square the robot must stay in.
    pub fn inner_max(&self) -> f32 {
        self.boundary_max - self.boundary_offset
    }

    pub fn start_position(&self) -> Vec2 {
        Vec2::splat(self.inner_min())
    }

    pub fn goal_position(&self) -> Vec2 {
        Vec2::splat(self.inner_max())
    }

    /// Length of the flat observation vector.
    pub fn observation_len(&self) -> usize {
        6 + 3 * self.obstacles.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("turn_rate", self.turn_rate),
            ("time_step", self.time_step),
            ("sensor_range", self.sensor_range),
            ("sensor_angle", self.sensor_angle),
            ("collision_distance", self.collision_distance),
            ("boundary_min", self.boundary_min),
            ("boundary_max", self.boundary_max),
            ("boundary_offset", self.boundary_offset),
            ("initial_orientation", self.initial_orientation),
            ("reward_collision", self.reward_collision),
            ("reward_goal", self.reward_goal),
            ("reward_step", self.reward_step),
            ("discount", self.discount),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::invalid(name, format!("{value} is not finite")));
            }
        }

        let positive = [
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("turn_rate", self.turn_rate),
            ("time_step", self.time_step),
            ("sensor_range", self.sensor_range),
            ("sensor_angle", self.sensor_angle),
            ("collision_distance", self.collision_distance),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::invalid(name, format!("{value} must be positive")));
            }
        }

        if self.sensor_angle > 360.0 {
            return Err(ConfigError::invalid(
                "sensor_angle",
                format!("{} exceeds a full turn", self.sensor_angle),
            ));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(ConfigError::invalid(
                "discount",
                format!("{} is outside [0, 1]", self.discount),
            ));
        }
        if self.boundary_min >= self.boundary_max {
            return Err(ConfigError::invalid(
                "boundary_max",
                format!(
                    "{} must be greater than boundary_min {}",
                    self.boundary_max, self.boundary_min
                ),
            ));
        }
        let half_width = (self.boundary_max - self.boundary_min) / 2.0;
        if self.boundary_offset < 0.0 || self.boundary_offset >= half_width {
            return Err(ConfigError::invalid(
                "boundary_offset",
                format!(
                    "{} must be in [0, {half_width}) so start and goal stay distinct",
                    self.boundary_offset
                ),
            ));
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            let inside = |v: f32| v.is_finite() && v >= self.boundary_min && v <= self.boundary_max;
            if !inside(obstacle.x) || !inside(obstacle.y) {
                return Err(ConfigError::invalid(
                    "obstacles",
                    format!("obstacle {index} at {obstacle} lies outside the world"),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = NavConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.start_position(), Vec2::new(10.0, 10.0));
        assert_eq!(config.goal_position(), Vec2::new(190.0, 190.0));
        assert_eq!(config.observation_len(), 15);
    }

    #[test]
    fn offset_at_half_width_is_rejected() {
        let config = NavConfig {
            boundary_offset: 100.0,
            ..NavConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { name: "boundary_offset", .. }
        ));
    }

    #[test]
    fn inverted_boundaries_are_rejected() {
        let config = NavConfig {
            boundary_min: 50.0,
            boundary_max: 50.0,
            ..NavConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_finite_constant_is_rejected() {
        let config = NavConfig {
            max_speed: f32::NAN,
            ..NavConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { name: "max_speed", .. }
        ));
    }

    #[test]
    fn obstacle_outside_world_is_rejected() {
        let config = NavConfig::default().with_obstacles([Vec2::new(250.0, 10.0)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config =
            NavConfig::from_json_str(r#"{ "max_speed": 4.0, "obstacles": [[5.0, 7.5]] }"#).unwrap();
        assert_eq!(config.max_speed, 4.0);
        assert_eq!(config.acceleration, 2.0);
        assert_eq!(config.obstacles, vec![Vec2::new(5.0, 7.5)]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = NavConfig::from_json_str("{ max_speed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        let err = NavConfig::from_json_str(r#"{ "boundary_offset": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { .. }));
    }
}
