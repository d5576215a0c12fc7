use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::config::NavConfig;

/// Pose and speed of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdState {
    pub position: Vec2,
    /// Heading in degrees, kept in `[0, 360)`.
    pub orientation: f32,
    /// Signed speed, kept in `[-max_speed, max_speed]`.
    pub velocity: f32,
}

impl BirdState {
    pub fn new(position: Vec2, orientation: f32) -> Self {
        Self {
            position,
            orientation: normalize_degrees(orientation),
            velocity: 0.0,
        }
    }

    /// Unit vector along the heading.
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.orientation.to_radians())
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Per-action motion model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    max_speed: f32,
    acceleration: f32,
    turn_rate: f32,
    time_step: f32,
}

impl Kinematics {
    pub fn new(max_speed: f32, acceleration: f32, turn_rate: f32, time_step: f32) -> Self {
        Self {
            max_speed,
            acceleration,
            turn_rate,
            time_step,
        }
    }

    pub fn from_config(config: &NavConfig) -> Self {
        Self::new(
            config.max_speed,
            config.acceleration,
            config.turn_rate,
            config.time_step,
        )
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Applies one action, then re-establishes the speed and heading bounds.
    pub fn apply(&self, state: &mut BirdState, action: Action) {
        match action {
            Action::Accelerate => state.velocity += self.acceleration,
            Action::Decelerate => state.velocity -= self.acceleration,
            Action::TurnRight => state.orientation += self.turn_rate,
            Action::TurnLeft => state.orientation -= self.turn_rate,
            Action::MoveForward => state.position += self.displacement(state),
            Action::MoveBackward => state.position -= self.displacement(state),
        }

        state.velocity = self.clamp_speed(state.velocity);
        state.orientation = normalize_degrees(state.orientation);
    }

    pub fn clamp_speed(&self, velocity: f32) -> f32 {
        velocity.clamp(-self.max_speed, self.max_speed)
    }

    fn displacement(&self, state: &BirdState) -> Vec2 {
        state.heading() * state.velocity * self.time_step
    }
}
