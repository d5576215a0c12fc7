mod action;
mod config;
mod environment;
mod errors;
mod kinematics;
mod sensor;
mod specs;

pub use action::Action;
pub use config::NavConfig;
pub use environment::{BirdRobotEnv, NavTimeStep, StepInfo, TerminalPolicy, Termination};
pub use errors::ConfigError;
pub use kinematics::{BirdState, Kinematics, normalize_degrees};
pub use sensor::{Obstacle, ProximitySensor};
pub use specs::{ActionSpec, ObservationSpec};
