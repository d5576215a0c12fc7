use thiserror::Error;

use crate::nav::ConfigError;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("invalid action {action}: must be in [0, 5]")]
    InvalidAction { action: i64 },

    #[error("invalid pose: {field} is {value}, must be finite")]
    InvalidPose { field: &'static str, value: f32 },

    #[error("episode has ended, call reset before stepping again")]
    EpisodeEnded,

    #[error("action count doesn't match environment count: expected {expected}, got {actual}")]
    ActionCountMismatch { expected: usize, actual: usize },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
