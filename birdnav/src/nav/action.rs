use serde::{Deserialize, Serialize};

use crate::env::EnvError;

/// The six discrete controls of the robot. Exactly one is applied per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Accelerate,
    Decelerate,
    TurnRight,
    TurnLeft,
    MoveForward,
    MoveBackward,
}

impl Action {
    pub const COUNT: usize = 6;

    /// All actions in index order.
    pub const ALL: [Action; Action::COUNT] = [
        Action::Accelerate,
        Action::Decelerate,
        Action::TurnRight,
        Action::TurnLeft,
        Action::MoveForward,
        Action::MoveBackward,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Action::ALL.get(index).copied())
            .ok_or(EnvError::InvalidAction { action: value })
    }
}

impl TryFrom<usize> for Action {
    type Error = EnvError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Action::ALL
            .get(value)
            .copied()
            .ok_or(EnvError::InvalidAction {
                action: i64::try_from(value).unwrap_or(i64::MAX),
            })
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> Self {
        action.index()
    }
}
