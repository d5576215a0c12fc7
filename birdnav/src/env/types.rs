use serde::{Deserialize, Serialize};

/// Position of a time step within its episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    First,
    Mid,
    Last,
}

/// One environment transition as seen by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStep<O, I> {
    pub step_type: StepType,
    pub observation: O,
    pub reward: f32,
    pub discount: f32,
    pub info: I,
}

impl<O, I> TimeStep<O, I> {
    /// Episode start: no reward, full discount.
    pub fn restart(observation: O, info: I) -> Self {
        Self {
            step_type: StepType::First,
            observation,
            reward: 0.0,
            discount: 1.0,
            info,
        }
    }

    pub fn transition(observation: O, reward: f32, discount: f32, info: I) -> Self {
        Self {
            step_type: StepType::Mid,
            observation,
            reward,
            discount,
            info,
        }
    }

    /// Terminal step: the discount is always zero.
    pub fn termination(observation: O, reward: f32, info: I) -> Self {
        Self {
            step_type: StepType::Last,
            observation,
            reward,
            discount: 0.0,
            info,
        }
    }

    pub fn is_first(&self) -> bool {
        self.step_type == StepType::First
    }

    pub fn is_last(&self) -> bool {
        self.step_type == StepType::Last
    }

    /// Classic `(observation, reward, done, discount, info)` tuple.
    pub fn into_parts(self) -> (O, f32, bool, f32, I) {
        let done = self.is_last();
        (self.observation, self.reward, done, self.discount, self.info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step<O, A> {
    pub obs: O,
    pub act: A,
    pub rew: f32,
    pub done: bool,
    pub discount: f32,
    /// The environment's diagnostic info, serialized.
    pub info: serde_json::Value,
}

/// A recorded reset-to-termination (or budget-truncated) episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory<O, A> {
    pub id: String,
    pub steps: Vec<Step<O, A>>,
    pub episode_return: f32,
    pub terminated: bool,
}

impl<O, A> Trajectory<O, A> {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn rewards(&self) -> impl Iterator<Item = f32> + '_ {
        self.steps.iter().map(|step| step.rew)
    }
}
