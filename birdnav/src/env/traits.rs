use super::errors::EnvError;
use super::types::TimeStep;

/// The reset/step interface an external training or evaluation driver
/// consumes.
///
/// `reset` starts a new episode and returns a [`StepType::First`] time step.
/// `step` advances the episode by exactly one action; the returned time step
/// carries the observation, reward, terminal flag, discount and diagnostic
/// info of the transition.
///
/// [`StepType::First`]: super::types::StepType::First
pub trait Env: Send {
    type Obs: Send + Clone + 'static;
    type Act: Send + Clone + 'static;
    type Info: Send + Clone + 'static;

    fn reset(&mut self) -> Result<TimeStep<Self::Obs, Self::Info>, EnvError>;
    fn step(&mut self, act: Self::Act) -> Result<TimeStep<Self::Obs, Self::Info>, EnvError>;
    fn close(&mut self) -> Result<(), EnvError>;
}
