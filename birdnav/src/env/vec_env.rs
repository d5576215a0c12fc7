use super::types::TimeStep;
use super::{Env, EnvError};

/// A batch of environments stepped in lockstep.
///
/// Every member is built by its own call to the factory, so no obstacle,
/// goal or state buffer is shared between them.
pub struct VecEnv<E> {
    envs: Vec<E>,
}

impl<E: Env> VecEnv<E> {
    pub fn new<F>(make_env: F, num_envs: usize) -> Self
    where
        F: Fn() -> E,
    {
        let envs = (0..num_envs).map(|_| make_env()).collect();
        Self { envs }
    }

    /// Builds the batch from a fallible factory, e.g. one that validates a
    /// configuration.
    pub fn try_new<F>(make_env: F, num_envs: usize) -> Result<Self, EnvError>
    where
        F: Fn() -> Result<E, EnvError>,
    {
        let envs = (0..num_envs)
            .map(|_| make_env())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { envs })
    }

    pub fn len(&self) -> usize {
        self.envs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.envs.get(index)
    }

    pub fn reset(&mut self) -> Result<Vec<TimeStep<E::Obs, E::Info>>, EnvError> {
        self.envs.iter_mut().map(|env| env.reset()).collect()
    }

    pub fn step(
        &mut self,
        actions: Vec<E::Act>,
    ) -> Result<Vec<TimeStep<E::Obs, E::Info>>, EnvError> {
        if actions.len() != self.envs.len() {
            return Err(EnvError::ActionCountMismatch {
                expected: self.envs.len(),
                actual: actions.len(),
            });
        }

        self.envs
            .iter_mut()
            .zip(actions)
            .map(|(env, action)| env.step(action))
            .collect()
    }

    pub fn close(&mut self) -> Result<(), EnvError> {
        for env in &mut self.envs {
            env.close()?;
        }
        Ok(())
    }
}
