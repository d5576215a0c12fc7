use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::env::{Env, EnvError, Step, TimeStep, Trajectory};
use crate::nav::Action;

/// Chooses the next action from the latest time step.
pub trait Policy<O, I, A> {
    fn action(&mut self, time_step: &TimeStep<O, I>) -> A;
}

/// Uniform choice over the six actions, reproducible from its seed.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: Pcg32,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl<O, I> Policy<O, I, Action> for RandomPolicy {
    fn action(&mut self, _time_step: &TimeStep<O, I>) -> Action {
        Action::ALL[self.rng.random_range(0..Action::COUNT)]
    }
}

/// Replays a fixed action sequence, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy<A> {
    actions: Vec<A>,
    cursor: usize,
}

impl<A> ScriptedPolicy<A> {
    /// `None` for an empty script.
    pub fn new(actions: Vec<A>) -> Option<Self> {
        if actions.is_empty() {
            return None;
        }
        Some(Self { actions, cursor: 0 })
    }
}

impl<O, I, A: Clone> Policy<O, I, A> for ScriptedPolicy<A> {
    fn action(&mut self, _time_step: &TimeStep<O, I>) -> A {
        let action = self.actions[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.actions.len();
        action
    }
}

/// Runs one episode from a fresh reset until termination or until
/// `max_steps` actions have been taken.
pub fn run_episode<E, P>(
    env: &mut E,
    policy: &mut P,
    max_steps: usize,
) -> Result<Trajectory<E::Obs, E::Act>, EnvError>
where
    E: Env,
    E::Info: Serialize,
    P: Policy<E::Obs, E::Info, E::Act>,
{
    let mut time_step = env.reset()?;
    let mut steps = Vec::new();
    let mut episode_return = 0.0;
    let mut terminated = false;

    while steps.len() < max_steps {
        let act = policy.action(&time_step);
        let next = env.step(act.clone())?;
        episode_return += next.reward;
        terminated = next.is_last();

        steps.push(Step {
            obs: time_step.observation,
            act,
            rew: next.reward,
            done: terminated,
            discount: next.discount,
            info: serde_json::to_value(&next.info)?,
        });

        if terminated {
            break;
        }
        time_step = next;
    }

    let id = Uuid::new_v4().to_string();
    debug!(%id, steps = steps.len(), episode_return, terminated, "episode finished");
    Ok(Trajectory {
        id,
        steps,
        episode_return,
        terminated,
    })
}

/// Mean undiscounted return over `episodes` runs; zero when `episodes` is 0.
pub fn average_return<E, P>(
    env: &mut E,
    policy: &mut P,
    episodes: usize,
    max_steps: usize,
) -> Result<f32, EnvError>
where
    E: Env,
    E::Info: Serialize,
    P: Policy<E::Obs, E::Info, E::Act>,
{
    if episodes == 0 {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for _ in 0..episodes {
        total += run_episode(env, policy, max_steps)?.episode_return;
    }
    Ok(total / episodes as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{BirdRobotEnv, NavConfig};

    #[test]
    fn random_policy_is_seed_deterministic() {
        let ts = TimeStep::restart((), ());
        let mut a = RandomPolicy::new(7);
        let mut b = RandomPolicy::new(7);
        let xs: Vec<Action> = (0..50).map(|_| a.action(&ts)).collect();
        let ys: Vec<Action> = (0..50).map(|_| b.action(&ts)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn step_budget_truncates_episode() {
        let mut env = BirdRobotEnv::new(NavConfig::default()).unwrap();
        let mut policy = ScriptedPolicy::new(vec![Action::TurnRight]).unwrap();
        let trajectory = run_episode(&mut env, &mut policy, 12).unwrap();
        assert_eq!(trajectory.len(), 12);
        assert!(!trajectory.terminated);
        assert_eq!(trajectory.episode_return, 12.0);
        assert!(trajectory.steps.iter().all(|s| s.discount == 0.9));
    }

    #[test]
    fn episode_stops_at_termination() {
        // back out of the start corner: out of bounds on the second move
        let mut env = BirdRobotEnv::new(NavConfig::default()).unwrap();
        let mut policy = ScriptedPolicy::new(vec![Action::Accelerate, Action::MoveBackward]).unwrap();
        let trajectory = run_episode(&mut env, &mut policy, 100).unwrap();
        assert_eq!(trajectory.len(), 2);
        assert!(trajectory.terminated);
        assert_eq!(trajectory.episode_return, 1.0 - 10.0);
        let last = trajectory.steps.last().unwrap();
        assert!(last.done);
        assert_eq!(last.info["termination"]["kind"], "out_of_bounds");
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(ScriptedPolicy::<Action>::new(vec![]).is_none());
    }

    #[test]
    fn script_cycles_through_actions() {
        let ts = TimeStep::restart((), ());
        let mut policy = ScriptedPolicy::new(vec![Action::TurnLeft, Action::Accelerate]).unwrap();
        let played: Vec<Action> = (0..5).map(|_| policy.action(&ts)).collect();
        assert_eq!(
            played,
            vec![
                Action::TurnLeft,
                Action::Accelerate,
                Action::TurnLeft,
                Action::Accelerate,
                Action::TurnLeft,
            ]
        );
    }

    #[test]
    fn average_of_zero_episodes_is_zero() {
        let mut env = BirdRobotEnv::new(NavConfig::default()).unwrap();
        let mut policy = RandomPolicy::new(0);
        assert_eq!(average_return(&mut env, &mut policy, 0, 10).unwrap(), 0.0);
    }
}
