use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::action::Action;
use super::config::NavConfig;
use super::kinematics::{BirdState, Kinematics, normalize_degrees};
use super::sensor::{Obstacle, ProximitySensor};
use super::specs::{ActionSpec, ObservationSpec};
use crate::env::{Env, EnvError, TimeStep};

/// What to do when `step` is called on a finished episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalPolicy {
    /// Start a new episode and return its first time step.
    #[default]
    AutoReset,
    /// Fail with [`EnvError::EpisodeEnded`] until `reset` is called.
    Strict,
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    OutOfBounds,
    Collision { obstacle: usize },
    GoalReached,
}

/// Diagnostic payload attached to every time step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Kinematic updates applied since the last reset.
    pub step_count: u64,
    pub termination: Option<Termination>,
}

pub type NavTimeStep = TimeStep<Vec<f32>, StepInfo>;

/// A 2D bird robot flying from one corner of a square world to the opposite
/// corner past a fixed set of obstacles.
///
/// The environment owns its configuration, obstacle layout and robot state;
/// two instances never share anything.
#[derive(Debug, Clone)]
pub struct BirdRobotEnv {
    config: NavConfig,
    kinematics: Kinematics,
    sensor: ProximitySensor,
    terminal_policy: TerminalPolicy,
    state: BirdState,
    goal: Vec2,
    obstacles: Vec<Obstacle>,
    episode_ended: bool,
    step_count: u64,
}

impl BirdRobotEnv {
    pub fn new(config: NavConfig) -> Result<Self, EnvError> {
        config.validate()?;

        let kinematics = Kinematics::from_config(&config);
        let sensor = ProximitySensor::from_config(&config);
        let mut env = Self {
            state: BirdState::new(config.start_position(), config.initial_orientation),
            goal: config.goal_position(),
            obstacles: Vec::with_capacity(config.obstacles.len()),
            kinematics,
            sensor,
            config,
            terminal_policy: TerminalPolicy::default(),
            episode_ended: false,
            step_count: 0,
        };
        env.start_episode();
        Ok(env)
    }

    pub fn with_terminal_policy(mut self, policy: TerminalPolicy) -> Self {
        self.terminal_policy = policy;
        self
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn terminal_policy(&self) -> TerminalPolicy {
        self.terminal_policy
    }

    pub fn action_spec(&self) -> ActionSpec {
        ActionSpec::discrete()
    }

    pub fn observation_spec(&self) -> ObservationSpec {
        ObservationSpec::from_config(&self.config)
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn orientation(&self) -> f32 {
        self.state.orientation
    }

    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    pub fn goal(&self) -> Vec2 {
        self.goal
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn sensor(&self) -> &ProximitySensor {
        &self.sensor
    }

    pub fn is_episode_ended(&self) -> bool {
        self.episode_ended
    }

    /// Places the robot directly, e.g. to set up a scenario. Speed is clamped,
    /// heading normalized and sensor readings refreshed; no termination check
    /// runs until the next `step`. Non-finite input is rejected and leaves the
    /// state untouched.
    pub fn set_pose(
        &mut self,
        position: Vec2,
        orientation: f32,
        velocity: f32,
    ) -> Result<(), EnvError> {
        let fields = [
            ("x", position.x),
            ("y", position.y),
            ("orientation", orientation),
            ("velocity", velocity),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(EnvError::InvalidPose { field, value });
        }

        self.state.position = position;
        self.state.orientation = normalize_degrees(orientation);
        self.state.velocity = self.kinematics.clamp_speed(velocity);
        self.refresh_sensors();
        Ok(())
    }

    /// Starts a new episode.
    pub fn reset(&mut self) -> NavTimeStep {
        self.start_episode();
        debug!(
            start = %self.state.position,
            goal = %self.goal,
            obstacles = self.obstacles.len(),
            "episode reset"
        );
        TimeStep::restart(self.observation(), self.info(None))
    }

    /// Validates a raw action index, then steps. An invalid index leaves the
    /// environment untouched.
    pub fn step_index(&mut self, action: i64) -> Result<NavTimeStep, EnvError> {
        let action = Action::try_from(action)?;
        self.step(action)
    }

    pub fn step(&mut self, action: Action) -> Result<NavTimeStep, EnvError> {
        if self.episode_ended {
            return match self.terminal_policy {
                TerminalPolicy::Strict => Err(EnvError::EpisodeEnded),
                TerminalPolicy::AutoReset => {
                    warn!(?action, "step after episode end, resetting");
                    Ok(self.reset())
                }
            };
        }

        self.kinematics.apply(&mut self.state, action);
        self.step_count += 1;
        self.refresh_sensors();
        trace!(
            ?action,
            position = %self.state.position,
            orientation = self.state.orientation,
            velocity = self.state.velocity,
            "step"
        );

        match self.check_termination() {
            Some(termination) => {
                self.episode_ended = true;
                let reward = match termination {
                    Termination::GoalReached => self.config.reward_goal,
                    Termination::OutOfBounds | Termination::Collision { .. } => {
                        self.config.reward_collision
                    }
                };
                debug!(?termination, reward, steps = self.step_count, "episode ended");
                Ok(TimeStep::termination(
                    self.observation(),
                    reward,
                    self.info(Some(termination)),
                ))
            }
            None => Ok(TimeStep::transition(
                self.observation(),
                self.config.reward_step,
                self.config.discount,
                self.info(None),
            )),
        }
    }

    /// `[x, y, orientation, velocity, goal_x, goal_y, (ox, oy, d) * n]`.
    pub fn observation(&self) -> Vec<f32> {
        let mut observation = Vec::with_capacity(self.config.observation_len());
        observation.extend([
            self.state.position.x,
            self.state.position.y,
            self.state.orientation,
            self.state.velocity,
            self.goal.x,
            self.goal.y,
        ]);
        for obstacle in &self.obstacles {
            observation.extend([
                obstacle.position.x,
                obstacle.position.y,
                obstacle.sensed_distance,
            ]);
        }
        observation
    }

    fn start_episode(&mut self) {
        self.state = BirdState::new(
            self.config.start_position(),
            self.config.initial_orientation,
        );
        self.goal = self.config.goal_position();
        let unsensed = self.sensor.range();
        self.obstacles = self
            .sensor
            .obstacles()
            .iter()
            .map(|&position| Obstacle {
                position,
                sensed_distance: unsensed,
            })
            .collect();
        self.episode_ended = false;
        self.step_count = 0;
    }

    fn refresh_sensors(&mut self) {
        let BirdState {
            position,
            orientation,
            ..
        } = self.state;
        for obstacle in &mut self.obstacles {
            obstacle.sensed_distance = self.sensor.sense(position, orientation, obstacle.position);
        }
    }

    /// First match wins: bounds, then obstacles, then goal.
    fn check_termination(&self) -> Option<Termination> {
        let position = self.state.position;
        let (lo, hi) = (self.config.inner_min(), self.config.inner_max());
        if position.x < lo || position.y < lo || position.x > hi || position.y > hi {
            return Some(Termination::OutOfBounds);
        }

        let collision_distance = self.config.collision_distance;
        if let Some(obstacle) = self
            .obstacles
            .iter()
            .position(|o| position.distance(o.position) < collision_distance)
        {
            return Some(Termination::Collision { obstacle });
        }

        if position.distance(self.goal) < collision_distance {
            return Some(Termination::GoalReached);
        }

        None
    }

    fn info(&self, termination: Option<Termination>) -> StepInfo {
        StepInfo {
            step_count: self.step_count,
            termination,
        }
    }
}

impl Env for BirdRobotEnv {
    type Obs = Vec<f32>;
    type Act = Action;
    type Info = StepInfo;

    fn reset(&mut self) -> Result<NavTimeStep, EnvError> {
        Ok(BirdRobotEnv::reset(self))
    }

    fn step(&mut self, act: Action) -> Result<NavTimeStep, EnvError> {
        BirdRobotEnv::step(self, act)
    }

    fn close(&mut self) -> Result<(), EnvError> {
        debug!(steps = self.step_count, "environment closed");
        Ok(())
    }
}
