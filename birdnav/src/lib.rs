//! A 2D "bird robot" navigation task exposed through a reset/step
//! environment interface.
//!
//! The robot starts in one corner of a square world and has to reach the
//! opposite corner without leaving the inset bounds or flying into one of a
//! fixed set of obstacles. A forward-facing proximity sensor reports the
//! distance to each obstacle inside its range and field of view.
//!
//! ```
//! use birdnav::nav::{Action, BirdRobotEnv, NavConfig};
//!
//! let mut env = BirdRobotEnv::new(NavConfig::default())?;
//! let first = env.reset();
//! assert_eq!(&first.observation[..2], &[10.0, 10.0]);
//!
//! let ts = env.step(Action::Accelerate)?;
//! assert!(!ts.is_last());
//! # Ok::<(), birdnav::env::EnvError>(())
//! ```

pub mod env;
pub mod nav;
pub mod rollout;

pub use env::{Env, EnvError, TimeStep, VecEnv};
pub use nav::{Action, BirdRobotEnv, NavConfig};
