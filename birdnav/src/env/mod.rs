mod errors;
mod traits;
mod types;
mod vec_env;

pub use errors::EnvError;
pub use traits::Env;
pub use types::{Step, StepType, TimeStep, Trajectory};
pub use vec_env::VecEnv;
