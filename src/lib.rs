//! Python-facing build of the `birdnav` navigation environment.
//!
//! With the `python` feature enabled this crate compiles to an extension
//! module exposing `BirdRobotEnv` to a Python training driver; without it,
//! it simply re-exports the Rust API.

pub use birdnav::{env, nav, rollout};

#[cfg(feature = "python")]
mod python;
