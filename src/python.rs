use birdnav::env::EnvError;
use birdnav::nav::{BirdRobotEnv, NavConfig, TerminalPolicy};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;

fn to_py_err(err: EnvError) -> PyErr {
    match err {
        EnvError::InvalidAction { .. } | EnvError::Config(_) => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

/// The navigation environment, driven from Python with integer actions.
#[pyclass(name = "BirdRobotEnv")]
struct PyBirdRobotEnv {
    inner: BirdRobotEnv,
}

#[pymethods]
impl PyBirdRobotEnv {
    /// `config_json` overrides any subset of the defaults; `strict` makes a
    /// step after termination raise instead of resetting.
    #[new]
    #[pyo3(signature = (config_json=None, strict=false))]
    fn new(config_json: Option<&str>, strict: bool) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => NavConfig::from_json_str(json)
                .map_err(|err| to_py_err(EnvError::Config(err)))?,
            None => NavConfig::default(),
        };
        let policy = if strict {
            TerminalPolicy::Strict
        } else {
            TerminalPolicy::AutoReset
        };
        let inner = BirdRobotEnv::new(config)
            .map_err(to_py_err)?
            .with_terminal_policy(policy);
        Ok(Self { inner })
    }

    fn reset(&mut self) -> Vec<f32> {
        self.inner.reset().observation
    }

    /// Returns `(observation, reward, done, discount)`.
    fn step(&mut self, action: i64) -> PyResult<(Vec<f32>, f32, bool, f32)> {
        let (observation, reward, done, discount, _info) =
            self.inner.step_index(action).map_err(to_py_err)?.into_parts();
        Ok((observation, reward, done, discount))
    }

    /// `(minimum, maximum)` of the action index.
    fn action_spec(&self) -> (i64, i64) {
        let spec = self.inner.action_spec();
        (spec.minimum(), spec.maximum())
    }

    /// `(length, minimum, maximum)` of the observation vector.
    fn observation_spec(&self) -> (usize, f32, f32) {
        let spec = self.inner.observation_spec();
        (spec.len(), spec.minimum(), spec.maximum())
    }

    #[getter]
    fn episode_ended(&self) -> bool {
        self.inner.is_episode_ended()
    }
}

/// A Python module implemented in Rust.
/// The name of this function must match the lib.name in Cargo.toml
#[pymodule]
fn pybirdnav(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // the host process may already own a subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
    m.add_class::<PyBirdRobotEnv>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_python<R>(f: impl FnOnce(Python<'_>) -> R) -> R {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(f)
    }

    #[test]
    fn invalid_action_raises_value_error() {
        let mut env = PyBirdRobotEnv::new(None, false).unwrap();
        let err = env.step(6).unwrap_err();
        with_python(|py| assert!(err.is_instance_of::<PyValueError>(py)));
        assert_eq!(env.reset()[..2], [10.0, 10.0]);
    }

    #[test]
    fn bad_config_raises_value_error() {
        let err = PyBirdRobotEnv::new(Some(r#"{ "boundary_offset": 500.0 }"#), false)
            .err()
            .unwrap();
        with_python(|py| assert!(err.is_instance_of::<PyValueError>(py)));
    }

    #[test]
    fn strict_flag_raises_after_termination() {
        let layout = r#"{ "obstacles": [[10.5, 10.0]] }"#;

        let mut strict = PyBirdRobotEnv::new(Some(layout), true).unwrap();
        let (_, reward, done, discount) = strict.step(2).unwrap();
        assert_eq!((reward, done, discount), (-10.0, true, 0.0));
        assert!(strict.episode_ended());
        let err = strict.step(0).unwrap_err();
        with_python(|py| assert!(err.is_instance_of::<PyRuntimeError>(py)));

        let mut lenient = PyBirdRobotEnv::new(Some(layout), false).unwrap();
        lenient.step(2).unwrap();
        let (observation, reward, done, _) = lenient.step(0).unwrap();
        assert_eq!((reward, done), (0.0, false));
        assert_eq!(observation[3], 0.0);
    }

    #[test]
    fn specs_describe_default_layout() {
        let env = PyBirdRobotEnv::new(None, false).unwrap();
        assert_eq!(env.action_spec(), (0, 5));
        assert_eq!(env.observation_spec(), (15, 0.0, 200.0));
    }
}
