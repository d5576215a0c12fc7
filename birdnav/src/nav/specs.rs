use serde::{Deserialize, Serialize};

use super::action::Action;
use super::config::NavConfig;

/// Bounds of the scalar integer action accepted by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    minimum: i64,
    maximum: i64,
}

impl ActionSpec {
    pub fn discrete() -> Self {
        Self {
            minimum: 0,
            maximum: Action::COUNT as i64 - 1,
        }
    }

    pub fn minimum(&self) -> i64 {
        self.minimum
    }

    pub fn maximum(&self) -> i64 {
        self.maximum
    }

    /// Zero when the bounds are inverted or the span does not fit a `usize`.
    pub fn num_actions(&self) -> usize {
        self.maximum
            .checked_sub(self.minimum)
            .and_then(|span| usize::try_from(span).ok())
            .map_or(0, |span| span.saturating_add(1))
    }

    pub fn contains(&self, action: i64) -> bool {
        (self.minimum..=self.maximum).contains(&action)
    }
}

/// Shape and declared bounds of the flat observation vector
/// `[x, y, orientation, velocity, goal_x, goal_y, (ox, oy, d) * n]`.
///
/// The bounds are the world square as advertised to the driver; heading and
/// velocity have their own ranges and are not clipped to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpec {
    len: usize,
    minimum: f32,
    maximum: f32,
}

impl ObservationSpec {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            len: config.observation_len(),
            minimum: config.boundary_min,
            maximum: config.boundary_max,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn num_obstacles(&self) -> usize {
        self.len.saturating_sub(6) / 3
    }

    pub fn matches(&self, observation: &[f32]) -> bool {
        observation.len() == self.len && observation.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_spec_covers_six_actions() {
        let spec = ActionSpec::discrete();
        assert_eq!(spec.num_actions(), 6);
        assert!(spec.contains(0));
        assert!(spec.contains(5));
        assert!(!spec.contains(6));
        assert!(!spec.contains(-1));
    }

    #[test]
    fn observation_spec_scales_with_obstacles() {
        let spec = ObservationSpec::from_config(&NavConfig::default());
        assert_eq!(spec.len(), 15);
        assert_eq!(spec.num_obstacles(), 3);
        assert_eq!((spec.minimum(), spec.maximum()), (0.0, 200.0));

        let bare = ObservationSpec::from_config(&NavConfig::default().with_obstacles([]));
        assert_eq!(bare.len(), 6);
        assert!(bare.matches(&[0.0; 6]));
        assert!(!bare.matches(&[0.0; 7]));
        assert!(!bare.matches(&[0.0, 0.0, 0.0, f32::NAN, 0.0, 0.0]));
    }

    #[test]
    fn malformed_specs_do_not_underflow() {
        let short: ObservationSpec =
            serde_json::from_str(r#"{ "len": 3, "minimum": 0.0, "maximum": 1.0 }"#).unwrap();
        assert_eq!(short.num_obstacles(), 0);

        let inverted: ActionSpec =
            serde_json::from_str(r#"{ "minimum": 5, "maximum": 0 }"#).unwrap();
        assert_eq!(inverted.num_actions(), 0);
        assert!(!inverted.contains(3));

        let wide: ActionSpec =
            serde_json::from_str(&format!(r#"{{ "minimum": {}, "maximum": {} }}"#, i64::MIN, i64::MAX))
                .unwrap();
        assert_eq!(wide.num_actions(), 0);
    }
}
