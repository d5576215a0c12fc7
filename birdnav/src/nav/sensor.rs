use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::NavConfig;

/// A fixed obstacle and the last distance the sensor reported for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
    pub sensed_distance: f32,
}

/// Forward-facing proximity sensor with a limited range and field of view.
///
/// Readings saturate at the sensor range: an obstacle that is too far away,
/// or outside the cone of `±field_of_view / 2` around the heading, is
/// reported at exactly `range`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximitySensor {
    range: f32,
    field_of_view: f32,
    obstacles: Vec<Vec2>,
}

impl ProximitySensor {
    pub fn new(range: f32, field_of_view: f32, obstacles: Vec<Vec2>) -> Self {
        Self {
            range,
            field_of_view,
            obstacles,
        }
    }

    pub fn from_config(config: &NavConfig) -> Self {
        Self::new(
            config.sensor_range,
            config.sensor_angle,
            config.obstacles.clone(),
        )
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn obstacles(&self) -> &[Vec2] {
        &self.obstacles
    }

    /// Distance reading for a single obstacle.
    pub fn sense(&self, position: Vec2, orientation: f32, obstacle: Vec2) -> f32 {
        let offset = obstacle - position;
        let distance = offset.length();
        let bearing = relative_bearing(offset, orientation);
        if distance <= self.range && bearing.abs() <= self.field_of_view / 2.0 {
            distance
        } else {
            self.range
        }
    }

    /// One reading per obstacle, in configuration order.
    pub fn detect(&self, position: Vec2, orientation: f32) -> Vec<f32> {
        self.obstacles
            .iter()
            .map(|&obstacle| self.sense(position, orientation, obstacle))
            .collect()
    }

    /// `[x, y, orientation, d_1, .., d_n]`.
    pub fn reading(&self, position: Vec2, orientation: f32) -> Vec<f32> {
        let mut reading = Vec::with_capacity(3 + self.obstacles.len());
        reading.extend([position.x, position.y, orientation]);
        reading.extend(self.detect(position, orientation));
        reading
    }
}

/// Angle in degrees from the heading to `offset`, wrapped into `[-180, 180)`.
fn relative_bearing(offset: Vec2, orientation: f32) -> f32 {
    let absolute = offset.y.atan2(offset.x).to_degrees();
    (absolute - orientation + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(obstacles: Vec<Vec2>) -> ProximitySensor {
        ProximitySensor::new(100.0, 120.0, obstacles)
    }

    #[test]
    fn obstacle_dead_ahead_reports_true_distance() {
        let s = sensor(vec![Vec2::new(40.0, 10.0)]);
        assert_eq!(s.detect(Vec2::new(10.0, 10.0), 0.0), vec![30.0]);
    }

    #[test]
    fn obstacle_behind_saturates() {
        let s = sensor(vec![Vec2::new(0.0, 10.0)]);
        assert_eq!(s.detect(Vec2::new(10.0, 10.0), 0.0), vec![100.0]);
    }

    #[test]
    fn obstacle_beyond_range_saturates() {
        let s = sensor(vec![Vec2::new(150.0, 10.0)]);
        assert_eq!(s.detect(Vec2::new(10.0, 10.0), 0.0), vec![100.0]);
    }

    #[test]
    fn field_of_view_limits_detection() {
        let s = sensor(vec![]);
        // obstacle at 90 degrees absolute; heading 31 puts it at +59
        let d = s.sense(Vec2::ZERO, 31.0, Vec2::new(0.0, 10.0));
        assert!((d - 10.0).abs() < 1e-4);
        let outside = s.sense(Vec2::ZERO, 29.0, Vec2::new(0.0, 10.0));
        assert_eq!(outside, 100.0);
    }

    #[test]
    fn bearing_wraps_across_zero_heading() {
        // heading 350, obstacle 5 degrees above the x axis: 15 degrees off
        let s = sensor(vec![]);
        let obstacle = Vec2::from_angle(5f32.to_radians()) * 20.0;
        let d = s.sense(Vec2::ZERO, 350.0, obstacle);
        assert!((d - 20.0).abs() < 1e-4);
    }

    #[test]
    fn reading_prefixes_pose() {
        let s = sensor(vec![Vec2::new(20.0, 0.0), Vec2::new(-20.0, 0.0)]);
        let reading = s.reading(Vec2::ZERO, 0.0);
        assert_eq!(reading, vec![0.0, 0.0, 0.0, 20.0, 100.0]);
    }
}
