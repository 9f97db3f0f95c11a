//! Idle "floating" motion for overlay headings.

use serde::{Deserialize, Serialize};
use text3d_core::Vec3;

use crate::node::SceneGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wave {
    Sin,
    Cos,
}

/// Amplitude (radians) and angular frequency of one rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisWave {
    pub amplitude: f32,
    pub frequency: f32,
}

impl AxisWave {
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }

    fn sample(&self, elapsed: f32, wave: Wave) -> f32 {
        let phase = elapsed * self.frequency;
        let unit = match wave {
            Wave::Sin => phase.sin(),
            Wave::Cos => phase.cos(),
        };
        unit * self.amplitude
    }
}

/// Per-axis oscillation; unset axes stay still.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Oscillation {
    pub x: AxisWave,
    pub y: AxisWave,
    pub z: AxisWave,
}

/// Rotation of a floating object `elapsed` seconds in.
pub fn float_rotation(elapsed: f32, wave: Wave, oscillation: &Oscillation) -> Vec3 {
    Vec3::new(
        oscillation.x.sample(elapsed, wave),
        oscillation.y.sample(elapsed, wave),
        oscillation.z.sample(elapsed, wave),
    )
}

impl SceneGroup {
    /// Set this group's rotation to the floating pose at `elapsed`.
    pub fn apply_float(&mut self, elapsed: f32, wave: Wave, oscillation: &Oscillation) {
        self.transform.rotation = float_rotation(elapsed, wave, oscillation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_axes_stay_still() {
        let osc = Oscillation {
            y: AxisWave::new(0.2, 1.0),
            ..Default::default()
        };
        let r = float_rotation(1.3, Wave::Cos, &osc);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.z, 0.0);
        assert!((r.y - 0.2 * 1.3f32.cos()).abs() < 1e-6);
    }

    #[test]
    fn test_sin_starts_at_rest_and_cos_at_peak() {
        let osc = Oscillation {
            x: AxisWave::new(0.5, 2.0),
            ..Default::default()
        };
        assert_eq!(float_rotation(0.0, Wave::Sin, &osc).x, 0.0);
        assert_eq!(float_rotation(0.0, Wave::Cos, &osc).x, 0.5);
    }

    #[test]
    fn test_apply_float_sets_group_rotation() {
        let mut group = SceneGroup::new("heading");
        let osc = Oscillation {
            z: AxisWave::new(0.1, 1.0),
            ..Default::default()
        };
        group.apply_float(0.0, Wave::Cos, &osc);
        assert_eq!(group.transform.rotation, Vec3::new(0.0, 0.0, 0.1));
    }
}
