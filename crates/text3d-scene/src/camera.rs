use serde::{Deserialize, Serialize};
use text3d_core::Vec3;

/// The viewer the overlay is composed for. Read-only to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// X rotation (radians) that leans text at `target` back toward the camera.
    ///
    /// Uses the vertical over depth offset ratio as a small-angle tilt; 0 when
    /// the camera sits in the target's depth plane.
    pub fn tilt_toward(&self, target: &Vec3) -> f32 {
        let opposite = (target.y - self.position.y).abs();
        let adjacent = (target.z - self.position.z).abs();
        if adjacent == 0.0 {
            return 0.0;
        }
        -(opposite / adjacent)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 1000.0))
    }
}
