//! Free-camera orientation: yaw/pitch/roll angles and the orthonormal
//! basis derived from them

use nalgebra::{Matrix4, Point3, Vector3};

/// Accumulated yaw, pitch, and roll of the free camera, in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attitude {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Attitude {
    pub fn zero() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    pub fn rotate(&mut self, dyaw: f32, dpitch: f32, droll: f32) {
        self.yaw += dyaw;
        self.pitch += dpitch;
        self.roll += droll;
    }
}

impl Default for Attitude {
    fn default() -> Self {
        Self::zero()
    }
}

/// Orthonormal camera frame
#[derive(Debug, Clone, Copy)]
pub struct CameraBasis {
    pub forward: Vector3<f32>,
    pub up: Vector3<f32>,
    pub right: Vector3<f32>,
}

impl CameraBasis {
    /// The reference frame: looking down -Z with +Y up.
    pub fn reference() -> Self {
        Self {
            forward: -Vector3::z(),
            up: Vector3::y(),
            right: Vector3::x(),
        }
    }

    /// Rebuild the basis from the reference frame, applying yaw, then
    /// pitch, then roll. The basis is always recomputed from the reference,
    /// never composed incrementally.
    pub fn from_attitude(attitude: &Attitude) -> Self {
        let rotation = Matrix4::new_rotation(Vector3::new(0.0, attitude.yaw, 0.0))
            * Matrix4::new_rotation(Vector3::new(attitude.pitch, 0.0, 0.0))
            * Matrix4::new_rotation(Vector3::new(0.0, 0.0, attitude.roll));

        let reference = Self::reference();
        let forward = rotation.transform_vector(&reference.forward).normalize();
        let up = rotation.transform_vector(&reference.up).normalize();
        let right = forward.cross(&up).normalize();
        // Re-orthogonalize up so the three vectors stay mutually
        // perpendicular to floating-point precision.
        let up = right.cross(&forward).normalize();

        Self { forward, up, right }
    }

    /// View matrix for an eye using this frame, looking one unit ahead.
    pub fn view_matrix(&self, eye: &Point3<f32>) -> Matrix4<f32> {
        let target = Point3::from(eye.coords + self.forward);
        Matrix4::look_at_rh(eye, &target, &self.up)
    }

    /// Offset a position along the frame's axes (strafe, climb, advance).
    pub fn pan(&self, position: &Point3<f32>, right: f32, up: f32, forward: f32) -> Point3<f32> {
        Point3::from(position.coords + self.right * right + self.up * up + self.forward * forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_orthonormal(basis: &CameraBasis) {
        assert!((basis.forward.norm() - 1.0).abs() < 1e-6);
        assert!((basis.up.norm() - 1.0).abs() < 1e-6);
        assert!((basis.right.norm() - 1.0).abs() < 1e-6);
        assert!(basis.forward.dot(&basis.up).abs() < 1e-6);
        assert!(basis.forward.dot(&basis.right).abs() < 1e-6);
        assert!(basis.up.dot(&basis.right).abs() < 1e-6);
    }

    #[test]
    fn reference_frame_is_orthonormal() {
        assert_orthonormal(&CameraBasis::reference());
    }

    #[test]
    fn basis_stays_orthonormal_under_accumulated_angles() {
        let mut attitude = Attitude::zero();
        let deltas = [
            (0.3, -0.7, 0.1),
            (1.2, 0.4, -2.0),
            (-0.5, 3.0, 0.9),
            (2.2, -1.4, 0.6),
            (0.01, 0.02, -0.03),
        ];
        for (dyaw, dpitch, droll) in deltas {
            attitude.rotate(dyaw, dpitch, droll);
            assert_orthonormal(&CameraBasis::from_attitude(&attitude));
        }
    }

    #[test]
    fn quarter_yaw_swings_forward_to_minus_x() {
        let attitude = Attitude {
            yaw: FRAC_PI_2,
            pitch: 0.0,
            roll: 0.0,
        };
        let basis = CameraBasis::from_attitude(&attitude);
        assert!((basis.forward - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-6);
        assert!((basis.right - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
        assert!((basis.up - Vector3::y()).norm() < 1e-6);
    }

    #[test]
    fn view_matrix_looks_along_forward() {
        let basis = CameraBasis::reference();
        let eye = Point3::new(0.0, 0.0, 5.0);
        let view = basis.view_matrix(&eye);
        // A point one unit ahead of the eye lands on the view-space -Z axis.
        let ahead = view.transform_point(&Point3::new(0.0, 0.0, 4.0));
        assert!((ahead - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-5);
    }

    #[test]
    fn pan_moves_along_the_frame_axes() {
        let basis = CameraBasis::reference();
        let moved = basis.pan(&Point3::origin(), 1.0, 2.0, 3.0);
        assert!((moved - Point3::new(1.0, 2.0, -3.0)).norm() < 1e-6);
    }
}
