//! Model transform state and matrix builders

use nalgebra::{Matrix4, Vector3};

/// Accumulated rotation about the three axes, in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Axis selection for the planar scale control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    Both,
    X,
    Y,
}

/// Matrix builders shared by the demos
pub struct Transform;

impl Transform {
    /// Euler rotation applied about X, then Y, then Z.
    pub fn euler_rotation(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));
        rx * ry * rz
    }

    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    pub fn rotation_z(radians: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, radians))
    }

    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Scale along the selected axis, or both, leaving Z untouched.
    pub fn axis_scale(axis: ScaleAxis, factor: f32) -> Matrix4<f32> {
        match axis {
            ScaleAxis::Both => Self::scale_matrix(factor, factor, 1.0),
            ScaleAxis::X => Self::scale_matrix(factor, 1.0, 1.0),
            ScaleAxis::Y => Self::scale_matrix(1.0, factor, 1.0),
        }
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

/// Translation, Euler rotation, and uniform scale, composed
/// translate · rotateX · rotateY · rotateZ · scale the way every 3D demo
/// builds its model matrix.
#[derive(Debug, Clone, Copy)]
pub struct ModelTransform {
    pub translation: Vector3<f32>,
    pub rotation: RotationState,
    pub scale: f32,
}

impl ModelTransform {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: RotationState::zero(),
            scale: 1.0,
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.translation)
            * Transform::euler_rotation(&self.rotation)
            * Matrix4::new_scaling(self.scale)
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotation_state_accumulates_deltas() {
        let mut state = RotationState::zero();
        state.rotate(0.1, 0.2, 0.3);
        state.rotate(0.1, 0.0, -0.3);
        assert!((state.x - 0.2).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!(state.z.abs() < 1e-6);
    }

    #[test]
    fn zero_rotation_is_the_identity() {
        let matrix = Transform::euler_rotation(&RotationState::zero());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn model_matrix_scales_rotates_then_translates() {
        let model = ModelTransform {
            translation: Vector3::new(1.0, 2.0, 3.0),
            rotation: RotationState::new(0.0, 0.0, FRAC_PI_2),
            scale: 2.0,
        };
        // (1,0,0) scales to (2,0,0), turns to (0,2,0), lands on (1,4,3).
        let p = model.matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(1.0, 4.0, 3.0)).norm() < 1e-5);
    }

    #[test]
    fn axis_scale_touches_only_the_selected_axis() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let x = Transform::axis_scale(ScaleAxis::X, 2.0).transform_point(&p);
        assert!((x - Point3::new(2.0, 1.0, 1.0)).norm() < 1e-6);
        let y = Transform::axis_scale(ScaleAxis::Y, 2.0).transform_point(&p);
        assert!((y - Point3::new(1.0, 2.0, 1.0)).norm() < 1e-6);
        let both = Transform::axis_scale(ScaleAxis::Both, 2.0).transform_point(&p);
        assert!((both - Point3::new(2.0, 2.0, 1.0)).norm() < 1e-6);
    }
}
