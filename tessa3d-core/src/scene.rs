//! Immutable per-frame render parameters
//!
//! Input handlers produce a new `RenderParams` value; the render step is a
//! pure function of that snapshot and never reaches into shared state.

use nalgebra::Matrix4;

use crate::lighting::{Light, Material};
use crate::projection::Camera;
use crate::transform::{ModelTransform, Transform};

/// Fill style for a draw pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Solid,
    Wireframe,
}

impl RenderMode {
    pub fn toggle(&mut self) {
        *self = match self {
            RenderMode::Solid => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Solid,
        };
    }
}

/// Everything one frame needs, captured as a value
#[derive(Debug, Clone, Copy)]
pub struct RenderParams {
    pub model: ModelTransform,
    pub camera: Camera,
    pub mode: RenderMode,
    pub light: Light,
    pub material: Material,
}

impl RenderParams {
    pub fn new(camera: Camera) -> Self {
        Self {
            model: ModelTransform::identity(),
            camera,
            mode: RenderMode::Solid,
            light: Light::default(),
            material: Material::default(),
        }
    }

    /// Model, view, and projection matrices for this frame.
    pub fn matrices(&self) -> FrameMatrices {
        FrameMatrices {
            model: self.model.matrix(),
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
        }
    }
}

/// The three matrices a frame uploads before drawing
#[derive(Debug, Clone, Copy)]
pub struct FrameMatrices {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
}

impl FrameMatrices {
    pub fn mvp(&self) -> Matrix4<f32> {
        Transform::mvp_matrix(&self.model, &self.view, &self.projection)
    }
}
