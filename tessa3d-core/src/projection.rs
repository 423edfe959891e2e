//! Camera state and projection math

use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Field-of-view bounds for the perspective explorer, in radians.
pub const MIN_FOVY: f32 = 10.0 * std::f32::consts::PI / 180.0;
pub const MAX_FOVY: f32 = 90.0 * std::f32::consts::PI / 180.0;

const MIN_NEAR: f32 = 0.01;
const MIN_DEPTH_GAP: f32 = 0.01;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering.
///
/// Carries both the perspective parameters (fovy/aspect) and an explicit
/// orthographic frustum, so the mode can flip without recomputing state.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub frustum_left: f32,
    pub frustum_right: f32,
    pub frustum_bottom: f32,
    pub frustum_top: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fovy: std::f32::consts::FRAC_PI_4,
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            frustum_left: -1.0,
            frustum_right: 1.0,
            frustum_bottom: -1.0,
            frustum_top: 1.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix for the current mode
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fovy, self.near, self.far)
            }
            ProjectionMode::Orthographic => Matrix4::new_orthographic(
                self.frustum_left,
                self.frustum_right,
                self.frustum_bottom,
                self.frustum_top,
                self.near,
                self.far,
            ),
        }
    }

    /// Keep near positive and strictly in front of far.
    pub fn clamp_depth_range(&mut self) {
        if self.near < MIN_NEAR {
            self.near = MIN_NEAR;
        }
        if self.far <= self.near + MIN_DEPTH_GAP {
            self.far = self.near + MIN_DEPTH_GAP;
        }
    }

    pub fn clamp_fovy(&mut self) {
        self.fovy = self.fovy.clamp(MIN_FOVY, MAX_FOVY);
    }

    /// Scale near and far together (the explorers' depth-range keys).
    pub fn scale_depth_range(&mut self, factor: f32) {
        self.near *= factor;
        self.far *= factor;
        self.clamp_depth_range();
    }

    /// Grow or shrink the orthographic frustum about the view axis.
    pub fn zoom_frustum(&mut self, factor: f32) {
        self.frustum_left *= factor;
        self.frustum_right *= factor;
        self.frustum_bottom *= factor;
        self.frustum_top *= factor;
    }

    /// Project a point through model, view, and projection into screen
    /// space. Returns None when the point falls outside the clip volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        project_point(&mvp, point, width, height)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Eye position on a sphere around the origin: theta is elevation from the
/// XZ plane, phi the azimuth about +Y.
pub fn orbit_eye(radius: f32, theta: f32, phi: f32) -> Point3<f32> {
    Point3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin(),
        radius * theta.cos() * phi.cos(),
    )
}

/// Project a point through a precomputed model-view-projection matrix.
/// Returns screen x, y and normalized depth in [-1, 1].
pub fn project_point(
    mvp: &Matrix4<f32>,
    point: &Point3<f32>,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    let clip: Vector4<f32> = mvp * point.to_homogeneous();

    // Points on the camera plane have no stable projection.
    if clip.w.abs() < 1e-6 {
        return None;
    }

    let ndc = Vector3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w);
    if ndc.x < -1.0
        || ndc.x > 1.0
        || ndc.y < -1.0
        || ndc.y > 1.0
        || ndc.z < -1.0
        || ndc.z > 1.0
    {
        return None;
    }

    let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;
    Some((screen_x, screen_y, ndc.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn camera_defaults_to_perspective() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn view_matrix_is_nonzero() {
        let camera = Camera::new(800, 600);
        assert!(camera.view_matrix().norm() > 0.0);
    }

    #[test]
    fn both_projections_keep_a_visible_point_in_clip_range() {
        let mut camera = Camera::new(800, 600);
        let model = Matrix4::identity();
        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            camera.mode = mode;
            let (x, y, depth) = camera
                .project_to_screen(&Point3::origin(), &model, 800, 600)
                .unwrap();
            assert!((x - 400.0).abs() < 1e-2);
            assert!((y - 300.0).abs() < 1e-2);
            assert!((-1.0..=1.0).contains(&depth));
        }
    }

    #[test]
    fn points_outside_the_volume_are_culled() {
        let mut camera = Camera::new(800, 600);
        let model = Matrix4::identity();
        // Behind the eye.
        assert!(camera
            .project_to_screen(&Point3::new(0.0, 0.0, 50.0), &model, 800, 600)
            .is_none());
        // Outside the orthographic frustum.
        camera.mode = ProjectionMode::Orthographic;
        assert!(camera
            .project_to_screen(&Point3::new(10.0, 0.0, 0.0), &model, 800, 600)
            .is_none());
    }

    #[test]
    fn depth_range_clamp_keeps_near_below_far() {
        let mut camera = Camera::new(800, 600);
        camera.near = -1.0;
        camera.far = -2.0;
        camera.clamp_depth_range();
        assert!(camera.near >= 0.01);
        assert!(camera.far > camera.near);

        camera.near = 1.0;
        camera.far = 10.0;
        camera.scale_depth_range(0.9);
        assert!((camera.near - 0.9).abs() < 1e-6);
        assert!((camera.far - 9.0).abs() < 1e-6);
    }

    #[test]
    fn fovy_clamps_to_its_bounds() {
        let mut camera = Camera::new(800, 600);
        camera.fovy = 3.0;
        camera.clamp_fovy();
        assert!((camera.fovy - MAX_FOVY).abs() < 1e-6);
        camera.fovy = 0.01;
        camera.clamp_fovy();
        assert!((camera.fovy - MIN_FOVY).abs() < 1e-6);
    }

    #[test]
    fn orbit_eye_follows_the_polar_convention() {
        assert!((orbit_eye(2.0, 0.0, 0.0) - Point3::new(0.0, 0.0, 2.0)).norm() < 1e-6);
        assert!((orbit_eye(2.0, FRAC_PI_2, 0.0) - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-6);
        assert!((orbit_eye(2.0, 0.0, FRAC_PI_2) - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn frustum_zoom_scales_every_edge() {
        let mut camera = Camera::new(800, 600);
        camera.zoom_frustum(0.5);
        assert!((camera.frustum_left + 0.5).abs() < 1e-6);
        assert!((camera.frustum_right - 0.5).abs() < 1e-6);
        assert!((camera.frustum_bottom + 0.5).abs() < 1e-6);
        assert!((camera.frustum_top - 0.5).abs() < 1e-6);
    }
}
