//! Interactive terminal front end for the tessa3d demos
//!
//! Each demo maps keys onto a parameter state; every frame reads that state
//! into an immutable `RenderParams` snapshot and redraws from scratch.
//! Geometry is rebuilt whenever a shape parameter (depth, spin, planar
//! transform) changes, never patched incrementally.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use nalgebra::{Matrix4, Point3};
use tessa3d_core::projection::orbit_eye;
use tessa3d_core::subdivision::{self, MAX_DEPTH, REFERENCE_TETRAHEDRON};
use tessa3d_core::{
    Attitude, Camera, CameraBasis, GeometryResult, Light, Material, Mesh, ModelTransform,
    ProjectionMode, RenderMode, RenderParams, ScaleAxis, Transform,
};

pub mod renderer;

pub use renderer::AsciiRenderer;

const ANGLE_STEP: f32 = 5.0 * std::f32::consts::PI / 180.0;
const TURN_STEP: f32 = 2.0 * std::f32::consts::PI / 180.0;
const ROTATE_STEP: f32 = 0.1;
const PAN_STEP: f32 = 0.1;
const NUDGE_STEP: f32 = 0.05;

/// Which demo the app runs, with its fixed parameters
#[derive(Debug, Clone, Copy)]
pub enum Demo {
    /// Tessellated triangle, outline or filled
    Gasket { radius: f32 },
    /// Sierpinski tetrahedron with one color per face slot
    Tetra,
    /// Phong-shaded geodesic sphere
    Sphere,
    /// Perspective/orthographic projection explorer around a colored cube
    Cube,
    /// Free-look camera driven by the yaw/pitch/roll basis
    Free,
    /// 2D transform sandbox over a scene of flat shapes
    Planar { sides: u32 },
}

/// The planar sandbox applies exactly one transform at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanarOp {
    Translate,
    Rotate,
    Scale,
}

#[derive(Debug, Clone, Copy)]
struct PlanarState {
    op: PlanarOp,
    tx: f32,
    ty: f32,
    rotation_deg: f32,
    factor: f32,
    axis: ScaleAxis,
}

impl PlanarState {
    fn new() -> Self {
        Self {
            op: PlanarOp::Translate,
            tx: 0.0,
            ty: 0.0,
            rotation_deg: 0.0,
            factor: 1.0,
            axis: ScaleAxis::Both,
        }
    }

    fn matrix(&self) -> Matrix4<f32> {
        match self.op {
            PlanarOp::Translate => Transform::translation_matrix(self.tx, self.ty, 0.0),
            PlanarOp::Rotate => Transform::rotation_z(self.rotation_deg.to_radians()),
            PlanarOp::Scale => Transform::axis_scale(self.axis, self.factor),
        }
    }

    fn label(&self) -> &'static str {
        match self.op {
            PlanarOp::Translate => "translate",
            PlanarOp::Rotate => "rotate",
            PlanarOp::Scale => "scale",
        }
    }
}

/// All mutable demo state. Key handlers update it; each frame reads it into
/// an immutable snapshot via [`Scene::params`].
pub struct Scene {
    demo: Demo,
    initial_depth: u32,
    depth: u32,
    spin_deg: f32,
    model: ModelTransform,
    camera: Camera,
    mode: RenderMode,
    light: Light,
    material: Material,
    orbit_radius: f32,
    theta: f32,
    phi: f32,
    attitude: Attitude,
    eye: Point3<f32>,
    planar: PlanarState,
    spinning: bool,
    mesh: Mesh,
    segments: Vec<[Point3<f32>; 2]>,
    palette: Vec<Color>,
    frustum_half: f32,
    view_width: u32,
    view_height: u32,
}

impl Scene {
    pub fn new(demo: Demo, depth: u32) -> GeometryResult<Self> {
        let mut scene = Self {
            demo,
            initial_depth: depth,
            depth,
            spin_deg: 0.0,
            model: ModelTransform::identity(),
            camera: Camera::new(800, 600),
            mode: RenderMode::Solid,
            light: Light::default(),
            material: Material::default(),
            orbit_radius: 4.0,
            theta: 0.0,
            phi: 0.0,
            attitude: Attitude::zero(),
            eye: Point3::new(0.0, 0.0, 5.0),
            planar: PlanarState::new(),
            spinning: false,
            mesh: Mesh::new(),
            segments: Vec::new(),
            palette: Vec::new(),
            frustum_half: 1.0,
            view_width: 0,
            view_height: 0,
        };
        scene.configure();
        scene.rebuild()?;
        Ok(scene)
    }

    /// Per-demo camera, lighting, and palette setup.
    fn configure(&mut self) {
        match self.demo {
            Demo::Gasket { radius } => {
                self.camera.mode = ProjectionMode::Orthographic;
                self.camera.near = 0.1;
                self.camera.far = 10.0;
                self.frustum_half = (radius * 1.2).max(1.0);
                self.mode = RenderMode::Wireframe;
                self.palette = vec![Color::White];
            }
            Demo::Tetra => {
                self.spinning = true;
                self.model.rotation.rotate(0.3, 0.3, 0.0);
                self.palette = vec![Color::Red, Color::Green, Color::Blue, Color::DarkGrey];
            }
            Demo::Sphere => {
                self.camera.mode = ProjectionMode::Orthographic;
                self.camera.near = -10.0;
                self.camera.far = 10.0;
                self.frustum_half = 1.5;
                self.orbit_radius = 1.5;
            }
            Demo::Cube => {
                self.camera.near = 0.1;
                self.camera.far = 5.0;
                self.orbit_radius = 4.0;
                self.palette = vec![
                    Color::DarkGrey,
                    Color::Red,
                    Color::Yellow,
                    Color::Green,
                    Color::Blue,
                    Color::Magenta,
                ];
            }
            Demo::Free => {
                self.material = Material {
                    ambient: nalgebra::Vector3::new(0.25, 0.55, 1.0),
                    diffuse: nalgebra::Vector3::new(0.25, 0.55, 1.0),
                    specular: nalgebra::Vector3::new(1.0, 1.0, 1.0),
                    shininess: 32.0,
                };
            }
            Demo::Planar { .. } => {
                self.camera.mode = ProjectionMode::Orthographic;
                self.camera.near = 0.1;
                self.camera.far = 10.0;
                self.palette = vec![Color::Red, Color::Blue, Color::Green];
            }
        }
    }

    /// Record the terminal size and fit the orthographic frustum to it.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.view_width = width;
        self.view_height = height.max(1);
        self.camera.aspect = width as f32 / self.view_height as f32;
        self.camera.frustum_left = -self.frustum_half * self.camera.aspect;
        self.camera.frustum_right = self.frustum_half * self.camera.aspect;
        self.camera.frustum_bottom = -self.frustum_half;
        self.camera.frustum_top = self.frustum_half;
    }

    /// Rebuild the demo geometry from the current parameters.
    fn rebuild(&mut self) -> GeometryResult<()> {
        match self.demo {
            Demo::Gasket { radius } => {
                let corners =
                    subdivision::spin_corners(&subdivision::gasket_corners(radius), self.spin_deg);
                self.segments = subdivision::gasket_outline(&corners, self.depth)?;
                self.mesh = subdivision::gasket_faces(&corners, self.depth)?;
            }
            Demo::Tetra => {
                let corners = REFERENCE_TETRAHEDRON.map(Point3::from);
                self.mesh = subdivision::tetrahedron_faces(&corners, self.depth)?;
            }
            Demo::Sphere => {
                self.mesh = subdivision::sphere_faces(self.depth)?;
            }
            Demo::Cube => {
                self.mesh = Mesh::color_cube(1.0);
            }
            Demo::Free => {
                self.mesh = Mesh::cube(2.0);
            }
            Demo::Planar { sides } => {
                let mut base = Mesh::new();
                extend_with_group(&mut base, Mesh::flat_square(0.6), 0);
                extend_with_group(&mut base, Mesh::flat_triangle(0.8), 1);
                extend_with_group(&mut base, Mesh::flat_disc(0.3, sides)?, 2);
                self.mesh = base.transformed(&self.planar.matrix());
            }
        }
        log::debug!(
            "rebuilt scene: {} triangles, {} segments",
            self.mesh.triangles.len(),
            self.segments.len()
        );
        Ok(())
    }

    /// Restore the demo's initial parameters, keeping the viewport.
    fn reset(&mut self) -> GeometryResult<()> {
        let (width, height) = (self.view_width, self.view_height);
        *self = Self::new(self.demo, self.initial_depth)?;
        if width > 0 {
            self.set_viewport(width, height);
        }
        Ok(())
    }

    fn change_depth(&mut self, delta: i32) -> GeometryResult<()> {
        if !matches!(self.demo, Demo::Gasket { .. } | Demo::Tetra | Demo::Sphere) {
            return Ok(());
        }
        let next = self.depth.saturating_add_signed(delta).min(MAX_DEPTH);
        if next != self.depth {
            self.depth = next;
            self.rebuild()?;
        }
        Ok(())
    }

    fn toggle_projection(&mut self) {
        self.camera.mode = match self.camera.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }

    /// Apply one key press to the parameter state.
    pub fn handle_key(&mut self, code: KeyCode) -> GeometryResult<()> {
        match code {
            KeyCode::Char('r') => return self.reset(),
            KeyCode::Char('m') => {
                self.mode.toggle();
                return Ok(());
            }
            KeyCode::Char('+') | KeyCode::Char('=') => return self.change_depth(1),
            KeyCode::Char('-') => return self.change_depth(-1),
            _ => {}
        }

        match self.demo {
            Demo::Gasket { .. } => match code {
                KeyCode::Left => {
                    self.spin_deg += 5.0;
                    self.rebuild()?;
                }
                KeyCode::Right => {
                    self.spin_deg -= 5.0;
                    self.rebuild()?;
                }
                _ => {}
            },
            Demo::Tetra => match code {
                KeyCode::Char('w') | KeyCode::Up => self.model.rotation.rotate(ROTATE_STEP, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => {
                    self.model.rotation.rotate(-ROTATE_STEP, 0.0, 0.0)
                }
                KeyCode::Char('a') | KeyCode::Left => {
                    self.model.rotation.rotate(0.0, -ROTATE_STEP, 0.0)
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    self.model.rotation.rotate(0.0, ROTATE_STEP, 0.0)
                }
                KeyCode::Char(' ') => self.spinning = !self.spinning,
                _ => {}
            },
            Demo::Sphere => match code {
                KeyCode::Char('a') => self.theta += ANGLE_STEP,
                KeyCode::Char('d') => self.theta -= ANGLE_STEP,
                KeyCode::Char('w') => self.phi += ANGLE_STEP,
                KeyCode::Char('s') => self.phi -= ANGLE_STEP,
                KeyCode::Char('z') => self.orbit_radius += 0.1,
                KeyCode::Char('x') => self.orbit_radius = (self.orbit_radius - 0.1).max(0.1),
                KeyCode::Char('n') => {
                    self.light.position.w = if self.light.position.w == 0.0 { 1.0 } else { 0.0 };
                }
                KeyCode::Left => self.light.position.x -= 1.0,
                KeyCode::Right => self.light.position.x += 1.0,
                KeyCode::Up => self.light.position.y += 1.0,
                KeyCode::Down => self.light.position.y -= 1.0,
                _ => {}
            },
            Demo::Cube => match code {
                KeyCode::Left => self.phi += ANGLE_STEP,
                KeyCode::Right => self.phi -= ANGLE_STEP,
                KeyCode::Up => self.theta += ANGLE_STEP,
                KeyCode::Down => self.theta -= ANGLE_STEP,
                KeyCode::Char('a') => self.camera.scale_depth_range(1.1),
                KeyCode::Char('d') => self.camera.scale_depth_range(0.9),
                KeyCode::Char('w') => self.orbit_radius *= 1.1,
                KeyCode::Char('s') => self.orbit_radius *= 0.9,
                KeyCode::Char('f') => {
                    self.camera.fovy += ANGLE_STEP;
                    self.camera.clamp_fovy();
                }
                KeyCode::Char('g') => {
                    self.camera.fovy -= ANGLE_STEP;
                    self.camera.clamp_fovy();
                }
                KeyCode::Char('[') => self.camera.zoom_frustum(0.9),
                KeyCode::Char(']') => self.camera.zoom_frustum(1.1),
                KeyCode::Char('p') => self.toggle_projection(),
                KeyCode::Char('i') => self.model.translation.y += PAN_STEP,
                KeyCode::Char('k') => self.model.translation.y -= PAN_STEP,
                KeyCode::Char('j') => self.model.translation.x -= PAN_STEP,
                KeyCode::Char('l') => self.model.translation.x += PAN_STEP,
                KeyCode::Char('u') => self.model.translation.z += PAN_STEP,
                KeyCode::Char('o') => self.model.translation.z -= PAN_STEP,
                _ => {}
            },
            Demo::Free => {
                let basis = CameraBasis::from_attitude(&self.attitude);
                match code {
                    KeyCode::Left => self.attitude.rotate(-TURN_STEP, 0.0, 0.0),
                    KeyCode::Right => self.attitude.rotate(TURN_STEP, 0.0, 0.0),
                    KeyCode::Up => self.attitude.rotate(0.0, TURN_STEP, 0.0),
                    KeyCode::Down => self.attitude.rotate(0.0, -TURN_STEP, 0.0),
                    KeyCode::Char('z') => self.attitude.rotate(0.0, 0.0, TURN_STEP),
                    KeyCode::Char('x') => self.attitude.rotate(0.0, 0.0, -TURN_STEP),
                    KeyCode::Char('w') => self.eye = basis.pan(&self.eye, 0.0, 0.0, PAN_STEP),
                    KeyCode::Char('s') => self.eye = basis.pan(&self.eye, 0.0, 0.0, -PAN_STEP),
                    KeyCode::Char('a') => self.eye = basis.pan(&self.eye, -PAN_STEP, 0.0, 0.0),
                    KeyCode::Char('d') => self.eye = basis.pan(&self.eye, PAN_STEP, 0.0, 0.0),
                    KeyCode::Char('p') => self.toggle_projection(),
                    KeyCode::Char('1') => self.model.rotation.rotate(ROTATE_STEP, 0.0, 0.0),
                    KeyCode::Char('2') => self.model.rotation.rotate(-ROTATE_STEP, 0.0, 0.0),
                    KeyCode::Char('3') => self.model.rotation.rotate(0.0, ROTATE_STEP, 0.0),
                    KeyCode::Char('4') => self.model.rotation.rotate(0.0, -ROTATE_STEP, 0.0),
                    KeyCode::Char('5') => self.model.rotation.rotate(0.0, 0.0, ROTATE_STEP),
                    KeyCode::Char('6') => self.model.rotation.rotate(0.0, 0.0, -ROTATE_STEP),
                    KeyCode::Char(',') => self.model.scale = (self.model.scale - 0.1).max(0.1),
                    KeyCode::Char('.') => self.model.scale += 0.1,
                    _ => {}
                }
            }
            Demo::Planar { .. } => {
                let mut changed = true;
                match code {
                    KeyCode::Char('t') => self.planar.op = PlanarOp::Translate,
                    KeyCode::Char('y') => self.planar.op = PlanarOp::Rotate,
                    KeyCode::Char('u') => self.planar.op = PlanarOp::Scale,
                    KeyCode::Char('x') => self.planar.axis = ScaleAxis::X,
                    KeyCode::Char('c') => self.planar.axis = ScaleAxis::Y,
                    KeyCode::Char('b') => self.planar.axis = ScaleAxis::Both,
                    KeyCode::Left => match self.planar.op {
                        PlanarOp::Translate => self.planar.tx -= NUDGE_STEP,
                        PlanarOp::Rotate => self.planar.rotation_deg -= 5.0,
                        PlanarOp::Scale => {
                            self.planar.factor = (self.planar.factor - 0.1).max(0.1)
                        }
                    },
                    KeyCode::Right => match self.planar.op {
                        PlanarOp::Translate => self.planar.tx += NUDGE_STEP,
                        PlanarOp::Rotate => self.planar.rotation_deg += 5.0,
                        PlanarOp::Scale => self.planar.factor += 0.1,
                    },
                    KeyCode::Up => match self.planar.op {
                        PlanarOp::Translate => self.planar.ty += NUDGE_STEP,
                        PlanarOp::Scale => self.planar.factor += 0.1,
                        PlanarOp::Rotate => {}
                    },
                    KeyCode::Down => match self.planar.op {
                        PlanarOp::Translate => self.planar.ty -= NUDGE_STEP,
                        PlanarOp::Scale => {
                            self.planar.factor = (self.planar.factor - 0.1).max(0.1)
                        }
                        PlanarOp::Rotate => {}
                    },
                    _ => changed = false,
                }
                if changed {
                    self.rebuild()?;
                }
            }
        }
        Ok(())
    }

    /// Advance time-driven state (the tetra turntable).
    pub fn update(&mut self) {
        if self.spinning && matches!(self.demo, Demo::Tetra) {
            self.model.rotation.rotate(0.01, 0.015, 0.0);
        }
    }

    /// Snapshot the current parameters for a frame.
    pub fn params(&self) -> RenderParams {
        let mut camera = self.camera;
        match self.demo {
            Demo::Sphere | Demo::Cube => {
                camera.position = orbit_eye(self.orbit_radius, self.theta, self.phi);
            }
            Demo::Free => {
                let basis = CameraBasis::from_attitude(&self.attitude);
                camera.position = self.eye;
                camera.target = Point3::from(self.eye.coords + basis.forward);
                camera.up = basis.up;
            }
            _ => {}
        }
        RenderParams {
            model: self.model,
            camera,
            mode: self.mode,
            light: self.light,
            material: self.material,
        }
    }

    /// Draw this scene's geometry into the renderer.
    pub fn draw(&self, renderer: &mut AsciiRenderer) {
        let params = self.params();
        if matches!(self.demo, Demo::Gasket { .. }) && params.mode == RenderMode::Wireframe {
            renderer.render_segments(&self.segments, &params, Color::White);
        } else {
            renderer.render_mesh(&self.mesh, &params, &self.palette);
        }
    }

    /// One-line status and key legend for the overlay.
    pub fn status(&self, fps: f32) -> String {
        let mode = match self.mode {
            RenderMode::Solid => "solid",
            RenderMode::Wireframe => "wire",
        };
        match self.demo {
            Demo::Gasket { .. } => format!(
                "gasket | fps {:.1} | depth {} | {} | arrows spin, +/- depth, m fill, r reset, q quit",
                fps, self.depth, mode
            ),
            Demo::Tetra => format!(
                "tetra | fps {:.1} | depth {} | wasd/arrows rotate, space pause, +/- depth, m wire, q quit",
                fps, self.depth
            ),
            Demo::Sphere => format!(
                "sphere | fps {:.1} | depth {} | a/d w/s orbit, z/x radius, arrows light, n light kind, q quit",
                fps, self.depth
            ),
            Demo::Cube => {
                let projection = match self.camera.mode {
                    ProjectionMode::Perspective => "persp",
                    ProjectionMode::Orthographic => "ortho",
                };
                format!(
                    "cube | fps {:.1} | {} | arrows orbit, w/s radius, a/d near-far, f/g fov, [/] zoom, p proj, q quit",
                    fps, projection
                )
            }
            Demo::Free => format!(
                "free | fps {:.1} | arrows look, z/x roll, wasd move, 1-6 spin model, ,/. scale, p proj, q quit",
                fps
            ),
            Demo::Planar { .. } => format!(
                "planar | fps {:.1} | op {} | t/y/u pick op, arrows adjust, x/c/b axis, r reset, q quit",
                fps,
                self.planar.label()
            ),
        }
    }
}

fn extend_with_group(target: &mut Mesh, source: Mesh, group: usize) {
    for mut triangle in source.triangles {
        triangle.group = group;
        target.add_triangle(triangle);
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mut scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        scene.set_viewport(width as u32, height as u32);
        log::info!("terminal viewport {}x{}", width, height);

        Ok(Self {
            scene,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.scene.update();
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
            if kind != KeyEventKind::Press {
                return Ok(());
            }
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                _ => {
                    if let Err(err) = self.scene.handle_key(code) {
                        log::warn!("key ignored: {err}");
                    }
                }
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.scene.draw(&mut self.renderer);

        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.scene.status(self.fps)),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }
}
