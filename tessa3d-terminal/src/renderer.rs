//! ASCII rasterizer: depth-buffered scanline fill and wireframe lines

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use std::io::Write;
use tessa3d_core::lighting::{luminance, shade};
use tessa3d_core::projection::project_point;
use tessa3d_core::{Mesh, RenderMode, RenderParams, Triangle};

/// Character luminosity ramp (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
const WIRE_CHAR: char = '#';

/// Converts projected triangles into a character/color grid with a depth
/// buffer, then queues the grid to a writer.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::Reset;
        }
    }

    /// Draw a mesh with the frame's parameters. Solid mode scanline-fills
    /// each face; wireframe mode draws its edges. Faces whose group indexes
    /// into the palette take that color, the rest keep their shaded color.
    pub fn render_mesh(&mut self, mesh: &Mesh, params: &RenderParams, palette: &[Color]) {
        let frame = params.matrices();
        let mvp = frame.mvp();
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, &mvp, &frame.model, params, palette);
        }
    }

    /// Draw a line-segment list (the gasket outline) in a fixed color.
    pub fn render_segments(
        &mut self,
        segments: &[[Point3<f32>; 2]],
        params: &RenderParams,
        color: Color,
    ) {
        let mvp = params.matrices().mvp();
        for segment in segments {
            let a = project_point(&mvp, &segment[0], self.width as u32, self.height as u32);
            let b = project_point(&mvp, &segment[1], self.width as u32, self.height as u32);
            if let (Some(a), Some(b)) = (a, b) {
                self.draw_line(a, b, WIRE_CHAR, color);
            }
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        mvp: &Matrix4<f32>,
        model: &Matrix4<f32>,
        params: &RenderParams,
        palette: &[Color],
    ) {
        let mut screen = [(0.0_f32, 0.0_f32, 0.0_f32); 3];
        for (corner, vertex) in screen.iter_mut().zip(&triangle.vertices) {
            match project_point(mvp, &vertex.position, self.width as u32, self.height as u32) {
                Some(projected) => *corner = projected,
                None => return, // triangle is clipped
            }
        }

        // Shade with the face normal carried into world space.
        let world_normal = model.transform_vector(&triangle.face_normal());
        let centroid = model.transform_point(&Point3::from(
            (triangle.vertices[0].position.coords
                + triangle.vertices[1].position.coords
                + triangle.vertices[2].position.coords)
                / 3.0,
        ));
        let shaded = shade(
            &params.light,
            &params.material,
            &world_normal,
            &centroid,
            &params.camera.position,
        );

        let brightness = luminance(&shaded);
        let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let character = LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)];

        let color = palette.get(triangle.group).copied().unwrap_or(Color::Rgb {
            r: (shaded.x * 255.0) as u8,
            g: (shaded.y * 255.0) as u8,
            b: (shaded.z * 255.0) as u8,
        });

        match params.mode {
            RenderMode::Solid => self.fill_triangle(&screen, character, color),
            RenderMode::Wireframe => {
                self.draw_line(screen[0], screen[1], WIRE_CHAR, color);
                self.draw_line(screen[1], screen[2], WIRE_CHAR, color);
                self.draw_line(screen[2], screen[0], WIRE_CHAR, color);
            }
        }
    }

    fn fill_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box, clipped to the grid
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x, y, depth, character, color);
                    }
                }
            }
        }
    }

    /// Bresenham stepping with depth interpolated along the span.
    fn draw_line(
        &mut self,
        from: (f32, f32, f32),
        to: (f32, f32, f32),
        character: char,
        color: Color,
    ) {
        let (mut x0, mut y0) = (from.0.round() as i32, from.1.round() as i32);
        let (x1, y1) = (to.0.round() as i32, to.1.round() as i32);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let steps = dx.max(-dy).max(1) as f32;
        let mut step = 0.0_f32;

        loop {
            let depth = from.2 + (to.2 - from.2) * (step / steps);
            self.plot(x0, y0, depth, character, color);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
            step += 1.0;
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let index = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[index] {
            self.depth_buffer[index] = depth;
            self.char_buffer[index] = character;
            self.color_buffer[index] = color;
        }
    }

    /// Queue the grid to the writer, one cursor move per row so raw mode
    /// keeps columns aligned.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let index = y * self.width + x;
                let color = self.color_buffer[index];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[index]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Barycentric coordinates of a point in a screen-space triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
