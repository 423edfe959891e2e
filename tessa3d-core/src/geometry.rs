//! Geometry primitives shared by every demo

use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::{GeometryError, GeometryResult};

/// A vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face tagged with the color group it belongs to
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    pub group: usize,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
            group: 0,
        }
    }

    /// Flat-shaded triangle: every vertex carries the face normal.
    pub fn from_corners(corners: [Point3<f32>; 3], group: usize) -> Self {
        let normal = face_normal(&corners);
        Self {
            vertices: [
                Vertex::new(corners[0], normal),
                Vertex::new(corners[1], normal),
                Vertex::new(corners[2], normal),
            ],
            group,
        }
    }

    pub fn face_normal(&self) -> Vector3<f32> {
        face_normal(&[
            self.vertices[0].position,
            self.vertices[1].position,
            self.vertices[2].position,
        ])
    }
}

/// Unit normal from the winding of three corners. Degenerate triangles fall
/// back to +Z instead of producing NaN.
pub fn face_normal(corners: &[Point3<f32>; 3]) -> Vector3<f32> {
    let edge1 = corners[1] - corners[0];
    let edge2 = corners[2] - corners[0];
    let normal = edge1.cross(&edge2);
    let length = normal.norm();
    if length > 0.0 {
        normal / length
    } else {
        Vector3::z()
    }
}

/// A triangle-soup mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Build a flat-shaded mesh from a list of corner triples.
    pub fn from_faces(faces: &[[Point3<f32>; 3]]) -> Self {
        let mut mesh = Self::with_capacity(faces.len());
        for corners in faces {
            mesh.add_triangle(Triangle::from_corners(*corners, 0));
        }
        mesh
    }

    /// Apply a transform to every vertex, renormalizing the normals.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        let mut mesh = Self::with_capacity(self.triangles.len());
        for triangle in &self.triangles {
            let mut moved = *triangle;
            for vertex in &mut moved.vertices {
                vertex.position = matrix.transform_point(&vertex.position);
                let normal = matrix.transform_vector(&vertex.normal);
                if normal.norm() > 0.0 {
                    vertex.normal = normal.normalize();
                }
            }
            mesh.add_triangle(moved);
        }
        mesh
    }

    /// Axis-aligned cube centered on the origin, one quad per face split
    /// into two triangles.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        // (outward normal, corners in fan order) per face
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            ([0.0, 0.0, 1.0], [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]]),
            ([0.0, 0.0, -1.0], [[-h, -h, -h], [-h, h, -h], [h, h, -h], [h, -h, -h]]),
            ([0.0, 1.0, 0.0], [[-h, h, -h], [-h, h, h], [h, h, h], [h, h, -h]]),
            ([0.0, -1.0, 0.0], [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]]),
            ([1.0, 0.0, 0.0], [[h, -h, -h], [h, h, -h], [h, h, h], [h, -h, h]]),
            ([-1.0, 0.0, 0.0], [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]]),
        ];

        let mut mesh = Self::with_capacity(12);
        for (normal, corners) in faces {
            let normal = Vector3::from(normal);
            let quad = corners.map(Point3::from);
            mesh.add_triangle(Triangle::new(
                Vertex::new(quad[0], normal),
                Vertex::new(quad[1], normal),
                Vertex::new(quad[2], normal),
            ));
            mesh.add_triangle(Triangle::new(
                Vertex::new(quad[0], normal),
                Vertex::new(quad[2], normal),
                Vertex::new(quad[3], normal),
            ));
        }
        mesh
    }

    /// Cube with one color group per face, for the projection explorer.
    pub fn color_cube(size: f32) -> Self {
        let h = size / 2.0;
        let corners = [
            Point3::new(-h, -h, h),
            Point3::new(-h, h, h),
            Point3::new(h, h, h),
            Point3::new(h, -h, h),
            Point3::new(-h, -h, -h),
            Point3::new(-h, h, -h),
            Point3::new(h, h, -h),
            Point3::new(h, -h, -h),
        ];
        let faces: [[usize; 6]; 6] = [
            [1, 0, 3, 1, 3, 2],
            [2, 3, 7, 2, 7, 6],
            [3, 0, 4, 3, 4, 7],
            [6, 5, 1, 6, 1, 2],
            [4, 5, 6, 4, 6, 7],
            [5, 4, 0, 5, 0, 1],
        ];

        let mut mesh = Self::with_capacity(12);
        for (group, indices) in faces.iter().enumerate() {
            for tri in indices.chunks_exact(3) {
                mesh.add_triangle(Triangle::from_corners(
                    [corners[tri[0]], corners[tri[1]], corners[tri[2]]],
                    group,
                ));
            }
        }
        mesh
    }

    /// Equilateral triangle in the XY plane, facing +Z.
    pub fn flat_triangle(size: f32) -> Self {
        let height = size * 3.0_f32.sqrt() / 2.0;
        let half = size / 2.0;
        Self::from_faces(&[[
            Point3::new(0.0, height / 2.0, 0.0),
            Point3::new(-half, -height / 2.0, 0.0),
            Point3::new(half, -height / 2.0, 0.0),
        ]])
    }

    /// Axis-aligned square in the XY plane, facing +Z.
    pub fn flat_square(size: f32) -> Self {
        let h = size / 2.0;
        Self::from_faces(&[
            [
                Point3::new(-h, -h, 0.0),
                Point3::new(h, -h, 0.0),
                Point3::new(h, h, 0.0),
            ],
            [
                Point3::new(-h, -h, 0.0),
                Point3::new(h, h, 0.0),
                Point3::new(-h, h, 0.0),
            ],
        ])
    }

    /// Triangle fan approximating a disc in the XY plane.
    pub fn flat_disc(radius: f32, sides: u32) -> GeometryResult<Self> {
        if sides < 3 {
            return Err(GeometryError::TooFewSides(sides));
        }
        let step = 2.0 * std::f32::consts::PI / sides as f32;
        let mut faces = Vec::with_capacity(sides as usize);
        for i in 0..sides {
            let a = i as f32 * step;
            let b = (i + 1) as f32 * step;
            faces.push([
                Point3::origin(),
                Point3::new(a.cos() * radius, a.sin() * radius, 0.0),
                Point3::new(b.cos() * radius, b.sin() * radius, 0.0),
            ]);
        }
        Ok(Self::from_faces(&faces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_twelve_faces_with_unit_normals() {
        let mesh = Mesh::cube(2.0);
        assert_eq!(mesh.triangles.len(), 12);
        for triangle in &mesh.triangles {
            for vertex in &triangle.vertices {
                assert!((vertex.normal.norm() - 1.0).abs() < 1e-6);
            }
            // The stored normal agrees with the winding.
            assert!(triangle.face_normal().dot(&triangle.vertices[0].normal) > 0.99);
        }
    }

    #[test]
    fn color_cube_covers_six_groups() {
        let mesh = Mesh::color_cube(1.0);
        assert_eq!(mesh.triangles.len(), 12);
        for group in 0..6 {
            let count = mesh.triangles.iter().filter(|t| t.group == group).count();
            assert_eq!(count, 2);
        }
    }

    #[test]
    fn disc_needs_at_least_three_sides() {
        assert_eq!(
            Mesh::flat_disc(1.0, 2).unwrap_err(),
            GeometryError::TooFewSides(2)
        );
        assert_eq!(Mesh::flat_disc(1.0, 8).unwrap().triangles.len(), 8);
    }

    #[test]
    fn flat_shapes_face_forward() {
        for mesh in [Mesh::flat_triangle(1.0), Mesh::flat_square(1.0)] {
            for triangle in &mesh.triangles {
                assert!((triangle.face_normal() - Vector3::z()).norm() < 1e-6);
            }
        }
    }

    #[test]
    fn transformed_carries_positions_and_normals() {
        let mesh = Mesh::flat_square(2.0);
        let quarter_turn = Matrix4::new_rotation(Vector3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0));
        let turned = mesh.transformed(&quarter_turn);
        for triangle in &turned.triangles {
            // +Z normals swing to -Y under a quarter turn about X.
            assert!((triangle.vertices[0].normal - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-6);
            assert!(triangle.vertices[0].position.y.abs() < 1e-6);
        }
    }
}
