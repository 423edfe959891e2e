//! Recursive midpoint subdivision for the gasket and sphere demos
//!
//! Every generator splits its primitive through exact edge midpoints
//! (t = 0.5) and recurses into four children. Output order is recursion
//! order, and shared vertices are emitted once per child on purpose: the
//! renderer consumes a flat triangle soup, not an indexed mesh.

use nalgebra::Point3;

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::{Mesh, Triangle};

/// Depth cap for the generators. Depth 8 already expands a tetrahedron into
/// 65536 cells; anything deeper is past interactive use.
pub const MAX_DEPTH: u32 = 8;

/// Corners of the reference tetrahedron inscribed in the unit sphere.
pub const REFERENCE_TETRAHEDRON: [[f32; 3]; 4] = [
    [0.0, 0.0, -1.0],
    [0.0, 0.942809, 0.333333],
    [-0.816497, -0.471405, 0.333333],
    [0.816497, -0.471405, 0.333333],
];

fn check_depth(depth: u32) -> GeometryResult<()> {
    if depth > MAX_DEPTH {
        return Err(GeometryError::DepthTooDeep {
            depth,
            max: MAX_DEPTH,
        });
    }
    Ok(())
}

fn midpoint(a: &Point3<f32>, b: &Point3<f32>) -> Point3<f32> {
    Point3::from((a.coords + b.coords) * 0.5)
}

/// Corners of the gasket base triangle inscribed in a circle of the given
/// radius, one corner straight up.
pub fn gasket_corners(radius: f32) -> [Point3<f32>; 3] {
    [90.0_f32, 210.0, -30.0].map(|degrees| {
        let rad = degrees.to_radians();
        Point3::new(radius * rad.cos(), radius * rad.sin(), 0.0)
    })
}

/// Rotate triangle corners about the origin in the XY plane.
pub fn spin_corners(corners: &[Point3<f32>; 3], degrees: f32) -> [Point3<f32>; 3] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    corners.map(|p| Point3::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos, p.z))
}

/// Tessellate a triangle and emit the outline of every leaf as line
/// segments (ab, bc, ca per leaf).
pub fn gasket_outline(
    corners: &[Point3<f32>; 3],
    depth: u32,
) -> GeometryResult<Vec<[Point3<f32>; 2]>> {
    check_depth(depth)?;
    let mut segments = Vec::with_capacity(3 * 4_usize.pow(depth));
    divide_outline(corners[0], corners[1], corners[2], depth, &mut segments);
    Ok(segments)
}

fn divide_outline(
    a: Point3<f32>,
    b: Point3<f32>,
    c: Point3<f32>,
    depth: u32,
    out: &mut Vec<[Point3<f32>; 2]>,
) {
    if depth == 0 {
        out.push([a, b]);
        out.push([b, c]);
        out.push([c, a]);
    } else {
        let ab = midpoint(&a, &b);
        let bc = midpoint(&b, &c);
        let ca = midpoint(&c, &a);
        divide_outline(ab, bc, ca, depth - 1, out);
        divide_outline(a, ab, ca, depth - 1, out);
        divide_outline(ab, b, bc, depth - 1, out);
        divide_outline(ca, bc, c, depth - 1, out);
    }
}

/// Tessellate a triangle into filled leaf faces.
pub fn gasket_faces(corners: &[Point3<f32>; 3], depth: u32) -> GeometryResult<Mesh> {
    check_depth(depth)?;
    let mut mesh = Mesh::with_capacity(4_usize.pow(depth));
    divide_faces(corners[0], corners[1], corners[2], depth, &mut mesh);
    Ok(mesh)
}

fn divide_faces(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, depth: u32, mesh: &mut Mesh) {
    if depth == 0 {
        mesh.add_triangle(Triangle::from_corners([a, b, c], 0));
    } else {
        let ab = midpoint(&a, &b);
        let bc = midpoint(&b, &c);
        let ca = midpoint(&c, &a);
        divide_faces(ab, bc, ca, depth - 1, mesh);
        divide_faces(a, ab, ca, depth - 1, mesh);
        divide_faces(ab, b, bc, depth - 1, mesh);
        divide_faces(ca, bc, c, depth - 1, mesh);
    }
}

/// Sierpinski tetrahedron: split through the six edge midpoints, recurse
/// into the four corner cells. Each emitted face keeps its slot (0-3) on
/// the cell so the front end can color the four sides distinctly.
pub fn tetrahedron_faces(corners: &[Point3<f32>; 4], depth: u32) -> GeometryResult<Mesh> {
    check_depth(depth)?;
    let mut mesh = Mesh::with_capacity(4 * 4_usize.pow(depth));
    divide_tetra(
        corners[0], corners[1], corners[2], corners[3], depth, &mut mesh,
    );
    Ok(mesh)
}

fn divide_tetra(
    a: Point3<f32>,
    b: Point3<f32>,
    c: Point3<f32>,
    d: Point3<f32>,
    depth: u32,
    mesh: &mut Mesh,
) {
    if depth == 0 {
        mesh.add_triangle(Triangle::from_corners([a, c, b], 0));
        mesh.add_triangle(Triangle::from_corners([a, c, d], 1));
        mesh.add_triangle(Triangle::from_corners([a, b, d], 2));
        mesh.add_triangle(Triangle::from_corners([b, c, d], 3));
    } else {
        let ab = midpoint(&a, &b);
        let ac = midpoint(&a, &c);
        let ad = midpoint(&a, &d);
        let bc = midpoint(&b, &c);
        let bd = midpoint(&b, &d);
        let cd = midpoint(&c, &d);
        divide_tetra(a, ab, ac, ad, depth - 1, mesh);
        divide_tetra(ab, b, bc, bd, depth - 1, mesh);
        divide_tetra(ac, bc, c, cd, depth - 1, mesh);
        divide_tetra(ad, bd, cd, d, depth - 1, mesh);
    }
}

/// Geodesic unit sphere: tessellate the reference tetrahedron, pushing
/// every midpoint back onto the sphere before recursing. Faces carry flat
/// normals from their winding.
pub fn sphere_faces(depth: u32) -> GeometryResult<Mesh> {
    check_depth(depth)?;
    let [a, b, c, d] = REFERENCE_TETRAHEDRON.map(Point3::from);
    let mut mesh = Mesh::with_capacity(4 * 4_usize.pow(depth));
    divide_sphere(a, b, c, depth, &mut mesh);
    divide_sphere(d, c, b, depth, &mut mesh);
    divide_sphere(a, d, b, depth, &mut mesh);
    divide_sphere(a, c, d, depth, &mut mesh);
    Ok(mesh)
}

fn to_sphere(p: Point3<f32>) -> Point3<f32> {
    Point3::from(p.coords.normalize())
}

fn divide_sphere(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, depth: u32, mesh: &mut Mesh) {
    if depth == 0 {
        mesh.add_triangle(Triangle::from_corners([a, b, c], 0));
    } else {
        let ab = to_sphere(midpoint(&a, &b));
        let bc = to_sphere(midpoint(&b, &c));
        let ac = to_sphere(midpoint(&a, &c));
        divide_sphere(a, ab, ac, depth - 1, mesh);
        divide_sphere(ab, b, bc, depth - 1, mesh);
        divide_sphere(bc, c, ac, depth - 1, mesh);
        divide_sphere(ab, bc, ac, depth - 1, mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> [Point3<f32>; 3] {
        gasket_corners(1.0)
    }

    #[test]
    fn depth_zero_outline_returns_base_edges() {
        let corners = unit_triangle();
        let segments = gasket_outline(&corners, 0).unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], [corners[0], corners[1]]);
        assert_eq!(segments[1], [corners[1], corners[2]]);
        assert_eq!(segments[2], [corners[2], corners[0]]);
    }

    #[test]
    fn depth_zero_faces_return_the_base_triangle() {
        let corners = unit_triangle();
        let mesh = gasket_faces(&corners, 0).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        for (vertex, corner) in mesh.triangles[0].vertices.iter().zip(&corners) {
            assert_eq!(vertex.position, *corner);
        }
    }

    #[test]
    fn triangle_count_grows_fourfold_per_level() {
        let corners = unit_triangle();
        for depth in 0..5 {
            let mesh = gasket_faces(&corners, depth).unwrap();
            assert_eq!(mesh.triangles.len(), 4_usize.pow(depth));
            let segments = gasket_outline(&corners, depth).unwrap();
            assert_eq!(segments.len(), 3 * 4_usize.pow(depth));
        }
    }

    #[test]
    fn tetrahedron_count_grows_fourfold_per_level() {
        let corners = REFERENCE_TETRAHEDRON.map(Point3::from);
        for depth in 0..4 {
            let mesh = tetrahedron_faces(&corners, depth).unwrap();
            assert_eq!(mesh.triangles.len(), 4 * 4_usize.pow(depth));
        }
    }

    #[test]
    fn tetrahedron_faces_keep_their_color_slots() {
        let corners = REFERENCE_TETRAHEDRON.map(Point3::from);
        let mesh = tetrahedron_faces(&corners, 2).unwrap();
        for cell in mesh.triangles.chunks_exact(4) {
            for (slot, triangle) in cell.iter().enumerate() {
                assert_eq!(triangle.group, slot);
            }
        }
    }

    #[test]
    fn sphere_vertices_sit_on_the_unit_sphere() {
        let mesh = sphere_faces(3).unwrap();
        assert_eq!(mesh.triangles.len(), 4 * 4_usize.pow(3));
        for triangle in &mesh.triangles {
            for vertex in &triangle.vertices {
                assert!((vertex.position.coords.norm() - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn excessive_depth_is_rejected() {
        let corners = unit_triangle();
        let err = gasket_faces(&corners, MAX_DEPTH + 1).unwrap_err();
        assert_eq!(
            err,
            GeometryError::DepthTooDeep {
                depth: MAX_DEPTH + 1,
                max: MAX_DEPTH
            }
        );
        assert!(sphere_faces(MAX_DEPTH + 1).is_err());
    }

    #[test]
    fn spin_rotates_in_the_plane_only() {
        let corners = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let spun = spin_corners(&corners, 90.0);
        assert!((spun[0] - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
        assert!((spun[1] - Point3::new(-1.0, 0.0, 0.0)).norm() < 1e-6);
        assert!((spun[2] - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
    }
}
