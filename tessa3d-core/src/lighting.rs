//! Phong lighting for the shaded demos

use nalgebra::{Point3, Vector3, Vector4};

/// Light source. A `w` of zero in `position` marks a directional light;
/// any other `w` treats the xyz part as a point in the scene.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vector4<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vector4::new(5.0, 5.0, 5.0, 0.0),
            ambient: Vector3::new(0.2, 0.2, 0.2),
            diffuse: Vector3::new(1.0, 1.0, 1.0),
            specular: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Surface material for the Phong model
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vector3::new(1.0, 0.0, 1.0),
            diffuse: Vector3::new(1.0, 0.0, 0.0),
            specular: Vector3::new(1.0, 1.0, 1.0),
            shininess: 20.0,
        }
    }
}

/// Phong shade for a surface point, as rgb in [0, 1]. The specular term is
/// suppressed on faces turned away from the light.
pub fn shade(
    light: &Light,
    material: &Material,
    normal: &Vector3<f32>,
    surface: &Point3<f32>,
    eye: &Point3<f32>,
) -> Vector3<f32> {
    let n = normal.normalize();
    let light_xyz = Vector3::new(light.position.x, light.position.y, light.position.z);
    let l = if light.position.w == 0.0 {
        light_xyz.normalize()
    } else {
        (light_xyz - surface.coords).normalize()
    };

    let mut color = light.ambient.component_mul(&material.ambient);

    let kd = l.dot(&n).max(0.0);
    color += light.diffuse.component_mul(&material.diffuse) * kd;

    if kd > 0.0 {
        let reflected = n * (2.0 * l.dot(&n)) - l;
        let view = (eye.coords - surface.coords).normalize();
        let ks = reflected.dot(&view).max(0.0).powf(material.shininess);
        color += light.specular.component_mul(&material.specular) * ks;
    }

    color.map(|channel| channel.clamp(0.0, 1.0))
}

/// Perceptual brightness of an rgb color in [0, 1].
pub fn luminance(color: &Vector3<f32>) -> f32 {
    0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_material() -> Material {
        Material {
            ambient: Vector3::new(1.0, 1.0, 1.0),
            diffuse: Vector3::new(1.0, 1.0, 1.0),
            specular: Vector3::new(1.0, 1.0, 1.0),
            shininess: 20.0,
        }
    }

    #[test]
    fn back_facing_surface_gets_ambient_only() {
        let light = Light {
            position: Vector4::new(0.0, 0.0, 5.0, 0.0),
            ..Light::default()
        };
        let material = white_material();
        let color = shade(
            &light,
            &material,
            &Vector3::new(0.0, 0.0, -1.0),
            &Point3::origin(),
            &Point3::new(0.0, 0.0, 5.0),
        );
        let ambient = light.ambient.component_mul(&material.ambient);
        assert!((color - ambient).norm() < 1e-6);
    }

    #[test]
    fn facing_surface_adds_diffuse() {
        let light = Light {
            position: Vector4::new(0.0, 0.0, 5.0, 0.0),
            ..Light::default()
        };
        // Eye off to the side so no specular highlight interferes.
        let color = shade(
            &light,
            &Material::default(),
            &Vector3::z(),
            &Point3::origin(),
            &Point3::new(5.0, 0.0, 0.0),
        );
        assert!((color.x - 1.0).abs() < 1e-6); // 0.2 ambient + 1.0 diffuse, clamped
        assert!(color.y.abs() < 1e-6);
        assert!((color.z - 0.2).abs() < 1e-6); // magenta ambient only
    }

    #[test]
    fn point_light_shines_toward_the_surface() {
        let light = Light {
            position: Vector4::new(0.0, 5.0, 0.0, 1.0),
            ..Light::default()
        };
        let material = white_material();
        let lit = shade(
            &light,
            &material,
            &Vector3::y(),
            &Point3::origin(),
            &Point3::new(5.0, 0.0, 0.0),
        );
        let unlit = shade(
            &light,
            &material,
            &-Vector3::y(),
            &Point3::origin(),
            &Point3::new(5.0, 0.0, 0.0),
        );
        assert!(lit.norm() > unlit.norm());
        let ambient = light.ambient.component_mul(&material.ambient);
        assert!((unlit - ambient).norm() < 1e-6);
    }

    #[test]
    fn channels_never_exceed_one() {
        let light = Light {
            position: Vector4::new(0.0, 0.0, 5.0, 0.0),
            ambient: Vector3::new(1.0, 1.0, 1.0),
            diffuse: Vector3::new(1.0, 1.0, 1.0),
            specular: Vector3::new(1.0, 1.0, 1.0),
        };
        let color = shade(
            &light,
            &white_material(),
            &Vector3::z(),
            &Point3::origin(),
            &Point3::new(0.0, 0.0, 5.0),
        );
        assert!(color.iter().all(|&channel| channel <= 1.0));
    }

    #[test]
    fn luminance_is_a_convex_weighting() {
        assert!((luminance(&Vector3::new(1.0, 1.0, 1.0)) - 1.0).abs() < 1e-6);
        assert!(luminance(&Vector3::zeros()).abs() < 1e-6);
        assert!(luminance(&Vector3::y()) > luminance(&Vector3::x()));
    }
}
