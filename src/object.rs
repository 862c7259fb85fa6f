use nalgebra::{Point3, Vector3};

use crate::math::Color;
use crate::shape::Shape;

/// Phong-style surface description. Two materials are the same material when
/// every field matches.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub reflection: f64,
    pub specular: f64,
    pub shininess: f64,
    pub diffuse: f64,
    pub ambient: f64,
    pub color: Color,
}

impl Material {
    pub fn new(
        reflection: f64,
        specular: f64,
        shininess: f64,
        diffuse: f64,
        ambient: f64,
        color: Color,
    ) -> Self {
        Self {
            reflection,
            specular,
            shininess,
            diffuse,
            ambient,
            color,
        }
    }
}

/// Point light with inverse-square falloff. `intensity` also caps how far a
/// shadow ray cast from the light may travel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    pub position: Point3<f64>,
    pub color: Color,
    pub intensity: f64,
}

impl Light {
    pub fn new(position: Point3<f64>, color: Color, intensity: f64) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Object {
    pub shape: Shape,
    /// Orientation of the object. Intersection ignores it for now.
    pub up: Vector3<f64>,
    /// Index into the owning scene's material list.
    pub material: usize,
}
