use nalgebra::{Point3, Vector3};

use crate::error::Result;
use crate::math::unitary;

/// A half-line with a travel budget.
///
/// `strength` bounds how far the nearest-hit search looks along the ray and,
/// for reflections, how much energy is left to spend on further bounces.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
    pub strength: f64,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>, strength: f64) -> Self {
        Self {
            origin,
            direction,
            strength,
        }
    }

    /// Ray leaving `from` towards `to`. Fails when the two points coincide.
    pub fn between(from: &Point3<f64>, to: &Point3<f64>, strength: f64) -> Result<Self> {
        let direction = unitary(&(to - from))?;
        Ok(Self::new(*from, direction, strength))
    }

    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + t * self.direction
    }
}
