use nalgebra::{Point3, Vector3};

use crate::error::{RenderError, Result};
use crate::math::PRECISION;
use crate::ray::Ray;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere { center: Point3<f64>, radius: f64 },
    /// Axis-aligned cube of edge length `side`.
    Cube { center: Point3<f64>, side: f64 },
}

/// Nearest hit of a ray against one shape.
///
/// `normal` is not guaranteed to be unit length.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Intersection {
    pub point: Point3<f64>,
    pub normal: Vector3<f64>,
    pub distance: f64,
}

// Corners as sign triples, indexed by the face table below.
const CORNERS: [[f64; 3]; 8] = [
    [1., 1., -1.],
    [1., 1., 1.],
    [-1., 1., -1.],
    [-1., 1., 1.],
    [-1., -1., 1.],
    [1., -1., 1.],
    [1., -1., -1.],
    [-1., -1., -1.],
];

// (pivot, a, b): the outward normal is (a - pivot) x (b - pivot).
const FACES: [(usize, usize, usize); 6] = [
    (3, 1, 2), // top
    (6, 5, 7), // bottom
    (1, 3, 5), // front
    (7, 2, 6), // back
    (0, 1, 6), // right
    (4, 3, 7), // left
];

impl Shape {
    pub fn sphere(center: Point3<f64>, radius: f64) -> Result<Self> {
        if radius > 0. && radius.is_finite() {
            Ok(Self::Sphere { center, radius })
        } else {
            Err(RenderError::InvalidGeometry("sphere radius must be positive"))
        }
    }

    pub fn cube(center: Point3<f64>, side: f64) -> Result<Self> {
        if side > 0. && side.is_finite() {
            Ok(Self::Cube { center, side })
        } else {
            Err(RenderError::InvalidGeometry("cube side must be positive"))
        }
    }

    /// Nearest hit further than `PRECISION` along `ray`, ignoring its strength.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Self::Sphere { center, radius } => intersect_sphere(center, *radius, ray),
            Self::Cube { center, side } => intersect_cube(center, *side, ray),
        }
    }
}

fn intersect_sphere(center: &Point3<f64>, radius: f64, ray: &Ray) -> Option<Intersection> {
    let oc = ray.origin - center;
    let b = ray.direction.dot(&oc);
    let c = oc.dot(&oc);
    let delta = b * b - c + radius * radius;

    // A grazing ray counts as a miss, as does a ray that never reaches the sphere.
    if delta <= PRECISION {
        return None;
    }

    let root = delta.sqrt();
    let t = [-b - root, -b + root]
        .iter()
        .copied()
        .filter(|t| *t >= PRECISION)
        .fold(None, |acc: Option<f64>, t| match acc {
            Some(min) if min <= t => Some(min),
            _ => Some(t),
        })?;

    let point = ray.at(t);
    Some(Intersection {
        point,
        normal: (point - center) / radius,
        distance: (point - ray.origin).norm(),
    })
}

fn intersect_cube(center: &Point3<f64>, side: f64, ray: &Ray) -> Option<Intersection> {
    let half = side / 2.;
    let corner = |i: usize| {
        let [x, y, z] = CORNERS[i];
        center + Vector3::new(x, y, z) * half
    };

    FACES
        .iter()
        .filter_map(|&(pivot, a, b)| {
            let pivot = corner(pivot);
            let u = (corner(a) - pivot).normalize();
            let v = (corner(b) - pivot).normalize();
            intersect_face(center, half, &pivot, &u.cross(&v), ray)
        })
        .fold(None, |acc, hit| match acc {
            Some(best) if best.distance <= hit.distance => Some(best),
            _ => Some(hit),
        })
}

fn intersect_face(
    center: &Point3<f64>,
    half: f64,
    pivot: &Point3<f64>,
    normal: &Vector3<f64>,
    ray: &Ray,
) -> Option<Intersection> {
    let denominator = ray.direction.dot(normal);
    if denominator == 0. {
        return None;
    }

    let t = (pivot - ray.origin).dot(normal) / denominator;
    if t < PRECISION {
        return None;
    }

    let point = ray.at(t);
    let q = point - center;
    if q.iter().any(|c| c.abs() - half > PRECISION) {
        return None;
    }

    Some(Intersection {
        point,
        normal: *normal,
        distance: (point - ray.origin).norm(),
    })
}
