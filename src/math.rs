use nalgebra::{Point3, Unit, Vector3};

use crate::error::{RenderError, Result};

/// Distances and coordinates closer than this are considered equal.
pub const PRECISION: f64 = 0.0000001;

/// Unbounded linear RGB. Clamping belongs to presentation.
pub type Color = Vector3<f64>;

pub fn black() -> Color {
    Color::zeros()
}

/// Normalises `v`, refusing vectors too short to carry a direction.
pub fn unitary(v: &Vector3<f64>) -> Result<Vector3<f64>> {
    Unit::try_new(*v, PRECISION)
        .map(Unit::into_inner)
        .ok_or(RenderError::InvalidGeometry("cannot normalize a zero-length vector"))
}

/// Component-wise equality within `PRECISION`.
pub fn coincident(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    (a - b).iter().all(|c| c.abs() < PRECISION)
}

/// Mirrors `r` around `n`: `2(n·r)n - r`.
pub fn reflect(r: &Vector3<f64>, n: &Vector3<f64>) -> Vector3<f64> {
    2. * n * n.dot(r) - r
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_unitary_length() {
        let vectors = [
            Vector3::new(1., 0., 0.),
            Vector3::new(3., -4., 12.),
            Vector3::new(-203., -155., 104.),
            Vector3::new(0.001, 0.002, -0.0005),
        ];
        for v in vectors.iter() {
            let u = unitary(v).unwrap();
            assert!((u.norm() - 1.).abs() < PRECISION);
            assert!(u.dot(v) > 0.);
        }
    }

    #[test]
    fn test_unitary_zero() {
        assert!(matches!(
            unitary(&Vector3::zeros()),
            Err(RenderError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_reflect() {
        let n = Vector3::new(0., 1., 0.);
        let r = reflect(&Vector3::new(1., 1., 0.), &n);
        assert_eq!(r, Vector3::new(-1., 1., 0.));
    }

    #[test]
    fn test_coincident() {
        let a = Point3::new(1., 2., 3.);
        assert!(coincident(&a, &Point3::new(1. + 1e-9, 2., 3. - 1e-9)));
        assert!(!coincident(&a, &Point3::new(1., 2.001, 3.)));
    }

    #[test]
    fn test_color_channels() {
        let c = Color::new(0.5, 1., 2.);
        assert_eq!(c.component_mul(&Color::new(2., 0.5, 0.)), Color::new(1., 0.5, 0.));
        assert_eq!(c.component_div(&Color::new(0.5, 2., 4.)), Color::new(1., 0.5, 0.5));
        assert_eq!(c * 2. + black(), Color::new(1., 2., 4.));
    }
}
