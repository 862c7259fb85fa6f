use nalgebra::{Matrix4, Perspective3, Point3, Vector3, Vector4};

use crate::error::{RenderError, Result};
use crate::math::PRECISION;
use crate::ray::Ray;

/// Pinhole camera pose. `fov_y` is the vertical field of view in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub look_at: Point3<f64>,
    pub look_from: Point3<f64>,
    pub up: Vector3<f64>,
    pub near: f64,
    pub far: f64,
    pub fov_y: f64,
}

impl Camera {
    pub fn new(
        look_at: Point3<f64>,
        look_from: Point3<f64>,
        up: Vector3<f64>,
        near: f64,
        far: f64,
        fov_y: f64,
    ) -> Self {
        Self {
            look_at,
            look_from,
            up,
            near,
            far,
            fov_y,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.near > 0. && self.near.is_finite()) {
            return Err(RenderError::InvalidCamera("near plane must be positive"));
        }
        if !(self.far > self.near && self.far.is_finite()) {
            return Err(RenderError::InvalidCamera(
                "far plane must lie beyond the near plane",
            ));
        }
        if !(self.fov_y > 0. && self.fov_y < 180.) {
            return Err(RenderError::InvalidCamera(
                "field of view must be within (0, 180) degrees",
            ));
        }

        let finite = self
            .look_at
            .iter()
            .chain(self.look_from.iter())
            .chain(self.up.iter())
            .all(|c| c.is_finite());
        if !finite {
            return Err(RenderError::InvalidCamera("camera vectors must be finite"));
        }

        let forward = self.look_at - self.look_from;
        if !(forward.norm() > PRECISION) {
            return Err(RenderError::InvalidCamera("eye and target coincide"));
        }
        if !(forward.normalize().cross(&self.up).norm() > PRECISION) {
            return Err(RenderError::InvalidCamera(
                "up is parallel to the view direction",
            ));
        }
        Ok(())
    }

    /// World-to-camera transform.
    pub fn view(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.look_from, &self.look_at, &self.up)
    }

    /// Camera-to-clip transform for a viewport of the given shape.
    pub fn perspective(&self, viewport: &Viewport) -> Matrix4<f64> {
        Perspective3::new(
            viewport.aspect(),
            self.fov_y.to_radians(),
            self.near,
            self.far,
        )
        .to_homogeneous()
    }

    /// Validates the pose and inverts its view-projection for `viewport`.
    pub fn projection(&self, viewport: Viewport) -> Result<Projection> {
        self.validate()?;
        let inverse = (self.perspective(&viewport) * self.view())
            .try_inverse()
            .ok_or(RenderError::InvalidCamera("view-projection is singular"))?;

        Ok(Projection {
            inverse,
            eye: self.look_from,
            far: self.far,
            viewport,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Inverse view-projection of one camera pose on one viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    inverse: Matrix4<f64>,
    eye: Point3<f64>,
    far: f64,
    viewport: Viewport,
}

impl Projection {
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Maps a position on the image (x right, y down, in pixels) to the
    /// world-space point on the far plane behind it.
    pub fn unproject(&self, x: f64, y: f64) -> Option<Point3<f64>> {
        let ndc = Vector4::new(
            2. * x / self.viewport.width as f64 - 1.,
            1. - 2. * y / self.viewport.height as f64,
            1.,
            1.,
        );
        Point3::from_homogeneous(self.inverse * ndc)
    }

    /// Ray from the eye through an image position, with the far-plane
    /// distance as its strength.
    pub fn ray(&self, x: f64, y: f64) -> Result<Ray> {
        let end = self
            .unproject(x, y)
            .ok_or(RenderError::InvalidCamera("point unprojects to infinity"))?;
        Ray::between(&self.eye, &end, self.far)
    }
}
