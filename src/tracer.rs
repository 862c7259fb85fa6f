use std::time::Instant;

use log::{debug, info, trace};
use rayon::prelude::*;

use crate::camera::{Camera, Projection, Viewport};
use crate::error::{RenderError, Result};
use crate::frame::FrameBuffer;
use crate::math::{black, Color};
use crate::sampling::Sampling;
use crate::scene::Scene;

/// Render context: the current camera, the transform derived from it, and
/// the last frame rendered with that transform.
///
/// The frame is only recomputed after the camera, the viewport or the
/// sampling changes, or after [`RayTracer::invalidate`].
pub struct RayTracer {
    camera: Camera,
    projection: Projection,
    sampling: Sampling,
    frame: FrameBuffer,
    dirty: bool,
}

impl RayTracer {
    pub fn new(camera: Camera, viewport: Viewport, sampling: Sampling) -> Result<Self> {
        let projection = camera.projection(viewport)?;
        Ok(Self {
            camera,
            projection,
            sampling,
            frame: FrameBuffer::new(viewport),
            dirty: true,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.projection.viewport()
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reallocates the frame for a new viewport size.
    pub fn configure_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        let viewport = Viewport::new(width, height)?;
        self.projection = self.camera.projection(viewport)?;
        self.frame = FrameBuffer::new(viewport);
        self.dirty = true;
        debug!("Viewport set to {}x{}", width, height);
        Ok(())
    }

    /// Replaces the camera pose. An invalid pose is rejected and the previous
    /// one stays in effect.
    pub fn set_camera(&mut self, camera: Camera) -> Result<()> {
        self.projection = camera.projection(self.viewport())?;
        self.camera = camera;
        self.dirty = true;
        debug!(
            "Camera moved to ({}, {}, {}), fov {}",
            camera.look_from.x, camera.look_from.y, camera.look_from.z, camera.fov_y
        );
        Ok(())
    }

    pub fn set_sampling(&mut self, sampling: Sampling) {
        if sampling != self.sampling {
            self.sampling = sampling;
            self.dirty = true;
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Returns the current frame, recomputing it first if it is stale.
    ///
    /// On error the frame stays marked stale, so the next call starts over.
    pub fn render_frame(&mut self, scene: &Scene) -> Result<&FrameBuffer> {
        if !self.dirty {
            trace!("Reusing cached frame");
            return Ok(&self.frame);
        }

        let start = Instant::now();
        let projection = self.projection;
        let offsets = self.sampling.offsets();
        let width = self.frame.width() as usize;

        self.frame
            .pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .try_for_each(|(y, row)| -> Result<()> {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = sample_pixel(scene, &projection, offsets, x as u32, y as u32)?;
                }
                Ok(())
            })?;

        self.dirty = false;
        info!(
            "Rendered {}x{} frame with {} samples per pixel in {:?}",
            self.frame.width(),
            self.frame.height(),
            offsets.len(),
            start.elapsed()
        );
        Ok(&self.frame)
    }
}

/// Mean color of the rays cast through pixel `(x, y)` at each offset.
/// Rays that hit nothing count as black.
pub fn sample_pixel(
    scene: &Scene,
    projection: &Projection,
    offsets: &[(f64, f64)],
    x: u32,
    y: u32,
) -> Result<Color> {
    let mut color = black();
    for (dx, dy) in offsets {
        let ray = projection.ray(x as f64 + 0.5 + dx, y as f64 + 0.5 + dy)?;
        color += scene.trace_ray(&ray)?;
    }
    color /= offsets.len() as f64;

    if color.iter().all(|c| c.is_finite()) {
        Ok(color)
    } else {
        Err(RenderError::NonFinite { x, y })
    }
}
