//! Whitted-style ray caster: spheres and cubes lit by point lights, with
//! shadows, mirror reflection and fixed-pattern anti-aliasing.
//!
//! Build a [`Scene`], create a [`RayTracer`] for a camera and viewport, and
//! call [`RayTracer::render_frame`] whenever a fresh frame is wanted. The
//! frame is cached until the camera, viewport or sampling changes.

pub mod camera;
pub mod controls;
pub mod error;
pub mod frame;
pub mod math;
pub mod object;
pub mod ray;
pub mod sampling;
pub mod scene;
pub mod shape;
pub mod tracer;

pub use camera::{Camera, Viewport};
pub use controls::CameraControls;
pub use error::{RenderError, Result};
pub use frame::FrameBuffer;
pub use math::Color;
pub use object::{Light, Material};
pub use ray::Ray;
pub use sampling::{Pattern, Sampling};
pub use scene::Scene;
pub use shape::{Intersection, Shape};
pub use tracer::RayTracer;
