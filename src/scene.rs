use nalgebra::{Point3, Vector3};

use crate::error::{RenderError, Result};
use crate::math::{black, coincident, reflect, unitary, Color};
use crate::object::{Light, Material, Object};
use crate::ray::Ray;
use crate::shape::{Intersection, Shape};

/// Everything the tracer can see. Built once, then only read while rendering.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    objects: Vec<Object>,
    materials: Vec<Material>,
    lights: Vec<Light>,
    ambient_intensity: f64,
}

impl Scene {
    pub fn new(ambient_intensity: f64) -> Self {
        Self {
            objects: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            ambient_intensity,
        }
    }

    /// A white ball resting under a large blue cube, lit by two white lights.
    pub fn demo() -> Result<Self> {
        let mut scene = Scene::new(0.);
        let up = Vector3::new(0., 1., 0.);

        scene.add(
            Shape::sphere(Point3::new(0., -2., 0.), 2.)?,
            up,
            Material::new(0., 0.5, 50., 0.5, 0.8, Color::new(1., 1., 1.)),
        );
        scene.add(
            Shape::cube(Point3::new(0., 40., 0.), 80.)?,
            up,
            Material::new(0., 0.5, 50., 0.5, 0.1, Color::new(0., 0., 1.)),
        );

        scene.add_light(Light::new(Point3::new(0., -11., 11.), Color::new(1., 1., 1.), 250.));
        scene.add_light(Light::new(Point3::new(-5., -5., 10.), Color::new(1., 1., 1.), 50.));

        Ok(scene)
    }

    /// Two facing balls over a floor, one of them a near mirror.
    pub fn mirrors() -> Result<Self> {
        let mut scene = Scene::new(0.2);
        let up = Vector3::new(0., 1., 0.);
        let plain = |color: Color| Material::new(0., 0.4, 30., 0.8, 0.5, color);

        // floor
        scene.add(
            Shape::cube(Point3::new(0., -101., 0.), 200.)?,
            up,
            plain(Color::new(0.8, 0.8, 0.8)),
        );

        // mirror ball
        scene.add(
            Shape::sphere(Point3::new(-1.2, 0., 0.), 1.)?,
            up,
            Material::new(0.8, 0.6, 80., 0.2, 0.1, Color::new(1., 1., 1.)),
        );

        // red
        scene.add(
            Shape::sphere(Point3::new(1.2, 0., 0.), 1.)?,
            up,
            Material::new(0.2, 0.5, 50., 0.8, 0.5, Color::new(1., 0., 0.)),
        );

        // cubes
        scene.add(
            Shape::cube(Point3::new(0., -0.5, 2.), 1.)?,
            up,
            plain(Color::new(0., 0., 1.)),
        );
        scene.add(
            Shape::cube(Point3::new(0., -0.5, -2.), 1.)?,
            up,
            plain(Color::new(0., 0., 1.)),
        );

        scene.add_light(Light::new(Point3::new(0., 10., 10.), Color::new(1., 1., 1.), 400.));
        scene.add_light(Light::new(Point3::new(-6., 6., -4.), Color::new(1., 0.9, 0.8), 200.));

        Ok(scene)
    }

    /// Appends an object, reusing an identical material if one is already stored.
    /// Returns the index of the new object.
    pub fn add(&mut self, shape: Shape, up: Vector3<f64>, material: Material) -> usize {
        let material = match self.materials.iter().position(|m| *m == material) {
            Some(index) => index,
            None => {
                self.materials.push(material);
                self.materials.len() - 1
            }
        };
        self.objects.push(Object { shape, up, material });
        self.objects.len() - 1
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_ambient_intensity(&mut self, ambient_intensity: f64) {
        self.ambient_intensity = ambient_intensity;
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn ambient_intensity(&self) -> f64 {
        self.ambient_intensity
    }

    /// Material of the object at `index`.
    pub fn material_of(&self, index: usize) -> Result<&Material> {
        let object = self.objects.get(index).ok_or(RenderError::MaterialIndex {
            index,
            count: self.objects.len(),
        })?;
        self.materials
            .get(object.material)
            .ok_or(RenderError::MaterialIndex {
                index: object.material,
                count: self.materials.len(),
            })
    }

    /// Nearest hit closer than the ray's strength, with the index of the object hit.
    pub fn closest_intersection(&self, ray: &Ray) -> Option<(usize, Intersection)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(index, object)| object.shape.intersect_ray(ray).map(|i| (index, i)))
            .filter(|(_, i)| i.distance >= 0. && i.distance < ray.strength)
            .fold(None, |acc, (index, intersection)| match acc {
                Some((_, min_i)) if min_i.distance <= intersection.distance => acc,
                _ => Some((index, intersection)),
            })
    }

    /// Color seen along `ray`; black when nothing is hit.
    pub fn trace_ray(&self, ray: &Ray) -> Result<Color> {
        match self.closest_intersection(ray) {
            Some((index, intersection)) => self.shade(ray, index, &intersection),
            None => Ok(black()),
        }
    }

    /// Color leaving the hit point back along `ray`: ambient, mirror reflection
    /// and the direct contribution of every light that can see the point.
    pub fn shade(&self, ray: &Ray, index: usize, intersection: &Intersection) -> Result<Color> {
        let material = self.material_of(index)?;
        let normal = unitary(&intersection.normal)?;
        let view = -ray.direction;

        let mut color = material.color * self.ambient_intensity * material.ambient;

        if material.reflection > 0. {
            color *= 1. - material.reflection;
            if let Some(reflected) = self.trace_reflection(ray, intersection, &normal, material)? {
                color += material.reflection * reflected;
            }
        }

        color += self.compute_lighting(material, intersection, &normal, &view)?;
        Ok(color)
    }

    fn trace_reflection(
        &self,
        ray: &Ray,
        intersection: &Intersection,
        normal: &Vector3<f64>,
        material: &Material,
    ) -> Result<Option<Color>> {
        let strength = reflected_strength(ray.strength, intersection.distance, material.reflection);
        if strength <= 0. {
            return Ok(None);
        }

        let direction = unitary(&reflect(&-ray.direction, normal))?;
        let reflected = Ray::new(intersection.point, direction, strength);

        match self.closest_intersection(&reflected) {
            // landing back on the same point would bounce forever
            Some((index, next)) if !coincident(&next.point, &intersection.point) => {
                self.shade(&reflected, index, &next).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn compute_lighting(
        &self,
        material: &Material,
        intersection: &Intersection,
        normal: &Vector3<f64>,
        view: &Vector3<f64>,
    ) -> Result<Color> {
        self.lights.iter().try_fold(black(), |acc, light| -> Result<Color> {
            Ok(acc + self.compute_point_light(light, material, intersection, normal, view)?)
        })
    }

    pub(crate) fn compute_point_light(
        &self,
        light: &Light,
        material: &Material,
        intersection: &Intersection,
        normal: &Vector3<f64>,
        view: &Vector3<f64>,
    ) -> Result<Color> {
        if !self.is_lit(light, &intersection.point)? {
            return Ok(black());
        }

        let to_light = light.position - intersection.point;
        let attenuation = light.intensity / to_light.norm_squared();
        let l = unitary(&to_light)?;
        let n_dot_l = normal.dot(&l);

        let mut color = black();

        let r = reflect(&l, normal);
        let phi = r.dot(view) / (r.norm() * view.norm());
        if phi > 0. {
            color += material.specular * phi.powf(material.shininess) * attenuation * light.color;
        }

        if material.reflection < 1. {
            let diffuse =
                (material.diffuse * (1. - material.reflection) * n_dot_l * attenuation).max(0.);
            color += material.color.component_mul(&(diffuse * light.color));
        }

        Ok(color)
    }

    /// True when the first thing a ray from the light meets is `point` itself.
    /// A light sitting on the point has no direction to it and lights nothing.
    fn is_lit(&self, light: &Light, point: &Point3<f64>) -> Result<bool> {
        if coincident(&light.position, point) {
            return Ok(false);
        }
        let shadow = Ray::between(&light.position, point, light.intensity)?;
        Ok(self
            .closest_intersection(&shadow)
            .map_or(false, |(_, blocker)| coincident(&blocker.point, point)))
    }
}

/// Budget handed to a reflected ray: what the parent had left after reaching
/// the surface, scaled by how much the surface reflects.
pub fn reflected_strength(parent: f64, traveled: f64, reflection: f64) -> f64 {
    (parent - traveled) * reflection
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::PRECISION;

    fn matte(color: Color) -> Material {
        Material::new(0., 0.5, 50., 0.5, 0.1, color)
    }

    fn up() -> Vector3<f64> {
        Vector3::new(0., 1., 0.)
    }

    fn sphere(center: Point3<f64>, radius: f64) -> Shape {
        Shape::sphere(center, radius).unwrap()
    }

    #[test]
    fn test_material_dedup() {
        let mut scene = Scene::new(0.1);
        let red = matte(Color::new(1., 0., 0.));
        let green = matte(Color::new(0., 1., 0.));
        let a = scene.add(sphere(Point3::new(0., 0., 0.), 1.), up(), red);
        let b = scene.add(Shape::cube(Point3::new(5., 0., 0.), 1.).unwrap(), up(), red);
        let c = scene.add(sphere(Point3::new(-5., 0., 0.), 1.), up(), green);

        assert_eq!(scene.materials().len(), 2);
        assert_eq!(scene.objects()[a].material, scene.objects()[b].material);
        assert_ne!(scene.objects()[a].material, scene.objects()[c].material);
    }

    #[test]
    fn test_material_dedup_includes_ambient() {
        let mut scene = Scene::new(0.1);
        let red = Color::new(1., 0., 0.);
        let dim = Material::new(0., 0.5, 50., 0.5, 0.1, red);
        let bright = Material::new(0., 0.5, 50., 0.5, 0.2, red);
        scene.add(sphere(Point3::origin(), 1.), up(), dim);
        scene.add(sphere(Point3::origin(), 1.), up(), bright);
        assert_eq!(scene.materials().len(), 2);
    }

    #[test]
    fn test_material_of_out_of_range() {
        let scene = Scene::new(0.);
        assert_eq!(
            scene.material_of(3),
            Err(RenderError::MaterialIndex { index: 3, count: 0 })
        );
    }

    #[test]
    fn test_closest_intersection() {
        let mut scene = Scene::new(0.);
        scene.add(sphere(Point3::new(0., 0., 10.), 1.), up(), matte(Color::new(1., 0., 0.)));
        let green = matte(Color::new(0., 1., 0.));
        let near = scene.add(sphere(Point3::new(0., 0., 5.), 1.), up(), green);

        let ray = Ray::new(Point3::origin(), Vector3::new(0., 0., 1.), 100.);
        let (index, hit) = scene.closest_intersection(&ray).unwrap();
        assert_eq!(index, near);
        assert!((hit.distance - 4.).abs() < PRECISION);
    }

    #[test]
    fn test_closest_intersection_respects_strength() {
        let mut scene = Scene::new(0.);
        scene.add(sphere(Point3::new(0., 0., 5.), 1.), up(), matte(Color::new(1., 0., 0.)));

        let short = Ray::new(Point3::origin(), Vector3::new(0., 0., 1.), 3.);
        assert!(scene.closest_intersection(&short).is_none());
    }

    #[test]
    fn test_miss() {
        let mut scene = Scene::new(0.5);
        let red = matte(Color::new(1., 0., 0.));
        scene.add(sphere(Point3::new(0., 0., 5.), 1.), up(), red);
        scene.add(Shape::cube(Point3::new(5., 0., 5.), 1.).unwrap(), up(), red);

        let ray = Ray::new(Point3::origin(), Vector3::new(0., 1., 0.), 100.);
        assert!(scene.closest_intersection(&ray).is_none());
        assert_eq!(scene.trace_ray(&ray), Ok(black()));
    }

    #[test]
    fn test_ambient_only() {
        let mut scene = Scene::new(0.5);
        scene.add(
            Shape::sphere(Point3::new(0., 0., 5.), 1.).unwrap(),
            up(),
            Material::new(0., 0., 1., 0., 0.4, Color::new(1., 0.5, 0.)),
        );
        let ray = Ray::new(Point3::origin(), Vector3::new(0., 0., 1.), 100.);
        let color = scene.trace_ray(&ray).unwrap();
        assert!((color - Color::new(0.2, 0.1, 0.)).norm() < PRECISION);

        scene.set_ambient_intensity(1.);
        assert_eq!(scene.ambient_intensity(), 1.);
        let color = scene.trace_ray(&ray).unwrap();
        assert!((color - Color::new(0.4, 0.2, 0.)).norm() < PRECISION);
    }

    #[test]
    fn test_light_on_surface() {
        let mut scene = Scene::new(0.5);
        scene.add(
            sphere(Point3::new(0., 0., 5.), 1.),
            up(),
            Material::new(0., 0.5, 50., 0.5, 0.4, Color::new(1., 0.5, 0.)),
        );
        // exactly where the ray meets the sphere
        scene.add_light(Light::new(Point3::new(0., 0., 4.), Color::new(1., 1., 1.), 100.));

        let ray = Ray::new(Point3::origin(), Vector3::new(0., 0., 1.), 100.);
        let color = scene.trace_ray(&ray).unwrap();
        assert!((color - Color::new(0.2, 0.1, 0.)).norm() < PRECISION);
    }

    fn shadow_scene(with_blocker: bool) -> Scene {
        let mut scene = Scene::new(0.);
        // floor with its top face at y = -5
        let floor = Shape::cube(Point3::new(0., -10., 0.), 10.).unwrap();
        scene.add(floor, up(), matte(Color::new(1., 1., 1.)));
        if with_blocker {
            scene.add(sphere(Point3::origin(), 1.), up(), matte(Color::new(1., 0., 0.)));
        }
        scene.add_light(Light::new(Point3::new(0., 10., 0.), Color::new(1., 1., 1.), 1000.));
        scene
    }

    fn floor_ray() -> Ray {
        Ray::between(&Point3::new(2., -4., 0.), &Point3::new(0., -5., 0.), 100.).unwrap()
    }

    #[test]
    fn test_unblocked_light() {
        let scene = shadow_scene(false);
        let color = scene.trace_ray(&floor_ray()).unwrap();
        assert!(color.x > 0. && color.y > 0. && color.z > 0.);
    }

    #[test]
    fn test_shadow() {
        let scene = shadow_scene(true);
        let ray = floor_ray();
        let (index, hit) = scene.closest_intersection(&ray).unwrap();
        assert_eq!(index, 0);
        assert!((hit.point - Point3::new(0., -5., 0.)).norm() < PRECISION);

        let material = scene.material_of(index).unwrap();
        let normal = hit.normal.normalize();
        let view = -ray.direction;
        let light = scene.compute_point_light(&scene.lights()[0], material, &hit, &normal, &view);
        assert_eq!(light, Ok(black()));
        assert_eq!(scene.trace_ray(&ray), Ok(black()));
    }

    #[test]
    fn test_shadow_budget() {
        let mut scene = shadow_scene(false);
        scene.lights.clear();
        // the floor is 15 units from the light, beyond this budget
        scene.add_light(Light::new(Point3::new(0., 10., 0.), Color::new(1., 1., 1.), 10.));
        assert_eq!(scene.trace_ray(&floor_ray()), Ok(black()));
    }

    #[test]
    fn test_reflected_strength() {
        let cases = [(100., 5., 0.5), (800., 0., 0.9), (10., 10., 0.3), (50., 2.5, 1.)];
        for &(parent, traveled, c) in cases.iter() {
            let strength = reflected_strength(parent, traveled, c);
            assert!(strength <= parent * c);
        }
    }

    #[test]
    fn test_reflection() {
        let mut scene = Scene::new(1.);
        // black mirror, top face at y = 1
        scene.add(
            Shape::cube(Point3::origin(), 2.).unwrap(),
            up(),
            Material::new(0.5, 0., 1., 0., 0., Color::new(0., 0., 0.)),
        );
        scene.add(
            Shape::sphere(Point3::new(4., 5., 0.), 0.5).unwrap(),
            up(),
            Material::new(0., 0., 1., 0., 1., Color::new(1., 0., 0.)),
        );

        let ray = Ray::between(&Point3::new(-4., 5., 0.), &Point3::new(0., 1., 0.), 100.).unwrap();
        let color = scene.trace_ray(&ray).unwrap();
        assert!((color - Color::new(0.5, 0., 0.)).norm() < PRECISION);
    }

    #[test]
    fn test_reflection_out_of_budget() {
        let mut scene = Scene::new(1.);
        scene.add(
            Shape::cube(Point3::origin(), 2.).unwrap(),
            up(),
            Material::new(0.5, 0., 1., 0., 0., Color::new(0., 0., 0.)),
        );
        scene.add(
            Shape::sphere(Point3::new(4., 5., 0.), 0.5).unwrap(),
            up(),
            Material::new(0., 0., 1., 0., 1., Color::new(1., 0., 0.)),
        );

        // about 5.7 units to the mirror, leaving (7 - 5.7) * 0.5 for the bounce
        let ray = Ray::between(&Point3::new(-4., 5., 0.), &Point3::new(0., 1., 0.), 7.).unwrap();
        assert_eq!(scene.trace_ray(&ray), Ok(black()));
    }

    #[test]
    fn test_parallel_mirrors_terminate() {
        let mut scene = Scene::new(1.);
        let mirror = Material::new(0.9, 0., 1., 0., 1., Color::new(1., 1., 1.));
        scene.add(Shape::cube(Point3::origin(), 2.).unwrap(), up(), mirror);
        scene.add(Shape::cube(Point3::new(0., 10., 0.), 2.).unwrap(), up(), mirror);

        let ray = Ray::new(Point3::new(0., 5., 0.), Vector3::new(0., -1., 0.), 800.);
        let color = scene.trace_ray(&ray).unwrap();
        assert!(color.iter().all(|c| c.is_finite() && *c > 0.));
    }

    #[test]
    fn test_sample_scenes() {
        let demo = Scene::demo().unwrap();
        assert_eq!(demo.objects().len(), 2);
        assert_eq!(demo.materials().len(), 2);
        assert_eq!(demo.lights().len(), 2);

        let mirrors = Scene::mirrors().unwrap();
        assert_eq!(mirrors.objects().len(), 5);
        // the two small cubes share one material
        assert_eq!(mirrors.materials().len(), 4);
    }
}
