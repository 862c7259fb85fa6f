use crate::camera::Camera;

/// Keyboard camera editing: `w`/`s`, `a`/`d` and `q`/`e` move the eye along
/// y, x and z, `z`/`x` narrow or widen the field of view, and `+`/`-` scale
/// the step by ten.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraControls {
    pub rate: f64,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self { rate: 10. }
    }
}

impl CameraControls {
    /// Camera edited by `key`, or `None` when the key does not move it.
    pub fn handle_key(&mut self, key: char, camera: &Camera) -> Option<Camera> {
        let mut edited = *camera;
        match key {
            '+' => {
                self.rate *= 10.;
                return None;
            }
            '-' => {
                self.rate /= 10.;
                return None;
            }
            'w' => edited.look_from.y -= self.rate,
            's' => edited.look_from.y += self.rate,
            'a' => edited.look_from.x -= self.rate,
            'd' => edited.look_from.x += self.rate,
            'q' => edited.look_from.z -= self.rate,
            'e' => edited.look_from.z += self.rate,
            'z' => edited.fov_y -= self.rate,
            'x' => edited.fov_y += self.rate,
            _ => return None,
        }
        Some(edited)
    }

    pub fn status(&self, camera: &Camera) -> String {
        format!(
            "Camera ({:.6}, {:.6}, {:.6}); Rate: {:.6}",
            camera.look_from.x, camera.look_from.y, camera.look_from.z, self.rate
        )
    }
}
