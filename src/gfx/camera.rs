//! Fixed hero camera and the uniform block shared with the shader.

use cgmath::{perspective, Deg, Matrix4, Point3, SquareMatrix, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// The hero is framed from a fixed position; only the model moves.
#[derive(Debug, Clone)]
pub struct HeroCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl HeroCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Point3::new(0.0, 0.4, 4.5),
            target: Point3::new(0.0, 0.0, 0.0),
            fovy: Deg(45.0),
            aspect: aspect(width, height),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect(width, height);
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, Vector3::unit_y());
        let proj = perspective(self.fovy, self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HeroUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Model colour in rgb, opacity in a
    pub tint: [f32; 4],
    /// Direction towards the key light; w unused (padding)
    pub light_dir: [f32; 4],
}

impl Default for HeroUniform {
    fn default() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
            model: Matrix4::identity().into(),
            tint: [1.0, 1.0, 1.0, 1.0],
            light_dir: [0.4, 0.8, 0.6, 0.0],
        }
    }
}

impl HeroUniform {
    pub fn new(camera: &HeroCamera, model: Matrix4<f32>, color: [f32; 3], opacity: f32) -> Self {
        Self {
            view_proj: camera.view_proj().into(),
            model: model.into(),
            tint: [color[0], color[1], color[2], opacity.clamp(0.0, 1.0)],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_survives_zero_height() {
        let camera = HeroCamera::new(800, 0);
        assert_eq!(camera.aspect, 800.0);
    }

    #[test]
    fn test_uniform_size_is_aligned() {
        assert_eq!(std::mem::size_of::<HeroUniform>() % 16, 0);
    }
}
