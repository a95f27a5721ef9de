//! GPU uniform layouts shared by `scene.wgsl` and `post.wgsl`.

use crate::camera::PerspectiveCamera;
use crate::post::{Pass, PassKind, PostChain};
use crate::scene::{Material, MaterialKind};
use glam::{Mat4, Vec3};

/// Two triangles covering the unit sprite quad, in `vs_sprite` corner space.
pub const SPRITE_CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub right: [f32; 4],
    pub up: [f32; 4],
    pub ambient: [f32; 4],
}

impl CameraUniforms {
    pub fn new(camera: &PerspectiveCamera, ambient: [f32; 3]) -> Self {
        let q = camera.state.quat();
        let right = q * Vec3::X;
        let up = q * Vec3::Y;
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
            ambient: [ambient[0], ambient[1], ambient[2], 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    /// x: sprite size in world units
    pub params: [f32; 4],
}

impl ObjectUniforms {
    /// Point materials carry their own sprite size; other kinds get zero.
    pub fn new(model: Mat4, material: &Material) -> Self {
        let size = match material.kind {
            MaterialKind::Points { size } => size,
            _ => 0.0,
        };
        let [r, g, b] = material.color;
        let [er, eg, eb] = material.emissive;
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, 1.0],
            emissive: [er, eg, eb, 1.0],
            params: [size, 0.0, 0.0, 0.0],
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.params[0] = size;
        self
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub threshold: f32,
    pub blur_dir: [f32; 2],
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub noise_intensity: f32,
    pub scanline_intensity: f32,
    pub scanline_count: f32,
    pub grayscale: f32,
}

impl PostUniforms {
    /// Parameters for one pass of `chain`. `resolution` is the size of the
    /// pass output, which is also the texel grid the blur steps across.
    pub fn for_pass(pass: &Pass, chain: &PostChain, time: f32) -> Self {
        let (w, h) = chain.targets().size_of(pass.output);
        let mut u = Self {
            resolution: [w as f32, h as f32],
            time,
            ..Self::default()
        };
        if let Some(bloom) = chain.bloom() {
            u.threshold = bloom.threshold;
            u.bloom_strength = bloom.strength;
            u.bloom_radius = bloom.radius;
        }
        if let Some(film) = chain.film() {
            u.noise_intensity = film.noise_intensity;
            u.scanline_intensity = film.scanline_intensity;
            u.scanline_count = film.scanline_count;
            u.grayscale = if film.grayscale { 1.0 } else { 0.0 };
        }
        u.blur_dir = match pass.kind {
            PassKind::BlurHorizontal => [1.0, 0.0],
            PassKind::BlurVertical => [0.0, 1.0],
            _ => [0.0, 0.0],
        };
        u
    }
}
