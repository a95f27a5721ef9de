//! Perspective camera, its per-frame drift, and orbit-style manipulation.

use crate::constants::*;
use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Mutable camera pose: Euler angles (XYZ order, radians) and position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub rotation: Vec3,
    pub position: Vec3,
}

impl CameraState {
    #[inline]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Roll is the rotation about the camera's own view axis.
    #[inline]
    pub fn roll(&self) -> f32 {
        self.rotation.z
    }
}

/// Right-handed perspective camera with a vertical field of view in degrees.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub state: CameraState,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_deg,
            aspect,
            near,
            far,
            state: CameraState {
                rotation: Vec3::ZERO,
                position: Vec3::ZERO,
            },
        }
    }

    /// Default scene camera, looking down -Z from `CAMERA_START_Z`.
    pub fn scene_default(aspect: f32) -> Self {
        let mut cam = Self::new(CAMERA_FOV_DEG, aspect, CAMERA_NEAR, CAMERA_FAR);
        cam.state.position = Vec3::new(0.0, 0.0, CAMERA_START_Z);
        cam
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.state.quat(), self.state.position).inverse()
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Orient the camera so its -Z axis points at `target`, discarding roll.
    pub fn look_at(&mut self, target: Vec3) {
        let back = self.state.position - target;
        if back.length_squared() < 1e-12 {
            return;
        }
        let back = back.normalize();
        let up_hint = if back.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let right = up_hint.cross(back).normalize();
        let up = back.cross(right);
        let q = Quat::from_mat3(&Mat3::from_cols(right, up, back));
        let (x, y, z) = q.to_euler(EulerRot::XYZ);
        self.state.rotation = Vec3::new(x, y, z);
    }
}

/// Orbit-style camera manipulation around a fixed target.
///
/// Drags rotate the camera on a sphere around `target` (yaw about world Y,
/// pitch kept inside `ORBIT_MAX_POLAR` of the horizon); wheel input dollies
/// along the view ray. Every update re-aims the camera at `target`.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub rotate_speed: f32,
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            rotate_speed: 1.0,
            zoom_step: 0.95,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
        }
    }
}

impl OrbitControls {
    /// Rotate by a pointer drag of `(dx, dy)` pixels on a surface
    /// `viewport_height` pixels tall. A drag across the full height turns a
    /// full revolution.
    pub fn rotate(&self, camera: &mut PerspectiveCamera, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let yaw = TAU * dx / h * self.rotate_speed;
        let pitch = TAU * dy / h * self.rotate_speed;
        let (radius, theta, phi) = self.spherical(camera);
        let min_phi = FRAC_PI_2 - ORBIT_MAX_POLAR;
        let max_phi = FRAC_PI_2 + ORBIT_MAX_POLAR;
        self.place(camera, radius, theta - yaw, (phi - pitch).clamp(min_phi, max_phi));
    }

    /// Dolly in for negative `delta`, out for positive.
    pub fn dolly(&self, camera: &mut PerspectiveCamera, delta: f32) {
        if delta == 0.0 {
            return;
        }
        let (radius, theta, phi) = self.spherical(camera);
        let scale = if delta > 0.0 {
            1.0 / self.zoom_step
        } else {
            self.zoom_step
        };
        let radius = (radius * scale).clamp(self.min_distance, self.max_distance);
        self.place(camera, radius, theta, phi);
    }

    fn spherical(&self, camera: &PerspectiveCamera) -> (f32, f32, f32) {
        let offset = camera.state.position - self.target;
        let radius = offset.length();
        if radius < 1e-6 {
            return (self.min_distance, 0.0, FRAC_PI_2);
        }
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        (radius, theta, phi)
    }

    fn place(&self, camera: &mut PerspectiveCamera, radius: f32, theta: f32, phi: f32) {
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        let offset = Vec3::new(
            radius * sin_phi * sin_theta,
            radius * cos_phi,
            radius * sin_phi * cos_theta,
        );
        camera.state.position = self.target + offset;
        camera.look_at(self.target);
    }
}
