//! Per-frame animation: particle spin, label billboarding, hue cycling and
//! camera drift, followed by the direct and post-processed renders.
//!
//! All mutable animation state lives in [`AnimationState`] and the [`Scene`]
//! it is applied to; nothing is global. Frames are driven through a
//! [`FrameScheduler`], so a test can step any number of frames without a
//! display.

use crate::camera::PerspectiveCamera;
use crate::color::ColorState;
use crate::constants::*;
use crate::post::PostChain;
use crate::scene::Scene;
use crate::scheduler::FrameScheduler;

/// Backend that draws a scene.
pub trait FrameRenderer {
    type Error: std::fmt::Display;

    /// Render the scene straight from the camera, without post-processing.
    fn render_scene(&mut self, scene: &Scene, camera: &PerspectiveCamera)
        -> Result<(), Self::Error>;

    /// Run every pass of `chain` and present the result.
    fn render_chain(
        &mut self,
        chain: &PostChain,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<(), Self::Error>;
}

/// f64 running total mirrored into an f32 scene value.
///
/// Per-frame steps are far below the f32 spacing once the value grows into
/// the hundreds, so the total is kept here and only the rounded result is
/// written out. A mirror that no longer matches (orbit input, a manual edit)
/// re-seeds the total from it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accumulator {
    total: f64,
}

impl Accumulator {
    pub fn new(value: f32) -> Self {
        Self {
            total: value as f64,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Add `delta` and return the value to store in `mirror`.
    pub fn step(&mut self, mirror: f32, delta: f32) -> f32 {
        if mirror != self.total as f32 {
            self.total = mirror as f64;
        }
        self.total += delta as f64;
        self.total as f32
    }
}

#[derive(Clone, Debug)]
pub struct AnimationState {
    pub camera: PerspectiveCamera,
    pub color: ColorState,
    pub frame: u64,
    pub roll: Accumulator,
    pub dolly: Accumulator,
    pub spin: Accumulator,
}

impl AnimationState {
    pub fn new(camera: PerspectiveCamera) -> Self {
        let roll = Accumulator::new(camera.state.rotation.z);
        let dolly = Accumulator::new(camera.state.position.z);
        Self {
            camera,
            color: ColorState::default(),
            frame: 0,
            roll,
            dolly,
            spin: Accumulator::default(),
        }
    }
}

/// Spin the bright field, face labels to the camera, advance the hue and
/// recolor the shared marker material.
pub fn prepare_frame(state: &mut AnimationState, scene: &mut Scene) {
    scene.bright_field.rotation_y = state
        .spin
        .step(scene.bright_field.rotation_y, BRIGHT_FIELD_SPIN_PER_FRAME);

    let facing = state.camera.state.rotation;
    for label in &mut scene.labels {
        label.rotation = facing;
    }

    state.color.advance();
    let rgb = state.color.rgb();
    let marker_material = scene.marker_material;
    scene.material_mut(marker_material).emissive = rgb;
}

/// Roll the camera and dolly it toward -Z. There is no clamping; the drift
/// accumulates for as long as the loop runs.
pub fn drift_camera(state: &mut AnimationState) {
    let pose = &mut state.camera.state;
    pose.rotation.z = state.roll.step(pose.rotation.z, CAMERA_ROLL_PER_FRAME);
    pose.position.z = state.dolly.step(pose.position.z, -CAMERA_DOLLY_PER_FRAME);
}

/// Self-rescheduling frame loop. It has a single running state; a frame that
/// fails to render is not rescheduled, which ends the loop.
pub struct AnimationDriver<S: FrameScheduler> {
    scheduler: S,
    running: bool,
}

impl<S: FrameScheduler> AnimationDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            running: false,
        }
    }

    /// Arm the first frame.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.scheduler.request_frame();
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Run one frame and arm the next.
    pub fn frame<R: FrameRenderer>(
        &mut self,
        state: &mut AnimationState,
        scene: &mut Scene,
        chain: &PostChain,
        renderer: &mut R,
    ) -> Result<(), R::Error> {
        if !self.running {
            return Ok(());
        }
        prepare_frame(state, scene);
        if let Err(e) = renderer.render_scene(scene, &state.camera) {
            return Err(self.halt(e));
        }
        drift_camera(state);
        if let Err(e) = renderer.render_chain(chain, scene, &state.camera) {
            return Err(self.halt(e));
        }
        state.frame += 1;
        self.scheduler.request_frame();
        Ok(())
    }

    fn halt<E: std::fmt::Display>(&mut self, e: E) -> E {
        log::error!("[frame] render failed, animation stopped: {}", e);
        self.running = false;
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulator_keeps_stepping_past_f32_spacing() {
        let mut acc = Accumulator::new(2048.0);
        let mut mirror = 2048.0_f32;
        for _ in 0..1000 {
            mirror = acc.step(mirror, 0.00008);
        }
        assert!((acc.total() - (2048.0 + 1000.0 * 0.00008_f32 as f64)).abs() < 1e-9);
        assert!(mirror > 2048.0);
    }

    #[test]
    fn accumulator_reseeds_from_external_writes() {
        let mut acc = Accumulator::new(1.0);
        acc.step(1.0, 0.5);
        let v = acc.step(-3.0, 0.5);
        assert_eq!(v, -2.5);
        assert_eq!(acc.total(), -2.5);
    }
}
