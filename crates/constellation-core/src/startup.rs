//! Startup orchestration and the running visualization.

use crate::animation::{AnimationDriver, AnimationState, FrameRenderer};
use crate::error::StartupError;
use crate::positions::PositionGenerator;
use crate::post::PostChain;
use crate::scene::{Scene, SceneAssembler};
use crate::scheduler::FrameScheduler;
use crate::tracks::{FontSource, TrackSource};
use crate::viewport::{apply_resize, PhysicalSize, Viewport};
use rand::Rng;

/// A fully assembled scene with its animation loop armed.
pub struct Visualization<S: FrameScheduler> {
    pub scene: Scene,
    pub state: AnimationState,
    pub chain: PostChain,
    pub driver: AnimationDriver<S>,
}

impl<S: FrameScheduler> Visualization<S> {
    /// One scheduled frame callback.
    pub fn frame<R: FrameRenderer>(&mut self, renderer: &mut R) -> Result<(), R::Error> {
        self.driver
            .frame(&mut self.state, &mut self.scene, &self.chain, renderer)
    }

    /// Viewport change: camera aspect and post-chain targets follow
    /// immediately. The renderer must reconfigure to the returned size.
    pub fn resize(&mut self, viewport: Viewport) -> PhysicalSize {
        apply_resize(&mut self.state.camera, &mut self.chain, viewport)
    }
}

/// Fetch track names, then load the font, then build everything and arm the
/// first frame. Any failure returns before a scene exists or a frame is
/// requested.
pub async fn launch<T, F, S, R>(
    tracks: &T,
    fonts: &F,
    scheduler: S,
    generator: &mut PositionGenerator<R>,
    viewport: Viewport,
) -> Result<Visualization<S>, StartupError>
where
    T: TrackSource,
    F: FontSource,
    S: FrameScheduler,
    R: Rng,
{
    let names = tracks.fetch_track_names().await.map_err(|e| {
        log::error!("[startup] track fetch failed: {}", e);
        e
    })?;
    let font = fonts.load_font().await.map_err(|e| {
        log::error!("[startup] font load failed: {}", e);
        e
    })?;

    let size = viewport.physical_size();
    let assembled = SceneAssembler::new(&font)
        .with_aspect(size.width as f32 / size.height as f32)
        .assemble(&names, generator);

    let mut driver = AnimationDriver::new(scheduler);
    driver.start();
    Ok(Visualization {
        scene: assembled.scene,
        state: AnimationState::new(assembled.camera),
        chain: PostChain::standard(size.width, size.height),
        driver,
    })
}
