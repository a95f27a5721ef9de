// Shared fixtures for the host-side integration tests.

#![allow(dead_code)]

use constellation_core::*;
use std::fmt;

/// Minimal typeface: every glyph is a box, `?` included for fallback.
pub const BOX_FONT: &str = r#"{
    "glyphs": {
        "?": { "ha": 600, "o": "m 0 0 l 500 0 l 500 700 l 0 700" },
        "a": { "ha": 600, "o": "m 0 0 l 500 0 q 500 500 600 250 l 0 500" },
        "b": { "ha": 600, "o": "m 0 0 b 500 0 100 300 400 300 l 0 700" },
        " ": { "ha": 300 }
    },
    "resolution": 1000,
    "boundingBox": { "yMin": -200, "yMax": 800, "xMin": 0, "xMax": 600 },
    "underlineThickness": 50
}"#;

pub fn box_font() -> Typeface {
    Typeface::from_json(BOX_FONT).expect("fixture font parses")
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Scene { roll: f32, z: f32 },
    Chain { roll: f32, z: f32, passes: usize },
}

#[derive(Debug)]
pub struct RenderFailed;

impl fmt::Display for RenderFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render failed")
    }
}

/// Records every render call; optionally fails on the n-th chain render.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<Call>,
    pub fail_chain_at: Option<usize>,
    pub chains: usize,
}

impl FrameRenderer for RecordingRenderer {
    type Error = RenderFailed;

    fn render_scene(&mut self, _scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderFailed> {
        self.calls.push(Call::Scene {
            roll: camera.state.roll(),
            z: camera.state.position.z,
        });
        Ok(())
    }

    fn render_chain(
        &mut self,
        chain: &PostChain,
        _scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<(), RenderFailed> {
        let n = self.chains;
        self.chains += 1;
        if self.fail_chain_at == Some(n) {
            return Err(RenderFailed);
        }
        self.calls.push(Call::Chain {
            roll: camera.state.roll(),
            z: camera.state.position.z,
            passes: chain.passes().len(),
        });
        Ok(())
    }
}

/// Step the visualization while frames are armed, up to `max` frames.
pub fn run_frames<R: FrameRenderer>(
    vis: &mut Visualization<ManualScheduler>,
    renderer: &mut R,
    max: usize,
) -> usize {
    let mut ran = 0;
    while ran < max && vis.driver.scheduler().take_pending() {
        if vis.frame(renderer).is_err() {
            break;
        }
        ran += 1;
    }
    ran
}

pub fn small_viewport() -> Viewport {
    Viewport::new(800.0, 600.0, 1.0)
}

pub struct FailingTracks;

impl TrackSource for FailingTracks {
    async fn fetch_track_names(&self) -> Result<Vec<String>, DataFetchError> {
        Err(DataFetchError::Transport("connection refused".into()))
    }
}

pub struct FailingFont;

impl FontSource for FailingFont {
    async fn load_font(&self) -> Result<Typeface, FontLoadError> {
        Err(FontLoadError::Status(404))
    }
}
