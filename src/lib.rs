#![cfg(target_arch = "wasm32")]
use constellation_core::{launch, OrbitControls, PositionGenerator};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod dom;
mod events;
mod fetch;
mod frame;
mod input;
mod render;

use constants::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("constellation-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document, CANVAS_ID)?;
    let viewport = dom::window_viewport().ok_or_else(|| anyhow::anyhow!("no window size"))?;
    dom::size_canvas(&canvas, &viewport, viewport.physical_size());
    let gpu = render::GpuContext::new(&canvas).await?;

    // The loop callback exists before launch arms the first frame; it stays
    // idle until the app slot is filled below.
    let scheduler = frame::RafScheduler::new();
    let app: frame::SharedApp = Rc::new(RefCell::new(None));
    frame::install_loop(&scheduler, app.clone());

    let tracks = fetch::HttpTracks {
        url: TRACKS_URL.to_string(),
    };
    let font = fetch::HttpFont {
        url: FONT_URL.to_string(),
    };
    let mut generator = PositionGenerator::from_entropy();
    let vis = launch(&tracks, &font, scheduler, &mut generator, viewport).await?;

    let gpu = render::GpuState::new(gpu, &vis.scene, &vis.chain);
    let controls = OrbitControls {
        rotate_speed: ORBIT_ROTATE_SPEED,
        ..OrbitControls::default()
    };
    *app.borrow_mut() = Some(frame::App::new(vis, gpu, controls, canvas.clone()));

    events::wire_window_resize(app.clone());
    events::wire_orbit_input(&canvas, app);
    log::info!("[init] running");
    Ok(())
}
