use crate::dom;
use crate::input::DragState;
use crate::render::GpuState;
use constellation_core::{FrameScheduler, OrbitControls, Viewport, Visualization};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules frames with `requestAnimationFrame`. The callback is installed
/// once by [`install_loop`]; every request re-arms the same closure.
#[derive(Clone, Default)]
pub struct RafScheduler {
    tick: TickSlot,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        let Some(w) = web::window() else {
            return;
        };
        match self.tick.borrow().as_ref() {
            Some(tick) => {
                let _ = w.request_animation_frame(tick.as_ref().unchecked_ref());
            }
            None => log::warn!("[frame] frame requested before the loop was installed"),
        }
    }
}

/// Everything the frame callback and input handlers share.
pub struct App {
    pub vis: Visualization<RafScheduler>,
    pub gpu: GpuState,
    pub controls: OrbitControls,
    pub drag: DragState,
    pub canvas: web::HtmlCanvasElement,
}

pub type SharedApp = Rc<RefCell<Option<App>>>;

impl App {
    pub fn new(
        vis: Visualization<RafScheduler>,
        gpu: GpuState,
        controls: OrbitControls,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        Self {
            vis,
            gpu,
            controls,
            drag: DragState::default(),
            canvas,
        }
    }

    pub fn frame(&mut self) {
        if self.vis.frame(&mut self.gpu).is_err() {
            log::error!("[frame] {} frames rendered before stop", self.vis.state.frame);
        }
    }

    /// Camera aspect, post targets, canvas backing store and surface all
    /// follow the new viewport before the next frame.
    pub fn resize(&mut self, viewport: Viewport) {
        let size = self.vis.resize(viewport);
        dom::size_canvas(&self.canvas, &viewport, size);
        self.gpu.resize(size);
    }
}

/// Install the animation callback that `scheduler` re-arms. Must run before
/// the scheduler's first request.
pub fn install_loop(scheduler: &RafScheduler, app: SharedApp) {
    let closure = Closure::wrap(Box::new(move || {
        if let Some(app) = app.borrow_mut().as_mut() {
            app.frame();
        }
    }) as Box<dyn FnMut()>);
    *scheduler.tick.borrow_mut() = Some(closure);
}
