use crate::constants::{WHEEL_PIXELS_PER_LINE, WHEEL_PIXELS_PER_PAGE};
use crate::dom;
use crate::frame::SharedApp;
use crate::input;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    name: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_window_resize(app: SharedApp) {
    let Some(window) = web::window() else {
        return;
    };
    listen(&window, "resize", move |_: web::Event| {
        let Some(viewport) = dom::window_viewport() else {
            return;
        };
        if let Some(app) = app.borrow_mut().as_mut() {
            app.resize(viewport);
        }
    });
}

/// Drag to orbit, wheel to dolly.
pub fn wire_orbit_input(canvas: &web::HtmlCanvasElement, app: SharedApp) {
    {
        let app = app.clone();
        let canvas_down = canvas.clone();
        listen(canvas, "pointerdown", move |ev: web::PointerEvent| {
            if let Some(app) = app.borrow_mut().as_mut() {
                app.drag
                    .begin(ev.pointer_id(), ev.client_x() as f32, ev.client_y() as f32);
                let _ = canvas_down.set_pointer_capture(ev.pointer_id());
            }
        });
    }
    {
        let app = app.clone();
        listen(canvas, "pointermove", move |ev: web::PointerEvent| {
            let mut guard = app.borrow_mut();
            let Some(app) = guard.as_mut() else {
                return;
            };
            let Some((dx, dy)) =
                app.drag
                    .update(ev.pointer_id(), ev.client_x() as f32, ev.client_y() as f32)
            else {
                return;
            };
            let height = app.canvas.client_height() as f32;
            app.controls
                .rotate(&mut app.vis.state.camera, dx, dy, height);
        });
    }
    for name in ["pointerup", "pointercancel"] {
        let app = app.clone();
        listen(canvas, name, move |ev: web::PointerEvent| {
            if let Some(app) = app.borrow_mut().as_mut() {
                app.drag.end(ev.pointer_id());
            }
        });
    }
    listen(canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let delta = input::wheel_delta_pixels(
            ev.delta_y(),
            ev.delta_mode(),
            WHEEL_PIXELS_PER_LINE,
            WHEEL_PIXELS_PER_PAGE,
        );
        if let Some(app) = app.borrow_mut().as_mut() {
            app.controls.dolly(&mut app.vis.state.camera, delta);
        }
    });
}
