use constellation_core::{PhysicalSize, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn find_canvas(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id} element"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("#{id} is not a canvas"))
}

/// Window inner size in CSS pixels and the device pixel ratio.
pub fn window_viewport() -> Option<Viewport> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width, height, w.device_pixel_ratio()))
}

/// Backing store at physical size, CSS box at the window size.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, viewport: &Viewport, size: PhysicalSize) {
    canvas.set_width(size.width);
    canvas.set_height(size.height);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", viewport.css_width));
    let _ = style.set_property("height", &format!("{}px", viewport.css_height));
}
