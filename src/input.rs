// Pointer bookkeeping for orbit-style camera manipulation.

/// Active drag, tracked per pointer id so a second finger cannot hijack it.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last_x: f32,
    pub last_y: f32,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, x: f32, y: f32) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last_x = x;
        self.last_y = y;
    }

    /// Movement since the last event of the dragging pointer.
    pub fn update(&mut self, pointer_id: i32, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }
}

/// Wheel delta in pixels. `delta_mode` follows `WheelEvent.deltaMode`:
/// 0 = pixels, 1 = lines, 2 = pages.
#[inline]
pub fn wheel_delta_pixels(delta_y: f64, delta_mode: u32, line_px: f32, page_px: f32) -> f32 {
    let d = delta_y as f32;
    match delta_mode {
        1 => d * line_px,
        2 => d * page_px,
        _ => d,
    }
}
