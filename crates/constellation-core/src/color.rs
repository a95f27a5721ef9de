use crate::constants::{HUE_STEP_PER_FRAME, MARKER_LIGHTNESS, MARKER_SATURATION};

/// Cycling hue in `[0, 1)` driving the shared marker emissive color.
///
/// Accumulated in f64 so the per-frame step does not drift over long runs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorState {
    hue: f64,
}

impl ColorState {
    pub fn new(hue: f32) -> Self {
        Self {
            hue: wrap_unit_f64(hue as f64),
        }
    }

    #[inline]
    pub fn hue(&self) -> f32 {
        wrap_unit(self.hue as f32)
    }

    /// Advance by one frame step, wrapping back into `[0, 1)`.
    pub fn advance(&mut self) -> f32 {
        self.hue = wrap_unit_f64(self.hue + HUE_STEP_PER_FRAME as f64);
        self.hue()
    }

    pub fn rgb(&self) -> [f32; 3] {
        hsl_to_rgb(self.hue(), MARKER_SATURATION, MARKER_LIGHTNESS)
    }
}

#[inline]
fn wrap_unit_f64(v: f64) -> f64 {
    let w = v.rem_euclid(1.0);
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

#[inline]
fn wrap_unit(v: f32) -> f32 {
    let w = v.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

/// HSL to linear RGB, all components in `[0, 1]`.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = wrap_unit(h);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;
    [
        hue_to_channel(q, p, h + 1.0 / 3.0),
        hue_to_channel(q, p, h),
        hue_to_channel(q, p, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * 6.0 * (2.0 / 3.0 - t);
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn zero_saturation_is_gray() {
        assert!(close(hsl_to_rgb(0.42, 0.0, 0.3), [0.3, 0.3, 0.3]));
    }

    #[test]
    fn hue_wraps_below_one() {
        let mut c = ColorState::new(0.9995);
        c.advance();
        assert!(c.hue() >= 0.0 && c.hue() < 1.0);
        assert!(c.hue() < 0.01);
    }
}
