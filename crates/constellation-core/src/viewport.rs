use crate::camera::PerspectiveCamera;
use crate::constants::MAX_PIXEL_RATIO;
use crate::post::PostChain;

/// Host viewport in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

/// Backing-store size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio,
        }
    }

    /// Output pixel density, capped at `MAX_PIXEL_RATIO`.
    pub fn pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    pub fn physical_size(&self) -> PhysicalSize {
        let ratio = self.pixel_ratio();
        let px = |css: f64| {
            let v = (css.max(0.0) * ratio).floor();
            if v.is_finite() {
                (v as u32).max(1)
            } else {
                1
            }
        };
        PhysicalSize {
            width: px(self.css_width),
            height: px(self.css_height),
        }
    }
}

/// Resize cascade for one viewport change: camera aspect, then the post
/// chain's offscreen targets. Returns the surface size the renderer must
/// reconfigure to.
pub fn apply_resize(
    camera: &mut PerspectiveCamera,
    chain: &mut PostChain,
    viewport: Viewport,
) -> PhysicalSize {
    let size = viewport.physical_size();
    camera.set_viewport(size.width, size.height);
    chain.set_size(size.width, size.height);
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        assert_eq!(Viewport::new(100.0, 100.0, 3.0).pixel_ratio(), 2.0);
        assert_eq!(Viewport::new(100.0, 100.0, 1.5).pixel_ratio(), 1.5);
        assert_eq!(Viewport::new(100.0, 100.0, 0.0).pixel_ratio(), 1.0);
    }

    #[test]
    fn physical_size_scales_and_never_hits_zero() {
        let s = Viewport::new(640.0, 480.0, 3.0).physical_size();
        assert_eq!((s.width, s.height), (1280, 960));
        let s = Viewport::new(0.0, 0.0, 1.0).physical_size();
        assert_eq!((s.width, s.height), (1, 1));
    }
}
