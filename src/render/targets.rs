use super::helpers;
use constellation_core::{ChainTargets, Target};

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen color targets of the post chain.
///
/// `hdr` holds the scene, `bloom_a`/`bloom_b` are the half-resolution
/// bright-pass and blur ping-pong pair, `composite` is scene plus bloom
/// before grain. All are Rgba16Float.
pub(crate) struct RenderTargets {
    sizes: ChainTargets,
    _hdr: wgpu::Texture,
    hdr_view: wgpu::TextureView,
    _bloom_a: wgpu::Texture,
    bloom_a_view: wgpu::TextureView,
    _bloom_b: wgpu::Texture,
    bloom_b_view: wgpu::TextureView,
    _composite: wgpu::Texture,
    composite_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, sizes: ChainTargets) -> Self {
        let (hdr, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", sizes.width, sizes.height, HDR_FORMAT);
        let (bloom_a, bloom_a_view) = helpers::create_color_texture(
            device,
            "bloom_a",
            sizes.bloom_width,
            sizes.bloom_height,
            HDR_FORMAT,
        );
        let (bloom_b, bloom_b_view) = helpers::create_color_texture(
            device,
            "bloom_b",
            sizes.bloom_width,
            sizes.bloom_height,
            HDR_FORMAT,
        );
        let (composite, composite_view) = helpers::create_color_texture(
            device,
            "composite_tex",
            sizes.width,
            sizes.height,
            HDR_FORMAT,
        );
        Self {
            sizes,
            _hdr: hdr,
            hdr_view,
            _bloom_a: bloom_a,
            bloom_a_view,
            _bloom_b: bloom_b,
            bloom_b_view,
            _composite: composite,
            composite_view,
        }
    }

    #[inline]
    pub(crate) fn sizes(&self) -> ChainTargets {
        self.sizes
    }

    /// Offscreen view for `target`; `Screen` has none.
    pub(crate) fn view(&self, target: Target) -> Option<&wgpu::TextureView> {
        match target {
            Target::Hdr => Some(&self.hdr_view),
            Target::BloomA => Some(&self.bloom_a_view),
            Target::BloomB => Some(&self.bloom_b_view),
            Target::Composite => Some(&self.composite_view),
            Target::Screen => None,
        }
    }
}
