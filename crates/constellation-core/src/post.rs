//! Post-processing chain: scene render, bloom, then film grain.
//!
//! The chain is a fixed, ordered list of stages. [`PostChain::passes`] expands
//! it into the GPU passes a renderer executes, naming the offscreen target each
//! pass reads and writes. Bloom only ever reads the raw scene target; grain is
//! applied once, in the terminal pass, straight onto the output surface.

use crate::constants::*;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    /// Luminance below which pixels do not bloom.
    pub threshold: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilmParams {
    pub noise_intensity: f32,
    pub scanline_intensity: f32,
    pub scanline_count: f32,
    pub grayscale: bool,
}

impl Default for FilmParams {
    fn default() -> Self {
        Self {
            noise_intensity: FILM_NOISE_INTENSITY,
            scanline_intensity: 0.0,
            scanline_count: 0.0,
            grayscale: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PostStage {
    /// Rasterize the scene from the camera.
    Render,
    Bloom(BloomParams),
    Film(FilmParams),
}

/// Offscreen or output surfaces a pass can read or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Full-resolution HDR scene color.
    Hdr,
    /// Half-resolution bloom ping-pong buffers.
    BloomA,
    BloomB,
    /// Full-resolution scene + bloom, before grain.
    Composite,
    /// The presentable surface.
    Screen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassKind {
    Scene,
    BrightPass,
    BlurHorizontal,
    BlurVertical,
    BloomComposite,
    FilmGrain,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pass {
    pub kind: PassKind,
    pub inputs: SmallVec<[Target; 2]>,
    pub output: Target,
}

impl Pass {
    fn new(kind: PassKind, inputs: &[Target], output: Target) -> Self {
        Self {
            kind,
            inputs: inputs.iter().copied().collect(),
            output,
        }
    }

    /// Whether this pass adds film grain to its output.
    #[inline]
    pub fn applies_grain(&self) -> bool {
        self.kind == PassKind::FilmGrain
    }
}

/// Pixel sizes of every offscreen target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainTargets {
    pub width: u32,
    pub height: u32,
    pub bloom_width: u32,
    pub bloom_height: u32,
}

impl ChainTargets {
    pub fn for_size(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            bloom_width: (width / 2).max(1),
            bloom_height: (height / 2).max(1),
        }
    }

    pub fn size_of(&self, target: Target) -> (u32, u32) {
        match target {
            Target::BloomA | Target::BloomB => (self.bloom_width, self.bloom_height),
            Target::Hdr | Target::Composite | Target::Screen => (self.width, self.height),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PostChain {
    stages: SmallVec<[PostStage; 3]>,
    targets: ChainTargets,
}

impl PostChain {
    /// Scene render, bloom at the scene's tuning, film grain without
    /// scanlines.
    pub fn standard(width: u32, height: u32) -> Self {
        let bloom = BloomParams {
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
        };
        Self {
            stages: smallvec![
                PostStage::Render,
                PostStage::Bloom(bloom),
                PostStage::Film(FilmParams::default()),
            ],
            targets: ChainTargets::for_size(width, height),
        }
    }

    #[inline]
    pub fn stages(&self) -> &[PostStage] {
        &self.stages
    }

    #[inline]
    pub fn targets(&self) -> ChainTargets {
        self.targets
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.targets = ChainTargets::for_size(width, height);
    }

    pub fn bloom(&self) -> Option<BloomParams> {
        self.stages.iter().find_map(|s| match s {
            PostStage::Bloom(b) => Some(*b),
            _ => None,
        })
    }

    pub fn film(&self) -> Option<FilmParams> {
        self.stages.iter().find_map(|s| match s {
            PostStage::Film(f) => Some(*f),
            _ => None,
        })
    }

    /// Expand the stages into GPU passes, in execution order.
    pub fn passes(&self) -> Vec<Pass> {
        let mut passes = Vec::with_capacity(6);
        let mut current = Target::Hdr;
        let last = self.stages.len().saturating_sub(1);
        for (i, stage) in self.stages.iter().enumerate() {
            let out = if i == last { Target::Screen } else { Target::Composite };
            match stage {
                PostStage::Render => {
                    passes.push(Pass::new(PassKind::Scene, &[], Target::Hdr));
                    current = Target::Hdr;
                }
                PostStage::Bloom(_) => {
                    passes.push(Pass::new(PassKind::BrightPass, &[current], Target::BloomA));
                    passes.push(Pass::new(
                        PassKind::BlurHorizontal,
                        &[Target::BloomA],
                        Target::BloomB,
                    ));
                    passes.push(Pass::new(
                        PassKind::BlurVertical,
                        &[Target::BloomB],
                        Target::BloomA,
                    ));
                    passes.push(Pass::new(
                        PassKind::BloomComposite,
                        &[current, Target::BloomA],
                        out,
                    ));
                    current = out;
                }
                PostStage::Film(_) => {
                    passes.push(Pass::new(PassKind::FilmGrain, &[current], out));
                    current = out;
                }
            }
        }
        passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_chain_uses_scene_bloom_tuning() {
        let chain = PostChain::standard(800, 600);
        let bloom = chain.bloom().expect("bloom stage");
        assert_eq!(bloom.threshold, 0.3);
        assert_eq!(bloom.strength, 2.0);
        assert_eq!(bloom.radius, 0.0);
        let film = chain.film().expect("film stage");
        assert_eq!(film.noise_intensity, 0.25);
        assert_eq!(film.scanline_intensity, 0.0);
    }

    #[test]
    fn bloom_targets_are_half_size_but_never_zero() {
        let t = ChainTargets::for_size(1, 1);
        assert_eq!((t.bloom_width, t.bloom_height), (1, 1));
        let t = ChainTargets::for_size(0, 0);
        assert_eq!((t.width, t.height), (1, 1));
        let t = ChainTargets::for_size(1920, 1080);
        assert_eq!(t.size_of(Target::BloomB), (960, 540));
    }
}
