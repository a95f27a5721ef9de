use crate::constants::{PARTICLE_POSITION_RANGE, TRACK_POSITION_RANGE};
use glam::Vec3;
use rand::prelude::*;

/// Uniform random placement for track points and background particle fields.
///
/// Every coordinate is drawn independently from a symmetric range, so track
/// points land inside a small cube around the origin and particles fill a
/// larger one. The generator owns its RNG; seed it for reproducible scenes.
pub struct PositionGenerator<R: Rng = StdRng> {
    rng: R,
    track_range: f32,
    particle_range: f32,
}

impl PositionGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PositionGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            track_range: TRACK_POSITION_RANGE,
            particle_range: PARTICLE_POSITION_RANGE,
        }
    }

    /// `count` track positions, each coordinate uniform in `±track_range`.
    pub fn sphere_positions(&mut self, count: usize) -> Vec<Vec3> {
        let r = self.track_range;
        (0..count)
            .map(|_| Vec3::new(self.coord(r), self.coord(r), self.coord(r)))
            .collect()
    }

    /// Flat `[x0, y0, z0, x1, ...]` buffer of `3 * count` particle coordinates.
    pub fn particle_positions(&mut self, count: usize) -> Vec<f32> {
        let r = self.particle_range;
        (0..count * 3).map(|_| self.coord(r)).collect()
    }

    #[inline]
    fn coord(&mut self, range: f32) -> f32 {
        if range == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-range..=range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_positions_stay_in_range() {
        let mut gen = PositionGenerator::seeded(7);
        let pts = gen.sphere_positions(200);
        assert_eq!(pts.len(), 200);
        for p in pts {
            for c in p.to_array() {
                assert!(c.abs() <= TRACK_POSITION_RANGE);
            }
        }
    }

    #[test]
    fn particle_buffer_is_flat_and_in_range() {
        let mut gen = PositionGenerator::seeded(7);
        let buf = gen.particle_positions(64);
        assert_eq!(buf.len(), 64 * 3);
        assert!(buf.iter().all(|c| c.abs() <= PARTICLE_POSITION_RANGE));
    }

    #[test]
    fn repeated_calls_yield_independent_fields() {
        let mut gen = PositionGenerator::seeded(11);
        let a = gen.particle_positions(32);
        let b = gen.particle_positions(32);
        assert_ne!(a, b);
    }

    #[test]
    fn same_seed_reproduces_positions() {
        let a = PositionGenerator::seeded(3).sphere_positions(10);
        let b = PositionGenerator::seeded(3).sphere_positions(10);
        assert_eq!(a, b);
    }
}
