//! Nearest-neighbor graph over the track points.
//!
//! Each point is joined to the closest other point by Euclidean distance,
//! giving exactly one edge per point. The scan is O(n²), which is fine for the
//! handful of track points a scene holds; it runs once per scene build.

use glam::Vec3;

/// One edge of the neighbor graph.
///
/// `nearest == source` only when `degenerate` is set: no other point lies at a
/// strictly positive distance (a single point, or all points coincident).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborEdge {
    pub source: usize,
    pub nearest: usize,
    pub degenerate: bool,
}

impl NeighborEdge {
    /// Whether the edge yields a visible segment.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        !self.degenerate
    }
}

/// Index of the nearest point to `points[source]` at a strictly positive
/// distance. The first index reaching a new minimum wins ties.
pub fn nearest_index(points: &[Vec3], source: usize) -> Option<usize> {
    let origin = *points.get(source)?;
    let mut best: Option<(usize, f32)> = None;
    for (j, p) in points.iter().enumerate() {
        let d = origin.distance(*p);
        if d <= 0.0 || !d.is_finite() {
            continue;
        }
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((j, d)),
        }
    }
    best.map(|(j, _)| j)
}

/// One edge per input point, in input order.
pub fn build_nearest_neighbor_edges(points: &[Vec3]) -> Vec<NeighborEdge> {
    (0..points.len())
        .map(|i| match nearest_index(points, i) {
            Some(j) => NeighborEdge {
                source: i,
                nearest: j,
                degenerate: false,
            },
            None => {
                log::warn!("[graph] point {} has no distinct neighbor; edge marked degenerate", i);
                NeighborEdge {
                    source: i,
                    nearest: i,
                    degenerate: true,
                }
            }
        })
        .collect()
}
