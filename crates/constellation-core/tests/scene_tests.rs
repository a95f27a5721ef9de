// Host-side tests for scene assembly.

mod common;

use common::*;
use constellation_core::*;
use glam::Vec3;

#[test]
fn three_tracks_give_three_markers_labels_and_edges() {
    let font = box_font();
    let mut gen = PositionGenerator::seeded(21);
    let assembled = SceneAssembler::new(&font).assemble(&names(&["a", "b", "ab"]), &mut gen);
    let scene = &assembled.scene;
    assert_eq!(scene.markers.len(), 3);
    assert_eq!(scene.labels.len(), 3);
    assert_eq!(scene.edges.len(), 3);
    assert_eq!(scene.tracks.len(), 3);
    for (i, a) in scene.markers.iter().enumerate() {
        for b in &scene.markers[i + 1..] {
            assert_ne!(a.position, b.position);
        }
    }
    assert_eq!(scene.dim_field.count(), DIM_PARTICLE_COUNT);
    assert_eq!(scene.bright_field.count(), BRIGHT_PARTICLE_COUNT);
    assert_eq!(scene.object_count(), 3 + 3 + 3 + 3);
}

#[test]
fn track_count_is_capped() {
    let font = box_font();
    let many: Vec<String> = (0..TRACK_COUNT + 5).map(|i| format!("t{i}")).collect();
    let mut gen = PositionGenerator::seeded(1);
    let assembled = SceneAssembler::new(&font).assemble(&many, &mut gen);
    assert_eq!(assembled.scene.markers.len(), TRACK_COUNT);
    assert_eq!(assembled.scene.tracks[0].name, "t0");
}

#[test]
fn materials_are_shared_where_expected() {
    let font = box_font();
    let mut gen = PositionGenerator::seeded(2);
    let scene = SceneAssembler::new(&font)
        .assemble(&names(&["a", "b", "ab", "ba"]), &mut gen)
        .scene;
    assert!(scene.markers.iter().all(|m| m.material == scene.marker_material));
    assert!(scene.labels.iter().all(|l| l.material == scene.label_material));
    assert_ne!(scene.dim_field.material, scene.bright_field.material);
    assert_eq!(
        scene.material(scene.dim_field.material),
        scene.material(scene.bright_field.material)
    );
    assert_eq!(scene.material(scene.marker_material).kind, MaterialKind::Standard);
}

#[test]
fn edges_connect_track_positions() {
    let font = box_font();
    let positions = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 3.0, 0.0),
    ];
    let scene = SceneAssembler::new(&font)
        .assemble_at(&names(&["a", "b", "ab"]), &positions, vec![], vec![])
        .scene;
    let pairs: Vec<(usize, usize)> = scene
        .edges
        .iter()
        .map(|e| (e.edge.source, e.edge.nearest))
        .collect();
    assert_eq!(pairs, vec![(0, 1), (1, 0), (2, 0)]);
    assert_eq!(scene.edges[2].from, positions[2]);
    assert_eq!(scene.edges[2].to, positions[0]);
    assert_eq!(scene.edge_vertices().len(), 6);
}

#[test]
fn degenerate_edges_are_kept_but_not_drawn() {
    let font = box_font();
    let scene = SceneAssembler::new(&font)
        .assemble_at(&names(&["a", "b"]), &[Vec3::ONE, Vec3::ONE], vec![], vec![])
        .scene;
    assert_eq!(scene.edges.len(), 2);
    assert!(scene.edges.iter().all(|e| e.edge.degenerate));
    assert!(scene.edge_vertices().is_empty());
}

#[test]
fn labels_are_centered_and_hang_below_anchor() {
    let font = box_font();
    let anchor = Vec3::new(0.5, -0.25, 1.0);
    let scene = SceneAssembler::new(&font)
        .assemble_at(&names(&["ab"]), &[anchor], vec![], vec![])
        .scene;
    let label = &scene.labels[0];
    assert_eq!(label.anchor, anchor);
    let g = &label.geometry;
    assert!((g.min.x + g.max.x).abs() < 1e-5, "centered on x");
    assert!((g.min.y - (-LABEL_DROP)).abs() < 1e-5, "baseline dropped");
    let world: Vec<Vec3> = label.world_vertices().collect();
    assert_eq!(world.len(), g.vertices.len());
    assert!((world[0] - (g.vertices[0] + anchor)).length() < 1e-5);
}

#[test]
fn camera_matches_scene_defaults() {
    let font = box_font();
    let cam = SceneAssembler::new(&font)
        .with_aspect(2.0)
        .assemble_at(&names(&["a"]), &[Vec3::ZERO], vec![], vec![])
        .camera;
    assert_eq!(cam.fov_deg, 62.0);
    assert_eq!(cam.near, 0.1);
    assert_eq!(cam.far, 1000.0);
    assert_eq!(cam.aspect, 2.0);
    assert_eq!(cam.state.position, Vec3::new(0.0, 0.0, 4.5));
}
