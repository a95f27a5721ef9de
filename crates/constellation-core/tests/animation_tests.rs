// Host-side tests for the frame loop: hue cycling, camera drift, billboarding,
// render ordering and fail-stop behavior.

mod common;

use common::*;
use constellation_core::*;

fn launch_default(tracks: &[&str]) -> Visualization<ManualScheduler> {
    let mut gen = PositionGenerator::seeded(5);
    pollster::block_on(launch(
        &StaticTracks(names(tracks)),
        &StaticFont(BOX_FONT.to_string()),
        ManualScheduler::new(),
        &mut gen,
        small_viewport(),
    ))
    .expect("launch")
}

#[test]
fn hue_after_f_frames_is_f_steps_mod_one() {
    for frames in [0usize, 1, 250, 999, 1500, 2750] {
        let mut vis = launch_default(&["a", "b", "ab"]);
        let mut r = RecordingRenderer::default();
        assert_eq!(run_frames(&mut vis, &mut r, frames), frames);
        let expected = (frames as f64 * HUE_STEP_PER_FRAME as f64).rem_euclid(1.0) as f32;
        let hue = vis.state.color.hue();
        assert!(hue >= 0.0 && hue < 1.0);
        assert!((hue - expected).abs() < 2e-4, "frames={frames} hue={hue} expected={expected}");
    }
}

#[test]
fn hue_wraps_to_zero_after_a_thousand_frames() {
    let mut vis = launch_default(&["a", "b"]);
    let mut r = RecordingRenderer::default();
    run_frames(&mut vis, &mut r, 1000);
    let hue = vis.state.color.hue();
    assert!(hue.min(1.0 - hue) < 2e-4, "hue={hue}");
}

#[test]
fn drift_stays_linear_over_a_long_run() {
    let mut vis = launch_default(&["a", "b"]);
    let roll0 = vis.state.camera.state.roll() as f64;
    let z0 = vis.state.camera.state.position.z as f64;
    let frames: u64 = 25_000_000;
    for _ in 0..frames {
        prepare_frame(&mut vis.state, &mut vis.scene);
        drift_camera(&mut vis.state);
    }
    let f = frames as f64;
    let roll = vis.state.camera.state.roll() as f64;
    let z = vis.state.camera.state.position.z as f64;
    let spin = vis.scene.bright_field.rotation_y as f64;
    let expected_roll = roll0 + f * CAMERA_ROLL_PER_FRAME as f64;
    let expected_z = z0 - f * CAMERA_DOLLY_PER_FRAME as f64;
    let expected_spin = f * BRIGHT_FIELD_SPIN_PER_FRAME as f64;
    assert!((roll - expected_roll).abs() < 1e-3, "roll={roll} expected={expected_roll}");
    assert!((z - expected_z).abs() < 2e-3, "z={z} expected={expected_z}");
    assert!((spin - expected_spin).abs() < 1e-3, "spin={spin} expected={expected_spin}");
}

#[test]
fn marker_material_tracks_hue_for_all_markers() {
    let mut vis = launch_default(&["a", "b", "ab"]);
    let mut r = RecordingRenderer::default();
    run_frames(&mut vis, &mut r, 40);
    let expected = vis.state.color.rgb();
    let id = vis.scene.marker_material;
    assert_eq!(vis.scene.material(id).emissive, expected);
    assert!(vis.scene.markers.iter().all(|m| m.material == id));
}

#[test]
fn camera_roll_and_dolly_drift_without_bound() {
    let mut vis = launch_default(&["a", "b"]);
    let roll0 = vis.state.camera.state.roll();
    let z0 = vis.state.camera.state.position.z;
    let mut r = RecordingRenderer::default();
    let frames = 4000;
    run_frames(&mut vis, &mut r, frames);
    let roll = vis.state.camera.state.roll();
    let z = vis.state.camera.state.position.z;
    assert!((roll - (roll0 + frames as f32 * CAMERA_ROLL_PER_FRAME)).abs() < 1e-4);
    assert!((z - (z0 - frames as f32 * CAMERA_DOLLY_PER_FRAME)).abs() < 1e-3);
}

#[test]
fn bright_field_spins_and_dim_field_stays() {
    let mut vis = launch_default(&["a", "b"]);
    let mut r = RecordingRenderer::default();
    run_frames(&mut vis, &mut r, 100);
    assert!((vis.scene.bright_field.rotation_y - 100.0 * BRIGHT_FIELD_SPIN_PER_FRAME).abs() < 1e-6);
    assert_eq!(vis.scene.dim_field.rotation_y, 0.0);
}

#[test]
fn labels_copy_camera_rotation_before_drift() {
    let mut vis = launch_default(&["a", "b", "ab"]);
    let mut r = RecordingRenderer::default();
    run_frames(&mut vis, &mut r, 10);
    // labels were oriented at the start of frame 10, before its roll step
    let expected_roll = vis.state.camera.state.roll() - CAMERA_ROLL_PER_FRAME;
    for label in &vis.scene.labels {
        assert!((label.rotation.z - expected_roll).abs() < 1e-6);
    }
}

#[test]
fn direct_render_precedes_chain_render_each_frame() {
    let mut vis = launch_default(&["a", "b"]);
    let mut r = RecordingRenderer::default();
    run_frames(&mut vis, &mut r, 3);
    assert_eq!(r.calls.len(), 6);
    for pair in r.calls.chunks(2) {
        match (&pair[0], &pair[1]) {
            (Call::Scene { roll: a, z: za }, Call::Chain { roll: b, z: zb, passes }) => {
                assert!((b - a - CAMERA_ROLL_PER_FRAME).abs() < 1e-7);
                assert!((za - zb - CAMERA_DOLLY_PER_FRAME).abs() < 1e-6);
                assert_eq!(*passes, 6);
            }
            other => panic!("unexpected call order {other:?}"),
        }
    }
}

#[test]
fn each_frame_arms_exactly_one_more() {
    let mut vis = launch_default(&["a", "b"]);
    let sched = vis.driver.scheduler().clone();
    assert_eq!(sched.requested(), 1);
    let mut r = RecordingRenderer::default();
    run_frames(&mut vis, &mut r, 25);
    assert_eq!(sched.requested(), 26);
    assert_eq!(sched.pending(), 1);
    assert_eq!(vis.state.frame, 25);
}

#[test]
fn render_failure_stops_scheduling() {
    let mut vis = launch_default(&["a", "b"]);
    let sched = vis.driver.scheduler().clone();
    let mut r = RecordingRenderer {
        fail_chain_at: Some(2),
        ..Default::default()
    };
    let ran = run_frames(&mut vis, &mut r, 100);
    assert_eq!(ran, 2);
    assert!(!vis.driver.is_running());
    assert_eq!(sched.pending(), 0);
    assert_eq!(sched.requested(), 3);
}

#[test]
fn prepare_frame_alone_is_deterministic() {
    let font = box_font();
    let assembled = SceneAssembler::new(&font).assemble_at(
        &names(&["a", "b"]),
        &[glam::Vec3::ZERO, glam::Vec3::X],
        vec![0.0; 3],
        vec![0.0; 3],
    );
    let mut scene = assembled.scene;
    let mut state = AnimationState::new(assembled.camera);
    prepare_frame(&mut state, &mut scene);
    assert!((state.color.hue() - HUE_STEP_PER_FRAME).abs() < 1e-7);
    drift_camera(&mut state);
    assert!((state.camera.state.roll() - CAMERA_ROLL_PER_FRAME).abs() < 1e-9);
}
