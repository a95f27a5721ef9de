// Host-side tests for post-processing order and resize handling.

use constellation_core::*;

#[test]
fn stages_run_render_then_bloom_then_film() {
    let chain = PostChain::standard(800, 600);
    let kinds: Vec<&str> = chain
        .stages()
        .iter()
        .map(|s| match s {
            PostStage::Render => "render",
            PostStage::Bloom(_) => "bloom",
            PostStage::Film(_) => "film",
        })
        .collect();
    assert_eq!(kinds, ["render", "bloom", "film"]);
}

#[test]
fn bloom_output_feeds_film_and_grain_is_terminal() {
    let passes = PostChain::standard(800, 600).passes();
    let kinds: Vec<PassKind> = passes.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        [
            PassKind::Scene,
            PassKind::BrightPass,
            PassKind::BlurHorizontal,
            PassKind::BlurVertical,
            PassKind::BloomComposite,
            PassKind::FilmGrain,
        ]
    );

    let composite = &passes[4];
    let film = &passes[5];
    assert_eq!(film.inputs.as_slice(), &[composite.output]);
    assert_eq!(film.output, Target::Screen);

    // nothing before the film pass adds grain, and the bloom reads the raw scene
    assert!(passes[..5].iter().all(|p| !p.applies_grain()));
    assert_eq!(passes[1].inputs.as_slice(), &[Target::Hdr]);
    assert!(passes.iter().filter(|p| p.applies_grain()).count() == 1);
    assert!(passes[..5].iter().all(|p| p.output != Target::Screen));
}

#[test]
fn resize_updates_camera_aspect_and_chain_targets() {
    let mut camera = PerspectiveCamera::scene_default(800.0 / 600.0);
    let mut chain = PostChain::standard(800, 600);
    assert_eq!(chain.targets().width, 800);

    let size = apply_resize(&mut camera, &mut chain, Viewport::new(1920.0, 1080.0, 1.0));
    assert_eq!((size.width, size.height), (1920, 1080));
    assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    let t = chain.targets();
    assert_eq!((t.width, t.height), (1920, 1080));
    assert_eq!(t.size_of(Target::Hdr), (1920, 1080));
    assert_eq!(t.size_of(Target::Composite), (1920, 1080));
    assert_eq!(t.size_of(Target::BloomA), (960, 540));
}

#[test]
fn high_density_displays_are_capped_at_double_resolution() {
    let mut camera = PerspectiveCamera::scene_default(1.0);
    let mut chain = PostChain::standard(1, 1);
    let size = apply_resize(&mut camera, &mut chain, Viewport::new(1000.0, 500.0, 3.0));
    assert_eq!((size.width, size.height), (2000, 1000));
    assert_eq!(chain.targets().width, 2000);
}
