// Host-side tests for front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn input_tuning_is_positive() {
    assert!(ORBIT_ROTATE_SPEED > 0.0);
    assert!(WHEEL_PIXELS_PER_LINE > 0.0);
    assert!(WHEEL_PIXELS_PER_PAGE > WHEEL_PIXELS_PER_LINE);
}

#[test]
fn clear_color_is_a_dark_background() {
    for c in CLEAR_COLOR {
        assert!((0.0..=0.05).contains(&c));
    }
}

#[test]
fn resource_locations_are_well_formed() {
    assert!(!CANVAS_ID.is_empty() && !CANVAS_ID.starts_with('#'));
    assert!(TRACKS_URL.starts_with('/'));
    assert!(FONT_URL.ends_with(".json"));
}
