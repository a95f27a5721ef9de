// Front-end wiring constants: DOM ids, resource locations and input tuning.

// DOM
pub const CANVAS_ID: &str = "app-canvas";

// Remote resources
pub const TRACKS_URL: &str = "/api/top-tracks";
pub const FONT_URL: &str = "fonts/helvetiker_regular.typeface.json";

// Orbit input
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const WHEEL_PIXELS_PER_LINE: f32 = 16.0;
pub const WHEEL_PIXELS_PER_PAGE: f32 = 800.0;

// Background behind the scene pass
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.01];
