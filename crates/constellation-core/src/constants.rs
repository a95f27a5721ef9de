// Shared scene and animation tuning constants.

// Scene population
pub const TRACK_COUNT: usize = 10; // maximum number of labeled track points
pub const DIM_PARTICLE_COUNT: usize = 5000;
pub const BRIGHT_PARTICLE_COUNT: usize = 1500;

// Procedural placement (symmetric uniform ranges, world units)
pub const TRACK_POSITION_RANGE: f32 = 2.0;
pub const PARTICLE_POSITION_RANGE: f32 = 3.5;

// Camera
pub const CAMERA_FOV_DEG: f32 = 62.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START_Z: f32 = 4.5;

// Per-frame animation increments
pub const BRIGHT_FIELD_SPIN_PER_FRAME: f32 = 0.00008; // radians about Y
pub const HUE_STEP_PER_FRAME: f32 = 0.001;
pub const CAMERA_ROLL_PER_FRAME: f32 = 0.00005; // radians about the view axis
pub const CAMERA_DOLLY_PER_FRAME: f32 = 0.0002; // world units toward -Z

// Marker look
pub const MARKER_RADIUS: f32 = 0.03;
pub const MARKER_SATURATION: f32 = 1.0;
pub const MARKER_LIGHTNESS: f32 = 0.5;
pub const MARKER_BASE_COLOR: [f32; 3] = [0.1, 0.1, 0.1];

// Labels
pub const LABEL_SIZE: f32 = 0.06; // cap height in world units
pub const LABEL_DROP: f32 = 0.12; // vertical offset below the marker
pub const LABEL_COLOR: [f32; 3] = [0.85, 0.88, 1.0];

// Neighbor edges and particles
pub const EDGE_COLOR: [f32; 3] = [0.35, 0.45, 0.75];
pub const PARTICLE_COLOR: [f32; 3] = [0.8, 0.85, 1.0];
pub const PARTICLE_SIZE: f32 = 0.005;

// Lighting
pub const AMBIENT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const AMBIENT_INTENSITY: f32 = 0.6;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 2.0;
pub const BLOOM_RADIUS: f32 = 0.0;
pub const BLOOM_THRESHOLD: f32 = 0.3;

// Film grain
pub const FILM_NOISE_INTENSITY: f32 = 0.25;

// Output density
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Orbit controls
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;
pub const ORBIT_MAX_POLAR: f32 = 1.5; // radians from the horizon, keeps away from the poles
