pub mod animation;
pub mod camera;
pub mod color;
pub mod constants;
pub mod error;
pub mod font;
pub mod graph;
pub mod positions;
pub mod post;
pub mod scene;
pub mod scheduler;
pub mod startup;
pub mod tracks;
pub mod uniforms;
pub mod viewport;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use animation::*;
pub use camera::*;
pub use color::*;
pub use constants::*;
pub use error::*;
pub use font::*;
pub use graph::*;
pub use positions::*;
pub use post::*;
pub use scene::*;
pub use scheduler::*;
pub use startup::*;
pub use tracks::*;
pub use uniforms::*;
pub use viewport::*;
