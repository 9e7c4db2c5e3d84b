//! WebGPU rendering module
//!
//! One colored-vertex pipeline; every frame is retessellated from the game
//! state by `scene::build` and uploaded in a single draw.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
