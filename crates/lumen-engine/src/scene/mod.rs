//! Scene bracket: what a run of draw calls is rendered with.
//!
//! Responsibilities:
//! - carry the shader, camera transform and target of one begin/end bracket
//! - enforce `Closed → Open → Closed`, rejecting nested begins and stray ends

mod context;
mod state;

pub use context::SceneContext;
pub use state::{SceneError, SceneState};
