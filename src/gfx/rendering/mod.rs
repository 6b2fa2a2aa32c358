//! Rendering pipeline and engine
//!
//! Contains the wgpu render engine (shadow pass + main lit pass) and the
//! pipeline management system.

pub mod pipeline_manager;
pub mod render_engine;

pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
