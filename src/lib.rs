// src/lib.rs
//! Triptych
//!
//! A small interactive 3D scene demo built on wgpu and winit: three clickable
//! primitives over a ground plane, an orbiting point light, an orbit camera
//! with damping, and click/background audio.

pub mod app;
pub mod audio;
pub mod gfx;
pub mod interaction;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::TriptychApp;

/// Creates a default application instance
pub fn default() -> anyhow::Result<TriptychApp> {
    TriptychApp::new()
}
