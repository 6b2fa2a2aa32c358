//! Convenience re-exports for building a demo scene

pub use crate::app::TriptychApp;
pub use crate::gfx::geometry::{generate_cone, generate_cube, generate_plane, generate_sphere};
pub use crate::gfx::scene::{Object, Scene};
pub use crate::interaction::{InteractionController, InteractionState, ScaleDirection};

pub use cgmath::Vector3;
