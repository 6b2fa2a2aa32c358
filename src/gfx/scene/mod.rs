//! # Scene Management Module
//!
//! This module provides the flat scene model of the demo: a list of
//! [`Object`]s with decomposed transforms, the scene lights, and the camera.
//!
//! ## Key Components
//!
//! - [`Scene`] - The main scene container managing objects, lights, camera, and materials
//! - [`Object`] - Individual 3D objects with meshes, materials, and transforms
//! - [`light::SceneLights`] - Directional, ambient, and orbiting point light
//! - [`Vertex3D`] - GPU vertex format with position and normal

pub mod light;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::{AmbientLight, DirectionalLight, OrbitingPointLight, SceneLights};
pub use object::{DrawObject, Mesh, Object};
pub use scene::Scene;
pub use vertex::Vertex3D;
