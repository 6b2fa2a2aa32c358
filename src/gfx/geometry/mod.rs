//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the primitive shapes used by the
//! demo scene procedurally, so no external model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Cube**: Unit cube centered at the origin
//! - **Cone**: Cone with configurable radius, height, and resolution
//! - **Sphere**: UV sphere with configurable radius and resolution
//! - **Plane**: Flat ground plane in the XZ plane
//!
//! ## Usage
//!
//! ```rust
//! use triptych::gfx::geometry::{generate_cube, generate_cone, generate_sphere};
//!
//! let cube_data = generate_cube();
//! let cone_data = generate_cone(0.5, 1.0, 32);
//! let sphere_data = generate_sphere(0.5, 32, 32);
//! ```

pub mod primitives;

pub use primitives::*;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Convert to the vertex format used by the renderer
    pub fn to_scene_format(&self) -> (Vec<crate::gfx::scene::vertex::Vertex3D>, Vec<u32>) {
        use crate::gfx::scene::vertex::Vertex3D;

        let vertices: Vec<Vertex3D> = (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
