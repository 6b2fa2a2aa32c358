//! # Primitive Shape Generation
//!
//! This module contains functions to generate the 3D primitives of the demo
//! scene. All shapes are generated with proper normals and texture coordinates
//! in a Y-up coordinate system.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes.
/// Each face has proper normals pointing outward and UV coordinates from 0 to 1.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    // Cube vertices (4 per face so each face gets its own normal)
    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    // Texture coordinates (same for each face)
    let tex_coords = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    // Face normals
    let normals = [
        // Front face (positive Z)
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        // Back face (negative Z)
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        // Left face (negative X)
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        // Right face (positive X)
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        // Top face (positive Y)
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        // Bottom face (negative Y)
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.tex_coords = tex_coords.to_vec();
    data.normals = normals.to_vec();

    // Indices for each face (2 triangles per face, counter-clockwise)
    data.indices = vec![
        0, 1, 2,    2, 3, 0,
        4, 5, 6,    6, 7, 4,
        8, 9, 10,   10, 11, 8,
        12, 13, 14, 14, 15, 12,
        16, 17, 18, 18, 19, 16,
        20, 21, 22, 22, 23, 20,
    ];

    data
}

/// Generate a cone with its apex pointing up (+Y)
///
/// # Arguments
/// * `radius` - Radius of the base circle
/// * `height` - Height of the cone (along the Y axis)
/// * `segments` - Number of circular segments
///
/// Returns a cone centered at the origin extending from -height/2 to +height/2
/// in Y, with a closed base cap. Side vertices are duplicated per segment so
/// the slanted surface gets smooth normals while the cap stays flat.
pub fn generate_cone(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Slant normal: for a cone the side normal tilts up by radius/height
    let normal_y = radius / (radius * radius + height * height).sqrt();
    let normal_xz = height / (radius * radius + height * height).sqrt();

    // Side surface: one base vertex and one apex vertex per segment edge
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();

        // Base ring vertex
        data.vertices.push([radius * cos_a, -half_height, radius * sin_a]);
        data.normals.push([normal_xz * cos_a, normal_y, normal_xz * sin_a]);
        data.tex_coords.push([i as f32 / segs as f32, 0.0]);

        // Apex vertex (duplicated so each edge carries its own normal)
        data.vertices.push([0.0, half_height, 0.0]);
        data.normals.push([normal_xz * cos_a, normal_y, normal_xz * sin_a]);
        data.tex_coords.push([i as f32 / segs as f32, 1.0]);
    }

    // Side faces (counter-clockwise when viewed from outside)
    for i in 0..segs {
        let base_current = i * 2;
        let apex_current = base_current + 1;
        let base_next = (i + 1) * 2;

        data.indices.push(base_current);
        data.indices.push(apex_current);
        data.indices.push(base_next);
    }

    // Base cap
    let cap_start = data.vertices.len() as u32;
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        data.vertices
            .push([radius * angle.cos(), -half_height, radius * angle.sin()]);
        data.normals.push([0.0, -1.0, 0.0]);
        data.tex_coords
            .push([0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin()]);
    }

    let center_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, -half_height, 0.0]);
    data.normals.push([0.0, -1.0, 0.0]);
    data.tex_coords.push([0.5, 0.5]);

    // Cap faces wind clockwise from above so they face down
    for i in 0..segs {
        data.indices.push(center_idx);
        data.indices.push(cap_start + i + 1);
        data.indices.push(cap_start + i);
    }

    data
}

/// Generate a UV sphere with specified radius and resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere centered at the origin.
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    // Generate vertices
    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            // Spherical to Cartesian coordinates, Y-up
            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([radius * x, radius * y, radius * z]);
            data.normals.push([x, y, z]);

            let u = long as f32 / long_segs as f32;
            let v = lat as f32 / lat_segs as f32;
            data.tex_coords.push([u, v]);
        }
    }

    // Generate indices
    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a horizontal ground plane in the XZ plane
///
/// # Arguments
/// * `width` - Size of the plane along X
/// * `depth` - Size of the plane along Z
/// * `width_segments` - Number of subdivisions along width
/// * `depth_segments` - Number of subdivisions along depth
///
/// Returns a plane centered at the origin with its normal pointing up (+Y).
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    // Generate vertices
    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        let pos_z = (v - 0.5) * depth;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, 0.0, pos_z]);
            data.normals.push([0.0, 1.0, 0.0]);
            data.tex_coords.push([u, v]);
        }
    }

    // Generate indices (counter-clockwise winding when viewed from above)
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.push(i);
            data.indices.push(i + 1);
            data.indices.push(next_row);

            data.indices.push(i + 1);
            data.indices.push(next_row + 1);
            data.indices.push(next_row);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_cone_generation() {
        let cone = generate_cone(0.5, 1.0, 32);
        // 33 edge pairs on the side + 33 cap ring + 1 cap center
        assert_eq!(cone.vertices.len(), (33 * 2) + 33 + 1);
        // 32 side triangles + 32 cap triangles
        assert_eq!(cone.triangle_count(), 64);
        assert_eq!(cone.vertices.len(), cone.normals.len());

        // Every vertex stays inside the cone's bounding box
        for v in &cone.vertices {
            assert!(v[0].abs() <= 0.5 + f32::EPSILON);
            assert!(v[1].abs() <= 0.5 + f32::EPSILON);
            assert!(v[2].abs() <= 0.5 + f32::EPSILON);
        }
    }

    #[test]
    fn test_cone_side_normals_are_unit_length() {
        let cone = generate_cone(0.5, 1.0, 16);
        for n in &cone.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(0.5, 8, 6);
        assert!(sphere.vertices.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());

        // All vertices lie on the sphere surface
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices

        // The plane is flat at Y = 0 with up-facing normals
        for (v, n) in plane.vertices.iter().zip(plane.normals.iter()) {
            assert_eq!(v[1], 0.0);
            assert_eq!(*n, [0.0, 1.0, 0.0]);
        }
    }
}
