use std::ops::Range;

use cgmath::{Matrix4, Vector3};
use wgpu::Device;

use super::vertex::Vertex3D;
use crate::gfx::geometry::GeometryData;

/// Triangle mesh with lazily created GPU buffers
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    /// CPU-side vertex data, used for bounding box computation
    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

/// GPU resources owned by an [`Object`]
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A scene object with an explicit decomposed transform.
///
/// Position, rotation (Euler angles in radians), and scale are stored as
/// separate components and composed into a matrix on GPU upload, so
/// per-frame animation can nudge individual components in place.
pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub visible: bool,
    pub material_id: Option<String>,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    /// Create a new object from generated geometry
    pub fn from_geometry(name: &str, geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        Self::new(name, vec![Mesh::new(vertices, indices)])
    }

    pub fn new(name: &str, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.to_string(),
            meshes,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            visible: true,
            material_id: None,
            gpu_resources: None,
        }
    }

    /// Set translation
    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    /// Apply translation on top of the current position
    pub fn translate(&mut self, translation: Vector3<f32>) {
        self.position += translation;
    }

    /// Set uniform scale
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = Vector3::new(scale, scale, scale);
    }

    /// Add to all three scale components at once
    pub fn scale_uniform(&mut self, delta: f32) {
        self.scale.x += delta;
        self.scale.y += delta;
        self.scale.z += delta;
    }

    /// Apply rotation around the X axis (radians)
    pub fn rotate_x(&mut self, angle: f32) {
        self.rotation.x += angle;
    }

    /// Apply rotation around the Y axis (radians)
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation.y += angle;
    }

    /// Apply rotation around the Z axis (radians)
    pub fn rotate_z(&mut self, angle: f32) {
        self.rotation.z += angle;
    }

    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    pub fn material_id(&self) -> Option<&String> {
        self.material_id.as_ref()
    }

    /// Composes the decomposed components into a model matrix (T * R * S)
    pub fn transform_matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let r = Matrix4::from_angle_z(cgmath::Rad(self.rotation.z))
            * Matrix4::from_angle_y(cgmath::Rad(self.rotation.y))
            * Matrix4::from_angle_x(cgmath::Rad(self.rotation.x));
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * r * s
    }

    /// Sync the composed transform to the GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            let matrix = self.transform_matrix();
            let transform_data: &[f32; 16] = matrix.as_ref();
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    /// Get the transform bind group for rendering
    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        for mesh in self.meshes.iter_mut() {
            let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Vertex Buffer"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            );

            let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Index Buffer"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            );

            mesh.vertex_buffer = Some(vertex_buffer);
            mesh.index_buffer = Some(index_buffer);
        }

        let matrix = self.transform_matrix();
        let transform_data: &[f32; 16] = matrix.as_ref();

        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &transform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
    fn draw_object(&mut self, object: &'a Object);
    fn draw_object_instanced(&mut self, object: &'a Object, instances: Range<u32>);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }

    fn draw_object(&mut self, object: &'b Object) {
        self.draw_object_instanced(object, 0..1);
    }

    fn draw_object_instanced(&mut self, object: &'b Object, instances: Range<u32>) {
        for mesh in &object.meshes {
            self.draw_mesh_instanced(mesh, instances.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;
    use approx::assert_relative_eq;
    use cgmath::Vector4;

    #[test]
    fn object_starts_with_identity_components() {
        let object = Object::from_geometry("cube", &generate_cube());
        assert_eq!(object.position, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(object.rotation, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(object.scale, Vector3::new(1.0, 1.0, 1.0));
        assert!(object.visible);
        assert!(object.gpu_resources.is_none());
    }

    #[test]
    fn transform_composes_translation_and_scale() {
        let mut object = Object::from_geometry("cube", &generate_cube());
        object.set_position(Vector3::new(3.0, 0.0, 0.0));
        object.set_scale(2.0);

        let m = object.transform_matrix();
        let p = m * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn rotations_accumulate_in_place() {
        let mut object = Object::from_geometry("sphere", &generate_cube());
        object.rotate_x(0.1);
        object.rotate_x(0.1);
        object.rotate_x(-0.1);
        assert_relative_eq!(object.rotation.x, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn scale_uniform_moves_all_axes() {
        let mut object = Object::from_geometry("cone", &generate_cube());
        object.scale_uniform(0.01);
        assert_relative_eq!(object.scale.x, 1.01, epsilon = 1e-6);
        assert_relative_eq!(object.scale.y, 1.01, epsilon = 1e-6);
        assert_relative_eq!(object.scale.z, 1.01, epsilon = 1e-6);
    }
}
