//! Global uniform bindings for camera and lighting
//!
//! Manages the GPU uniform buffer and bind group for per-frame global state
//! shared by all objects: camera matrices, the three scene lights, and the
//! directional light's view-projection matrix for shadow mapping.

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    gfx::camera::orbit_camera::OPENGL_TO_WGPU_MATRIX,
    gfx::scene::light::SceneLights,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly, including the
/// vec3 padding slots.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    // Camera
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],

    // Directional light's view-projection matrix for shadow lookups
    light_view_proj: [[f32; 4]; 4],

    // Directional light
    directional_direction: [f32; 3],
    _padding0: f32,
    directional_color: [f32; 3],
    directional_intensity: f32,

    // Ambient term
    ambient_color: [f32; 3],
    _padding1: f32,

    // Orbiting point light
    point_position: [f32; 3],
    point_intensity: f32,
    point_color: [f32; 3],
    _padding2: f32,
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// How far out along its direction the shadow "eye" sits
const SHADOW_EYE_DISTANCE: f32 = 20.0;

/// Half-extent of the orthographic shadow volume
const SHADOW_ORTHO_EXTENT: f32 = 12.0;

/// Updates the global uniform buffer with camera and lighting data
///
/// Should be called each frame so the shaders see the current camera
/// matrices and the orbiting light's position.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lights: &SceneLights,
) {
    let light_dir = lights.directional.direction();
    let light_eye = cgmath::Point3::new(
        -light_dir.x * SHADOW_EYE_DISTANCE,
        -light_dir.y * SHADOW_EYE_DISTANCE,
        -light_dir.z * SHADOW_EYE_DISTANCE,
    );
    let light_view = cgmath::Matrix4::look_at_rh(
        light_eye,
        cgmath::Point3::new(0.0, 0.0, 0.0),
        cgmath::Vector3::unit_y(),
    );
    let light_proj = OPENGL_TO_WGPU_MATRIX
        * cgmath::ortho(
            -SHADOW_ORTHO_EXTENT,
            SHADOW_ORTHO_EXTENT,
            -SHADOW_ORTHO_EXTENT,
            SHADOW_ORTHO_EXTENT,
            1.0,
            50.0,
        );
    let light_view_proj = light_proj * light_view;

    let point_position = lights.point.position();

    let content = GlobalUBOContent {
        view_position: camera.view_position,
        view_proj: camera.view_proj,
        light_view_proj: light_view_proj.into(),
        directional_direction: [light_dir.x, light_dir.y, light_dir.z],
        _padding0: 0.0,
        directional_color: lights.directional.color,
        directional_intensity: lights.directional.intensity,
        ambient_color: lights.ambient.color,
        _padding1: 0.0,
        point_position: [point_position.x, point_position.y, point_position.z],
        point_intensity: lights.point.intensity,
        point_color: lights.point.color,
        _padding2: 0.0,
    };

    ubo.update_content(queue, content);
}

/// Manages bind group layouts and bind groups for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // Global uniforms (camera + lights)
            .create(device, "Globals Bind Group Layout");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    ///
    /// Must be called after the uniform buffer is created and before any
    /// rendering operations that need global uniforms.
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    /// Returns the bind group layout for pipeline creation
    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// Returns the bind group for rendering
    ///
    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}
