use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::GeometryData,
    resources::material::{Material, MaterialManager},
};

use super::{light::SceneLights, object::Object};

/// Main scene containing objects, materials, lights, and the camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
    pub lights: SceneLights,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
            lights: SceneLights::default(),
        }
    }

    /// Advances per-frame scene state: camera damping, the camera uniform,
    /// and the light orbit. The light orbit runs unconditionally for the
    /// lifetime of the scene.
    pub fn update(&mut self) {
        self.camera_manager.update();
        self.camera_manager.camera.update_view_proj();
        self.lights.point.advance();
    }

    /// Adds an object built from generated geometry and returns its index
    pub fn add_object_from_geometry(&mut self, name: &str, geometry: &GeometryData) -> usize {
        let unique_name = self.ensure_unique_name(name);
        let object = Object::from_geometry(&unique_name, geometry);
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Creates a new material and adds it to the material manager
    pub fn add_material(
        &mut self,
        name: &str,
        base_color: [f32; 4],
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        let material = Material::new(name, base_color, metallic, roughness);
        self.material_manager.add_material(material);
        self.material_manager.get_material_mut(name).unwrap()
    }

    /// Convenience method for creating materials with RGB colors
    pub fn add_material_rgb(
        &mut self,
        name: &str,
        r: f32,
        g: f32,
        b: f32,
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        self.add_material(name, [r, g, b, 1.0], metallic, roughness)
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
        }
        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Updates all object transforms and syncs to GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }

    /// Gets material for rendering an object, falling back to the default
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.material_id())
    }

    /// Gets the index of an object by name
    pub fn find_object_index(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|obj| obj.name == name)
    }

    /// Gets immutable reference to an object by index
    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    /// Gets mutable reference to an object by index
    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    /// Gets the total number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use crate::gfx::geometry::generate_cube;
    use cgmath::{Vector3, Zero};

    fn scene() -> Scene {
        let camera = OrbitCamera::new(5.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn objects_are_found_by_name() {
        let mut scene = scene();
        let cube = scene.add_object_from_geometry("cube", &generate_cube());
        let sphere = scene.add_object_from_geometry("sphere", &generate_cube());

        assert_eq!(scene.find_object_index("cube"), Some(cube));
        assert_eq!(scene.find_object_index("sphere"), Some(sphere));
        assert_eq!(scene.find_object_index("cone"), None);
    }

    #[test]
    fn duplicate_names_are_made_unique() {
        let mut scene = scene();
        scene.add_object_from_geometry("cube", &generate_cube());
        let second = scene.add_object_from_geometry("cube", &generate_cube());

        assert_eq!(scene.objects[second].name, "cube (1)");
    }

    #[test]
    fn update_advances_the_light_orbit() {
        let mut scene = scene();
        let before = scene.lights.point.phase();
        scene.update();
        scene.update();
        assert!(scene.lights.point.phase() > before);
    }
}
