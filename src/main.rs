//! Demo binary: builds the scene and runs the event loop.
//!
//! Controls:
//! - Click the cube to toggle its spin, the cone to toggle its pulse
//! - Arrow keys roll the sphere around, space stops all animations
//! - Drag orbits the camera, shift-drag pans, scroll zooms, escape quits

use triptych::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = TriptychApp::new()?;
    let scene = app.scene_mut();

    // Materials: glowing amber for the three solids, a matte warm tone for
    // the ground, and a bright emissive for the light marker
    scene
        .add_material_rgb("amber", 0.925, 0.569, 0.094, 0.35, 0.15)
        .emissive = [1.0, 0.349, 0.0];
    scene.add_material_rgb("ground", 1.0, 0.855, 0.725, 0.0, 0.9);
    scene
        .add_material_rgb("light-marker", 1.0, 0.451, 0.0, 0.0, 1.0)
        .emissive = [4.0, 1.8, 0.0];

    // The three interactable solids
    let cube = scene.add_object_from_geometry("cube", &generate_cube());
    scene.objects[cube].set_material("amber");

    let cone = scene.add_object_from_geometry("cone", &generate_cone(0.5, 1.0, 32));
    scene.objects[cone].set_position(Vector3::new(-3.0, 0.0, 0.0));
    scene.objects[cone].set_material("amber");

    let sphere = scene.add_object_from_geometry("sphere", &generate_sphere(0.5, 32, 32));
    scene.objects[sphere].set_position(Vector3::new(3.0, 0.0, 0.0));
    scene.objects[sphere].set_material("amber");

    // Ground plane below the solids
    let plane = scene.add_object_from_geometry("plane", &generate_plane(40.0, 40.0, 1, 1));
    scene.objects[plane].set_position(Vector3::new(0.0, -0.9, 0.0));
    scene.objects[plane].set_material("ground");

    // Small marker sphere riding on the orbiting point light
    let marker = scene.add_object_from_geometry("light source", &generate_sphere(0.05, 16, 8));
    scene.objects[marker].set_material("light-marker");

    app.set_interaction(InteractionController::new(cube, cone, sphere));
    app.set_light_marker(marker);
    app.load_audio("assets/music.mp3", "assets/click.mp3");

    app.run()
}
