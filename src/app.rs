use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::audio::AudioEngine;
use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
    },
    picking::ObjectPicker,
    rendering::RenderEngine,
    scene::Scene,
};
use crate::interaction::InteractionController;

/// Mouse travel between press and release below which a release counts as a
/// click rather than the end of a camera drag
const CLICK_SLOP_PX: f64 = 5.0;

/// Top-level demo application owning the event loop
pub struct TriptychApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    interaction: Option<InteractionController>,
    audio: Option<AudioEngine>,
    picker: ObjectPicker,
    light_marker: Option<usize>,

    cursor_position: (f64, f64),
    mouse_pressed_at: Option<(f64, f64)>,
}

impl TriptychApp {
    /// Create a new application with the default camera setup
    pub fn new() -> anyhow::Result<Self> {
        let event_loop = EventLoop::new()?;

        let mut camera = OrbitCamera::new(5.0, 0.0, 0.0, cgmath::Vector3::new(0.0, 0.0, 0.0), 1.0);
        camera.bounds.min_distance = Some(1.1);
        let controller = CameraController::new(0.005, 0.1);

        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);

        let audio = match AudioEngine::new() {
            Ok(engine) => Some(engine),
            Err(e) => {
                log::warn!("running without audio: {}", e);
                None
            }
        };

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
                interaction: None,
                audio,
                picker: ObjectPicker::new(),
                light_marker: None,
                cursor_position: (0.0, 0.0),
                mouse_pressed_at: None,
            },
        })
    }

    /// Mutable access to the scene for startup construction
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Attaches the interaction controller for the built scene
    pub fn set_interaction(&mut self, interaction: InteractionController) {
        self.app_state.interaction = Some(interaction);
    }

    /// Marks an object as the point light's visual marker; it is moved to
    /// the light's position every frame
    pub fn set_light_marker(&mut self, object_index: usize) {
        self.app_state.light_marker = Some(object_index);
    }

    /// Kicks off the background loads for the two audio assets
    pub fn load_audio(&mut self, music_path: &str, click_path: &str) {
        if let Some(audio) = &self.app_state.audio {
            audio.load_music(music_path);
            audio.load_click(click_path);
        }
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl AppState {
    /// Resolves a completed click against the scene and routes it to the
    /// interaction controller
    fn handle_click(&mut self, position: (f64, f64)) {
        let Some(render_engine) = self.render_engine.as_ref() else {
            return;
        };
        let Some(interaction) = self.interaction.as_mut() else {
            return;
        };

        let (width, height) = render_engine.get_surface_size();
        let pick = self.picker.pick_object(
            (position.0 as f32, position.1 as f32),
            (width as f32, height as f32),
            &self.scene.camera_manager.camera,
            &self.scene,
        );

        if interaction.handle_click(pick.as_ref()) {
            // Click sound is a presence-checked no-op until the asset loads
            if let Some(audio) = &mut self.audio {
                audio.play_click();
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        if let Some(audio) = &mut self.audio {
            audio.poll();
        }

        // Per-frame state: camera damping, view-projection, light orbit
        self.scene.update();

        if let Some(interaction) = &mut self.interaction {
            interaction.update(&mut self.scene);
        }

        // Keep the light marker glued to the orbiting light
        if let Some(marker_index) = self.light_marker {
            let light_position = self.scene.lights.point.position();
            if let Some(marker) = self.scene.get_object_mut(marker_index) {
                marker.set_position(light_position);
            }
        }

        self.scene.update_all_transforms(render_engine.queue());
        render_engine.update(self.scene.camera_manager.camera.uniform, &self.scene.lights);

        match render_engine.render_frame(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_engine.reconfigure_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => {
                log::warn!("dropped frame: {}", e);
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("triptych")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);

        let window_clone = window.clone();
        let renderer = pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height).await
        });

        match renderer {
            Ok(renderer) => {
                self.scene
                    .init_gpu_resources(renderer.device(), renderer.queue());
                self.render_engine = Some(renderer);
            }
            Err(e) => {
                log::error!("failed to initialize renderer: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if self.render_engine.is_none() {
            return;
        }

        match event {
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                // Camera modifier keys see every transition
                self.scene.camera_manager.process_keyboard_event(&key_event);

                if key_event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(key_code) = key_event.physical_key else {
                    return;
                };

                if matches!(key_code, KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }

                if let Some(interaction) = self.interaction.as_mut() {
                    if interaction.handle_key(key_code, &mut self.scene) {
                        if let Some(window) = self.window.as_ref() {
                            window.request_redraw();
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = (position.x, position.y);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.mouse_pressed_at = Some(self.cursor_position);
                }
                ElementState::Released => {
                    if let Some((px, py)) = self.mouse_pressed_at.take() {
                        let (cx, cy) = self.cursor_position;
                        let travel = ((cx - px).powi(2) + (cy - py).powi(2)).sqrt();
                        // A short press-and-release is a click; a longer
                        // travel was a camera drag
                        if travel < CLICK_SLOP_PX {
                            self.handle_click(self.cursor_position);
                        }
                    }
                }
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
