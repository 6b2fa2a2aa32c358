use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Mouse-driven controller for an [`OrbitCamera`] with damped rotation.
///
/// Dragging accumulates yaw/pitch velocity which is applied and then decayed
/// every frame, so the orbit keeps gliding briefly after the mouse stops.
/// Shift-dragging pans the focus target; the scroll wheel zooms.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Fraction of the residual rotation velocity removed each frame
    pub damping_factor: f32,
    is_mouse_pressed: bool,
    is_shift_held: bool,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

/// Residual velocities below this are snapped to zero
const REST_THRESHOLD: f32 = 1e-5;

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            damping_factor: 0.05,
            is_mouse_pressed: false,
            is_shift_held: false,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    if self.is_shift_held {
                        // SHIFT + DRAG = PAN (move focus point)
                        camera.pan((
                            -delta.0 as f32 * self.pan_speed,
                            delta.1 as f32 * self.pan_speed,
                        ));
                    } else {
                        // NORMAL DRAG = ROTATE (orbit around focus)
                        self.yaw_velocity += -delta.0 as f32 * self.rotate_speed;
                        self.pitch_velocity += delta.1 as f32 * self.rotate_speed;
                    }
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent) {
        if let KeyEvent {
            physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
            state,
            ..
        } = event
        {
            self.is_shift_held = *state == ElementState::Pressed;
        }
    }

    /// Advances the damping interpolation one step.
    ///
    /// Called once per frame: applies the residual rotation velocity to the
    /// camera, then decays it by the damping factor.
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        if self.yaw_velocity.abs() < REST_THRESHOLD && self.pitch_velocity.abs() < REST_THRESHOLD {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
            return;
        }

        camera.add_yaw(self.yaw_velocity);
        camera.add_pitch(self.pitch_velocity);

        let retain = 1.0 - self.damping_factor;
        self.yaw_velocity *= retain;
        self.pitch_velocity *= retain;
    }

    /// Returns true if the damped rotation has not yet come to rest
    pub fn is_moving(&self) -> bool {
        self.yaw_velocity != 0.0 || self.pitch_velocity != 0.0
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }

    /// Adjust panning sensitivity
    pub fn set_pan_speed(&mut self, speed: f32) {
        self.pan_speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    fn camera() -> OrbitCamera {
        OrbitCamera::new(5.0, 0.0, 0.0, Vector3::zero(), 1.0)
    }

    #[test]
    fn update_applies_and_decays_velocity() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = camera();
        controller.yaw_velocity = 0.1;

        controller.update(&mut camera);

        assert!(camera.yaw > 0.0);
        assert!((controller.yaw_velocity - 0.1 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn velocity_decays_to_rest() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = camera();
        controller.yaw_velocity = 0.1;
        controller.pitch_velocity = -0.05;

        for _ in 0..1000 {
            controller.update(&mut camera);
        }

        assert!(!controller.is_moving());
    }

    #[test]
    fn update_without_velocity_leaves_camera_untouched() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = camera();
        let yaw_before = camera.yaw;
        let pitch_before = camera.pitch;

        controller.update(&mut camera);

        assert_eq!(camera.yaw, yaw_before);
        assert_eq!(camera.pitch, pitch_before);
    }
}
