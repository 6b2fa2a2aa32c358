//! # Interaction Controller
//!
//! The small state machine driving the demo's per-object interaction:
//! clicking the cube toggles a continuous spin, clicking the cone toggles a
//! pulsing scale oscillation, the sphere is nudged around with the arrow
//! keys, and space stops every running animation.
//!
//! All animation state lives in an explicit [`InteractionState`] and is
//! advanced by a single unconditional [`InteractionController::update`] call
//! per frame that checks the flags internally. There are no per-animation
//! callback chains, so stopping a flag takes effect at the next frame
//! boundary.

use winit::keyboard::KeyCode;

use crate::gfx::{picking::PickResult, scene::Scene};

/// Rotation step applied to the cube per frame while spinning (radians)
pub const ROTATE_STEP: f32 = 0.05;

/// Uniform scale step applied to the cone per frame while pulsing
pub const SCALE_STEP: f32 = 0.01;

/// Lower bound of the cone's scale oscillation (inclusive)
pub const SCALE_MIN: f32 = 0.7;

/// Upper bound of the cone's scale oscillation (inclusive)
pub const SCALE_MAX: f32 = 1.8;

/// Translation / rotation step applied to the sphere per arrow keypress
pub const MOVE_STEP: f32 = 0.1;

/// Direction of the cone's scale oscillation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDirection {
    Growing,
    Shrinking,
}

impl ScaleDirection {
    /// Signed step multiplier for this direction
    pub fn signum(self) -> f32 {
        match self {
            ScaleDirection::Growing => 1.0,
            ScaleDirection::Shrinking => -1.0,
        }
    }
}

/// Animation flags toggled by clicks and cleared by the space key.
///
/// The cube owns `is_rotating` and the cone owns `is_scaling`; the two are
/// independent and may both be active at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub is_rotating: bool,
    pub is_scaling: bool,
    pub scale_direction: ScaleDirection,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            is_rotating: false,
            is_scaling: false,
            scale_direction: ScaleDirection::Growing,
        }
    }
}

/// Reacts to clicks and key presses and advances the animations each frame
pub struct InteractionController {
    pub state: InteractionState,
    cube_index: usize,
    cone_index: usize,
    sphere_index: usize,
}

impl InteractionController {
    /// Creates a controller bound to the three interactable objects
    pub fn new(cube_index: usize, cone_index: usize, sphere_index: usize) -> Self {
        Self {
            state: InteractionState::default(),
            cube_index,
            cone_index,
            sphere_index,
        }
    }

    /// Handles a resolved click.
    ///
    /// The pick result already identifies the nearest object under the
    /// cursor, so at most one object reacts per click. Returns whether the
    /// click sound should play.
    pub fn handle_click(&mut self, pick: Option<&PickResult>) -> bool {
        let Some(pick) = pick else {
            return false;
        };

        if pick.object_index == self.cube_index {
            self.state.is_rotating = !self.state.is_rotating;
            true
        } else if pick.object_index == self.cone_index {
            self.state.is_scaling = !self.state.is_scaling;
            // The cone only clicks audibly when the pulse starts
            self.state.is_scaling
        } else if pick.object_index == self.sphere_index {
            true
        } else {
            false
        }
    }

    /// Handles a discrete keydown event.
    ///
    /// Arrow keys move and roll the sphere by a fixed step per event (the
    /// OS key-repeat produces repeated events while held). Space is the
    /// global stop signal. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: KeyCode, scene: &mut Scene) -> bool {
        match key {
            KeyCode::ArrowUp => {
                if let Some(sphere) = scene.get_object_mut(self.sphere_index) {
                    sphere.position.z -= MOVE_STEP;
                    sphere.rotation.x -= MOVE_STEP;
                }
                true
            }
            KeyCode::ArrowDown => {
                if let Some(sphere) = scene.get_object_mut(self.sphere_index) {
                    sphere.position.z += MOVE_STEP;
                    sphere.rotation.x += MOVE_STEP;
                }
                true
            }
            KeyCode::ArrowRight => {
                if let Some(sphere) = scene.get_object_mut(self.sphere_index) {
                    sphere.position.x += MOVE_STEP;
                    sphere.rotation.x += MOVE_STEP;
                }
                true
            }
            KeyCode::ArrowLeft => {
                if let Some(sphere) = scene.get_object_mut(self.sphere_index) {
                    sphere.position.x -= MOVE_STEP;
                    sphere.rotation.x -= MOVE_STEP;
                }
                true
            }
            KeyCode::Space => {
                self.stop_animations();
                true
            }
            _ => false,
        }
    }

    /// Stops both animations and resets the oscillation direction.
    ///
    /// The flags are read at the top of the next `update`, so the loops
    /// terminate within one frame.
    pub fn stop_animations(&mut self) {
        self.state.is_rotating = false;
        self.state.is_scaling = false;
        self.state.scale_direction = ScaleDirection::Growing;
    }

    /// Advances the active animations by one frame.
    ///
    /// While rotating, the cube spins around X and Y by a fixed step. While
    /// scaling, the cone's uniform scale walks between [`SCALE_MIN`] and
    /// [`SCALE_MAX`], reversing direction exactly at the inclusive bounds;
    /// the oscillation never stops on its own, it only reverses.
    pub fn update(&mut self, scene: &mut Scene) {
        if self.state.is_rotating {
            if let Some(cube) = scene.get_object_mut(self.cube_index) {
                cube.rotate_x(ROTATE_STEP);
                cube.rotate_y(ROTATE_STEP);
            }
        }

        if self.state.is_scaling {
            if let Some(cone) = scene.get_object_mut(self.cone_index) {
                cone.scale_uniform(SCALE_STEP * self.state.scale_direction.signum());

                if self.state.scale_direction == ScaleDirection::Growing
                    && cone.scale.y >= SCALE_MAX
                {
                    cone.set_scale(SCALE_MAX);
                    self.state.scale_direction = ScaleDirection::Shrinking;
                } else if self.state.scale_direction == ScaleDirection::Shrinking
                    && cone.scale.y <= SCALE_MIN
                {
                    cone.set_scale(SCALE_MIN);
                    self.state.scale_direction = ScaleDirection::Growing;
                }
            }
        }
    }

    pub fn cube_index(&self) -> usize {
        self.cube_index
    }

    pub fn cone_index(&self) -> usize {
        self.cone_index
    }

    pub fn sphere_index(&self) -> usize {
        self.sphere_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use crate::gfx::geometry::{generate_cone, generate_cube, generate_sphere};
    use approx::assert_relative_eq;
    use cgmath::{Vector3, Zero};

    fn setup() -> (Scene, InteractionController) {
        let camera = OrbitCamera::new(5.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        let mut scene = Scene::new(CameraManager::new(camera, controller));

        let cube = scene.add_object_from_geometry("cube", &generate_cube());
        let cone = scene.add_object_from_geometry("cone", &generate_cone(0.5, 1.0, 32));
        let sphere = scene.add_object_from_geometry("sphere", &generate_sphere(0.5, 32, 32));

        (scene, InteractionController::new(cube, cone, sphere))
    }

    fn pick(index: usize) -> PickResult {
        PickResult {
            object_index: index,
            distance: 1.0,
            intersection_point: Vector3::zero(),
        }
    }

    #[test]
    fn cube_clicks_toggle_rotation_by_parity() {
        let (_, mut interaction) = setup();
        let cube = interaction.cube_index();

        for clicks in 1..=8 {
            interaction.handle_click(Some(&pick(cube)));
            assert_eq!(interaction.state.is_rotating, clicks % 2 == 1);
        }
    }

    #[test]
    fn cube_click_always_plays_sound() {
        let (_, mut interaction) = setup();
        let cube = interaction.cube_index();

        assert!(interaction.handle_click(Some(&pick(cube))));
        assert!(interaction.handle_click(Some(&pick(cube))));
    }

    #[test]
    fn cone_click_plays_sound_only_when_pulse_starts() {
        let (_, mut interaction) = setup();
        let cone = interaction.cone_index();

        assert!(interaction.handle_click(Some(&pick(cone))));
        assert!(!interaction.handle_click(Some(&pick(cone))));
    }

    #[test]
    fn sphere_click_plays_sound_without_state_change() {
        let (_, mut interaction) = setup();
        let sphere = interaction.sphere_index();

        assert!(interaction.handle_click(Some(&pick(sphere))));
        assert_eq!(interaction.state, InteractionState::default());
    }

    #[test]
    fn missed_click_does_nothing() {
        let (_, mut interaction) = setup();
        assert!(!interaction.handle_click(None));
        assert_eq!(interaction.state, InteractionState::default());
    }

    #[test]
    fn rotation_accumulates_while_active() {
        let (mut scene, mut interaction) = setup();
        let cube = interaction.cube_index();

        interaction.handle_click(Some(&pick(cube)));
        let mut previous = scene.objects[cube].rotation.x;
        for _ in 0..10 {
            interaction.update(&mut scene);
            let current = scene.objects[cube].rotation.x;
            assert!(current > previous);
            previous = current;
        }
        assert_relative_eq!(scene.objects[cube].rotation.x, 10.0 * ROTATE_STEP, epsilon = 1e-5);
        assert_relative_eq!(scene.objects[cube].rotation.y, 10.0 * ROTATE_STEP, epsilon = 1e-5);

        // Second click stops the accumulation
        interaction.handle_click(Some(&pick(cube)));
        let frozen = scene.objects[cube].rotation.x;
        interaction.update(&mut scene);
        assert_eq!(scene.objects[cube].rotation.x, frozen);
    }

    #[test]
    fn cone_scale_oscillates_within_bounds() {
        let (mut scene, mut interaction) = setup();
        let cone = interaction.cone_index();

        interaction.handle_click(Some(&pick(cone)));

        // Several full periods of the oscillation
        for _ in 0..1000 {
            interaction.update(&mut scene);
            let scale = scene.objects[cone].scale.y;
            assert!(scale >= SCALE_MIN - 1e-5, "scale {} below bound", scale);
            assert!(scale <= SCALE_MAX + 1e-5, "scale {} above bound", scale);
        }

        // Still oscillating: it reverses at the bounds, it does not stop
        assert!(interaction.state.is_scaling);
    }

    #[test]
    fn scale_direction_flips_exactly_at_bounds() {
        let (mut scene, mut interaction) = setup();
        let cone = interaction.cone_index();

        interaction.handle_click(Some(&pick(cone)));

        let mut flips = 0;
        let mut previous_direction = interaction.state.scale_direction;
        for _ in 0..400 {
            interaction.update(&mut scene);
            if interaction.state.scale_direction != previous_direction {
                // A flip happens only when the scale sits on a bound
                let scale = scene.objects[cone].scale.y;
                assert!(
                    (scale - SCALE_MAX).abs() < 1e-5 || (scale - SCALE_MIN).abs() < 1e-5,
                    "direction flipped away from the bounds at {}",
                    scale
                );
                flips += 1;
                previous_direction = interaction.state.scale_direction;
            }
        }

        // 400 steps starting at 1.0 cross 1.8 and then 0.7
        assert!(flips >= 2);
    }

    #[test]
    fn space_stops_both_animations_within_one_update() {
        let (mut scene, mut interaction) = setup();
        let cube = interaction.cube_index();
        let cone = interaction.cone_index();

        interaction.handle_click(Some(&pick(cube)));
        interaction.handle_click(Some(&pick(cone)));
        interaction.update(&mut scene);

        assert!(interaction.handle_key(KeyCode::Space, &mut scene));
        assert!(!interaction.state.is_rotating);
        assert!(!interaction.state.is_scaling);
        assert_eq!(interaction.state.scale_direction, ScaleDirection::Growing);

        let rotation = scene.objects[cube].rotation;
        let scale = scene.objects[cone].scale;
        interaction.update(&mut scene);
        assert_eq!(scene.objects[cube].rotation, rotation);
        assert_eq!(scene.objects[cone].scale, scale);
    }

    #[test]
    fn rotation_and_scaling_are_independent() {
        let (mut scene, mut interaction) = setup();
        let cube = interaction.cube_index();
        let cone = interaction.cone_index();

        interaction.handle_click(Some(&pick(cube)));
        interaction.handle_click(Some(&pick(cone)));
        assert!(interaction.state.is_rotating && interaction.state.is_scaling);

        // Stopping one leaves the other running
        interaction.handle_click(Some(&pick(cube)));
        assert!(!interaction.state.is_rotating);
        assert!(interaction.state.is_scaling);

        let cone_scale_before = scene.objects[cone].scale.y;
        interaction.update(&mut scene);
        assert!(scene.objects[cone].scale.y != cone_scale_before);
    }

    #[test]
    fn arrow_keys_accumulate_net_sphere_displacement() {
        let (mut scene, mut interaction) = setup();
        let sphere = interaction.sphere_index();
        let start_x = scene.objects[sphere].position.x;

        for _ in 0..5 {
            interaction.handle_key(KeyCode::ArrowRight, &mut scene);
        }
        for _ in 0..2 {
            interaction.handle_key(KeyCode::ArrowLeft, &mut scene);
        }

        let expected = start_x + 3.0 * MOVE_STEP;
        assert_relative_eq!(scene.objects[sphere].position.x, expected, epsilon = 1e-5);
        assert_relative_eq!(scene.objects[sphere].rotation.x, 3.0 * MOVE_STEP, epsilon = 1e-5);
    }

    #[test]
    fn vertical_arrows_move_sphere_along_z() {
        let (mut scene, mut interaction) = setup();
        let sphere = interaction.sphere_index();

        interaction.handle_key(KeyCode::ArrowUp, &mut scene);
        assert_relative_eq!(scene.objects[sphere].position.z, -MOVE_STEP, epsilon = 1e-6);

        interaction.handle_key(KeyCode::ArrowDown, &mut scene);
        interaction.handle_key(KeyCode::ArrowDown, &mut scene);
        assert_relative_eq!(scene.objects[sphere].position.z, MOVE_STEP, epsilon = 1e-6);
    }

    #[test]
    fn unrelated_keys_are_not_consumed() {
        let (mut scene, mut interaction) = setup();
        assert!(!interaction.handle_key(KeyCode::KeyW, &mut scene));
    }

    #[test]
    fn clicks_on_other_objects_leave_animations_untouched() {
        let (mut scene, mut interaction) = setup();
        let plane = scene.add_object_from_geometry(
            "plane",
            &crate::gfx::geometry::generate_plane(40.0, 40.0, 1, 1),
        );

        assert!(!interaction.handle_click(Some(&pick(plane))));
        assert_eq!(interaction.state, InteractionState::default());
    }
}
