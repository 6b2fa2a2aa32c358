//! Scene lighting
//!
//! The demo scene carries three light sources: a fixed directional light
//! (the shadow caster), a flat ambient term, and a point light that orbits
//! the scene center on a horizontal circle.

use cgmath::{InnerSpace, Vector3};

/// Fixed-direction light, used for shadow mapping
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Position the light shines from, toward the origin
    pub position: Vector3<f32>,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(position: Vector3<f32>, color: [f32; 3], intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Normalized direction from the light toward the origin
    pub fn direction(&self) -> Vector3<f32> {
        (-self.position).normalize()
    }
}

/// Flat ambient term added to every surface
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    pub color: [f32; 3],
}

/// Point light circling the scene center at a fixed height.
///
/// The phase angle increases by a fixed step every frame and is never reset;
/// the trigonometric projection keeps the position bounded for any phase.
#[derive(Debug, Clone, Copy)]
pub struct OrbitingPointLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub height: f32,
    pub radius: f32,
    phase: f32,
    step: f32,
}

impl OrbitingPointLight {
    pub fn new(color: [f32; 3], intensity: f32, height: f32, radius: f32, step: f32) -> Self {
        Self {
            color,
            intensity,
            height,
            radius,
            phase: 0.0,
            step,
        }
    }

    /// Advances the orbit by one frame step
    pub fn advance(&mut self) {
        self.phase += self.step;
    }

    /// Current position on the orbit circle
    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(
            self.radius * self.phase.cos(),
            self.height,
            self.radius * self.phase.sin(),
        )
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

/// All light sources of the scene
#[derive(Debug, Clone, Copy)]
pub struct SceneLights {
    pub directional: DirectionalLight,
    pub ambient: AmbientLight,
    pub point: OrbitingPointLight,
}

impl Default for SceneLights {
    fn default() -> Self {
        Self {
            directional: DirectionalLight::new(Vector3::new(0.0, 1.0, 1.0), [1.0, 1.0, 1.0], 1.0),
            ambient: AmbientLight {
                color: [1.0, 0.784, 0.412], // 0xffc869
            },
            point: OrbitingPointLight::new(
                [1.0, 0.451, 0.0], // 0xff7300
                15.0,
                2.0,
                1.0,
                0.03,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn orbit_position_follows_circle() {
        let mut light = OrbitingPointLight::new([1.0, 1.0, 1.0], 1.0, 2.0, 1.0, 0.03);

        for _ in 0..500 {
            light.advance();
            let t = light.phase();
            let pos = light.position();
            assert_relative_eq!(pos.x, t.cos(), epsilon = 1e-5);
            assert_relative_eq!(pos.y, 2.0);
            assert_relative_eq!(pos.z, t.sin(), epsilon = 1e-5);
        }
    }

    #[test]
    fn orbit_phase_is_monotone_and_unbounded() {
        let mut light = OrbitingPointLight::new([1.0, 1.0, 1.0], 1.0, 2.0, 1.0, 0.03);
        let mut previous = light.phase();

        for _ in 0..10_000 {
            light.advance();
            assert!(light.phase() > previous);
            previous = light.phase();
        }

        // Far past a full turn, the projected position is still on the circle
        let pos = light.position();
        assert!(pos.x.abs() <= 1.0 + 1e-4);
        assert!(pos.z.abs() <= 1.0 + 1e-4);
    }

    #[test]
    fn directional_light_points_at_origin() {
        let light = DirectionalLight::new(Vector3::new(0.0, 1.0, 1.0), [1.0; 3], 1.0);
        let dir = light.direction();
        assert_relative_eq!(dir.magnitude(), 1.0, epsilon = 1e-6);
        assert!(dir.y < 0.0 && dir.z < 0.0);
    }
}
