//! Damped sphere tracing against an arbitrary distance field.

use glam::Vec3;

/// Tuning for the march loop. The damping factor trades correctness for
/// iteration count; the step budget caps worst-case cost per pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchSettings {
    pub damping: f32,
    pub max_steps: u32,
    pub epsilon: f32,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            damping: 0.9,
            max_steps: 90,
            epsilon: 0.1,
        }
    }
}

/// Outcome of a march. A ray that exhausts its budget reports
/// `converged: false` and keeps the last position it reached; callers shade
/// that position as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchResult {
    pub distance: f32,
    pub position: Vec3,
    pub steps: u32,
    pub converged: bool,
}

pub fn march(
    scene: impl Fn(Vec3) -> f32,
    origin: Vec3,
    dir: Vec3,
    settings: &MarchSettings,
) -> MarchResult {
    let mut travelled = 0.0_f32;
    let mut converged = false;
    let mut steps = 0;
    for _ in 0..settings.max_steps {
        steps += 1;
        let d = scene(origin + dir * travelled);
        if d.abs() < settings.epsilon {
            converged = true;
            break;
        }
        travelled += settings.damping * d;
    }
    MarchResult {
        distance: travelled,
        position: origin + dir * travelled,
        steps,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec3;

    #[test]
    fn converges_on_a_plane() {
        // z = 0 plane seen from z = 10 looking down the axis.
        let result = march(
            |p| p.z,
            vec3(0.0, 0.0, 10.0),
            vec3(0.0, 0.0, -1.0),
            &MarchSettings {
                damping: 0.9,
                max_steps: 200,
                epsilon: 0.01,
            },
        );
        assert!(result.converged);
        assert!(result.position.z.abs() < 0.02);
        assert!(result.steps < 200);
    }

    #[test]
    fn unreachable_scene_exhausts_budget_without_panicking() {
        let settings = MarchSettings::default();
        let result = march(
            |_| 10.0,
            vec3(0.0, 0.0, 30.0),
            vec3(0.0, 0.0, -1.0),
            &settings,
        );
        assert!(!result.converged);
        assert_eq!(result.steps, settings.max_steps);
        assert!(result.distance.is_finite());
        assert!(result.position.is_finite());
        // Last marched position is origin + distance * dir.
        let expected = vec3(0.0, 0.0, 30.0 - result.distance);
        assert!((result.position - expected).length() < 1e-3);
    }

    #[test]
    fn marching_is_deterministic() {
        let run = || {
            march(
                |p| p.length() - 2.0,
                vec3(0.0, 0.0, 10.0),
                vec3(0.0, 0.0, -1.0),
                &MarchSettings::default(),
            )
        };
        assert_eq!(run(), run());
    }
}
