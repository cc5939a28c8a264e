use glam::{Mat4, Vec2, Vec3, vec2, vec3};

use crate::game::{AnimationState, BASE_POSITION, ORBIT_RADIUS, ORBITER_SCALE};

/// Model matrix of the orbiter for the current frame.
pub fn orbiter_model(state: &AnimationState) -> Mat4 {
    orbiter_matrix(
        BASE_POSITION,
        orbit_offset(state.orbit_angle()),
        state.orbiter_rotation_z(),
        ORBITER_SCALE,
    )
}

/// Model matrix of the pulser for the current frame.
pub fn pulser_model(state: &AnimationState) -> Mat4 {
    let factor = state.pulse_scale();

    pulser_matrix(
        BASE_POSITION,
        state.pulser_rotation_y(),
        vec3(factor, factor, 0.0),
    )
}

/// `Translate(base) * Translate(orbit) * RotateZ * Scale`, built from identity
/// on every call. The order matters.
pub fn orbiter_matrix(base: Vec3, orbit: Vec2, rotation_z: f32, scale: Vec3) -> Mat4 {
    Mat4::IDENTITY
        * Mat4::from_translation(base)
        * Mat4::from_translation(orbit.extend(0.0))
        * Mat4::from_rotation_z(rotation_z)
        * Mat4::from_scale(scale)
}

/// `Translate(base) * RotateY * Scale`, built from identity on every call.
pub fn pulser_matrix(base: Vec3, rotation_y: f32, scale: Vec3) -> Mat4 {
    Mat4::IDENTITY
        * Mat4::from_translation(base)
        * Mat4::from_rotation_y(rotation_y)
        * Mat4::from_scale(scale)
}

pub fn orbit_offset(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();

    vec2(ORBIT_RADIUS * cos, ORBIT_RADIUS * sin)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn advanced(frames: usize, delta_time: f32) -> AnimationState {
        let mut state = AnimationState::new();
        for _ in 0..frames {
            state.advance(delta_time);
        }

        state
    }

    #[test]
    fn orbit_stays_on_circle() {
        for frames in [0, 1, 17, 40, 123, 1000] {
            let state = advanced(frames, 0.037);
            let model = orbiter_model(&state);

            let position = model.transform_point3(Vec3::ZERO);
            let dx = position.x - BASE_POSITION.x;
            let dy = position.y - BASE_POSITION.y;

            assert_abs_diff_eq!(dx * dx + dy * dy, ORBIT_RADIUS * ORBIT_RADIUS, epsilon = 1e-3);
            assert_abs_diff_eq!(position.z, BASE_POSITION.z, epsilon = 1e-6);
        }
    }

    #[test]
    fn orbit_offset_starts_on_positive_x_axis() {
        let offset = orbit_offset(0.0);

        assert_abs_diff_eq!(offset.x, ORBIT_RADIUS);
        assert_abs_diff_eq!(offset.y, 0.0);
    }

    #[test]
    fn identity_parameters_give_pure_translation() {
        let translation = Mat4::from_translation(BASE_POSITION);

        let orbiter = orbiter_matrix(BASE_POSITION, Vec2::ZERO, 0.0, Vec3::ONE);
        let pulser = pulser_matrix(BASE_POSITION, 0.0, Vec3::ONE);

        assert!(orbiter.abs_diff_eq(translation, 1e-6));
        assert!(pulser.abs_diff_eq(translation, 1e-6));
    }

    #[test]
    fn zero_orbit_angle_is_offset_along_x_only() {
        let model = orbiter_matrix(BASE_POSITION, orbit_offset(0.0), 0.0, Vec3::ONE);
        let expected = Mat4::from_translation(BASE_POSITION + vec3(ORBIT_RADIUS, 0.0, 0.0));

        assert!(model.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn orbiter_keeps_fixed_factor_order() {
        let state = advanced(25, 0.05);
        let orbit = orbit_offset(state.orbit_angle()).extend(0.0);

        let translate_base = Mat4::from_translation(BASE_POSITION);
        let translate_orbit = Mat4::from_translation(orbit);
        let rotate = Mat4::from_rotation_z(state.orbiter_rotation_z());
        let scale = Mat4::from_scale(ORBITER_SCALE);

        let expected = translate_base * translate_orbit * rotate * scale;
        let reordered = translate_base * rotate * translate_orbit * scale;

        assert!(orbiter_model(&state).abs_diff_eq(expected, 1e-6));
        assert!(!orbiter_model(&state).abs_diff_eq(reordered, 1e-3));
    }

    #[test]
    fn pulser_keeps_fixed_factor_order() {
        let state = advanced(13, 0.1);

        let translate = Mat4::from_translation(BASE_POSITION);
        let rotate = Mat4::from_rotation_y(state.pulser_rotation_y());
        let scale = Mat4::from_scale(vec3(state.pulse_scale(), state.pulse_scale(), 0.0));

        assert!(pulser_model(&state).abs_diff_eq(translate * rotate * scale, 1e-6));
        assert!(!pulser_model(&state).abs_diff_eq(translate * scale * rotate, 1e-3));
    }

    #[test]
    fn pulser_stays_at_base_position() {
        let state = advanced(77, 0.02);
        let position = pulser_model(&state).transform_point3(Vec3::ZERO);

        assert!(position.abs_diff_eq(BASE_POSITION, 1e-6));
    }

    #[test]
    fn matrices_do_not_depend_on_previous_calls() {
        let state = advanced(9, 0.3);

        let first = orbiter_model(&state);
        for _ in 0..1000 {
            orbiter_model(&state);
        }

        assert_eq!(orbiter_model(&state), first);
        assert_eq!(pulser_model(&state), pulser_model(&state.clone()));
    }
}
