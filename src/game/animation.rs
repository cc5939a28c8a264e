use glam::{Vec3, vec3};

use crate::game::{
    GROWTH_FACTOR, GROWTH_THRESHOLD, PULSE_AMPLITUDE, PULSE_BASE_SCALE, PULSE_SPEED,
    ROTATION_INCREMENT, SHRINK_FACTOR,
};

/// Time-varying scalars behind the orbiter and pulser motion.
///
/// Everything here is plain arithmetic; nothing touches the GPU.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    orbit_angle: f32,
    orbiter_rotation_z: f32,
    pulser_rotation_y: f32,
    frame_counter: u32,
    is_growing: bool,
    pulse_scale: f32,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            orbit_angle: 0.0,
            orbiter_rotation_z: 0.0,
            pulser_rotation_y: 0.0,
            frame_counter: 0,
            is_growing: true,
            pulse_scale: pulse_scale_at(0),
        }
    }

    /// Advances one frame that lasted `delta_time` seconds.
    pub fn advance(&mut self, delta_time: f32) {
        self.frame_counter += 1;

        if self.frame_counter >= GROWTH_THRESHOLD {
            self.is_growing = !self.is_growing;
            self.frame_counter = 0;

            log::debug!("growth direction flipped, growing: {}", self.is_growing);
        }

        self.pulse_scale = pulse_scale_at(self.frame_counter);

        let step = ROTATION_INCREMENT * delta_time;
        self.orbit_angle += step;
        self.orbiter_rotation_z += step;
        self.pulser_rotation_y -= step;
    }

    /// Scale vector picked by the growth direction flag.
    ///
    /// Not applied to either model matrix: the pulser is scaled by
    /// [`AnimationState::pulse_scale`] instead.
    pub fn growth_scale(&self) -> Vec3 {
        let factor = if self.is_growing {
            GROWTH_FACTOR
        } else {
            SHRINK_FACTOR
        };

        vec3(factor, factor, 1.0)
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    pub fn orbiter_rotation_z(&self) -> f32 {
        self.orbiter_rotation_z
    }

    pub fn pulser_rotation_y(&self) -> f32 {
        self.pulser_rotation_y
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn is_growing(&self) -> bool {
        self.is_growing
    }

    pub fn pulse_scale(&self) -> f32 {
        self.pulse_scale
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

fn pulse_scale_at(frame_counter: u32) -> f32 {
    PULSE_BASE_SCALE + PULSE_AMPLITUDE * (frame_counter as f32 / PULSE_SPEED).cos()
}
