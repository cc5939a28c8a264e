use glam::{Vec3, vec3};

mod animation;
mod context;
mod game;
mod time;
pub mod transform;
pub use animation::*;
pub use context::*;
pub use game::*;
pub use time::*;

/// Radians per second for every rotation and the orbit.
const ROTATION_INCREMENT: f32 = 1.0;
const ORBIT_RADIUS: f32 = 3.0;

const BASE_POSITION: Vec3 = vec3(0.0, 0.5, 0.0);
const ORBITER_SCALE: Vec3 = vec3(2.0, 2.98, 0.0);

const PULSE_BASE_SCALE: f32 = 2.0;
const PULSE_AMPLITUDE: f32 = 0.01;
/// Frames per radian of the pulse.
const PULSE_SPEED: f32 = 10.0;

const GROWTH_THRESHOLD: u32 = 40;
const GROWTH_FACTOR: f32 = 1.01;
const SHRINK_FACTOR: f32 = 0.99;
