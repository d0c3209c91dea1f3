//! Player movement and collision response
//!
//! Collision is resolved purely through distance queries: slide along the
//! surface when the step would touch it, then nudge the player out along the
//! field gradient for a fixed number of passes. There are no contact manifolds
//! and no convergence check; the pass count is part of the tuning.

use glam::Vec2;

use super::sdf::SdfResult;
use super::state::SimulationState;
use crate::consts::{LEVEL_HEIGHT, LEVEL_WIDTH};
use crate::input::{Action, InputProvider};
use crate::math::{lerp, lerp_delta_time};

/// Unit-per-axis direction from the held movement actions.
///
/// Down wins over up and right wins over left when both are held.
pub fn input_direction(input: &dyn InputProvider) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if input.is_held(Action::MoveUp) {
        dir.y = -1.0;
    }
    if input.is_held(Action::MoveDown) {
        dir.y = 1.0;
    }
    if input.is_held(Action::MoveLeft) {
        dir.x = -1.0;
    }
    if input.is_held(Action::MoveRight) {
        dir.x = 1.0;
    }
    dir
}

/// Advance the player's velocity and position by one step.
///
/// Returns the field sampled at the unresolved target position, before any
/// sliding or push-out. Gameplay triggers (lethal contact, pickups) read this
/// result, so they fire on what the player ran into rather than where they
/// ended up.
pub fn move_player(state: &mut SimulationState, input: &dyn InputProvider, dt: f32) -> SdfResult {
    let tuning = state.settings.movement;

    let mut acceleration = if state.player.enable_input {
        input_direction(input) * tuning.move_speed
    } else {
        Vec2::ZERO
    };
    let mut velocity = state.velocity;

    if acceleration.length() > 0.0 {
        // Snappy turning: drop any velocity opposing the input
        if acceleration.x * velocity.x < 0.0 {
            velocity.x = 0.0;
        }
        if acceleration.y * velocity.y < 0.0 {
            velocity.y = 0.0;
        }
        acceleration = acceleration.normalize() * tuning.move_speed;
    }

    // Friction on idle axes
    let friction = lerp_delta_time(dt, tuning.damping, tuning.damping_time);
    if acceleration.x == 0.0 {
        velocity.x = lerp(velocity.x, 0.0, friction);
    }
    if acceleration.y == 0.0 {
        velocity.y = lerp(velocity.y, 0.0, friction);
    }

    velocity += acceleration * dt;
    if velocity.length() > tuning.max_velocity {
        velocity = velocity.normalize() * tuning.max_velocity;
    }

    let start = state.player.position;
    let mut target = start + velocity * dt;

    let collision = state.distance(target);
    let normal = state.normal(target);
    state.player.debug = normal;

    if collision.is_contact(tuning.contact_threshold) {
        // Slide: remove the part of the velocity heading into the surface
        let along_normal = velocity.dot(normal);
        if along_normal < 0.0 {
            velocity -= normal * along_normal;
        }
        target = start + velocity * dt;
    }

    for _ in 0..tuning.push_iterations {
        let d = state.distance(target).distance;
        if d < tuning.contact_threshold {
            target += state.normal(target) * (tuning.push_strength * dt * -d);
        }
    }

    state.player.position = target.clamp(Vec2::ZERO, Vec2::new(LEVEL_WIDTH, LEVEL_HEIGHT));
    state.velocity = velocity;
    collision
}
