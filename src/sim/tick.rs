//! Simulation step
//!
//! Order of one step:
//! 1. level script update
//! 2. movement and collision against the primitives built last step
//! 3. gameplay consequences of what the player touched
//! 4. death animation and reload
//! 5. growth input and easing
//! 6. rebuild primitives for the next step and the renderer

use glam::Vec3;

use super::entity::{Entity, EntityKind};
use super::movement::move_player;
use super::state::SimulationState;
use crate::audio::{AudioRequester, PlayFlags, SoundEffect};
use crate::input::{Action, InputProvider};
use crate::level::LevelLoader;

/// Something that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player touched a T-Cell (entity index)
    Died { entity: usize },
    /// Maggot collected (entity index)
    MaggotCollected { entity: usize },
    /// Entered a portal
    LevelAdvanced,
    /// Death animation finished
    LevelReloaded,
}

/// Advance the simulation by one step of `dt` seconds
pub fn tick(
    state: &mut SimulationState,
    input: &dyn InputProvider,
    audio: &mut dyn AudioRequester,
    levels: &mut dyn LevelLoader,
    dt: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let threshold = state.settings.movement.contact_threshold;

    levels.update(state, input, dt);

    let collision = move_player(state, input, dt);

    // Lethal contact
    let touched = collision
        .closest
        .filter(|_| collision.is_contact(threshold))
        .and_then(|p| state.entity_of_primitive(p));
    let lethal =
        touched.filter(|&e| state.entities.get(e).map(|e| e.kind) == Some(EntityKind::TCell));
    if let Some(entity) = lethal {
        if state.player.kill() {
            log::debug!("player killed by entity {entity} (deaths: {})", state.player.deaths);
            audio.play(SoundEffect::Death, 1.0, PlayFlags::NONE);
            state.death_particle = state.spawn(Entity::new(
                EntityKind::Particles,
                state.player.position,
                Vec3::ZERO,
            ));
            events.push(GameEvent::Died { entity });
        }
    }

    // Triggers
    let overlapped = collision
        .overlapped
        .filter(|_| collision.is_overlapping(threshold))
        .and_then(|p| state.entity_of_primitive(p));
    if let Some(entity) = overlapped {
        match state.entities.get(entity).map(|e| e.kind) {
            Some(EntityKind::Portal) => {
                if let Err(e) = levels.next(state) {
                    log::warn!("failed to advance level: {e}");
                }
                events.push(GameEvent::LevelAdvanced);
            }
            Some(EntityKind::Maggot) => {
                if let Some(maggot) = state.entities.get_mut(entity) {
                    maggot.kind = EntityKind::Particles;
                    maggot.growth_sizes1.z = 0.0;
                }
                state.player.maggots += 1;
                log::debug!("maggot {entity} collected (total: {})", state.player.maggots);
                audio.play(SoundEffect::Maggot, 1.0, PlayFlags::NONE);
                events.push(GameEvent::MaggotCollected { entity });
            }
            _ => {}
        }
    }

    if state.player.is_dead {
        state
            .player
            .shrink(dt, state.settings.movement.death_shrink_rate);

        // A particle that never animates (list full, or stored past an
        // Invalid entry) falls back to the shrink finishing
        let finished = match state.death_particle.filter(|&i| state.entities.is_live(i)) {
            Some(index) => state
                .entities
                .get(index)
                .is_some_and(|p| p.growth_sizes1.z >= 1.0),
            None => state.player.scale <= 0.0,
        };
        if finished {
            if let Err(e) = levels.reload(state) {
                log::warn!("failed to reload level: {e}");
            }
            events.push(GameEvent::LevelReloaded);
        }
    }

    if state.player.enable_input {
        if input.was_pressed(Action::GrowBackward) {
            state.player.grow_backward();
        }
        if input.was_pressed(Action::GrowForward) {
            state.player.grow_forward();
        }
    }
    let growth = state.settings.growth;
    state.player.advance_growth(dt, &growth);

    state.rebuild_scene(dt);
    state.player.time += dt;

    events
}
