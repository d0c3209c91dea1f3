//! Simulation state
//!
//! Everything one step reads and writes, owned by the host loop and threaded
//! through [`tick`](super::tick::tick).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::compile::Scene;
use super::entity::{Entity, EntityList};
use super::player::Player;
use super::sdf::{SdfResult, sdf_distance, surface_normal};
use crate::settings::Settings;

/// Full-screen backdrop behind the distance field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Background {
    Credits,
    MainMenu,
    #[default]
    Level,
    End,
}

/// All mutable game state
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub player: Player,
    pub velocity: Vec2,
    pub entities: EntityList,
    /// Primitives built at the end of the previous step
    pub scene: Scene,
    pub background: Background,
    /// Particle entity spawned when the player died; its progress gates the reload
    pub death_particle: Option<usize>,
    pub settings: Settings,
}

impl SimulationState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Add an entity to the level
    pub fn spawn(&mut self, entity: Entity) -> Option<usize> {
        self.entities.push(entity)
    }

    /// Clear the level and put the player at a fresh start
    pub fn reset_level(&mut self, start: Vec2, radius: f32, growth_state: u32, background: Background) {
        self.entities.clear();
        self.player.respawn(start, radius, growth_state);
        self.velocity = Vec2::ZERO;
        self.death_particle = None;
        self.background = background;
    }

    /// Rebuild the primitive layers from the current entities
    pub fn rebuild_scene(&mut self, dt: f32) {
        self.scene.rebuild(&mut self.entities, &self.player, dt);
    }

    /// Query the level layer
    pub fn distance(&self, pos: Vec2) -> SdfResult {
        sdf_distance(&self.scene.level, pos, &self.player, &self.settings.field)
    }

    /// Solid surface normal of the level layer
    pub fn normal(&self, pos: Vec2) -> Vec2 {
        surface_normal(&self.scene.level, pos, &self.player, &self.settings.field)
    }

    /// Entity that produced a level primitive
    pub fn entity_of_primitive(&self, primitive: usize) -> Option<usize> {
        self.scene.level.get(primitive).map(|p| p.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;

    #[test]
    fn test_reset_level_clears_everything_but_counters() {
        let mut state = SimulationState::default();
        state.spawn(Entity::fixed(EntityKind::Tumor, Vec2::ZERO, 10.0));
        state.velocity = Vec2::new(100.0, 0.0);
        state.death_particle = Some(0);
        state.player.deaths = 2;

        state.reset_level(Vec2::new(50.0, 60.0), 20.0, 0, Background::MainMenu);
        assert!(state.entities.is_empty());
        assert_eq!(state.velocity, Vec2::ZERO);
        assert_eq!(state.death_particle, None);
        assert_eq!(state.player.position, Vec2::new(50.0, 60.0));
        assert_eq!(state.player.deaths, 2);
        assert_eq!(state.background, Background::MainMenu);
    }

    #[test]
    fn test_queries_use_built_scene() {
        let mut state = SimulationState::default();
        state.player.radius = 10.0;
        let idx = state
            .spawn(Entity::fixed(EntityKind::TCell, Vec2::new(100.0, 100.0), 30.0))
            .unwrap();

        // Nothing built yet
        assert_eq!(state.distance(Vec2::new(100.0, 100.0)).closest, None);

        state.rebuild_scene(0.0);
        let r = state.distance(Vec2::new(100.0, 160.0));
        assert!((r.distance - 20.0).abs() < 1e-3);
        assert_eq!(r.closest.and_then(|p| state.entity_of_primitive(p)), Some(idx));
        assert!((state.normal(Vec2::new(100.0, 160.0)) - Vec2::Y).length() < 1e-3);
    }
}
