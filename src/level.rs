//! Level loading
//!
//! A level is a player spawn plus a list of entities. The simulation only
//! talks to levels through [`LevelLoader`]; [`LevelSet`] is the data-driven
//! implementation backed by JSON.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::{Action, InputProvider};
use crate::sim::{Background, Entity, EntityKind, SimulationState};
use crate::{Error, Result};

/// Level switching as seen by the simulation step
pub trait LevelLoader {
    /// Replace the current level with level `index`
    fn load(&mut self, index: usize, state: &mut SimulationState) -> Result<()>;

    /// Go to the level after the current one
    fn next(&mut self, state: &mut SimulationState) -> Result<()>;

    /// Restart the current level
    fn reload(&mut self, state: &mut SimulationState) -> Result<()>;

    /// Per-step level script, run before movement
    fn update(&mut self, _state: &mut SimulationState, _input: &dyn InputProvider, _dt: f32) {}
}

/// One level as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelData {
    pub name: String,
    pub player_start: Vec2,
    pub player_radius: f32,
    /// Growth state the player starts in
    pub growth_state: u32,
    pub background: Background,
    /// Screens such as the menu or credits continue on any key
    pub advance_on_any_key: bool,
    pub entities: Vec<Entity>,
}

impl Default for LevelData {
    fn default() -> Self {
        Self {
            name: String::new(),
            player_start: Vec2::new(LEVEL_WIDTH / 2.0, LEVEL_HEIGHT / 2.0),
            player_radius: PLAYER_RADIUS,
            growth_state: 0,
            background: Background::Level,
            advance_on_any_key: false,
            entities: Vec::new(),
        }
    }
}

/// Ordered list of levels with a cursor on the current one
#[derive(Debug, Clone)]
pub struct LevelSet {
    levels: Vec<LevelData>,
    current: usize,
}

impl LevelSet {
    pub fn new(levels: Vec<LevelData>) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::EmptyLevelSet);
        }
        // An Invalid entry would end the live range and hide everything after it
        for (level, data) in levels.iter().enumerate() {
            if let Some(entity) = data.entities.iter().position(|e| !e.is_valid()) {
                return Err(Error::InvalidEntity { level, entity });
            }
        }
        Ok(Self { levels, current: 0 })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.levels)?)
    }

    /// Read a level set from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let set = Self::from_json(&json)?;
        log::info!("Loaded {} levels from {}", set.len(), path.display());
        Ok(set)
    }

    /// Menu, one playable level and the end screen
    pub fn builtin() -> Self {
        let menu = LevelData {
            name: "Main Menu".to_string(),
            background: Background::MainMenu,
            advance_on_any_key: true,
            ..Default::default()
        };

        let womb = LevelData {
            name: "Womb".to_string(),
            player_start: Vec2::new(150.0, 450.0),
            entities: vec![
                Entity::new(EntityKind::Tumor, Vec2::new(600.0, 250.0), Vec3::new(60.0, 110.0, 160.0))
                    .with_sprite(Vec2::new(2.0, 0.0)),
                Entity::new(EntityKind::TCell, Vec2::new(700.0, 700.0), Vec3::new(40.0, 55.0, 70.0)),
                Entity::fixed(EntityKind::Wall, Vec2::new(1000.0, 450.0), 40.0)
                    .with_sizes2(Vec3::new(300.0, 200.0, 100.0)),
                Entity::fixed(EntityKind::Maggot, Vec2::new(850.0, 120.0), 15.0),
                Entity::fixed(EntityKind::Portal, Vec2::new(1450.0, 450.0), 40.0),
            ],
            ..Default::default()
        };

        let end = LevelData {
            name: "End".to_string(),
            player_start: Vec2::new(400.0, 450.0),
            background: Background::End,
            advance_on_any_key: true,
            entities: vec![Entity {
                is_talking: true,
                ..Entity::fixed(EntityKind::Mother, Vec2::new(1000.0, 350.0), 220.0)
            }],
            ..Default::default()
        };

        Self {
            levels: vec![menu, womb, end],
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the level last loaded
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn levels(&self) -> &[LevelData] {
        &self.levels
    }
}

impl LevelLoader for LevelSet {
    fn load(&mut self, index: usize, state: &mut SimulationState) -> Result<()> {
        let level = self.levels.get(index).ok_or(Error::UnknownLevel {
            index,
            count: self.levels.len(),
        })?;

        state.reset_level(
            level.player_start,
            level.player_radius,
            level.growth_state,
            level.background,
        );
        let mut dropped = 0;
        for entity in &level.entities {
            if state.spawn(*entity).is_none() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("Level {index} dropped {dropped} entities past capacity");
        }
        state.rebuild_scene(0.0);

        self.current = index;
        log::info!(
            "Loaded level {index} ({}) with {} entities",
            level.name,
            state.entities.live_count()
        );
        Ok(())
    }

    fn next(&mut self, state: &mut SimulationState) -> Result<()> {
        let mut index = self.current + 1;
        if index >= self.levels.len() {
            log::info!("Last level finished, wrapping to the first");
            index = 0;
        }
        self.load(index, state)
    }

    fn reload(&mut self, state: &mut SimulationState) -> Result<()> {
        log::info!("Reloading level {}", self.current);
        self.load(self.current, state)
    }

    fn update(&mut self, state: &mut SimulationState, input: &dyn InputProvider, _dt: f32) {
        let skippable = self
            .levels
            .get(self.current)
            .is_some_and(|level| level.advance_on_any_key);
        if skippable && state.player.enable_input && input.was_pressed(Action::AnyKey) {
            if let Err(e) = self.next(state) {
                log::warn!("Failed to advance level: {e}");
            }
        }
    }
}
