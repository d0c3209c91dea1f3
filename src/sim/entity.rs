//! Gameplay entities
//!
//! Entities live in an append-only list. They are never removed: a "dead"
//! entity changes kind (e.g. a collected maggot becomes a particle burst), and
//! the first `Invalid` entry ends the live range.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::MAX_ENTITIES;

/// Kind of gameplay entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// End-of-list sentinel
    #[default]
    Invalid,
    /// Growing body with a face that watches the player
    Tumor,
    /// Spiked killer cell; touching it is lethal
    TCell,
    /// Axis-aligned solid box
    Wall,
    /// Level exit
    Portal,
    /// Collectible
    Maggot,
    /// Short-lived particle burst (death, pickups)
    Particles,
    /// Text panel that fades in and out
    BoxText,
    /// Talking mother figure with a flower
    Mother,
}

/// A gameplay object
///
/// Each growth size triple holds the shape's size at the three growth states;
/// the compiler samples it at the current growth factor. For particle and text
/// entities `growth_sizes1.z` is the animation progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    pub kind: EntityKind,
    /// World-space position
    pub position: Vec2,
    pub growth_sizes1: Vec3,
    pub growth_sizes2: Vec3,
    /// Sprite sheet cell (column, row)
    pub sprite_index: Vec2,
    /// General purpose timer (mouth animation for the mother)
    pub timer: f32,
    /// Text boxes grow in while set and shrink away when cleared
    pub should_grow: bool,
    pub is_talking: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, position: Vec2, growth_sizes1: Vec3) -> Self {
        Self {
            kind,
            position,
            growth_sizes1,
            ..Default::default()
        }
    }

    /// Same size at every growth state
    pub fn fixed(kind: EntityKind, position: Vec2, size: f32) -> Self {
        Self::new(kind, position, Vec3::splat(size))
    }

    pub fn with_sizes2(mut self, growth_sizes2: Vec3) -> Self {
        self.growth_sizes2 = growth_sizes2;
        self
    }

    pub fn with_sprite(mut self, sprite_index: Vec2) -> Self {
        self.sprite_index = sprite_index;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.kind != EntityKind::Invalid
    }
}

/// Fixed-capacity, insertion-ordered entity storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityList {
    entities: Vec<Entity>,
    capacity: usize,
}

impl Default for EntityList {
    fn default() -> Self {
        Self::with_capacity(MAX_ENTITIES)
    }
}

impl EntityList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entity and return its index.
    ///
    /// Returns `None` (and drops the entity) when the list is full.
    pub fn push(&mut self, entity: Entity) -> Option<usize> {
        if self.entities.len() >= self.capacity {
            log::warn!(
                "entity list full ({} slots), dropping {:?}",
                self.capacity,
                entity.kind
            );
            return None;
        }
        self.entities.push(entity);
        Some(self.entities.len() - 1)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    /// Number of stored entries, including any past a sentinel
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Live entities with their indices, in insertion order, up to the first `Invalid`
    pub fn live(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .take_while(|(_, e)| e.is_valid())
    }

    /// Mutable variant of [`EntityList::live`]
    pub fn live_mut(&mut self) -> impl Iterator<Item = (usize, &mut Entity)> {
        self.entities
            .iter_mut()
            .enumerate()
            .take_while(|(_, e)| e.is_valid())
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Entry exists and sits before the first `Invalid`
    pub fn is_live(&self, index: usize) -> bool {
        index < self.live_count()
    }
}
