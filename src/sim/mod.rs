//! Simulation module
//!
//! All gameplay logic lives here. The step is deterministic given the same
//! inputs and `dt`:
//! - Entities are visited in insertion order, primitives in layer order
//! - No rendering, audio backend or platform dependencies
//! - Side effects leave only through the interfaces passed to [`tick`]

pub mod compile;
pub mod entity;
pub mod movement;
pub mod player;
pub mod primitive;
pub mod sdf;
pub mod state;
pub mod tick;

pub use compile::Scene;
pub use entity::{Entity, EntityKind, EntityList};
pub use movement::{input_direction, move_player};
pub use player::Player;
pub use primitive::{Primitive, PrimitiveKind, PrimitiveLayer};
pub use sdf::{SdfResult, sd_box, sd_circle, sdf_distance, sdf_gradient, surface_normal};
pub use state::{Background, SimulationState};
pub use tick::{GameEvent, tick};
