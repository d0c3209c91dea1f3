//! Player singleton
//!
//! Position, growth cycle and the counters the HUD shows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::math::{circular_delta, lerp, lerp_delta_time, wrap_unit};
use crate::settings::GrowthTuning;

/// The player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    pub position: Vec2,
    /// Last surface normal sampled by the movement resolver (debug overlay)
    pub debug: Vec2,
    pub radius: f32,
    /// Selected growth state, `0..GROWTH_STATES`
    pub growth_state: u32,
    /// Continuous phase on the growth cycle, always in `[0, 1)`
    pub growth_factor: f32,
    /// Seconds since start (shader clock)
    pub time: f32,
    /// 0 = fully visible, 1 = black
    pub screen_fade: f32,
    /// Visual scale; shrinks to 0 on death
    pub scale: f32,
    pub maggots: u32,
    pub deaths: u32,
    pub is_dead: bool,
    pub enable_input: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            debug: Vec2::ZERO,
            radius: PLAYER_RADIUS,
            growth_state: 0,
            growth_factor: 0.0,
            time: 0.0,
            screen_fade: 0.0,
            scale: 1.0,
            maggots: 0,
            deaths: 0,
            is_dead: false,
            enable_input: true,
        }
    }
}

impl Player {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            ..Default::default()
        }
    }

    /// Put the player back at a level start. Counters and the clock survive.
    pub fn respawn(&mut self, position: Vec2, radius: f32, growth_state: u32) {
        let growth_state = growth_state % GROWTH_STATES;
        *self = Self {
            position,
            radius,
            growth_state,
            growth_factor: growth_state as f32 / GROWTH_STATES as f32,
            time: self.time,
            maggots: self.maggots,
            deaths: self.deaths,
            ..Default::default()
        };
    }

    pub fn grow_forward(&mut self) {
        self.growth_state = (self.growth_state + 1) % GROWTH_STATES;
    }

    pub fn grow_backward(&mut self) {
        self.growth_state = (self.growth_state + GROWTH_STATES - 1) % GROWTH_STATES;
    }

    /// Phase of the selected growth state
    pub fn growth_target(&self) -> f32 {
        self.growth_state as f32 / GROWTH_STATES as f32
    }

    /// Ease the growth factor toward the selected state along the shorter way
    /// around the cycle.
    pub fn advance_growth(&mut self, dt: f32, tuning: &GrowthTuning) {
        let delta = circular_delta(self.growth_factor, self.growth_target());
        let t = lerp_delta_time(dt, tuning.growth_speed, tuning.growth_time);
        self.growth_factor = wrap_unit(lerp(self.growth_factor, self.growth_factor + delta, t));
    }

    /// Mark the player dead. Returns `false` if already dead.
    pub fn kill(&mut self) -> bool {
        if self.is_dead {
            return false;
        }
        self.enable_input = false;
        self.is_dead = true;
        self.deaths = (self.deaths + 1).min(MAX_DEATHS);
        true
    }

    /// Shrink toward zero while dead
    pub fn shrink(&mut self, dt: f32, rate: f32) {
        self.scale = (self.scale - dt * rate).max(0.0);
    }
}
