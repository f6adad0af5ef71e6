/*
ShootemUp - Arcade Shooter
*/
use bevy::prelude::*;

use crate::level::FALLBACK_SPAWN_RATE;

/// The Only Thing the Level Controller Needs From the Enemy Side
pub trait EnemySpawner {
    fn set_spawn_rate(&mut self, rate: f32);
}

/// Spawn Interval the Enemy Systems Read Each Frame
/// `changes` Bumps Every Time the Level Controller Pushes a New Rate
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpawnTuning {
    pub spawn_rate: f32,
    pub changes: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            spawn_rate: FALLBACK_SPAWN_RATE,
            changes: 0,
        }
    }
}

impl EnemySpawner for SpawnTuning {
    fn set_spawn_rate(&mut self, rate: f32) {
        self.spawn_rate = rate;
        self.changes += 1;
        info!("Spawner: spawn rate -> {rate}");
    }
}
