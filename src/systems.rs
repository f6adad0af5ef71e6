/*
ShootemUp - Arcade Shooter
*/
use bevy::app::AppExit;
use bevy::prelude::*;

use crate::level_controller::LevelController;
use crate::settings::GameSettings;
use crate::spawner::{EnemySpawner, SpawnTuning};

/// Written by Combat Whenever an Enemy Dies
#[derive(Message, Debug, Clone, Copy)]
pub struct EnemyKilled;

pub struct LevelsPlugin;

impl Plugin for LevelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSettings>()
            .init_resource::<LevelController>()
            .init_resource::<SpawnTuning>()
            .add_message::<EnemyKilled>()
            .add_systems(Startup, load_levels_on_startup)
            // Kills Land Before the Tally is Checked
            .add_systems(Update, (count_enemy_kills, tick_levels::<SpawnTuning>).chain());
    }
}

/// No Levels Means No Game, so a Failed Load Ends the App
pub fn load_levels_on_startup(
    settings: Res<GameSettings>,
    mut levels: ResMut<LevelController>,
    mut spawner: ResMut<SpawnTuning>,
    mut exit: MessageWriter<AppExit>,
) {
    if let Err(err) = levels.load(&settings.levels_path) {
        error!("Cannot start without levels: {err}");
        exit.write(AppExit::error());
        return;
    }

    // Enemies Start Out on the First Level's Interval
    *spawner = SpawnTuning {
        spawn_rate: levels.enemy_spawn_rate(),
        changes: 0,
    };
}

pub fn count_enemy_kills(
    mut kills: MessageReader<EnemyKilled>,
    mut levels: ResMut<LevelController>,
) {
    for _ in kills.read() {
        levels.on_enemy_killed();
    }
}

pub fn tick_levels<S: EnemySpawner + Resource>(
    time: Res<Time>,
    mut levels: ResMut<LevelController>,
    mut spawner: ResMut<S>,
) {
    levels.update(time.delta_secs(), &mut *spawner);
}
