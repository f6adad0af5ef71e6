/*
ShootemUp - Arcade Shooter
*/
use bevy::log::LogPlugin;
use bevy::prelude::*;
use shootlib::hud::LevelHudView;
use shootlib::level_controller::LevelController;
use shootlib::settings::GameSettings;
use shootlib::systems::{EnemyKilled, LevelsPlugin};

#[derive(Component)]
struct LevelHudText;

fn main() {
    let settings = GameSettings::load();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(LogPlugin {
                    filter: settings.log_filter.clone(),
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Shoot'em Up".into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(settings)
        .add_plugins(LevelsPlugin)
        .add_systems(Startup, setup_level_hud)
        .add_systems(Update, (debug_kill_key, sync_level_hud))
        .run();
}

fn setup_level_hud(mut commands: Commands) {
    commands.spawn(Camera2d);
    commands.spawn((
        LevelHudText,
        Text::new(""),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            right: Val::Px(10.0),
            ..default()
        },
    ));
}

fn sync_level_hud(
    levels: Res<LevelController>,
    mut q: Query<&mut Text, With<LevelHudText>>,
) {
    let Some(mut text) = q.iter_mut().next() else { return; };
    text.0 = LevelHudView::from_controller(&levels).status_line();
}

// Combat Lives Elsewhere, K Stands in for a Kill
fn debug_kill_key(keys: Res<ButtonInput<KeyCode>>, mut kills: MessageWriter<EnemyKilled>) {
    if keys.just_pressed(KeyCode::KeyK) {
        kills.write(EnemyKilled);
    }
}
