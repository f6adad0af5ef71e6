/*
ShootemUp - Arcade Shooter
*/

/// Seconds the "LEVEL COMPLETE" Pause Lasts Before the Next Level Goes Live
pub const TRANSITION_SECS: f32 = 3.0;

// Fallbacks Reported Once Every Level Has Been Cleared
// The Enemy Side Keeps Running on These After the Game is Complete
pub const FALLBACK_LEVEL_NUMBER: u32 = 0;
pub const FALLBACK_SPAWN_RATE: f32 = 1.5;
pub const FALLBACK_ENEMY_SPEED: f32 = 150.0;
pub const FALLBACK_ENEMY_HEALTH: u32 = 2;
pub const FALLBACK_ENEMIES_REQUIRED: u32 = 5;
pub const FALLBACK_LEVEL_NAME: &str = "Unknown";

/// Static Tuning Record for One Level, Immutable After Load
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDefinition {
    pub level_number: u32,
    pub name: String,
    pub enemy_spawn_rate: f32, // Seconds Between Spawns
    pub enemy_speed: f32,
    pub enemy_health: u32,
    pub enemies_required: u32,
}

/// Where the Controller Sits in the Level Sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    /// Counting Kills Toward levels[index]
    Playing(usize),
    /// Post-Completion Pause, Cursor Already Points at `to`
    Transitioning { from: usize, to: usize },
    /// Cursor is Past the Last Level
    Finished,
}

impl LevelPhase {
    pub fn is_playing(self) -> bool {
        matches!(self, LevelPhase::Playing(_))
    }
}
