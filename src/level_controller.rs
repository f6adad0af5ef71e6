/*
ShootemUp - Arcade Shooter
*/
use bevy::prelude::*;
use std::path::Path;

use crate::level::{
    LevelDefinition,
    LevelPhase,
    FALLBACK_ENEMIES_REQUIRED,
    FALLBACK_ENEMY_HEALTH,
    FALLBACK_ENEMY_SPEED,
    FALLBACK_LEVEL_NAME,
    FALLBACK_LEVEL_NUMBER,
    FALLBACK_SPAWN_RATE,
    TRANSITION_SECS,
};
use crate::level_loader::{self, LoadDiagnostics, LoadError, LoadReport, LogDiagnostics};
use crate::spawner::EnemySpawner;

/// Drives Level-to-Level Progression
/// Owns the Level List (Fixed After Load), a Cursor Into it, the Kill Tally
/// for the Current Level and the Post-Completion Pause Timer
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelController {
    levels: Vec<LevelDefinition>,
    current_index: usize,
    kill_count: u32,
    in_transition: bool,
    transition_elapsed: f32,
    // Only Report Running Out of Levels Once, Not Every Frame
    exhausted_logged: bool,
}

impl LevelController {
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        let mut c = Self::default();
        c.install(levels);
        c
    }

    /// Load From a Level File, Diagnostics Go to the Log
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
        self.load_with(path, &mut LogDiagnostics)
    }

    pub fn load_with(
        &mut self,
        path: impl AsRef<Path>,
        sink: &mut dyn LoadDiagnostics,
    ) -> Result<LoadReport, LoadError> {
        let parsed = level_loader::read_levels(path.as_ref(), sink);
        self.commit(parsed)
    }

    pub fn load_from_str(
        &mut self,
        text: &str,
        sink: &mut dyn LoadDiagnostics,
    ) -> Result<LoadReport, LoadError> {
        let parsed = level_loader::levels_from_str(text, Path::new("<memory>"), sink);
        self.commit(parsed)
    }

    // A Failed Load Never Leaves Stale Levels Behind
    fn commit(
        &mut self,
        parsed: Result<(Vec<LevelDefinition>, LoadReport), LoadError>,
    ) -> Result<LoadReport, LoadError> {
        match parsed {
            Ok((levels, report)) => {
                self.install(levels);
                info!("=== {} levels loaded ({} lines rejected) ===", report.loaded, report.rejected);
                info!("Current level: {}", self.current_level_number());
                info!("Enemies required: {}", self.enemies_required());
                Ok(report)
            }
            Err(err) => {
                error!("Level load failed: {err}");
                self.install(Vec::new());
                Err(err)
            }
        }
    }

    fn install(&mut self, levels: Vec<LevelDefinition>) {
        *self = Self {
            levels,
            ..Self::default()
        };
    }

    /// Once Per Frame. Exactly One of Three Things Happens:
    /// Nothing (Out of Levels), the Pause Timer Advances, or the Kill Tally is Checked
    pub fn update(&mut self, delta_secs: f32, spawner: &mut impl EnemySpawner) {
        if !self.has_more_levels() {
            if !self.exhausted_logged {
                info!("No more levels available");
                self.exhausted_logged = true;
            }
            return;
        }

        if self.in_transition {
            self.transition_elapsed += delta_secs.max(0.0);

            if self.transition_elapsed >= TRANSITION_SECS {
                self.in_transition = false;
                self.transition_elapsed = 0.0;
                self.kill_count = 0;

                info!("Transition finished, now on level {}", self.current_level_number());
                spawner.set_spawn_rate(self.enemy_spawn_rate());
            }
            return;
        }

        if self.kill_count >= self.enemies_required() {
            info!(
                "Level {} complete! ({}/{})",
                self.current_level_number(),
                self.kill_count,
                self.enemies_required()
            );
            self.start_transition();
            self.next_level();
        }
    }

    /// Combat Reports a Kill. Ignored Unless a Level is Actively Being Played
    pub fn on_enemy_killed(&mut self) {
        if !self.phase().is_playing() {
            debug!("Kill ignored ({:?})", self.phase());
            return;
        }

        self.kill_count += 1;
        info!("Enemy killed! Progress: {}/{}", self.kill_count, self.enemies_required());
    }

    fn start_transition(&mut self) {
        self.in_transition = true;
        self.transition_elapsed = 0.0;
        self.kill_count = 0;
        info!("Level transition started");
    }

    fn next_level(&mut self) {
        self.current_index += 1;
        info!("Advancing to next level (index: {})", self.current_index);
    }

    pub fn phase(&self) -> LevelPhase {
        if !self.has_more_levels() {
            LevelPhase::Finished
        } else if self.in_transition {
            LevelPhase::Transitioning {
                from: self.current_index.saturating_sub(1),
                to: self.current_index,
            }
        } else {
            LevelPhase::Playing(self.current_index)
        }
    }

    pub fn current_level(&self) -> Option<&LevelDefinition> {
        self.levels.get(self.current_index)
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    pub fn in_transition(&self) -> bool {
        self.in_transition
    }

    pub fn transition_elapsed(&self) -> f32 {
        self.transition_elapsed
    }

    #[inline]
    pub fn has_more_levels(&self) -> bool {
        self.current_index < self.levels.len()
    }

    /// Another Level Exists After the Current One
    pub fn has_next_level(&self) -> bool {
        self.current_index + 1 < self.levels.len()
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == LevelPhase::Finished
    }

    /// Kills / Required, Clamped to 0..=1 (0 When Nothing is Required)
    pub fn progress_fraction(&self) -> f32 {
        let required = self.enemies_required();
        if required == 0 {
            return 0.0;
        }
        (self.kill_count as f32 / required as f32).clamp(0.0, 1.0)
    }

    // Accessors, Each Falling Back to a Fixed Default Past the Last Level

    pub fn current_level_number(&self) -> u32 {
        self.current_level().map_or(FALLBACK_LEVEL_NUMBER, |l| l.level_number)
    }

    pub fn enemy_spawn_rate(&self) -> f32 {
        self.current_level().map_or(FALLBACK_SPAWN_RATE, |l| l.enemy_spawn_rate)
    }

    pub fn enemy_speed(&self) -> f32 {
        self.current_level().map_or(FALLBACK_ENEMY_SPEED, |l| l.enemy_speed)
    }

    pub fn enemy_health(&self) -> u32 {
        self.current_level().map_or(FALLBACK_ENEMY_HEALTH, |l| l.enemy_health)
    }

    pub fn enemies_required(&self) -> u32 {
        self.current_level().map_or(FALLBACK_ENEMIES_REQUIRED, |l| l.enemies_required)
    }

    pub fn level_name(&self) -> &str {
        self.current_level().map_or(FALLBACK_LEVEL_NAME, |l| l.name.as_str())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::level_loader::RecordedDiagnostics;

    /// Remembers Every Rate it Was Handed
    #[derive(Default)]
    pub(crate) struct RecordingSpawner {
        pub rates: Vec<f32>,
    }

    impl EnemySpawner for RecordingSpawner {
        fn set_spawn_rate(&mut self, rate: f32) {
            self.rates.push(rate);
        }
    }

    pub(crate) fn level(number: u32, required: u32, spawn: f32) -> LevelDefinition {
        LevelDefinition {
            level_number: number,
            name: format!("Level {number}"),
            enemy_spawn_rate: spawn,
            enemy_speed: 100.0 + number as f32,
            enemy_health: number,
            enemies_required: required,
        }
    }

    fn two_levels() -> LevelController {
        LevelController::new(vec![level(1, 2, 1.5), level(2, 3, 1.2)])
    }

    fn assert_fallbacks(c: &LevelController) {
        assert_eq!(c.current_level_number(), FALLBACK_LEVEL_NUMBER);
        assert_eq!(c.enemy_spawn_rate(), FALLBACK_SPAWN_RATE);
        assert_eq!(c.enemy_speed(), FALLBACK_ENEMY_SPEED);
        assert_eq!(c.enemy_health(), FALLBACK_ENEMY_HEALTH);
        assert_eq!(c.enemies_required(), FALLBACK_ENEMIES_REQUIRED);
        assert_eq!(c.level_name(), FALLBACK_LEVEL_NAME);
    }

    #[test]
    fn test_fallback_constants() {
        assert_eq!(FALLBACK_LEVEL_NUMBER, 0);
        assert_eq!(FALLBACK_SPAWN_RATE, 1.5);
        assert_eq!(FALLBACK_ENEMY_SPEED, 150.0);
        assert_eq!(FALLBACK_ENEMY_HEALTH, 2);
        assert_eq!(FALLBACK_ENEMIES_REQUIRED, 5);
        assert_eq!(FALLBACK_LEVEL_NAME, "Unknown");
    }

    #[test]
    fn test_load_starts_on_first_level() {
        let mut c = LevelController::default();
        let mut sink = RecordedDiagnostics::default();
        let report = c
            .load_from_str("# levels\n5,Later,1.0,90,1,4\n2,Earlier,2.0,80,1,3\nnope\n", &mut sink)
            .unwrap();

        assert_eq!(report, LoadReport { loaded: 2, rejected: 1 });
        assert_eq!(c.phase(), LevelPhase::Playing(0));
        // File Order, Not Sorted by Level Number
        assert_eq!(c.current_level_number(), 5);
        assert_eq!(c.levels()[1].name, "Earlier");
        assert_eq!(c.kill_count(), 0);
        assert!(!c.in_transition());
    }

    #[test]
    fn test_completion_starts_transition_and_advances_same_frame() {
        let mut c = two_levels();
        let mut spawner = RecordingSpawner::default();

        c.on_enemy_killed();
        c.on_enemy_killed();
        c.update(0.016, &mut spawner);

        assert!(c.in_transition());
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.kill_count(), 0);
        assert_eq!(c.phase(), LevelPhase::Transitioning { from: 0, to: 1 });
        // Accessors Already Describe the Upcoming Level
        assert_eq!(c.current_level_number(), 2);
        assert_eq!(c.enemy_spawn_rate(), 1.2);
        assert!(spawner.rates.is_empty());
    }

    #[test]
    fn test_not_enough_kills_keeps_playing() {
        let mut c = two_levels();
        let mut spawner = RecordingSpawner::default();

        c.on_enemy_killed();
        c.update(1.0, &mut spawner);

        assert_eq!(c.phase(), LevelPhase::Playing(0));
        assert_eq!(c.kill_count(), 1);
        assert_eq!(c.progress_fraction(), 0.5);
    }

    #[test]
    fn test_transition_lasts_three_seconds() {
        let mut c = two_levels();
        let mut spawner = RecordingSpawner::default();

        c.on_enemy_killed();
        c.on_enemy_killed();
        c.update(0.0, &mut spawner);
        assert!(c.in_transition());
        assert_eq!(c.transition_elapsed(), 0.0);

        c.update(2.9, &mut spawner);
        assert!(c.in_transition());
        assert!(spawner.rates.is_empty());

        c.update(0.2, &mut spawner);
        assert!(!c.in_transition());
        assert_eq!(c.transition_elapsed(), 0.0);
        assert_eq!(spawner.rates, vec![1.2]);
        assert_eq!(c.phase(), LevelPhase::Playing(1));

        // Nothing Further Until the New Level is Cleared
        c.update(5.0, &mut spawner);
        assert_eq!(spawner.rates.len(), 1);
    }

    #[test]
    fn test_kills_during_transition_are_ignored() {
        let mut c = two_levels();
        let mut spawner = RecordingSpawner::default();

        c.on_enemy_killed();
        c.on_enemy_killed();
        c.update(0.0, &mut spawner);

        c.on_enemy_killed();
        c.on_enemy_killed();
        assert_eq!(c.kill_count(), 0);

        c.update(3.0, &mut spawner);
        assert_eq!(c.kill_count(), 0);
        assert_eq!(c.phase(), LevelPhase::Playing(1));
    }

    #[test]
    fn test_zero_requirement_transitions_on_first_update() {
        let mut c = LevelController::new(vec![level(1, 0, 1.0), level(2, 1, 0.5)]);
        let mut spawner = RecordingSpawner::default();

        c.update(0.016, &mut spawner);
        assert!(c.in_transition());
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn test_zero_requirement_next_level_waits_one_frame() {
        let mut c = LevelController::new(vec![level(1, 1, 1.0), level(2, 0, 0.5), level(3, 4, 0.4)]);
        let mut spawner = RecordingSpawner::default();

        c.on_enemy_killed();
        c.update(0.0, &mut spawner);
        c.update(3.0, &mut spawner);
        assert_eq!(c.phase(), LevelPhase::Playing(1));

        c.update(0.0, &mut spawner);
        assert_eq!(c.phase(), LevelPhase::Transitioning { from: 1, to: 2 });
    }

    #[test]
    fn test_last_level_leads_to_finished_with_fallbacks() {
        let mut c = LevelController::new(vec![level(1, 1, 1.0)]);
        let mut spawner = RecordingSpawner::default();

        c.on_enemy_killed();
        c.update(0.0, &mut spawner);

        assert_eq!(c.phase(), LevelPhase::Finished);
        assert!(c.is_finished());
        // Banner Keeps Showing, Timer Never Runs Out
        assert!(c.in_transition());
        assert_fallbacks(&c);

        for _ in 0..10 {
            c.update(1.0, &mut spawner);
        }
        assert!(spawner.rates.is_empty());
        assert_eq!(c.transition_elapsed(), 0.0);
        assert_eq!(c.current_index(), 1);

        c.on_enemy_killed();
        assert_eq!(c.kill_count(), 0);
    }

    #[test]
    fn test_failed_load_clears_previous_levels() {
        let mut c = two_levels();
        c.on_enemy_killed();

        let mut sink = RecordedDiagnostics::default();
        let err = c.load_from_str("# nothing here\n", &mut sink).unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));

        assert_eq!(c.level_count(), 0);
        assert_eq!(c.kill_count(), 0);
        assert!(c.is_finished());
        assert_fallbacks(&c);
    }

    #[test]
    fn test_second_load_is_full_reset() {
        let mut c = two_levels();
        let mut spawner = RecordingSpawner::default();
        c.on_enemy_killed();
        c.on_enemy_killed();
        c.update(0.0, &mut spawner);
        assert!(c.in_transition());

        let mut sink = RecordedDiagnostics::default();
        c.load_from_str("9,Fresh Start,2.0,50,1,1\n", &mut sink).unwrap();

        assert_eq!(c.phase(), LevelPhase::Playing(0));
        assert_eq!(c.level_name(), "Fresh Start");
        assert_eq!(c.transition_elapsed(), 0.0);
    }

    #[test]
    fn test_load_missing_file_is_unreadable() {
        let mut c = two_levels();
        let path = std::env::temp_dir().join("shootemup_missing_levels.txt");

        let err = c.load(&path).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }));
        assert_eq!(c.level_count(), 0);
    }

    #[test]
    fn test_negative_delta_does_not_rewind() {
        let mut c = two_levels();
        let mut spawner = RecordingSpawner::default();
        c.on_enemy_killed();
        c.on_enemy_killed();
        c.update(0.0, &mut spawner);

        c.update(1.0, &mut spawner);
        c.update(-5.0, &mut spawner);
        assert_eq!(c.transition_elapsed(), 1.0);
    }

    #[test]
    fn test_has_next_level() {
        let mut c = two_levels();
        let mut spawner = RecordingSpawner::default();
        assert!(c.has_next_level());

        c.on_enemy_killed();
        c.on_enemy_killed();
        c.update(0.0, &mut spawner);
        assert!(c.has_more_levels());
        assert!(!c.has_next_level());
    }
}
