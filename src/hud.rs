/*
ShootemUp - Arcade Shooter
*/
use crate::level_controller::LevelController;

/// Progress Bar is Drawn as This Many Segments
pub const PROGRESS_SEGMENTS: u32 = 10;

/// Banner Blinks at 2 Hz (On for Half a Second, Off for Half a Second)
const BLINK_RATE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    NextLevel,
    GameComplete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionBanner {
    pub visible: bool,
    pub outcome: TransitionOutcome,
}

/// Everything a Renderer Needs to Draw the Level Indicator
/// Built Fresh Each Frame, Never Written Back
#[derive(Debug, Clone, PartialEq)]
pub struct LevelHudView {
    pub level_number: u32,
    pub level_name: String,
    pub kills: u32,
    pub required: u32,
    pub progress_segments: u32,
    pub progress_fraction: f32,
    pub banner: Option<TransitionBanner>,
}

/// Filled Segments for `kills` out of `required`, 0 When Nothing is Required
pub fn progress_segments(kills: u32, required: u32) -> u32 {
    if required == 0 {
        return 0;
    }
    let filled = u64::from(kills) * u64::from(PROGRESS_SEGMENTS) / u64::from(required);
    filled.min(u64::from(PROGRESS_SEGMENTS)) as u32
}

impl LevelHudView {
    pub fn from_controller(c: &LevelController) -> Self {
        let required = c.enemies_required();

        let banner = c.in_transition().then(|| TransitionBanner {
            visible: (c.transition_elapsed() * BLINK_RATE) as i32 % 2 == 0,
            outcome: if c.has_more_levels() {
                TransitionOutcome::NextLevel
            } else {
                TransitionOutcome::GameComplete
            },
        });

        Self {
            level_number: c.current_level_number(),
            level_name: c.level_name().to_owned(),
            kills: c.kill_count(),
            required,
            progress_segments: progress_segments(c.kill_count(), required),
            progress_fraction: c.progress_fraction(),
            banner,
        }
    }

    /// Single Line Used by the Text HUD
    pub fn status_line(&self) -> String {
        let bar: String = (0..PROGRESS_SEGMENTS)
            .map(|i| if i < self.progress_segments { '#' } else { '-' })
            .collect();

        let mut line = format!(
            "LVL {} {}  [{}] {}/{}",
            self.level_number, self.level_name, bar, self.kills, self.required
        );

        match self.banner {
            Some(TransitionBanner { visible: true, outcome: TransitionOutcome::NextLevel }) => {
                line.push_str("\nLEVEL COMPLETE - NEXT LEVEL");
            }
            Some(TransitionBanner { visible: true, outcome: TransitionOutcome::GameComplete }) => {
                line.push_str("\nLEVEL COMPLETE - GAME COMPLETE");
            }
            _ => {}
        }
        line
    }
}
