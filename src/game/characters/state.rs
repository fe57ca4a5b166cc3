// Clip selection state machine
//
// The actor never holds a nullable "current animation"; it holds a `ClipId`
// and looks the clock up in its `ClipTable`. Choosing the next clip is a pure
// function of the current clip, its finished flag and the intents.

use crate::core::ConfigError;
use crate::engine::input::IntentFlags;

use super::animation::{AnimationClock, AnimationConfig};

/// Frame size of the standard character sheets
pub const STANDARD_FRAME_SIZE: f32 = 128.0;

/// Identifies one of the actor's clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipId {
    #[default]
    Idle,
    Walk,
    Attack,
}

impl ClipId {
    pub const ALL: [ClipId; 3] = [ClipId::Idle, ClipId::Walk, ClipId::Attack];

    /// Name of the clip's sprite sheet entry
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Attack => "attack",
        }
    }
}

/// All clocks owned by one actor; switching clips never drops the others
#[derive(Debug, Clone)]
pub struct ClipTable {
    idle: AnimationClock,
    walk: AnimationClock,
    attack: AnimationClock,
}

impl ClipTable {
    pub fn new(idle: AnimationClock, walk: AnimationClock, attack: AnimationClock) -> Self {
        Self { idle, walk, attack }
    }

    /// Clips for the standard character sheets.
    ///
    /// Walk is a single-use loop so that releasing the keys lets the current
    /// stride finish before idle takes over; attack plays once.
    pub fn standard() -> Result<Self, ConfigError> {
        let size = STANDARD_FRAME_SIZE;
        let idle = AnimationConfig::looping(6, size, size, 0.15)?;
        let walk = AnimationConfig::looping(8, size, size, 0.1)?.with_single_use(true);
        let attack = AnimationConfig::one_shot(5, size, size, 0.1)?;
        Ok(Self::new(
            AnimationClock::new(idle),
            AnimationClock::new(walk),
            AnimationClock::new(attack),
        ))
    }

    pub fn get(&self, id: ClipId) -> &AnimationClock {
        match id {
            ClipId::Idle => &self.idle,
            ClipId::Walk => &self.walk,
            ClipId::Attack => &self.attack,
        }
    }

    pub fn get_mut(&mut self, id: ClipId) -> &mut AnimationClock {
        match id {
            ClipId::Idle => &mut self.idle,
            ClipId::Walk => &mut self.walk,
            ClipId::Attack => &mut self.attack,
        }
    }
}

/// Result of a clip decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipTransition {
    /// Clip to show this tick
    pub next: ClipId,
    /// Whether `next` must be rewound and started
    pub restart: bool,
}

impl ClipTransition {
    fn stay(current: ClipId) -> Self {
        Self {
            next: current,
            restart: false,
        }
    }

    fn enter(current: ClipId, next: ClipId) -> Self {
        Self {
            next,
            restart: next != current,
        }
    }
}

/// Whether an unfinished attack is locking out other actions
pub fn is_attacking(current: ClipId, current_finished: bool) -> bool {
    current == ClipId::Attack && !current_finished
}

/// Decide the clip for this tick.
///
/// In priority order: an unfinished attack holds; movement selects walk;
/// attack restarts the attack clip; otherwise the current clip plays until it
/// reports finished and then falls back to idle.
pub fn next_clip(current: ClipId, current_finished: bool, intents: &IntentFlags) -> ClipTransition {
    if is_attacking(current, current_finished) {
        return ClipTransition::stay(current);
    }

    if intents.wants_to_move() {
        return ClipTransition::enter(current, ClipId::Walk);
    }

    if intents.action_pressed {
        return ClipTransition {
            next: ClipId::Attack,
            restart: true,
        };
    }

    if current_finished {
        return ClipTransition::enter(current, ClipId::Idle);
    }

    ClipTransition::stay(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;

    fn intents(actions: &[Action]) -> IntentFlags {
        IntentFlags::from_actions(actions.iter().copied())
    }

    #[test]
    fn test_attack_in_progress_ignores_movement() {
        let t = next_clip(ClipId::Attack, false, &intents(&[Action::MoveRight, Action::Attack]));
        assert_eq!(t, ClipTransition { next: ClipId::Attack, restart: false });
    }

    #[test]
    fn test_finished_attack_allows_walk() {
        let t = next_clip(ClipId::Attack, true, &intents(&[Action::MoveLeft]));
        assert_eq!(t, ClipTransition { next: ClipId::Walk, restart: true });
    }

    #[test]
    fn test_walk_continues_without_restart() {
        let t = next_clip(ClipId::Walk, false, &intents(&[Action::MoveRight]));
        assert_eq!(t, ClipTransition { next: ClipId::Walk, restart: false });
    }

    #[test]
    fn test_attack_from_idle() {
        let t = next_clip(ClipId::Idle, false, &intents(&[Action::Attack]));
        assert_eq!(t, ClipTransition { next: ClipId::Attack, restart: true });
    }

    #[test]
    fn test_repeat_attack_after_finish_restarts() {
        let t = next_clip(ClipId::Attack, true, &intents(&[Action::Attack]));
        assert_eq!(t, ClipTransition { next: ClipId::Attack, restart: true });
    }

    #[test]
    fn test_movement_beats_attack() {
        let t = next_clip(ClipId::Idle, false, &intents(&[Action::MoveLeft, Action::Attack]));
        assert_eq!(t.next, ClipId::Walk);
    }

    #[test]
    fn test_walk_plays_out_before_idle() {
        let unfinished = next_clip(ClipId::Walk, false, &IntentFlags::IDLE);
        assert_eq!(unfinished, ClipTransition { next: ClipId::Walk, restart: false });

        let finished = next_clip(ClipId::Walk, true, &IntentFlags::IDLE);
        assert_eq!(finished, ClipTransition { next: ClipId::Idle, restart: true });
    }

    #[test]
    fn test_idle_stays_idle() {
        assert_eq!(next_clip(ClipId::Idle, false, &IntentFlags::IDLE), ClipTransition::stay(ClipId::Idle));
    }

    #[test]
    fn test_opposing_directions_do_not_walk() {
        let t = next_clip(ClipId::Idle, false, &intents(&[Action::MoveLeft, Action::MoveRight]));
        assert_eq!(t.next, ClipId::Idle);
    }

    #[test]
    fn test_clip_table_lookup() {
        let clock = |frames| AnimationClock::new(AnimationConfig::looping(frames, 64.0, 64.0, 0.1).unwrap());
        let mut table = ClipTable::new(clock(1), clock(2), clock(3));
        for (id, frames) in ClipId::ALL.into_iter().zip([1, 2, 3]) {
            assert_eq!(table.get(id).frame_count(), frames);
        }
        table.get_mut(ClipId::Walk).set_flip(true, false);
        assert!(table.get(ClipId::Walk).is_flipped(false));
        assert!(!table.get(ClipId::Idle).is_flipped(false));
    }

    #[test]
    fn test_standard_clips() {
        let table = ClipTable::standard().unwrap();
        assert!(table.get(ClipId::Idle).config().is_looping());
        assert!(table.get(ClipId::Walk).config().is_single_use());
        assert!(!table.get(ClipId::Attack).config().is_looping());
        assert_eq!(table.get(ClipId::Attack).frame_count(), 5);
        assert_eq!(table.get(ClipId::Walk).current_frame().source_width, STANDARD_FRAME_SIZE);
    }

    #[test]
    fn test_clip_names() {
        assert_eq!(ClipId::Idle.name(), "idle");
        assert_eq!(ClipId::Walk.name(), "walk");
        assert_eq!(ClipId::Attack.name(), "attack");
    }
}
