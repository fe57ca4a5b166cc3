// Character system
//
// This module contains everything related to the playable character:
// - Actor state and the per-tick step
// - Tuning constants
// - Clip selection state machine
// - Animation clocks for sprite sheets

pub mod actor;
pub mod animation;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use actor::{Actor, StepReport};
pub use animation::{AnimationClock, AnimationConfig, Frame, SpriteTransform};
pub use state::{next_clip, ClipId, ClipTable, ClipTransition};
pub use stats::{ActorStats, GroundContact, BASE_STATS};
