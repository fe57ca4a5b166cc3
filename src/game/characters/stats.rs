// Actor tuning
//
// Movement and physics constants for the playable character. Distances are in
// world units (pixels), times in seconds, y grows downward.

use crate::core::error::{positive, ConfigError};

/// How a bottom-side contact is handled while the actor is still rising
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroundContact {
    /// Any bottom-side contact lands the actor
    #[default]
    Symmetric,
    /// Only a descending actor lands; a rising one is snapped but keeps its velocity
    PassThroughAscending,
}

/// Fixed tuning for the actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorStats {
    // Movement
    /// Horizontal speed while walking (units/second)
    pub run_speed: f32,
    /// Upward speed at the start of a jump (units/second)
    pub jump_impulse: f32,

    // Physics
    /// Downward acceleration (units/second²)
    pub gravity: f32,
    /// Fraction of upward speed kept (reversed) after hitting a ceiling
    pub bounce_damping: f32,
    /// Largest delta time a single tick integrates
    pub max_frame_delta: f32,
    pub ground_contact: GroundContact,

    // Dimensions (hitbox)
    pub width: f32,
    pub height: f32,
}

pub const BASE_STATS: ActorStats = ActorStats {
    run_speed: 100.0,
    jump_impulse: 550.0,

    gravity: 980.0,
    bounce_damping: 0.5,
    max_frame_delta: 0.1,
    ground_contact: GroundContact::Symmetric,

    // One cell of the default 70-unit grid
    width: 70.0,
    height: 70.0,
};

impl Default for ActorStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl ActorStats {
    /// Reject values that would make the simulation degenerate
    pub fn validate(self) -> Result<Self, ConfigError> {
        if positive(self.width).is_none() || positive(self.height).is_none() {
            return Err(ConfigError::InvalidActorSize {
                width: self.width,
                height: self.height,
            });
        }

        let non_negative = [
            ("run_speed", self.run_speed),
            ("jump_impulse", self.jump_impulse),
            ("gravity", self.gravity),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTuning { name, value });
            }
        }

        if !(0.0..=1.0).contains(&self.bounce_damping) {
            return Err(ConfigError::InvalidTuning {
                name: "bounce_damping",
                value: self.bounce_damping,
            });
        }
        if positive(self.max_frame_delta).is_none() {
            return Err(ConfigError::InvalidTuning {
                name: "max_frame_delta",
                value: self.max_frame_delta,
            });
        }

        Ok(self)
    }
}
