// The playable actor
//
// Owns position, velocity, jump state and the clip table, and advances all of
// them once per tick against a read-only grid.

use glam::Vec2;
use log::{debug, info, warn};

use crate::core::math::{clamp, finite_non_negative};
use crate::core::{ConfigError, Rect};
use crate::engine::grid::Grid;
use crate::engine::input::IntentFlags;
use crate::engine::physics::{CollisionResolver, CollisionSides};

use super::animation::AnimationClock;
use super::state::{is_attacking, next_clip, ClipId, ClipTable, ClipTransition};
use super::stats::{ActorStats, GroundContact};

/// What one tick produced, for the frame loop and debug overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub position: Vec2,
    pub active_clip: ClipId,
    /// Sides that touched solid cells this tick (informational)
    pub collision_sides: CollisionSides,
    /// Standing on solid ground at the end of the tick
    pub grounded: bool,
    /// The actor fell out of the world and was put back at its spawn point
    pub respawned: bool,
}

/// The single character that interacts with the grid
#[derive(Debug, Clone)]
pub struct Actor {
    stats: ActorStats,
    spawn: Vec2,
    position: Vec2,
    /// x: walking speed magnitude. y: vertical speed, positive upward.
    velocity: Vec2,
    is_jumping: bool,
    facing_left: bool,
    clips: ClipTable,
    active_clip: ClipId,
    /// Finished flag of the active clip as of the start of the last tick
    animation_gate: bool,
    resolver: CollisionResolver,
}

impl Actor {
    /// Create an actor at `spawn`, idle and ready to jump
    pub fn new(stats: ActorStats, clips: ClipTable, spawn: Vec2) -> Result<Self, ConfigError> {
        let stats = stats.validate()?;
        Ok(Self {
            stats,
            spawn,
            position: spawn,
            velocity: Vec2::new(stats.run_speed, stats.jump_impulse),
            is_jumping: false,
            facing_left: false,
            clips,
            active_clip: ClipId::Idle,
            animation_gate: false,
            resolver: CollisionResolver::default(),
        })
    }

    pub fn with_resolver(mut self, resolver: CollisionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Advance the actor by one tick, treating the whole grid as visible.
    ///
    /// Never fails: bad delta times are clamped to `[0, max_frame_delta]`.
    pub fn step(&mut self, grid: &Grid, intents: &IntentFlags, dt: f32) -> StepReport {
        self.step_within(grid, intents, dt, grid.world_height())
    }

    /// Advance the actor by one tick. Falling below `visible_height` (or
    /// ending up at a non-finite position) respawns it.
    pub fn step_within(
        &mut self,
        grid: &Grid,
        intents: &IntentFlags,
        dt: f32,
        visible_height: f32,
    ) -> StepReport {
        let dt = self.clamp_delta(dt);

        // Animation choice, gated on the clip as it stood before this tick
        self.animation_gate = self.active_clock().is_finished();
        let attacking = is_attacking(self.active_clip, self.animation_gate);
        let direction = if attacking { 0.0 } else { intents.horizontal() };
        if direction != 0.0 {
            self.facing_left = direction < 0.0;
        }
        let transition = next_clip(self.active_clip, self.animation_gate, intents);
        self.switch_clip(transition);

        let mut desired = self.position;
        desired.x += direction * self.velocity.x * dt;

        // Ground probe and jump start
        let mut grounded = false;
        if !self.is_jumping {
            if self.resolver.is_supported(grid, self.bounds()) {
                if intents.jump_pressed && !attacking {
                    self.is_jumping = true;
                    self.velocity.y = self.stats.jump_impulse;
                } else {
                    grounded = true;
                }
            } else {
                // Walked off a ledge: start falling from rest
                self.is_jumping = true;
                self.velocity.y = 0.0;
            }
        }

        if self.is_jumping {
            let start_speed = self.velocity.y;
            self.velocity.y -= self.stats.gravity * dt;
            // Average speed over the tick integrates constant gravity exactly
            desired.y -= 0.5 * (start_speed + self.velocity.y) * dt;
        }

        // Each axis is resolved against the tick's starting position on the other axis
        let size = self.size();
        let horizontal = self
            .resolver
            .resolve(grid, Rect::from_origin_size(Vec2::new(desired.x, self.position.y), size));
        let vertical = self
            .resolver
            .resolve(grid, Rect::from_origin_size(Vec2::new(self.position.x, desired.y), size));

        let horizontal_sides = horizontal.sides.horizontal();
        let vertical_sides = vertical.sides.vertical();
        if horizontal_sides.any() {
            desired.x = horizontal.snap.x;
        }
        if vertical_sides.any() {
            desired.y = vertical.snap.y;
        }
        self.position = desired;

        if vertical_sides.bottom && self.is_jumping && self.lands_on_contact() {
            debug!("Landed at ({:.1}, {:.1})", self.position.x, self.position.y);
            self.is_jumping = false;
            self.velocity.y = self.stats.jump_impulse;
            grounded = true;
        }
        if vertical_sides.top && self.velocity.y > 0.0 {
            self.velocity.y = -self.velocity.y * self.stats.bounce_damping;
        }

        let respawned = !self.position.is_finite() || self.position.y > visible_height;
        if respawned {
            self.respawn();
            grounded = false;
        }

        self.active_clock_mut().advance(dt);

        StepReport {
            position: self.position,
            active_clip: self.active_clip,
            collision_sides: horizontal_sides.union(vertical_sides),
            grounded,
            respawned,
        }
    }

    /// Put the actor back at its spawn point, ready to jump
    pub fn respawn(&mut self) {
        info!(
            "Actor left the world at y = {:.1}, respawning at ({:.1}, {:.1})",
            self.position.y, self.spawn.x, self.spawn.y
        );
        self.position = self.spawn;
        self.velocity.y = self.stats.jump_impulse;
        self.is_jumping = false;
    }

    /// Move the actor without touching its velocity or jump state
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn is_facing_left(&self) -> bool {
        self.facing_left
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.stats.width, self.stats.height)
    }

    /// Hitbox at the current position
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }

    pub fn active_clip(&self) -> ClipId {
        self.active_clip
    }

    pub fn active_clock(&self) -> &AnimationClock {
        self.clips.get(self.active_clip)
    }

    fn active_clock_mut(&mut self) -> &mut AnimationClock {
        self.clips.get_mut(self.active_clip)
    }

    pub fn clips(&self) -> &ClipTable {
        &self.clips
    }

    pub fn animation_gate(&self) -> bool {
        self.animation_gate
    }

    fn clamp_delta(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt < 0.0 {
            warn!("Ignoring invalid delta time {dt}");
        }
        clamp(finite_non_negative(dt), 0.0, self.stats.max_frame_delta)
    }

    fn lands_on_contact(&self) -> bool {
        match self.stats.ground_contact {
            GroundContact::Symmetric => true,
            GroundContact::PassThroughAscending => self.velocity.y <= 0.0,
        }
    }

    fn switch_clip(&mut self, transition: ClipTransition) {
        if transition.restart {
            if transition.next != self.active_clip {
                debug!(
                    "Clip {} -> {}",
                    self.active_clip.name(),
                    transition.next.name()
                );
            }
            self.active_clip = transition.next;
            let clock = self.active_clock_mut();
            clock.reset();
            clock.play();
        }

        let facing_left = self.facing_left;
        let clock = self.active_clock_mut();
        let flip_vertical = clock.is_flipped(true);
        clock.set_flip(facing_left, flip_vertical);
    }
}
