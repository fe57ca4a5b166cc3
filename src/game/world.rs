// World aggregate
//
// Owns the grid and the actor. The frame loop ticks it through `Simulation`;
// renderers read it through `render_frame`. Resizing replaces the grid between
// ticks, never during one.

use glam::Vec2;
use log::info;

use crate::core::error::positive;
use crate::core::{ConfigError, Rect};
use crate::engine::game_loop::Simulation;
use crate::engine::grid::Grid;
use crate::engine::input::IntentFlags;
use crate::engine::physics::CollisionSides;

use super::characters::{
    Actor, ActorStats, ClipId, ClipTable, Frame, SpriteTransform, StepReport,
};
use super::level::{starter_level, DEFAULT_CELL_SIZE};

/// Viewport and grid settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// World units per grid cell
    pub cell_size: f32,
    /// Where the actor starts and respawns
    pub spawn: Vec2,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(1270.0, 710.0),
            cell_size: DEFAULT_CELL_SIZE,
            spawn: Vec2::ZERO,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub grid: &'a Grid,
    /// Where the sprite is drawn
    pub destination: Rect,
    /// Centre of `destination`; flips and rotation pivot around it
    pub pivot: Vec2,
    pub clip: ClipId,
    /// Source rectangle in the clip's sheet
    pub frame: Frame,
    pub transform: SpriteTransform,
    /// Sides touched during the last tick, for debug overlays
    pub collision_sides: CollisionSides,
}

/// The grid plus the single actor living in it
#[derive(Debug, Clone)]
pub struct World {
    config: WorldConfig,
    grid: Grid,
    actor: Actor,
    last_sides: CollisionSides,
}

impl World {
    /// Build the starter level with the standard character clips
    pub fn new(config: WorldConfig, stats: ActorStats) -> Result<Self, ConfigError> {
        let grid = starter_level(config.viewport.x, config.viewport.y, config.cell_size)?;
        let actor = Actor::new(stats, ClipTable::standard()?, config.spawn)?;
        info!(
            "World created: {}x{} cells of {} units",
            grid.width(),
            grid.height(),
            grid.cell_size()
        );
        Ok(Self::from_parts(config, grid, actor))
    }

    /// Assemble a world from an existing grid and actor
    pub fn from_parts(config: WorldConfig, grid: Grid, actor: Actor) -> Self {
        Self {
            config,
            grid,
            actor,
            last_sides: CollisionSides::NONE,
        }
    }

    /// Rebuild the grid for a new viewport size. The actor keeps its state.
    pub fn resize(&mut self, pixel_width: f32, pixel_height: f32) -> Result<(), ConfigError> {
        let grid = starter_level(pixel_width, pixel_height, self.config.cell_size)?;
        info!(
            "Viewport resized to {}x{}, grid now {}x{} cells",
            pixel_width,
            pixel_height,
            grid.width(),
            grid.height()
        );
        self.config.viewport = Vec2::new(pixel_width, pixel_height);
        self.grid = grid;
        Ok(())
    }

    /// Height of the visible area; the actor respawns once it falls below it
    pub fn visible_height(&self) -> f32 {
        positive(self.config.viewport.y).unwrap_or_else(|| self.grid.world_height())
    }

    /// Advance the actor by one tick
    pub fn step(&mut self, intents: &IntentFlags, dt: f32) -> StepReport {
        let visible_height = self.visible_height();
        let report = self.actor.step_within(&self.grid, intents, dt, visible_height);
        self.last_sides = report.collision_sides;
        report
    }

    pub fn render_frame(&self) -> RenderFrame<'_> {
        let clock = self.actor.active_clock();
        let destination = self.actor.bounds();
        RenderFrame {
            grid: &self.grid,
            destination,
            pivot: destination.center(),
            clip: self.actor.active_clip(),
            frame: clock.current_frame(),
            transform: clock.transform(),
            collision_sides: self.last_sides,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}

impl Simulation for World {
    type Input = IntentFlags;
    type Report = StepReport;

    fn tick(&mut self, input: &IntentFlags, dt: f32) -> StepReport {
        self.step(input, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use crate::game::characters::BASE_STATS;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        World::new(WorldConfig::default(), BASE_STATS).unwrap()
    }

    #[test]
    fn test_new_world_uses_starter_level() {
        let world = world();
        assert_eq!(world.grid().width(), 19);
        assert_eq!(world.grid().height(), 11);
        assert!(world.grid().is_solid(4, 0));
        assert_eq!(world.actor().position(), Vec2::ZERO);
        assert_eq!(world.actor().active_clip(), ClipId::Idle);
    }

    #[test]
    fn test_invalid_cell_size_rejected() {
        let config = WorldConfig {
            cell_size: 0.0,
            ..WorldConfig::default()
        };
        assert_eq!(
            World::new(config, BASE_STATS).unwrap_err(),
            ConfigError::InvalidCellSize(0.0)
        );
    }

    #[test]
    fn test_actor_drops_onto_platform() {
        let mut world = world();
        let mut report = world.step(&IntentFlags::IDLE, DT);
        for _ in 0..120 {
            report = world.step(&IntentFlags::IDLE, DT);
        }
        assert!(report.grounded);
        assert_eq!(world.actor().position(), Vec2::new(0.0, 210.0));
    }

    #[test]
    fn test_walking_off_platform_falls_and_respawns() {
        let mut world = world();
        let right = IntentFlags::from_actions([Action::MoveRight]);

        let mut respawned = false;
        // Platform ends at x = 490; at 100 units/s the walk takes about 5 s
        for _ in 0..60 * 12 {
            if world.step(&right, DT).respawned {
                respawned = true;
                break;
            }
        }
        assert!(respawned);
        assert_eq!(world.actor().position(), Vec2::ZERO);
    }

    #[test]
    fn test_oversized_viewport_rejected() {
        let config = WorldConfig {
            viewport: Vec2::new(f32::MAX, f32::MAX),
            ..WorldConfig::default()
        };
        assert!(matches!(
            World::new(config, BASE_STATS),
            Err(ConfigError::ViewportTooLarge { .. })
        ));
        assert!(world().resize(f32::MAX, 710.0).is_err());
    }

    #[test]
    fn test_respawn_uses_viewport_height() {
        let mut world = world();
        // 710 visible, 770 covered by the grid
        assert_eq!(world.visible_height(), 710.0);
        assert_eq!(world.grid().world_height(), 770.0);

        world.actor.set_position(Vec2::new(900.0, 740.0));
        let report = world.step(&IntentFlags::IDLE, DT);
        assert!(report.respawned);
        assert_eq!(world.actor().position(), Vec2::ZERO);
    }

    #[test]
    fn test_respawn_follows_resize() {
        let mut world = world();
        world.resize(1270.0, 400.0).unwrap();
        world.actor.set_position(Vec2::new(900.0, 405.0));
        assert!(world.step(&IntentFlags::IDLE, DT).respawned);
    }

    #[test]
    fn test_resize_replaces_grid() {
        let mut world = world();
        world.resize(280.0, 420.0).unwrap();
        assert_eq!(world.grid().width(), 4);
        assert_eq!(world.grid().height(), 6);
        assert_eq!(world.grid().solid_cells().count(), 4);
        assert_eq!(world.config().viewport, Vec2::new(280.0, 420.0));

        assert!(world.resize(100.0, 100.0).is_ok());
        assert!(world.grid().solid_cells().next().is_none());
    }

    #[test]
    fn test_render_frame_reflects_actor() {
        let mut world = world();
        for _ in 0..120 {
            world.step(&IntentFlags::IDLE, DT);
        }
        world.step(&IntentFlags::from_actions([Action::MoveLeft]), DT);

        let frame = world.render_frame();
        assert_eq!(frame.clip, ClipId::Walk);
        assert!(frame.transform.flip_horizontal);
        assert_eq!(frame.destination.size, Vec2::new(70.0, 70.0));
        assert_eq!(frame.pivot, frame.destination.origin + Vec2::new(35.0, 35.0));
        assert_eq!(frame.frame.source_y, 0.0);
    }

    #[test]
    fn test_walking_into_left_void_reports_no_sides() {
        let mut world = world();
        for _ in 0..120 {
            world.step(&IntentFlags::IDLE, DT);
        }
        let report = world.step(&IntentFlags::from_actions([Action::MoveLeft]), DT);
        assert!(!report.collision_sides.any());
        assert!(world.actor().position().x < 0.0);
        assert_eq!(world.render_frame().collision_sides, CollisionSides::NONE);
    }
}
