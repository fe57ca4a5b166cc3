use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};

use tile_runner::engine::game_loop::{GameLoop, Renderer};
use tile_runner::engine::input::{Action, IntentFlags};
use tile_runner::game::characters::{ClipId, BASE_STATS};
use tile_runner::game::{World, WorldConfig};

/// Simulated display refresh interval
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Frames to simulate (ten seconds at 60 Hz)
const FRAME_COUNT: u32 = 600;

/// Stands in for the canvas: logs what would be drawn
#[derive(Default)]
struct LogRenderer {
    last_clip: Option<ClipId>,
}

impl Renderer<World> for LogRenderer {
    fn redraw(&mut self, world: &World) {
        let frame = world.render_frame();
        if self.last_clip != Some(frame.clip) {
            let (scale_x, scale_y) = frame.transform.scale();
            info!(
                "Clip {} around ({:.1}, {:.1}), scale ({}, {})",
                frame.clip.name(),
                frame.pivot.x,
                frame.pivot.y,
                scale_x,
                scale_y
            );
            self.last_clip = Some(frame.clip);
        }
        if frame.collision_sides.any() {
            debug!("Collision sides: {:?}", frame.collision_sides);
        }
    }
}

/// Scripted input: walk right, attack, jump, walk left, then walk off the platform
fn scripted_intents(frame: u32) -> IntentFlags {
    let seconds = frame as f32 / 60.0;
    let actions: &[Action] = match seconds {
        s if s < 1.0 => &[],
        s if s < 2.5 => &[Action::MoveRight],
        s if s < 2.6 => &[Action::Attack],
        s if s < 3.5 => &[Action::MoveRight],
        s if s < 3.6 => &[Action::Jump],
        s if s < 5.0 => &[Action::MoveLeft],
        s if s < 6.0 => &[],
        _ => &[Action::MoveRight],
    };
    IntentFlags::from_actions(actions.iter().copied())
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Tile Runner (headless)...");

    let mut world = World::new(WorldConfig::default(), BASE_STATS)?;
    let mut renderer = LogRenderer::default();

    let mut now = Instant::now();
    let mut game_loop = GameLoop::starting_at(now);

    for frame in 0..FRAME_COUNT {
        // Halfway through, the window is made narrower
        if frame == FRAME_COUNT / 2 {
            world.resize(980.0, 710.0)?;
        }

        now += FRAME_INTERVAL;
        let intents = scripted_intents(frame);
        if let Some(report) = game_loop.run_frame_at(now, &mut world, &intents, &mut renderer) {
            if report.respawned {
                info!("Respawned at frame {frame}");
            }
        }
    }

    let position = world.actor().position();
    info!(
        "Simulated {} frames ({:.1} s, {:.0} fps); actor at ({:.1}, {:.1})",
        game_loop.frame_count(),
        game_loop.elapsed().as_secs_f32(),
        game_loop.fps(),
        position.x,
        position.y
    );

    Ok(())
}
