/// Frame loop driver
///
/// Variable-timestep loop: each display refresh measures the time since the
/// previous frame, runs one simulation tick with that delta, then asks the
/// renderer to redraw. There is no fixed-step accumulator, so runs are not
/// bit-for-bit reproducible across frame rates.
use std::time::{Duration, Instant};

use crate::core::math::clamp;

/// Longest delta handed to a tick; stalls (debugger, window drag) are cut to this
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Something advanced once per frame
pub trait Simulation {
    type Input;
    type Report;

    fn tick(&mut self, input: &Self::Input, dt: f32) -> Self::Report;
}

/// Drawing side of the loop; reads the simulation, never mutates it
pub trait Renderer<S> {
    fn redraw(&mut self, simulation: &S);
}

/// Game loop timing state
pub struct GameLoop {
    /// Time of last frame
    last_frame_time: Instant,

    /// Time when game loop started
    start_time: Instant,

    /// Whether the game is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total simulation ticks executed
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Delta handed to the last tick (seconds)
    delta_time: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a loop whose first frame is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame_time: start,
            start_time: start,
            paused: false,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
            delta_time: 0.0,
        }
    }

    /// Begin a new frame at `now`, returning the delta for this frame's tick.
    ///
    /// Returns 0 while paused. Deltas are capped at `MAX_FRAME_DELTA`.
    pub fn begin_frame_at(&mut self, now: Instant) -> f32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.delta_time = if self.paused {
            0.0
        } else {
            clamp(frame_time.as_secs_f32(), 0.0, MAX_FRAME_DELTA)
        };
        self.delta_time
    }

    /// Run one full frame: tick the simulation (unless paused), then redraw.
    pub fn run_frame_at<S, R>(
        &mut self,
        now: Instant,
        simulation: &mut S,
        input: &S::Input,
        renderer: &mut R,
    ) -> Option<S::Report>
    where
        S: Simulation,
        R: Renderer<S>,
    {
        let dt = self.begin_frame_at(now);
        let report = if self.paused {
            None
        } else {
            self.tick_count += 1;
            Some(simulation.tick(input, dt))
        };
        renderer.redraw(simulation);
        report
    }

    /// Get the delta handed to the last tick (in seconds)
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        self.last_frame_time.saturating_duration_since(self.start_time)
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of simulation ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(20);

    /// Counts ticks
    #[derive(Default)]
    struct Counter {
        ticks: u32,
        last_dt: f32,
    }

    impl Simulation for Counter {
        type Input = ();
        type Report = u32;

        fn tick(&mut self, _input: &(), dt: f32) -> u32 {
            self.ticks += 1;
            self.last_dt = dt;
            self.ticks
        }
    }

    struct NullRenderer;

    impl Renderer<Counter> for NullRenderer {
        fn redraw(&mut self, _simulation: &Counter) {}
    }

    impl Renderer<Counter> for Vec<u32> {
        fn redraw(&mut self, simulation: &Counter) {
            self.push(simulation.ticks);
        }
    }

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.tick_count(), 0);
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_delta_is_measured_per_frame() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);
        let dt = game_loop.begin_frame_at(start + FRAME);
        assert!((dt - 0.02).abs() < 1e-6);
        assert_eq!(game_loop.frame_count(), 1);
        assert_eq!(game_loop.elapsed(), FRAME);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);
        let dt = game_loop.begin_frame_at(start + Duration::from_secs(3));
        assert_eq!(dt, MAX_FRAME_DELTA);
    }

    #[test]
    fn test_pause_resume() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());
        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_run_frame_ticks_then_redraws() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);
        let mut counter = Counter::default();
        let mut redraws: Vec<u32> = Vec::new();

        let report = game_loop.run_frame_at(start + FRAME, &mut counter, &(), &mut redraws);
        assert_eq!(report, Some(1));
        assert!((counter.last_dt - 0.02).abs() < 1e-6);
        // The redraw sees the state after the tick
        assert_eq!(redraws, vec![1]);
    }

    #[test]
    fn test_paused_frames_redraw_without_ticking() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);
        let mut counter = Counter::default();
        game_loop.pause();

        let report = game_loop.run_frame_at(start + FRAME, &mut counter, &(), &mut NullRenderer);
        assert_eq!(report, None);
        assert_eq!(counter.ticks, 0);
        assert_eq!(game_loop.delta_time(), 0.0);
        assert_eq!(game_loop.tick_count(), 0);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_fps_tracking() {
        let start = Instant::now();
        let mut game_loop = GameLoop::starting_at(start);
        let mut now = start;
        for _ in 0..10 {
            now += FRAME;
            game_loop.begin_frame_at(now);
        }
        assert!((game_loop.fps() - 50.0).abs() < 0.01);
    }
}
