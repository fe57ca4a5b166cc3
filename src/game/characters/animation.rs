// Sprite animation clocks
//
// One `AnimationClock` per clip. A clock steps through the frames of a sprite
// sheet on a fixed cooldown and reports when a one-shot clip ends or a
// single-use loop completes a cycle.

use crate::core::error::{positive, ConfigError};

/// Immutable playback and frame-geometry settings for one clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    frame_count: usize,
    frame_width: f32,
    frame_height: f32,
    cooldown: f32,
    looping: bool,
    autoplay: bool,
    single_use: bool,
}

impl AnimationConfig {
    /// Create a validated config. Clips autoplay by default.
    pub fn new(
        frame_count: usize,
        frame_width: f32,
        frame_height: f32,
        cooldown: f32,
        looping: bool,
    ) -> Result<Self, ConfigError> {
        if frame_count == 0 {
            return Err(ConfigError::ZeroFrameCount);
        }
        let cooldown = positive(cooldown).ok_or(ConfigError::InvalidCooldown(cooldown))?;
        if positive(frame_width).is_none() || positive(frame_height).is_none() {
            return Err(ConfigError::InvalidFrameSize {
                width: frame_width,
                height: frame_height,
            });
        }

        Ok(Self {
            frame_count,
            frame_width,
            frame_height,
            cooldown,
            looping,
            autoplay: true,
            single_use: false,
        })
    }

    /// Create a looping clip
    pub fn looping(
        frame_count: usize,
        frame_width: f32,
        frame_height: f32,
        cooldown: f32,
    ) -> Result<Self, ConfigError> {
        Self::new(frame_count, frame_width, frame_height, cooldown, true)
    }

    /// Create a one-shot clip (plays once and holds the last frame)
    pub fn one_shot(
        frame_count: usize,
        frame_width: f32,
        frame_height: f32,
        cooldown: f32,
    ) -> Result<Self, ConfigError> {
        Self::new(frame_count, frame_width, frame_height, cooldown, false)
    }

    /// Whether the clip starts playing as soon as its clock is created
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// A single-use loop reports finished each time it wraps back to frame 0
    pub fn with_single_use(mut self, single_use: bool) -> Self {
        self.single_use = single_use;
        self
    }

    /// Copy of this config with a different sheet layout
    pub fn with_frame_geometry(
        &self,
        frame_count: usize,
        frame_width: f32,
        frame_height: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(frame_count, frame_width, frame_height, self.cooldown, self.looping)?
            .with_autoplay(self.autoplay)
            .with_single_use(self.single_use))
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_height
    }

    /// Seconds per frame
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn is_single_use(&self) -> bool {
        self.single_use
    }

    /// Duration of one full cycle in seconds
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.cooldown
    }

    /// Frames laid out left to right in a single-row sheet
    fn strip(&self) -> Vec<Frame> {
        (0..self.frame_count)
            .map(|index| Frame {
                source_x: index as f32 * self.frame_width,
                source_y: 0.0,
                source_width: self.frame_width,
                source_height: self.frame_height,
            })
            .collect()
    }
}

/// Source rectangle of one frame in the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub source_x: f32,
    pub source_y: f32,
    pub source_width: f32,
    pub source_height: f32,
}

/// Transform the drawing side applies around the sprite's centre before blitting
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpriteTransform {
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    /// Radians
    pub rotation: f32,
}

impl SpriteTransform {
    /// Scale factors equivalent to the flip flags
    pub fn scale(&self) -> (f32, f32) {
        (
            if self.flip_horizontal { -1.0 } else { 1.0 },
            if self.flip_vertical { -1.0 } else { 1.0 },
        )
    }
}

/// Frame timer for one clip
#[derive(Debug, Clone)]
pub struct AnimationClock {
    config: AnimationConfig,
    /// Never empty
    frames: Vec<Frame>,
    current_frame: usize,
    elapsed_in_frame: f32,
    playing: bool,
    finished: bool,
    transform: SpriteTransform,
}

impl AnimationClock {
    /// Create a clock whose frames are a horizontal strip derived from the config
    pub fn new(config: AnimationConfig) -> Self {
        let frames = config.strip();
        Self::from_parts(config, frames)
    }

    /// Create a clock with an explicit frame table
    pub fn with_frames(config: AnimationConfig, frames: Vec<Frame>) -> Result<Self, ConfigError> {
        if frames.is_empty() {
            return Err(ConfigError::EmptyFrames);
        }
        Ok(Self::from_parts(config, frames))
    }

    fn from_parts(config: AnimationConfig, frames: Vec<Frame>) -> Self {
        Self {
            playing: config.autoplay,
            config,
            frames,
            current_frame: 0,
            elapsed_in_frame: 0.0,
            finished: false,
            transform: SpriteTransform::default(),
        }
    }

    /// Advance the clock by `dt` seconds.
    ///
    /// At most one frame is advanced per call and the timer restarts from zero
    /// (any overshoot past the cooldown is dropped). Negative or non-finite
    /// deltas count as zero.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing || self.frames.is_empty() {
            return;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed_in_frame += dt;
        if self.elapsed_in_frame < self.config.cooldown {
            return;
        }

        self.elapsed_in_frame = 0.0;
        self.current_frame += 1;

        if self.current_frame >= self.frames.len() {
            if self.config.looping {
                self.current_frame = 0;
                if self.config.single_use {
                    self.finished = true;
                }
            } else {
                // Hold the last frame
                self.current_frame = self.frames.len() - 1;
                self.playing = false;
                self.finished = true;
            }
        } else {
            self.finished = false;
        }
    }

    /// Source rectangle of the current frame
    pub fn current_frame(&self) -> Frame {
        self.frames[self.current_frame]
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    /// Seconds accumulated toward the next frame
    pub fn elapsed_in_frame(&self) -> f32 {
        self.elapsed_in_frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Rewind to frame 0 and clear the finished flag; play/pause state is kept
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.elapsed_in_frame = 0.0;
        self.finished = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn set_flip(&mut self, horizontal: bool, vertical: bool) {
        self.transform.flip_horizontal = horizontal;
        self.transform.flip_vertical = vertical;
    }

    /// Flip state along one axis
    pub fn is_flipped(&self, vertical: bool) -> bool {
        if vertical {
            self.transform.flip_vertical
        } else {
            self.transform.flip_horizontal
        }
    }

    /// Rotation in radians
    pub fn set_rotation(&mut self, angle: f32) {
        self.transform.rotation = angle;
    }

    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    pub fn transform(&self) -> SpriteTransform {
        self.transform
    }

    /// Replace the frame table and rewind
    pub fn set_frames(&mut self, frames: Vec<Frame>) -> Result<(), ConfigError> {
        if frames.is_empty() {
            return Err(ConfigError::EmptyFrames);
        }
        self.frames = frames;
        self.reset();
        Ok(())
    }

    pub fn add_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Remove the frame at `index`, keeping the current index in range.
    ///
    /// Returns `None` for an out-of-range index or when only one frame is left.
    pub fn remove_frame(&mut self, index: usize) -> Option<Frame> {
        if index >= self.frames.len() || self.frames.len() == 1 {
            return None;
        }
        let removed = self.frames.remove(index);
        if self.current_frame >= self.frames.len() {
            self.current_frame = self.frames.len() - 1;
        }
        Some(removed)
    }

    /// Install a new config, regenerate the strip and rewind
    pub fn rebuild_config(&mut self, config: AnimationConfig) {
        self.frames = config.strip();
        self.config = config;
        self.reset();
    }
}
