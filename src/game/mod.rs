// Game layer: the actor, its clips, the level and the world that ties them together

pub mod characters;
pub mod level;
pub mod world;

pub use world::{RenderFrame, World, WorldConfig};
