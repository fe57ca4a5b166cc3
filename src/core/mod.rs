// Core types shared by the engine and game layers

pub mod error;
pub mod math;

pub use error::ConfigError;
pub use math::Rect;
