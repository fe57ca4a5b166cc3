//! Tile-grid platformer core.
//!
//! A single actor moves over a static grid of solid cells. Each tick the actor
//! turns intent flags into a tentative displacement, resolves it against the
//! grid with least-penetration correction, and picks the sprite clip that
//! reflects what it is doing. Drawing, asset loading and raw input stay with
//! the host.

pub mod core;
pub mod engine;
pub mod game;
