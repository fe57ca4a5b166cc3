// Engine modules: grid, physics, input, frame loop

pub mod game_loop;
pub mod grid;
pub mod input;
pub mod physics;
