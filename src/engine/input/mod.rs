// Input handling
//
// The host maps its own key events to `Action`s and hands the core one
// `IntentFlags` snapshot per tick:
//
// ```rust
// use tile_runner::engine::input::{Action, IntentFlags};
//
// let mut intents = IntentFlags::IDLE;
// intents.set(Action::MoveRight, true);
// assert_eq!(intents.horizontal(), 1.0);
// ```

pub mod action;

pub use action::{Action, IntentFlags};
