// Grid physics: tile collision resolution

mod collision;

pub use collision::{CollisionResolver, CollisionResult, CollisionSides, SeamPolicy};
