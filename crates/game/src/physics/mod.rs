mod character;
mod query;
mod scripted;
mod world;

pub use character::CharacterBody;
pub use query::{CollisionFlags, CollisionQuery};
pub use scripted::ScriptedBody;
pub use world::PhysicsWorld;
