pub mod entity;
pub mod error;
pub mod events;
pub mod physics;

pub use entity::{EntityRecord, EntityRegistry};
pub use error::WorldError;
pub use events::EventQueue;
pub use physics::{PhysicsWorld, ShapeDesc};
