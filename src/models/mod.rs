//! Data structures for the registry: players and the roster that owns them.

mod player;
mod registry;

pub use player::{Player, PlayerId};
pub use registry::{PlayerRegistry, RegistryError};
