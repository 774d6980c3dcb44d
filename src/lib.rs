//! Player registry: library with the player model, the registry service and its JSON storage.

pub mod config;
pub(crate) mod logic;
pub mod models;

pub use config::RegistryConfig;
pub use logic::{NicknameError, StorageError, MAX_NICKNAME_LEN};
pub use models::{Player, PlayerId, PlayerRegistry, RegistryError};
