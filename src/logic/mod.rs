//! Registry business logic: nickname validation and backing-document storage.

mod storage;
mod validation;

pub use storage::{load_roster, save_roster, StorageError};
pub use validation::{nickname_in_use, validate_nickname, NicknameError, MAX_NICKNAME_LEN};
