//! Nickname rules: shape checks and uniqueness against the live roster.

use crate::models::Player;
use thiserror::Error;

/// Longest nickname accepted at creation, counted in characters.
pub const MAX_NICKNAME_LEN: usize = 15;

/// Why a nickname was rejected.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum NicknameError {
    #[error("Nickname cannot be empty")]
    Empty,

    #[error("Nickname is {length} characters long (max: {max})")]
    TooLong { length: usize, max: usize },

    #[error("Nickname '{0}' is already taken")]
    Taken(String),
}

/// True if a live player already uses exactly this nickname (case-sensitive).
pub fn nickname_in_use<'a>(nickname: &str, mut players: impl Iterator<Item = &'a Player>) -> bool {
    players.any(|p| p.nickname == nickname)
}

/// Check that `nickname` can be given to a new player next to `players`.
pub fn validate_nickname<'a>(
    nickname: &str,
    players: impl Iterator<Item = &'a Player>,
) -> Result<(), NicknameError> {
    if nickname.is_empty() {
        return Err(NicknameError::Empty);
    }
    let length = nickname.chars().count();
    if length > MAX_NICKNAME_LEN {
        return Err(NicknameError::TooLong {
            length,
            max: MAX_NICKNAME_LEN,
        });
    }
    if nickname_in_use(nickname, players) {
        return Err(NicknameError::Taken(nickname.to_string()));
    }
    Ok(())
}
