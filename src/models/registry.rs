//! PlayerRegistry and RegistryError.

use crate::config::RegistryConfig;
use crate::logic::{load_roster, save_roster, validate_nickname, NicknameError, StorageError};
use crate::models::player::{Player, PlayerId};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Nickname empty, too long, or held by a live player.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] NicknameError),

    /// No live player has this id.
    #[error("Player {id} not found")]
    NotFound { id: PlayerId },

    /// Every id up to `PlayerId::MAX` has been handed out.
    #[error("No player ids left to assign")]
    IdsExhausted,

    /// The mutation could not be written to the backing document and was undone.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Roster of live players keyed by id, mirrored to a JSON document after every mutation.
#[derive(Debug)]
pub struct PlayerRegistry {
    path: PathBuf,
    players: BTreeMap<PlayerId, Player>,
    /// `None` once the id space is used up.
    next_id: Option<PlayerId>,
}

impl PlayerRegistry {
    /// Open the registry at the configured backing document.
    pub fn open(config: &RegistryConfig) -> Self {
        Self::with_path(&config.data_path)
    }

    /// Load the roster from `path`. A missing or unreadable document gives an empty roster.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let players: BTreeMap<PlayerId, Player> = load_roster(&path)
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        let next_id = players.keys().next_back().map_or(Some(1), |id| id.checked_add(1));
        log::info!("Loaded {} player(s) from {}", players.len(), path.display());
        Self {
            path,
            players,
            next_id,
        }
    }

    /// Backing document this registry reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of live players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True if the roster has no live players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// True if a live player has this id.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Create a player and return its id. Ids are never reused, even after deletion.
    pub fn create_player(&mut self, nickname: &str) -> Result<PlayerId, RegistryError> {
        validate_nickname(nickname, self.players.values())?;
        let id = self.next_id.ok_or(RegistryError::IdsExhausted)?;
        self.players.insert(id, Player::new(id, nickname));
        if let Err(e) = self.save() {
            self.players.remove(&id);
            return Err(e);
        }
        self.next_id = id.checked_add(1);
        log::info!("Created player {id} '{nickname}'");
        Ok(id)
    }

    /// Current record of a live player.
    pub fn get_player_by_id(&self, id: PlayerId) -> Result<Player, RegistryError> {
        self.players
            .get(&id)
            .cloned()
            .ok_or(RegistryError::NotFound { id })
    }

    /// All live players in ascending id order.
    pub fn get_players(&self) -> Vec<Player> {
        self.players.values().cloned().collect()
    }

    /// Remove a player and return its last record. The id is not handed out again.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<Player, RegistryError> {
        let player = self
            .players
            .remove(&id)
            .ok_or(RegistryError::NotFound { id })?;
        if let Err(e) = self.save() {
            self.players.insert(id, player);
            return Err(e);
        }
        log::info!("Deleted player {id} '{}'", player.nickname);
        Ok(player)
    }

    /// Apply a points delta (see [`Player::add_points`]) and return the updated record.
    pub fn add_points(&mut self, id: PlayerId, delta: i32) -> Result<Player, RegistryError> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(RegistryError::NotFound { id })?;
        let previous = player.points;
        player.add_points(delta);
        let updated = player.clone();
        if let Err(e) = self.save() {
            if let Some(p) = self.players.get_mut(&id) {
                p.points = previous;
            }
            return Err(e);
        }
        log::info!("Player {id}: {previous} {delta:+} -> {} points", updated.points);
        Ok(updated)
    }

    fn save(&self) -> Result<(), RegistryError> {
        save_roster(&self.path, self.players.values())?;
        Ok(())
    }
}
