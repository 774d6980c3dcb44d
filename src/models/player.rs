//! Player data structure.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player. Assigned by the registry, never reused.
pub type PlayerId = u32;

fn default_online() -> bool {
    true
}

/// A player in the registry, as stored in the backing document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(rename = "nick")]
    pub nickname: String,
    #[serde(default)]
    pub points: i32,
    #[serde(default = "default_online")]
    pub online: bool,
}

impl Player {
    /// Create a new player with the given id and nickname. Starts online with zero points.
    pub fn new(id: PlayerId, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            points: 0,
            online: true,
        }
    }

    /// Apply a points delta.
    ///
    /// Positive deltas apply exactly. A negative delta never takes the balance
    /// below `min(points, 0)`: a non-negative balance bottoms out at 0 and a
    /// balance that is already negative is not pushed further down.
    pub fn add_points(&mut self, delta: i32) {
        let sum = self.points.saturating_add(delta);
        self.points = if delta < 0 {
            sum.max(self.points.min(0))
        } else {
            sum
        };
    }
}
