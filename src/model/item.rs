use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Reserved id for the local placeholder shown while a create is in flight
    pub const PLACEHOLDER: ItemId = ItemId(0);
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// Identifies the collection partition every item of a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub u64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One todo, in the remote store's JSON shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(rename = "userId")]
    pub owner_id: OwnerId,
    pub completed: bool,
}

impl Item {
    /// The local stand-in rendered while its create request is in flight.
    pub fn placeholder(title: impl Into<String>, owner_id: OwnerId) -> Self {
        Item {
            id: ItemId::PLACEHOLDER,
            title: title.into(),
            owner_id,
            completed: false,
        }
    }

    pub fn with_completed(&self, completed: bool) -> Self {
        Item {
            completed,
            ..self.clone()
        }
    }

    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Item {
            title: title.into(),
            ..self.clone()
        }
    }
}

/// Create payload: an item without an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
    #[serde(rename = "userId")]
    pub owner_id: OwnerId,
    pub completed: bool,
}
