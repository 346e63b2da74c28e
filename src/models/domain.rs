use serde::{Deserialize, Serialize};

/// Opaque user identifier, never interpreted
pub type UserId = String;

/// A directed like: `actor_id` liked `recipient_id` at `timestamp` (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeEdge {
    #[serde(rename = "recipientId")]
    pub recipient_id: UserId,
    #[serde(rename = "actorId")]
    pub actor_id: UserId,
    pub timestamp: u64,
}

/// One entry of a recipient's liker list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liker {
    #[serde(rename = "actorId")]
    pub actor_id: UserId,
    #[serde(rename = "unixTimestamp")]
    pub unix_timestamp: u64,
}

impl Liker {
    pub fn new(actor_id: impl Into<UserId>, unix_timestamp: u64) -> Self {
        Self {
            actor_id: actor_id.into(),
            unix_timestamp,
        }
    }
}

/// Latest like/pass choice one user made about another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Liked,
    Passed,
}

impl Decision {
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            Decision::Liked
        } else {
            Decision::Passed
        }
    }

    /// Stored representation: `1` for liked, `0` for passed
    pub fn as_stored(self) -> &'static str {
        match self {
            Decision::Liked => "1",
            Decision::Passed => "0",
        }
    }

    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "1" | "true" => Some(Decision::Liked),
            "0" | "false" => Some(Decision::Passed),
            _ => None,
        }
    }
}

/// Offset/limit window over a recency-ordered liker list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_OFFSET: u64 = 0;
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Fill unset parameters with the defaults (offset 0, limit 10)
    pub fn from_parts(offset: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            offset: offset.unwrap_or(Self::DEFAULT_OFFSET),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Clamp the limit to `max_limit`
    pub fn capped(self, max_limit: u64) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit.min(max_limit),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OFFSET, Self::DEFAULT_LIMIT)
    }
}
