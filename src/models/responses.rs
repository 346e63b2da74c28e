use serde::{Deserialize, Serialize};
use crate::models::domain::Liker;

/// Response for both liker list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLikedYouResponse {
    pub likers: Vec<Liker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountLikedYouResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutDecisionResponse {
    #[serde(rename = "mutualLikes")]
    pub mutual_likes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordLikeResponse {
    pub recorded: bool,
    #[serde(rename = "unixTimestamp")]
    pub unix_timestamp: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
