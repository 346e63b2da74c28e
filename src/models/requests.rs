use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for the liker list endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LikedYouQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "recipientUserId", rename = "userId")]
    pub recipient_user_id: String,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

/// Query for the liker count endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CountLikedYouQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "recipientUserId", rename = "userId")]
    pub recipient_user_id: String,
}

/// Request to record a like/pass decision
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PutDecisionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "actor_user_id", rename = "actorUserId")]
    pub actor_user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "recipient_user_id", rename = "recipientUserId")]
    pub recipient_user_id: String,
    #[serde(alias = "liked_recipient", rename = "likedRecipient")]
    pub liked_recipient: bool,
}

/// Request to record a like edge
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordLikeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "recipient_user_id", rename = "recipientUserId")]
    pub recipient_user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "actor_user_id", rename = "actorUserId")]
    pub actor_user_id: String,
    #[serde(default, alias = "unix_timestamp", rename = "unixTimestamp")]
    pub unix_timestamp: Option<u64>,
}
