// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Decision, LikeEdge, Liker, Page, UserId};
pub use requests::{CountLikedYouQuery, LikedYouQuery, PutDecisionRequest, RecordLikeRequest};
pub use responses::{
    CountLikedYouResponse, ErrorResponse, HealthResponse, ListLikedYouResponse,
    PutDecisionResponse, RecordLikeResponse,
};
