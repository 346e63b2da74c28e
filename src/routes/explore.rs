use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::ExploreSettings;
use crate::core::{ExploreError, ExploreQueryEngine};
use crate::models::{
    CountLikedYouQuery, CountLikedYouResponse, ErrorResponse, HealthResponse, LikedYouQuery,
    ListLikedYouResponse, Page, PutDecisionRequest, PutDecisionResponse, RecordLikeRequest,
    RecordLikeResponse,
};
use crate::services::SharedBackend;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: ExploreQueryEngine,
    pub backend: SharedBackend,
    pub explore: ExploreSettings,
}

impl AppState {
    pub fn new(backend: SharedBackend, explore: ExploreSettings) -> Self {
        let engine = ExploreQueryEngine::with_decision_ttl(backend.clone(), explore.decision_ttl());
        Self {
            engine,
            backend,
            explore,
        }
    }

    /// Caller-supplied window, configured default limit when unset, capped
    fn page(&self, offset: Option<u64>, limit: Option<u64>) -> Page {
        Page::from_parts(offset, limit.or(Some(self.explore.default_limit)))
            .capped(self.explore.max_limit)
    }
}

/// Configure all explore routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/explore/liked-you", web::get().to(list_liked_you))
        .route("/explore/liked-you/new", web::get().to(list_new_liked_you))
        .route("/explore/liked-you/count", web::get().to(count_liked_you))
        .route("/explore/decision", web::put().to(put_decision))
        .route("/explore/likes", web::post().to(record_like));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn internal_error(error: &str, e: ExploreError) -> HttpResponse {
    tracing::error!("{}: {}", error, e);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: error.to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = match state.backend.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Store ping failed: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List users who liked the recipient
///
/// GET /api/v1/explore/liked-you?userId={userId}&offset={offset}&limit={limit}
async fn list_liked_you(
    state: web::Data<AppState>,
    query: web::Query<LikedYouQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let page = state.page(query.offset, query.limit);
    tracing::info!("Listing likers of {} (offset: {}, limit: {})", query.recipient_user_id, page.offset, page.limit);

    match state.engine.list_liked_you(&query.recipient_user_id, page).await {
        Ok(likers) => HttpResponse::Ok().json(ListLikedYouResponse { likers }),
        Err(e) => internal_error("Failed to get likes with timestamps", e),
    }
}

/// List users who liked the recipient and were not liked back
///
/// GET /api/v1/explore/liked-you/new?userId={userId}&offset={offset}&limit={limit}
async fn list_new_liked_you(
    state: web::Data<AppState>,
    query: web::Query<LikedYouQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let page = state.page(query.offset, query.limit);
    tracing::info!("Listing new likers of {} (offset: {}, limit: {})", query.recipient_user_id, page.offset, page.limit);

    match state.engine.list_new_liked_you(&query.recipient_user_id, page).await {
        Ok(likers) => HttpResponse::Ok().json(ListLikedYouResponse { likers }),
        Err(e) => internal_error("Failed to get new likes with timestamps", e),
    }
}

/// Count users who liked the recipient
///
/// GET /api/v1/explore/liked-you/count?userId={userId}
async fn count_liked_you(
    state: web::Data<AppState>,
    query: web::Query<CountLikedYouQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    match state.engine.count_liked_you(&query.recipient_user_id).await {
        Ok(count) => HttpResponse::Ok().json(CountLikedYouResponse { count }),
        Err(e) => internal_error("Failed to count likes", e),
    }
}

/// Record a like/pass decision
///
/// PUT /api/v1/explore/decision
///
/// Request body:
/// ```json
/// {
///   "actorUserId": "string",
///   "recipientUserId": "string",
///   "likedRecipient": true
/// }
/// ```
async fn put_decision(
    state: web::Data<AppState>,
    req: web::Json<PutDecisionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state
        .engine
        .put_decision(&req.actor_user_id, &req.recipient_user_id, req.liked_recipient)
        .await
    {
        Ok(mutual_likes) => {
            tracing::info!(
                "Decision {} -> {} (liked: {}, mutual: {})",
                req.actor_user_id,
                req.recipient_user_id,
                req.liked_recipient,
                mutual_likes
            );
            HttpResponse::Ok().json(PutDecisionResponse { mutual_likes })
        }
        Err(e) => internal_error("Failed to record decision", e),
    }
}

/// Record a like edge
///
/// POST /api/v1/explore/likes
///
/// Request body:
/// ```json
/// {
///   "recipientUserId": "string",
///   "actorUserId": "string",
///   "unixTimestamp": 1633036800
/// }
/// ```
async fn record_like(
    state: web::Data<AppState>,
    req: web::Json<RecordLikeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state
        .engine
        .record_like(&req.recipient_user_id, &req.actor_user_id, req.unix_timestamp)
        .await
    {
        Ok(edge) => HttpResponse::Ok().json(RecordLikeResponse {
            recorded: true,
            unix_timestamp: edge.timestamp,
        }),
        Err(e) => internal_error("Failed to record like", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryBackend;
    use std::sync::Arc;

    #[test]
    fn test_page_uses_configured_defaults() {
        let state = AppState::new(
            Arc::new(InMemoryBackend::new()),
            ExploreSettings {
                default_limit: 5,
                max_limit: 20,
                decision_ttl_secs: None,
            },
        );

        assert_eq!(state.page(None, None), Page::new(0, 5));
        assert_eq!(state.page(Some(3), Some(50)), Page::new(3, 20));
    }
}
