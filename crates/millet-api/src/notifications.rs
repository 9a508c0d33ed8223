use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::debug;

use millet_types::api::{Claims, MAX_NOTIFICATION_LIMIT};

use crate::error::ApiError;
use crate::{AppState, blocking, records};

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// Falls back to the server's configured top-N.
    pub limit: Option<u32>,
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let requested = query.limit.unwrap_or(state.notification_limit);
    let limit = requested.min(MAX_NOTIFICATION_LIMIT);
    if limit < requested {
        debug!("Notification limit {} clamped to {}", requested, limit);
    }
    let user_id = claims.sub.to_string();
    let rows = blocking(&state, move |db| db.get_notifications(&user_id, limit)).await?;

    Ok(Json(records::collect(rows, records::notification, "notification")))
}
