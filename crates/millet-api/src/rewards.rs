use axum::{Extension, Json, extract::State, response::IntoResponse};

use millet_types::api::Claims;

use crate::error::ApiError;
use crate::{AppState, blocking, records};

/// The caller's whole ledger, newest first. Totals are summed client-side.
pub async fn list_rewards(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = claims.sub.to_string();
    let rows = blocking(&state, move |db| db.get_rewards(&user_id)).await?;

    Ok(Json(records::collect(rows, records::reward, "reward")))
}
