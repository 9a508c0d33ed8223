use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use millet_types::api::{Claims, UpdateProfileRequest};

use crate::error::ApiError;
use crate::{AppState, blocking, records};

#[derive(Debug, Deserialize)]
pub struct FarmersQuery {
    /// Comma-separated profile ids.
    #[serde(default)]
    pub ids: String,
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let id = claims.sub.to_string();
    let row = blocking(&state, move |db| db.get_profile(&id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;

    Ok(Json(records::profile(row)?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = claims.sub.to_string();
    let mut row = blocking(&state, move |db| db.get_profile(&id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;

    if let Some(full_name) = req.full_name {
        let full_name = full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ApiError::BadRequest("Full name is required".into()));
        }
        row.full_name = full_name;
    }
    if let Some(phone) = req.phone {
        row.phone = Some(phone);
    }
    if let Some(location) = req.location {
        row.location = Some(location);
    }
    if let Some(age) = req.age {
        row.age = Some(i64::from(age));
    }
    if let Some(language) = req.language_preference {
        row.language_preference = language.to_string();
    }
    if let Some(prefs) = req.health_preferences {
        row.health_preferences =
            serde_json::to_string(&prefs).map_err(|e| ApiError::Internal(e.into()))?;
    }
    row.updated_at = millet_db::now();

    let row = blocking(&state, move |db| {
        db.update_profile(&row)?;
        Ok(row)
    })
    .await?;

    Ok(Json(records::profile(row)?))
}

/// Display names for the farmers behind a set of listings.
pub async fn get_farmers(
    State(state): State<AppState>,
    Query(query): Query<FarmersQuery>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let ids = query
        .ids
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Uuid>()
                .map(|id| id.to_string())
                .map_err(|_| ApiError::BadRequest(format!("Invalid farmer id '{}'", s)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rows = blocking(&state, move |db| db.get_farmers(&ids)).await?;

    Ok(Json(records::collect(rows, records::farmer, "farmer")))
}
