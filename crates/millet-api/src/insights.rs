use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use millet_db::models::AdvisoryRow;
use millet_types::Role;
use millet_types::api::{Claims, NewCropAdvisoryRequest};

use crate::error::ApiError;
use crate::middleware::require_role;
use crate::{AppState, blocking, records};

const PREDICTION_LIMIT: u32 = 5;
const ADVISORY_LIMIT: u32 = 3;

pub async fn list_predictions(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = blocking(&state, |db| db.get_price_predictions(PREDICTION_LIMIT)).await?;

    Ok(Json(records::collect(rows, records::prediction, "price prediction")))
}

pub async fn list_advisories(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&claims, Role::Farmer)?;

    let farmer_id = claims.sub.to_string();
    let rows = blocking(&state, move |db| db.get_advisories(&farmer_id, ADVISORY_LIMIT)).await?;

    Ok(Json(records::collect(rows, records::advisory, "crop advisory")))
}

pub async fn create_advisory(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewCropAdvisoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&claims, Role::Farmer)?;

    if req.advisory_text.trim().is_empty() {
        return Err(ApiError::BadRequest("Advisory text is required".into()));
    }

    let row = AdvisoryRow {
        id: Uuid::new_v4().to_string(),
        farmer_id: claims.sub.to_string(),
        millet_type: req.millet_type.to_string(),
        region: req.region,
        soil_type: req.soil_type,
        season: req.season,
        advisory_text: req.advisory_text,
        created_at: millet_db::now(),
    };
    let row = blocking(&state, move |db| {
        db.insert_advisory(&row)?;
        Ok(row)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(records::advisory(row)?)))
}
