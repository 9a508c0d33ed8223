use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};
use uuid::Uuid;

use millet_db::models::{AdoptionRow, NotificationRow, RewardRow};
use millet_types::api::{AdoptRequest, AdoptResponse, Claims};
use millet_types::{AdoptionStatus, NotificationKind, Role};

use crate::error::ApiError;
use crate::middleware::require_role;
use crate::{AppState, blocking, records};

/// Points credited to a consumer for each adoption.
pub const ADOPTION_REWARD_POINTS: i64 = 50;

pub async fn list_adoptions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&claims, Role::Consumer)?;

    let consumer_id = claims.sub.to_string();
    let rows = blocking(&state, move |db| {
        db.get_adoptions(&consumer_id, AdoptionStatus::Active.as_str())
    })
    .await?;

    Ok(Json(records::collect(rows, records::adoption, "adoption")))
}

/// Record an adoption, then credit the consumer and tell the farmer.
///
/// The three writes are independent: a failed reward or notification is
/// logged and the adoption stands. Repeat adoptions of the same farmer are
/// stored like any other.
pub async fn adopt_farmer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AdoptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&claims, Role::Consumer)?;

    let farmer_id = req.farmer_id.to_string();
    let lookup = vec![farmer_id.clone()];
    if blocking(&state, move |db| db.get_farmers(&lookup))
        .await?
        .is_empty()
    {
        return Err(ApiError::NotFound("Farmer not found".into()));
    }

    let row = AdoptionRow {
        id: Uuid::new_v4().to_string(),
        consumer_id: claims.sub.to_string(),
        farmer_id: farmer_id.clone(),
        status: AdoptionStatus::Active.to_string(),
        created_at: millet_db::now(),
    };
    let row = blocking(&state, move |db| {
        db.insert_adoption(&row)?;
        Ok(row)
    })
    .await?;
    let adoption = records::adoption(row)?;
    info!("Consumer {} adopted farmer {}", claims.sub, req.farmer_id);

    let reward = RewardRow {
        id: Uuid::new_v4().to_string(),
        user_id: claims.sub.to_string(),
        points: ADOPTION_REWARD_POINTS,
        earned_from: "referral".to_string(),
        description: Some("Adopted a farmer".to_string()),
        created_at: millet_db::now(),
    };
    let points_awarded = match blocking(&state, move |db| db.insert_reward(&reward)).await {
        Ok(()) => ADOPTION_REWARD_POINTS,
        Err(e) => {
            warn!("Adoption {} stored but reward failed: {}", adoption.id, e);
            0
        }
    };

    let notice = NotificationRow {
        id: Uuid::new_v4().to_string(),
        user_id: farmer_id,
        title: "New supporter".to_string(),
        message: "A consumer has adopted your farm.".to_string(),
        kind: NotificationKind::Alert.to_string(),
        is_read: false,
        created_at: millet_db::now(),
    };
    if let Err(e) = blocking(&state, move |db| db.insert_notification(&notice)).await {
        warn!("Adoption {} stored but farmer notification failed: {}", adoption.id, e);
    }

    Ok((
        StatusCode::CREATED,
        Json(AdoptResponse {
            adoption,
            points_awarded,
        }),
    ))
}
