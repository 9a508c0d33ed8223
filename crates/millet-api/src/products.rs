use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use millet_db::models::ProductRow;
use millet_types::api::{Claims, UpdateProductRequest};
use millet_types::{NewProduct, ProductStatus, Role};

use crate::error::ApiError;
use crate::middleware::require_role;
use crate::{AppState, blocking, records};

/// Marketplace listing: every available product, newest first.
pub async fn list_available(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = blocking(&state, |db| {
        db.get_products_by_status(ProductStatus::Available.as_str())
    })
    .await?;

    Ok(Json(records::collect(rows, records::product, "product")))
}

pub async fn list_mine(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&claims, Role::Farmer)?;

    let farmer_id = claims.sub.to_string();
    let rows = blocking(&state, move |db| db.get_products_by_farmer(&farmer_id)).await?;

    Ok(Json(records::collect(rows, records::product, "product")))
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewProduct>,
) -> Result<impl IntoResponse, ApiError> {
    require_role(&claims, Role::Farmer)?;

    let row = ProductRow {
        id: Uuid::new_v4().to_string(),
        farmer_id: claims.sub.to_string(),
        millet_type: req.millet_type().to_string(),
        quantity_kg: req.quantity_kg(),
        price_per_kg: req.price_per_kg(),
        description: req.description().map(str::to_string),
        status: ProductStatus::Available.to_string(),
        created_at: millet_db::now(),
    };

    let row = blocking(&state, move |db| {
        db.insert_product(&row)?;
        Ok(row)
    })
    .await?;
    let product = records::product(row)?;
    info!("Farmer {} listed {} kg of {}", claims.sub, product.quantity_kg, product.millet_type);

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut row = owned_product(&state, &claims, product_id).await?;

    row.status = req.status.to_string();
    let id = row.id.clone();
    let status = row.status.clone();
    if !blocking(&state, move |db| db.set_product_status(&id, &status)).await? {
        return Err(product_not_found());
    }

    Ok(Json(records::product(row)?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let row = owned_product(&state, &claims, product_id).await?;

    if !blocking(&state, move |db| db.delete_product(&row.id)).await? {
        return Err(product_not_found());
    }
    info!("Farmer {} removed product {}", claims.sub, product_id);

    Ok(StatusCode::NO_CONTENT)
}

/// Load a product the calling farmer owns.
async fn owned_product(
    state: &AppState,
    claims: &Claims,
    product_id: Uuid,
) -> Result<ProductRow, ApiError> {
    require_role(claims, Role::Farmer)?;

    let id = product_id.to_string();
    let row = blocking(state, move |db| db.get_product(&id))
        .await?
        .ok_or_else(product_not_found)?;

    if row.farmer_id != claims.sub.to_string() {
        return Err(ApiError::Forbidden("Product belongs to another farmer".into()));
    }
    Ok(row)
}

fn product_not_found() -> ApiError {
    ApiError::NotFound("Product not found".into())
}
