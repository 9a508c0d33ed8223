use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use millet_types::Role;
use millet_types::api::Claims;

use crate::AppState;
use crate::error::ApiError;

/// Extract and validate JWT from Authorization header.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::Unauthorized("Invalid or expired session".into()))?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}

/// Reject callers whose token carries a different role.
pub fn require_role(claims: &Claims, role: Role) -> Result<(), ApiError> {
    if claims.role == role {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!("Only {role}s can do this")))
    }
}
