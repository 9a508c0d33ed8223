pub mod adoptions;
pub mod auth;
pub mod error;
pub mod insights;
pub mod middleware;
pub mod notifications;
pub mod products;
pub mod profiles;
pub mod rewards;

mod records;

use std::sync::Arc;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use millet_db::Database;

pub use error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    /// Default page size for GET /notifications.
    pub notification_limit: u32,
}

impl AppStateInner {
    pub fn new(db: Database, jwt_secret: impl Into<String>) -> Self {
        Self {
            db,
            jwt_secret: jwt_secret.into(),
            token_ttl_days: 30,
            notification_limit: 5,
        }
    }
}

/// Every route of the marketplace API, with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::session))
        .route("/profile", get(profiles::get_profile).patch(profiles::update_profile))
        .route("/farmers", get(profiles::get_farmers))
        .route("/products", get(products::list_available).post(products::create_product))
        .route("/products/mine", get(products::list_mine))
        .route(
            "/products/{product_id}",
            patch(products::update_product).delete(products::delete_product),
        )
        .route("/adoptions", get(adoptions::list_adoptions).post(adoptions::adopt_farmer))
        .route("/rewards", get(rewards::list_rewards))
        .route("/notifications", get(notifications::list_notifications))
        .route("/predictions", get(insights::list_predictions))
        .route("/advisories", get(insights::list_advisories).post(insights::create_advisory))
        .layer(from_fn_with_state(state.clone(), middleware::require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Run blocking DB work off the async runtime.
pub(crate) async fn blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.into())
        })?
        .map_err(ApiError::from)
}
