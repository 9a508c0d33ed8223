use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::{debug, info};
use uuid::Uuid;

use millet_db::models::{ProfileRow, UserRow};
use millet_types::api::{AuthResponse, Claims, SessionResponse, SignInRequest, SignUpRequest};
use millet_types::Role;

use crate::error::ApiError;
use crate::{AppState, blocking, records};

const MIN_PASSWORD_LEN: usize = 6;

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate input
    let email = req.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(ApiError::BadRequest("Unable to validate email address: invalid format".into()));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "Password should be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let full_name = req.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(ApiError::BadRequest("Full name is required".into()));
    }

    // Check if email is taken
    let lookup = email.clone();
    if blocking(&state, move |db| db.get_user_by_email(&lookup))
        .await?
        .is_some()
    {
        return Err(already_registered());
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("password hashing failed: {}", e)))?
        .to_string();

    let user_id = Uuid::new_v4();
    let now = millet_db::now();
    let health_preferences = serde_json::to_string(&req.health_preferences.unwrap_or_default())
        .map_err(|e| ApiError::Internal(e.into()))?;

    let user = UserRow {
        id: user_id.to_string(),
        email,
        password: password_hash,
        created_at: now.clone(),
    };
    let profile = ProfileRow {
        id: user_id.to_string(),
        full_name,
        role: req.role.to_string(),
        phone: req.phone,
        location: req.location,
        age: req.age.map(i64::from),
        language_preference: req.language_preference.unwrap_or_default().to_string(),
        health_preferences,
        created_at: now.clone(),
        updated_at: now,
    };

    // A concurrent signup can take the email after the check above.
    let profile = blocking(&state, move |db| {
        Ok(db.create_account(&user, &profile)?.then_some(profile))
    })
    .await?
    .ok_or_else(already_registered)?;
    let profile = records::profile(profile)?;

    let token = create_token(&state, user_id, profile.role)?;
    info!("New {} account {}", profile.role, user_id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id,
            token,
            profile,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid login credentials".into());

    let email = req.email.trim().to_lowercase();
    let user = blocking(&state, move |db| db.get_user_by_email(&email))
        .await?
        .ok_or_else(|| {
            debug!("Login for unknown email");
            invalid()
        })?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("stored hash unreadable: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| {
            debug!("Wrong password for {}", user.id);
            invalid()
        })?;

    let user_id = user.id.clone();
    let profile = blocking(&state, move |db| db.get_profile(&user_id))
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;
    let profile = records::profile(profile)?;

    let token = create_token(&state, profile.id, profile.role)?;

    Ok(Json(AuthResponse {
        user_id: profile.id,
        token,
        profile,
    }))
}

/// Tokens are stateless; the client drops its copy.
pub async fn logout(Extension(claims): Extension<Claims>) -> StatusCode {
    debug!("Sign-out for {}", claims.sub);
    StatusCode::NO_CONTENT
}

pub async fn session(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let id = claims.sub.to_string();
    let (user, profile) = blocking(&state, move |db| {
        Ok((db.get_user_by_id(&id)?, db.get_profile(&id)?))
    })
    .await?;

    let user = user.ok_or_else(|| ApiError::Unauthorized("User no longer exists".into()))?;
    let profile = profile.map(records::profile).transpose()?;

    Ok(Json(SessionResponse {
        user_id: claims.sub,
        email: user.email,
        profile,
    }))
}

fn already_registered() -> ApiError {
    ApiError::Conflict("User already registered".into())
}

fn create_token(state: &AppState, user_id: Uuid, role: Role) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        role,
        exp: (chrono::Utc::now() + chrono::Duration::days(state.token_ttl_days)).timestamp()
            as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(token)
}
