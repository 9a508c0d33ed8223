use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{Adoption, Language, MilletType, ProductStatus, Profile, Role};

// -- JWT Claims --

/// Claims carried by every bearer token. The role travels in the token so
/// farmer-only and consumer-only routes need no extra profile lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub language_preference: Option<Language>,
    #[serde(default)]
    pub health_preferences: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub token: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub email: String,
    pub profile: Option<Profile>,
}

// -- Profiles --

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_preference: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_preferences: Option<Map<String, Value>>,
}

// -- Products --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    pub status: ProductStatus,
}

// -- Adoptions --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdoptRequest {
    pub farmer_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptResponse {
    pub adoption: Adoption,
    /// Zero when the reward insert failed after the adoption was stored.
    pub points_awarded: i64,
}

// -- Notifications --

/// Largest `limit` GET /notifications serves; larger requests are clamped.
pub const MAX_NOTIFICATION_LIMIT: u32 = 100;

// -- Advisories --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCropAdvisoryRequest {
    pub millet_type: MilletType,
    pub region: String,
    pub soil_type: String,
    pub season: String,
    pub advisory_text: String,
}

// -- Errors --

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
