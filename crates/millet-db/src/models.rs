//! Database row types. Each maps directly to one SQLite row.
//! Distinct from millet-types records to keep the DB layer independent:
//! ids, enums and timestamps stay as the text SQLite stores.

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub id: String,
    pub full_name: String,
    pub role: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub age: Option<i64>,
    pub language_preference: String,
    /// JSON object text.
    pub health_preferences: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct FarmerRow {
    pub id: String,
    pub full_name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub farmer_id: String,
    pub millet_type: String,
    pub quantity_kg: f64,
    pub price_per_kg: f64,
    pub description: Option<String>,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct AdoptionRow {
    pub id: String,
    pub consumer_id: String,
    pub farmer_id: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct RewardRow {
    pub id: String,
    pub user_id: String,
    pub points: i64,
    pub earned_from: String,
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NotificationRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct PredictionRow {
    pub id: String,
    pub millet_type: String,
    pub predicted_price: f64,
    pub prediction_date: String,
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct AdvisoryRow {
    pub id: String,
    pub farmer_id: String,
    pub millet_type: String,
    pub region: String,
    pub soil_type: String,
    pub season: String,
    pub advisory_text: String,
    pub created_at: String,
}
