//! Row → record conversion. Rows hold SQLite text; records hold parsed ids,
//! enums and timestamps. A row that fails to parse is logged and skipped in
//! list responses.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use millet_db::models::{
    AdoptionRow, AdvisoryRow, FarmerRow, NotificationRow, PredictionRow, ProductRow, ProfileRow,
    RewardRow,
};
use millet_types::{
    Adoption, CropAdvisory, FarmerSummary, Notification, PricePrediction, Product, Profile, Reward,
};

fn uuid(raw: &str) -> Result<Uuid> {
    raw.parse().with_context(|| format!("corrupt id '{}'", raw))
}

fn timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Rows written by SQLite's datetime('now') carry no timezone.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .with_context(|| format!("corrupt timestamp '{}'", raw))
}

pub(crate) fn profile(row: ProfileRow) -> Result<Profile> {
    let health_preferences: Map<String, Value> = serde_json::from_str(&row.health_preferences)
        .with_context(|| format!("corrupt health_preferences on profile '{}'", row.id))?;

    Ok(Profile {
        id: uuid(&row.id)?,
        full_name: row.full_name,
        role: row.role.parse()?,
        phone: row.phone,
        location: row.location,
        age: row.age.and_then(|a| u32::try_from(a).ok()),
        language_preference: row.language_preference.parse()?,
        health_preferences,
        created_at: timestamp(&row.created_at)?,
        updated_at: timestamp(&row.updated_at)?,
    })
}

pub(crate) fn farmer(row: FarmerRow) -> Result<FarmerSummary> {
    Ok(FarmerSummary {
        id: uuid(&row.id)?,
        full_name: row.full_name,
        location: row.location,
    })
}

pub(crate) fn product(row: ProductRow) -> Result<Product> {
    Ok(Product {
        id: uuid(&row.id)?,
        farmer_id: uuid(&row.farmer_id)?,
        millet_type: row.millet_type.parse()?,
        quantity_kg: row.quantity_kg,
        price_per_kg: row.price_per_kg,
        description: row.description,
        status: row.status.parse()?,
        created_at: timestamp(&row.created_at)?,
    })
}

pub(crate) fn adoption(row: AdoptionRow) -> Result<Adoption> {
    Ok(Adoption {
        id: uuid(&row.id)?,
        consumer_id: uuid(&row.consumer_id)?,
        farmer_id: uuid(&row.farmer_id)?,
        status: row.status.parse()?,
        created_at: timestamp(&row.created_at)?,
    })
}

pub(crate) fn reward(row: RewardRow) -> Result<Reward> {
    Ok(Reward {
        id: uuid(&row.id)?,
        user_id: uuid(&row.user_id)?,
        points: row.points,
        earned_from: row.earned_from,
        description: row.description,
        created_at: timestamp(&row.created_at)?,
    })
}

pub(crate) fn notification(row: NotificationRow) -> Result<Notification> {
    Ok(Notification {
        id: uuid(&row.id)?,
        user_id: uuid(&row.user_id)?,
        title: row.title,
        message: row.message,
        kind: row.kind.parse()?,
        is_read: row.is_read,
        created_at: timestamp(&row.created_at)?,
    })
}

pub(crate) fn prediction(row: PredictionRow) -> Result<PricePrediction> {
    Ok(PricePrediction {
        id: uuid(&row.id)?,
        millet_type: row.millet_type.parse()?,
        predicted_price: row.predicted_price,
        prediction_date: NaiveDate::parse_from_str(&row.prediction_date, "%Y-%m-%d")
            .with_context(|| format!("corrupt prediction_date '{}'", row.prediction_date))?,
        confidence: row.confidence,
    })
}

pub(crate) fn advisory(row: AdvisoryRow) -> Result<CropAdvisory> {
    Ok(CropAdvisory {
        id: uuid(&row.id)?,
        farmer_id: uuid(&row.farmer_id)?,
        millet_type: row.millet_type.parse()?,
        region: row.region,
        soil_type: row.soil_type,
        season: row.season,
        advisory_text: row.advisory_text,
        created_at: timestamp(&row.created_at)?,
    })
}

/// Convert every row, dropping the ones that do not parse.
pub(crate) fn collect<R, T>(rows: Vec<R>, convert: fn(R) -> Result<T>, what: &str) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| {
            convert(row)
                .map_err(|e| warn!("Skipping corrupt {} row: {:#}", what, e))
                .ok()
        })
        .collect()
}
