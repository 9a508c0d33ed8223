use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Rejections raised while turning untyped input (request bodies, DB text
/// columns) into the typed records below.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("unknown millet type: {0}")]
    UnknownMillet(String),
    #[error("unknown product status: {0}")]
    UnknownProductStatus(String),
    #[error("unknown adoption status: {0}")]
    UnknownAdoptionStatus(String),
    #[error("unknown notification type: {0}")]
    UnknownNotificationKind(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

/// Text-backed enums: the DB stores the same strings serde puts on the wire.
macro_rules! text_enum {
    ($name:ident, $err:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ValidationError::$err(other.to_string())),
                }
            }
        }
    };
}

// -- Enumerations --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Consumer,
}

text_enum!(Role, UnknownRole {
    Farmer => "farmer",
    Consumer => "consumer",
});

/// The four UI languages. Anything else falls back to English at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Te,
    Ta,
}

text_enum!(Language, UnsupportedLanguage {
    En => "en",
    Hi => "hi",
    Te => "te",
    Ta => "ta",
});

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Hi, Language::Te, Language::Ta];

    pub fn from_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }

    pub fn code(&self) -> &'static str {
        self.as_str()
    }

    /// BCP-47 tag handed to speech recognition and synthesis.
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Hi => "hi-IN",
            Language::Te => "te-IN",
            Language::Ta => "ta-IN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilletType {
    #[serde(rename = "Foxtail Millet")]
    Foxtail,
    #[serde(rename = "Pearl Millet")]
    Pearl,
    #[serde(rename = "Finger Millet")]
    Finger,
    #[serde(rename = "Little Millet")]
    Little,
    #[serde(rename = "Kodo Millet")]
    Kodo,
    #[serde(rename = "Proso Millet")]
    Proso,
    #[serde(rename = "Barnyard Millet")]
    Barnyard,
    #[serde(rename = "Sorghum")]
    Sorghum,
}

text_enum!(MilletType, UnknownMillet {
    Foxtail => "Foxtail Millet",
    Pearl => "Pearl Millet",
    Finger => "Finger Millet",
    Little => "Little Millet",
    Kodo => "Kodo Millet",
    Proso => "Proso Millet",
    Barnyard => "Barnyard Millet",
    Sorghum => "Sorghum",
});

impl MilletType {
    /// Order used by the add-product form.
    pub const ALL: [MilletType; 8] = [
        MilletType::Foxtail,
        MilletType::Pearl,
        MilletType::Finger,
        MilletType::Little,
        MilletType::Kodo,
        MilletType::Proso,
        MilletType::Barnyard,
        MilletType::Sorghum,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Available,
    Unavailable,
}

text_enum!(ProductStatus, UnknownProductStatus {
    Available => "available",
    Unavailable => "unavailable",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionStatus {
    #[default]
    Active,
    Inactive,
}

text_enum!(AdoptionStatus, UnknownAdoptionStatus {
    Active => "active",
    Inactive => "inactive",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Weather,
    Scheme,
    Alert,
}

text_enum!(NotificationKind, UnknownNotificationKind {
    Weather => "weather",
    Scheme => "scheme",
    Alert => "alert",
});

// -- Entities --

/// One profile per user, created at signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub age: Option<u32>,
    #[serde(default)]
    pub language_preference: Language,
    /// Opaque to the server; stored as a JSON object.
    #[serde(default)]
    pub health_preferences: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerSummary {
    pub id: Uuid,
    pub full_name: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub millet_type: MilletType,
    pub quantity_kg: f64,
    pub price_per_kg: f64,
    pub description: Option<String>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
}

/// A listing as submitted by a farmer, before the server assigns an id.
///
/// Negative quantities and prices are accepted; only values that cannot be
/// stored as numbers (NaN, infinity) are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NewProductFields")]
pub struct NewProduct {
    millet_type: MilletType,
    quantity_kg: f64,
    price_per_kg: f64,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NewProductFields {
    millet_type: MilletType,
    quantity_kg: f64,
    price_per_kg: f64,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<NewProductFields> for NewProduct {
    type Error = ValidationError;

    fn try_from(f: NewProductFields) -> Result<Self, Self::Error> {
        NewProduct::new(f.millet_type, f.quantity_kg, f.price_per_kg, f.description)
    }
}

impl NewProduct {
    pub fn new(
        millet_type: MilletType,
        quantity_kg: f64,
        price_per_kg: f64,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !quantity_kg.is_finite() {
            return Err(ValidationError::NotFinite("quantity_kg"));
        }
        if !price_per_kg.is_finite() {
            return Err(ValidationError::NotFinite("price_per_kg"));
        }
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            millet_type,
            quantity_kg,
            price_per_kg,
            description,
        })
    }

    pub fn millet_type(&self) -> MilletType {
        self.millet_type
    }

    pub fn quantity_kg(&self) -> f64 {
        self.quantity_kg
    }

    pub fn price_per_kg(&self) -> f64 {
        self.price_per_kg
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adoption {
    pub id: Uuid,
    pub consumer_id: Uuid,
    pub farmer_id: Uuid,
    pub status: AdoptionStatus,
    pub created_at: DateTime<Utc>,
}

/// Append-only ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: Uuid,
    pub user_id: Uuid,
    pub points: i64,
    pub earned_from: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    pub id: Uuid,
    pub millet_type: MilletType,
    pub predicted_price: f64,
    pub prediction_date: NaiveDate,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropAdvisory {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub millet_type: MilletType,
    pub region: String,
    pub soil_type: String,
    pub season: String,
    pub advisory_text: String,
    pub created_at: DateTime<Utc>,
}
