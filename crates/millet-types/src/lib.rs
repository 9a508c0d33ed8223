//! Entity records and wire types shared by the millet marketplace server
//! (millet-api) and its client layer (millet-client).

pub mod api;
pub mod models;

pub use models::{
    Adoption, AdoptionStatus, CropAdvisory, FarmerSummary, Language, MilletType, NewProduct,
    Notification, NotificationKind, PricePrediction, Product, ProductStatus, Profile, Reward, Role,
    ValidationError,
};
