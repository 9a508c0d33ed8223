use chrono::Timelike;
use uuid::Uuid;

use millet_core::dashboard::{reward_total, unread_count};
use millet_core::i18n::{greeting_key, t};
use millet_types::api::NewCropAdvisoryRequest;
use millet_types::{
    CropAdvisory, Language, NewProduct, Notification, PricePrediction, Product, ProductStatus,
    Reward,
};

use crate::backend::Backend;
use crate::error::ClientError;
use crate::session::Session;
use crate::{ClientConfig, keep_or_warn};

/// Localized greeting for a local hour of day.
pub fn greeting(language: Language, hour: u32) -> &'static str {
    t(language, greeting_key(hour))
}

pub fn greeting_now(language: Language) -> &'static str {
    greeting(language, chrono::Local::now().hour())
}

/// Farmer home screen: own listings, rewards, latest notifications, market
/// predictions and crop advice.
#[derive(Debug, Clone, Default)]
pub struct FarmerDashboard {
    notification_limit: u32,
    products: Vec<Product>,
    rewards: Vec<Reward>,
    total_rewards: i64,
    notifications: Vec<Notification>,
    unread: usize,
    predictions: Vec<PricePrediction>,
    advisories: Vec<CropAdvisory>,
}

impl FarmerDashboard {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            notification_limit: config.notification_limit,
            ..Self::default()
        }
    }

    /// Reload every list. A failed fetch leaves that list as it was.
    pub async fn refresh<B: Backend>(&mut self, backend: &B, session: &Session) {
        self.refresh_products(backend, session).await;

        let token = &session.token;
        if keep_or_warn(&mut self.rewards, backend.rewards(token).await, "rewards") {
            self.total_rewards = reward_total(&self.rewards);
        }
        let fetched = backend.notifications(token, self.notification_limit).await;
        if keep_or_warn(&mut self.notifications, fetched, "notifications") {
            self.unread = unread_count(&self.notifications);
        }
        keep_or_warn(
            &mut self.predictions,
            backend.price_predictions(token).await,
            "price predictions",
        );
        keep_or_warn(
            &mut self.advisories,
            backend.crop_advisories(token).await,
            "crop advisories",
        );
    }

    pub async fn refresh_products<B: Backend>(&mut self, backend: &B, session: &Session) {
        keep_or_warn(
            &mut self.products,
            backend.my_products(&session.token).await,
            "own products",
        );
    }

    pub async fn add_product<B: Backend>(
        &mut self,
        backend: &B,
        session: &Session,
        product: &NewProduct,
    ) -> Result<Product, ClientError> {
        let created = backend.add_product(&session.token, product).await?;
        self.refresh_products(backend, session).await;
        Ok(created)
    }

    pub async fn set_product_status<B: Backend>(
        &mut self,
        backend: &B,
        session: &Session,
        product_id: Uuid,
        status: ProductStatus,
    ) -> Result<Product, ClientError> {
        let updated = backend
            .set_product_status(&session.token, product_id, status)
            .await?;
        self.refresh_products(backend, session).await;
        Ok(updated)
    }

    pub async fn delete_product<B: Backend>(
        &mut self,
        backend: &B,
        session: &Session,
        product_id: Uuid,
    ) -> Result<(), ClientError> {
        backend.delete_product(&session.token, product_id).await?;
        self.refresh_products(backend, session).await;
        Ok(())
    }

    pub async fn add_advisory<B: Backend>(
        &mut self,
        backend: &B,
        session: &Session,
        req: &NewCropAdvisoryRequest,
    ) -> Result<CropAdvisory, ClientError> {
        let created = backend.add_crop_advisory(&session.token, req).await?;
        keep_or_warn(
            &mut self.advisories,
            backend.crop_advisories(&session.token).await,
            "crop advisories",
        );
        Ok(created)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn total_rewards(&self) -> i64 {
        self.total_rewards
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn predictions(&self) -> &[PricePrediction] {
        &self.predictions
    }

    pub fn advisories(&self) -> &[CropAdvisory] {
        &self.advisories
    }
}
