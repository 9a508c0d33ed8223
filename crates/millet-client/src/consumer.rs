use std::collections::HashMap;

use uuid::Uuid;

use millet_core::dashboard::{farmer_ids, filter_products, is_adopted, millet_options, reward_total};
use millet_core::health::recommendations;
use millet_core::{Cart, MilletFilter, Recommendation};
use millet_types::api::AdoptResponse;
use millet_types::{Adoption, FarmerSummary, Product};

use crate::backend::Backend;
use crate::error::ClientError;
use crate::keep_or_warn;
use crate::session::Session;

/// Consumer home screen: the marketplace listing with search and millet
/// filter, adopted farmers, reward points, cart and health advice.
#[derive(Debug, Clone, Default)]
pub struct ConsumerDashboard {
    products: Vec<Product>,
    farmers: HashMap<Uuid, FarmerSummary>,
    adoptions: Vec<Adoption>,
    total_rewards: i64,
    search: String,
    filter: MilletFilter,
    visible: Vec<Product>,
    cart: Cart,
    recommendations: Option<[Recommendation; 2]>,
}

impl ConsumerDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload listings, farmer labels, adoptions and rewards, then rebuild
    /// the health advice from the session's profile age.
    pub async fn refresh<B: Backend>(&mut self, backend: &B, session: &Session) {
        self.refresh_products(backend, session).await;
        self.refresh_support(backend, session).await;
        let age = session.profile.as_ref().and_then(|p| p.age);
        self.recommendations = Some(recommendations(age));
    }

    pub async fn refresh_products<B: Backend>(&mut self, backend: &B, session: &Session) {
        let fetched = backend.available_products(&session.token).await;
        if keep_or_warn(&mut self.products, fetched, "marketplace products") {
            self.recompute();

            let ids = farmer_ids(&self.products);
            match backend.farmers(&session.token, &ids).await {
                Ok(rows) => self.farmers = rows.into_iter().map(|f| (f.id, f)).collect(),
                Err(e) => tracing::warn!("Failed to fetch farmers: {}", e),
            }
        }
    }

    async fn refresh_support<B: Backend>(&mut self, backend: &B, session: &Session) {
        keep_or_warn(
            &mut self.adoptions,
            backend.adoptions(&session.token).await,
            "adoptions",
        );
        let mut rewards = Vec::new();
        if keep_or_warn(&mut rewards, backend.rewards(&session.token).await, "rewards") {
            self.total_rewards = reward_total(&rewards);
        }
    }

    /// Adopt a farmer, then reload adoptions and rewards so the badge and
    /// point total reflect it. Adopting the same farmer again is allowed.
    pub async fn adopt<B: Backend>(
        &mut self,
        backend: &B,
        session: &Session,
        farmer_id: Uuid,
    ) -> Result<AdoptResponse, ClientError> {
        let resp = backend.adopt(&session.token, farmer_id).await?;
        self.refresh_support(backend, session).await;
        Ok(resp)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.recompute();
    }

    pub fn set_filter(&mut self, filter: MilletFilter) {
        self.filter = filter;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = filter_products(&self.products, &self.search, &self.filter);
    }

    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add(product);
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products passing the current search and millet filter.
    pub fn visible_products(&self) -> &[Product] {
        &self.visible
    }

    pub fn millet_options(&self) -> Vec<MilletFilter> {
        millet_options(&self.products)
    }

    pub fn farmer(&self, farmer_id: Uuid) -> Option<&FarmerSummary> {
        self.farmers.get(&farmer_id)
    }

    pub fn adoptions(&self) -> &[Adoption] {
        &self.adoptions
    }

    pub fn is_adopted(&self, farmer_id: Uuid) -> bool {
        is_adopted(&self.adoptions, farmer_id)
    }

    pub fn total_rewards(&self) -> i64 {
        self.total_rewards
    }

    /// Empty until the first refresh.
    pub fn recommendations(&self) -> &[Recommendation] {
        self.recommendations
            .as_ref()
            .map(|r| r.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeBackend;
    use millet_types::{MilletType, NewProduct, Role};

    async fn market() -> (FakeBackend, Session, Session) {
        let backend = FakeBackend::default();
        let farmer = backend.session_for("ravi@farm.in", Role::Farmer).await;
        let consumer = backend.session_for("asha@home.in", Role::Consumer).await;

        let listings = [
            (MilletType::Foxtail, 10.0, 65.0, Some("Organic foxtail")),
            (MilletType::Finger, 4.0, 58.5, Some("Ragi from Mandya")),
            (MilletType::Foxtail, 2.0, 70.0, None),
        ];
        for (millet, qty, price, desc) in listings {
            let product = NewProduct::new(millet, qty, price, desc.map(str::to_string)).unwrap();
            backend.add_product(&farmer.token, &product).await.unwrap();
        }
        (backend, farmer, consumer)
    }

    #[tokio::test]
    async fn search_and_filter_recompute_view() {
        let (backend, farmer, consumer) = market().await;
        let mut dash = ConsumerDashboard::new();
        dash.refresh(&backend, &consumer).await;

        assert_eq!(dash.visible_products().len(), 3);
        assert_eq!(dash.farmer(farmer.user_id).map(|f| f.full_name.as_str()), Some("ravi"));
        assert_eq!(
            dash.millet_options(),
            vec![
                MilletFilter::All,
                MilletFilter::Only(MilletType::Foxtail),
                MilletFilter::Only(MilletType::Finger),
            ]
        );

        dash.set_filter(MilletFilter::Only(MilletType::Foxtail));
        assert_eq!(dash.visible_products().len(), 2);

        dash.set_search("ORGANIC");
        assert_eq!(dash.visible_products().len(), 1);

        dash.set_filter(MilletFilter::All);
        dash.set_search("");
        assert_eq!(dash.visible_products(), dash.products());
    }

    #[tokio::test]
    async fn adopting_updates_badge_and_points() {
        let (backend, farmer, consumer) = market().await;
        let mut dash = ConsumerDashboard::new();
        dash.refresh(&backend, &consumer).await;
        assert!(!dash.is_adopted(farmer.user_id));

        let resp = dash.adopt(&backend, &consumer, farmer.user_id).await.unwrap();
        assert_eq!(resp.points_awarded, 50);
        assert!(dash.is_adopted(farmer.user_id));
        assert_eq!(dash.total_rewards(), 50);

        // A second adoption is not blocked.
        dash.adopt(&backend, &consumer, farmer.user_id).await.unwrap();
        assert_eq!(dash.adoptions().len(), 2);
        assert_eq!(dash.total_rewards(), 100);
    }

    #[tokio::test]
    async fn cart_merges_repeat_adds() {
        let (backend, _, consumer) = market().await;
        let mut dash = ConsumerDashboard::new();
        dash.refresh(&backend, &consumer).await;

        let first = dash.products()[0].clone();
        dash.add_to_cart(&first);
        dash.add_to_cart(&first);

        assert_eq!(dash.cart().line_count(), 1);
        assert_eq!(dash.cart().item_count(), 2);
        assert_eq!(dash.cart().total(), first.price_per_kg * 2.0);
    }

    #[tokio::test]
    async fn recommendations_use_profile_age() {
        let (backend, _, mut consumer) = market().await;
        let mut dash = ConsumerDashboard::new();
        assert!(dash.recommendations().is_empty());

        dash.refresh(&backend, &consumer).await;
        assert_eq!(dash.recommendations()[0].millet, MilletType::Foxtail);

        if let Some(profile) = consumer.profile.as_mut() {
            profile.age = Some(65);
        }
        dash.refresh(&backend, &consumer).await;
        assert_eq!(dash.recommendations()[1].millet, MilletType::Sorghum);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_listing() {
        let (backend, _, consumer) = market().await;
        let mut dash = ConsumerDashboard::new();
        dash.refresh(&backend, &consumer).await;

        backend.fail_fetches(true);
        dash.refresh(&backend, &consumer).await;
        assert_eq!(dash.products().len(), 3);
        assert_eq!(dash.visible_products().len(), 3);
    }
}
