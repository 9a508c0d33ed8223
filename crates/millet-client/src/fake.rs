//! In-memory [`Backend`] for dashboard and session tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDate, Utc};
use serde_json::Map;
use uuid::Uuid;

use millet_types::api::{
    AdoptResponse, AuthResponse, MAX_NOTIFICATION_LIMIT, NewCropAdvisoryRequest,
    SessionResponse, SignUpRequest, UpdateProfileRequest,
};
use millet_types::{
    Adoption, AdoptionStatus, CropAdvisory, FarmerSummary, Language, MilletType, NewProduct,
    Notification, NotificationKind, PricePrediction, Product, ProductStatus, Profile, Reward, Role,
};

use crate::backend::Backend;
use crate::error::ClientError;
use crate::session::Session;

struct Account {
    password: String,
    profile: Profile,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, Uuid>,
    products: Vec<Product>,
    adoptions: Vec<Adoption>,
    rewards: Vec<Reward>,
    notifications: Vec<Notification>,
    advisories: Vec<CropAdvisory>,
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    state: Mutex<State>,
    failing: AtomicBool,
}

fn not_found(what: &str) -> ClientError {
    ClientError::Api {
        status: 404,
        message: format!("{what} not found"),
    }
}

impl FakeBackend {
    /// Sign up a user whose name is the local part of `email`.
    pub(crate) async fn session_for(&self, email: &str, role: Role) -> Session {
        let name = email.split('@').next().unwrap_or(email).to_string();
        let req = SignUpRequest {
            email: email.to_string(),
            password: "secret123".to_string(),
            full_name: name,
            role,
            phone: None,
            location: None,
            age: None,
            language_preference: None,
            health_preferences: None,
        };
        Session::from(self.sign_up(&req).await.unwrap())
    }

    /// Make every read fail until switched back.
    pub(crate) fn fail_fetches(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub(crate) fn notify(&self, user_id: Uuid, is_read: bool) {
        self.state.lock().unwrap().notifications.insert(
            0,
            Notification {
                id: Uuid::new_v4(),
                user_id,
                title: "Rain expected".to_string(),
                message: "Cover harvested grain tonight.".to_string(),
                kind: NotificationKind::Weather,
                is_read,
                created_at: Utc::now(),
            },
        );
    }

    pub(crate) fn reward(&self, user_id: Uuid, points: i64) {
        self.state.lock().unwrap().rewards.insert(
            0,
            Reward {
                id: Uuid::new_v4(),
                user_id,
                points,
                earned_from: "purchase".to_string(),
                description: None,
                created_at: Utc::now(),
            },
        );
    }

    fn read(&self) -> Result<(), ClientError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(ClientError::Api {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn user(&self, token: &str) -> Result<Uuid, ClientError> {
        self.state
            .lock()
            .unwrap()
            .tokens
            .get(token)
            .copied()
            .ok_or_else(|| ClientError::SessionExpired("Invalid or expired session".to_string()))
    }

    fn issue(state: &mut State, profile: &Profile) -> AuthResponse {
        let token = format!("token-{}", Uuid::new_v4());
        state.tokens.insert(token.clone(), profile.id);
        AuthResponse {
            user_id: profile.id,
            token,
            profile: profile.clone(),
        }
    }

    fn profile(&self, user_id: Uuid) -> Option<Profile> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .values()
            .find(|a| a.profile.id == user_id)
            .map(|a| a.profile.clone())
    }
}

impl Backend for FakeBackend {
    async fn sign_up(&self, req: &SignUpRequest) -> Result<AuthResponse, ClientError> {
        let mut state = self.state.lock().unwrap();
        if state.accounts.contains_key(&req.email) {
            return Err(ClientError::Auth("User already registered".to_string()));
        }
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            full_name: req.full_name.clone(),
            role: req.role,
            phone: req.phone.clone(),
            location: req.location.clone(),
            age: req.age,
            language_preference: req.language_preference.unwrap_or(Language::En),
            health_preferences: req.health_preferences.clone().unwrap_or_else(Map::new),
            created_at: now,
            updated_at: now,
        };
        let resp = Self::issue(&mut state, &profile);
        state.accounts.insert(
            req.email.clone(),
            Account {
                password: req.password.clone(),
                profile,
            },
        );
        Ok(resp)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let mut state = self.state.lock().unwrap();
        let profile = state
            .accounts
            .get(email)
            .filter(|a| a.password == password)
            .map(|a| a.profile.clone())
            .ok_or_else(|| ClientError::Auth("Invalid login credentials".to_string()))?;
        Ok(Self::issue(&mut state, &profile))
    }

    async fn sign_out(&self, token: &str) -> Result<(), ClientError> {
        self.state.lock().unwrap().tokens.remove(token);
        Ok(())
    }

    async fn session(&self, token: &str) -> Result<SessionResponse, ClientError> {
        let user_id = self.user(token)?;
        let state = self.state.lock().unwrap();
        let (email, account) = state
            .accounts
            .iter()
            .find(|(_, a)| a.profile.id == user_id)
            .ok_or_else(|| not_found("User"))?;
        Ok(SessionResponse {
            user_id,
            email: email.clone(),
            profile: Some(account.profile.clone()),
        })
    }

    async fn update_profile(
        &self,
        token: &str,
        req: &UpdateProfileRequest,
    ) -> Result<Profile, ClientError> {
        let user_id = self.user(token)?;
        let mut state = self.state.lock().unwrap();
        let account = state
            .accounts
            .values_mut()
            .find(|a| a.profile.id == user_id)
            .ok_or_else(|| not_found("Profile"))?;
        let profile = &mut account.profile;
        if let Some(name) = &req.full_name {
            profile.full_name = name.clone();
        }
        if let Some(location) = &req.location {
            profile.location = Some(location.clone());
        }
        if let Some(age) = req.age {
            profile.age = Some(age);
        }
        if let Some(language) = req.language_preference {
            profile.language_preference = language;
        }
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }

    async fn my_products(&self, token: &str) -> Result<Vec<Product>, ClientError> {
        self.read()?;
        let user_id = self.user(token)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| p.farmer_id == user_id)
            .cloned()
            .collect())
    }

    async fn available_products(&self, token: &str) -> Result<Vec<Product>, ClientError> {
        self.read()?;
        self.user(token)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| p.status == ProductStatus::Available)
            .cloned()
            .collect())
    }

    async fn add_product(
        &self,
        token: &str,
        product: &NewProduct,
    ) -> Result<Product, ClientError> {
        let farmer_id = self.user(token)?;
        let created = Product {
            id: Uuid::new_v4(),
            farmer_id,
            millet_type: product.millet_type(),
            quantity_kg: product.quantity_kg(),
            price_per_kg: product.price_per_kg(),
            description: product.description().map(str::to_string),
            status: ProductStatus::Available,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().products.insert(0, created.clone());
        Ok(created)
    }

    async fn set_product_status(
        &self,
        token: &str,
        product_id: Uuid,
        status: ProductStatus,
    ) -> Result<Product, ClientError> {
        let farmer_id = self.user(token)?;
        let mut state = self.state.lock().unwrap();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id && p.farmer_id == farmer_id)
            .ok_or_else(|| not_found("Product"))?;
        product.status = status;
        Ok(product.clone())
    }

    async fn delete_product(&self, token: &str, product_id: Uuid) -> Result<(), ClientError> {
        let farmer_id = self.user(token)?;
        let mut state = self.state.lock().unwrap();
        let before = state.products.len();
        state
            .products
            .retain(|p| !(p.id == product_id && p.farmer_id == farmer_id));
        if state.products.len() == before {
            return Err(not_found("Product"));
        }
        Ok(())
    }

    async fn farmers(&self, token: &str, ids: &[Uuid]) -> Result<Vec<FarmerSummary>, ClientError> {
        self.read()?;
        self.user(token)?;
        Ok(ids
            .iter()
            .filter_map(|id| self.profile(*id))
            .filter(|p| p.role == Role::Farmer)
            .map(|p| FarmerSummary {
                id: p.id,
                full_name: p.full_name,
                location: p.location,
            })
            .collect())
    }

    async fn adoptions(&self, token: &str) -> Result<Vec<Adoption>, ClientError> {
        self.read()?;
        let consumer_id = self.user(token)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .adoptions
            .iter()
            .filter(|a| a.consumer_id == consumer_id && a.status == AdoptionStatus::Active)
            .cloned()
            .collect())
    }

    async fn adopt(&self, token: &str, farmer_id: Uuid) -> Result<AdoptResponse, ClientError> {
        let consumer_id = self.user(token)?;
        if self.profile(farmer_id).map(|p| p.role) != Some(Role::Farmer) {
            return Err(not_found("Farmer"));
        }
        let adoption = Adoption {
            id: Uuid::new_v4(),
            consumer_id,
            farmer_id,
            status: AdoptionStatus::Active,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().adoptions.insert(0, adoption.clone());
        self.reward(consumer_id, 50);
        self.notify(farmer_id, false);
        Ok(AdoptResponse {
            adoption,
            points_awarded: 50,
        })
    }

    async fn rewards(&self, token: &str) -> Result<Vec<Reward>, ClientError> {
        self.read()?;
        let user_id = self.user(token)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .rewards
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn notifications(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<Vec<Notification>, ClientError> {
        self.read()?;
        let user_id = self.user(token)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .take(limit.min(MAX_NOTIFICATION_LIMIT) as usize)
            .cloned()
            .collect())
    }

    async fn price_predictions(&self, token: &str) -> Result<Vec<PricePrediction>, ClientError> {
        self.read()?;
        self.user(token)?;
        let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        Ok(MilletType::ALL
            .iter()
            .take(5)
            .map(|millet| PricePrediction {
                id: Uuid::new_v4(),
                millet_type: *millet,
                predicted_price: 60.0,
                prediction_date: date,
                confidence: 0.8,
            })
            .collect())
    }

    async fn crop_advisories(&self, token: &str) -> Result<Vec<CropAdvisory>, ClientError> {
        self.read()?;
        let farmer_id = self.user(token)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .advisories
            .iter()
            .filter(|a| a.farmer_id == farmer_id)
            .take(3)
            .cloned()
            .collect())
    }

    async fn add_crop_advisory(
        &self,
        token: &str,
        req: &NewCropAdvisoryRequest,
    ) -> Result<CropAdvisory, ClientError> {
        let farmer_id = self.user(token)?;
        let advisory = CropAdvisory {
            id: Uuid::new_v4(),
            farmer_id,
            millet_type: req.millet_type,
            region: req.region.clone(),
            soil_type: req.soil_type.clone(),
            season: req.season.clone(),
            advisory_text: req.advisory_text.clone(),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().advisories.insert(0, advisory.clone());
        Ok(advisory)
    }
}
