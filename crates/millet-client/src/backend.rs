use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use millet_types::api::{
    AdoptRequest, AdoptResponse, AuthResponse, ErrorBody, NewCropAdvisoryRequest,
    SessionResponse, SignInRequest, SignUpRequest, UpdateProductRequest, UpdateProfileRequest,
};
use millet_types::{
    Adoption, CropAdvisory, FarmerSummary, NewProduct, Notification, PricePrediction, Product,
    ProductStatus, Profile, Reward,
};

use crate::ClientConfig;
use crate::error::ClientError;

/// The data service the dashboards talk to. Every call is one request; the
/// caller sequences them.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn sign_up(&self, req: &SignUpRequest) -> Result<AuthResponse, ClientError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError>;
    async fn sign_out(&self, token: &str) -> Result<(), ClientError>;
    async fn session(&self, token: &str) -> Result<SessionResponse, ClientError>;
    async fn update_profile(
        &self,
        token: &str,
        req: &UpdateProfileRequest,
    ) -> Result<Profile, ClientError>;

    async fn my_products(&self, token: &str) -> Result<Vec<Product>, ClientError>;
    async fn available_products(&self, token: &str) -> Result<Vec<Product>, ClientError>;
    async fn add_product(&self, token: &str, product: &NewProduct)
    -> Result<Product, ClientError>;
    async fn set_product_status(
        &self,
        token: &str,
        product_id: Uuid,
        status: ProductStatus,
    ) -> Result<Product, ClientError>;
    async fn delete_product(&self, token: &str, product_id: Uuid) -> Result<(), ClientError>;
    async fn farmers(&self, token: &str, ids: &[Uuid]) -> Result<Vec<FarmerSummary>, ClientError>;

    async fn adoptions(&self, token: &str) -> Result<Vec<Adoption>, ClientError>;
    async fn adopt(&self, token: &str, farmer_id: Uuid) -> Result<AdoptResponse, ClientError>;
    async fn rewards(&self, token: &str) -> Result<Vec<Reward>, ClientError>;
    async fn notifications(&self, token: &str, limit: u32)
    -> Result<Vec<Notification>, ClientError>;

    async fn price_predictions(&self, token: &str) -> Result<Vec<PricePrediction>, ClientError>;
    async fn crop_advisories(&self, token: &str) -> Result<Vec<CropAdvisory>, ClientError>;
    async fn add_crop_advisory(
        &self,
        token: &str,
        req: &NewCropAdvisoryRequest,
    ) -> Result<CropAdvisory, ClientError>;
}

/// [`Backend`] over the marketplace HTTP API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(error_from(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn fetch_empty(&self, req: RequestBuilder) -> Result<(), ClientError> {
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(error_from(resp).await);
        }
        Ok(())
    }
}

/// Turn a non-2xx response into a [`ClientError`], keeping the server's text.
/// 401 is a refused token, 409 a taken email.
async fn error_from(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    debug!("API error {}: {}", status, message);

    match status {
        StatusCode::UNAUTHORIZED => ClientError::SessionExpired(message),
        StatusCode::CONFLICT => ClientError::Auth(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// On the credential routes a 401 means bad credentials, not a stale token.
fn credentials_error(e: ClientError) -> ClientError {
    match e {
        ClientError::SessionExpired(message) => ClientError::Auth(message),
        other => other,
    }
}

impl Backend for HttpBackend {
    async fn sign_up(&self, req: &SignUpRequest) -> Result<AuthResponse, ClientError> {
        self.fetch(self.client.post(self.url("/auth/signup")).json(req))
            .await
            .map_err(credentials_error)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.fetch(self.client.post(self.url("/auth/login")).json(&body))
            .await
            .map_err(credentials_error)
    }

    async fn sign_out(&self, token: &str) -> Result<(), ClientError> {
        self.fetch_empty(self.client.post(self.url("/auth/logout")).bearer_auth(token))
            .await
    }

    async fn session(&self, token: &str) -> Result<SessionResponse, ClientError> {
        self.fetch(self.client.get(self.url("/auth/session")).bearer_auth(token))
            .await
    }

    async fn update_profile(
        &self,
        token: &str,
        req: &UpdateProfileRequest,
    ) -> Result<Profile, ClientError> {
        self.fetch(
            self.client
                .patch(self.url("/profile"))
                .bearer_auth(token)
                .json(req),
        )
        .await
    }

    async fn my_products(&self, token: &str) -> Result<Vec<Product>, ClientError> {
        self.fetch(self.client.get(self.url("/products/mine")).bearer_auth(token))
            .await
    }

    async fn available_products(&self, token: &str) -> Result<Vec<Product>, ClientError> {
        self.fetch(self.client.get(self.url("/products")).bearer_auth(token))
            .await
    }

    async fn add_product(
        &self,
        token: &str,
        product: &NewProduct,
    ) -> Result<Product, ClientError> {
        self.fetch(
            self.client
                .post(self.url("/products"))
                .bearer_auth(token)
                .json(product),
        )
        .await
    }

    async fn set_product_status(
        &self,
        token: &str,
        product_id: Uuid,
        status: ProductStatus,
    ) -> Result<Product, ClientError> {
        self.fetch(
            self.client
                .patch(self.url(&format!("/products/{}", product_id)))
                .bearer_auth(token)
                .json(&UpdateProductRequest { status }),
        )
        .await
    }

    async fn delete_product(&self, token: &str, product_id: Uuid) -> Result<(), ClientError> {
        self.fetch_empty(
            self.client
                .delete(self.url(&format!("/products/{}", product_id)))
                .bearer_auth(token),
        )
        .await
    }

    async fn farmers(&self, token: &str, ids: &[Uuid]) -> Result<Vec<FarmerSummary>, ClientError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.fetch(
            self.client
                .get(self.url("/farmers"))
                .bearer_auth(token)
                .query(&[("ids", ids)]),
        )
        .await
    }

    async fn adoptions(&self, token: &str) -> Result<Vec<Adoption>, ClientError> {
        self.fetch(self.client.get(self.url("/adoptions")).bearer_auth(token))
            .await
    }

    async fn adopt(&self, token: &str, farmer_id: Uuid) -> Result<AdoptResponse, ClientError> {
        self.fetch(
            self.client
                .post(self.url("/adoptions"))
                .bearer_auth(token)
                .json(&AdoptRequest { farmer_id }),
        )
        .await
    }

    async fn rewards(&self, token: &str) -> Result<Vec<Reward>, ClientError> {
        self.fetch(self.client.get(self.url("/rewards")).bearer_auth(token))
            .await
    }

    async fn notifications(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<Vec<Notification>, ClientError> {
        self.fetch(
            self.client
                .get(self.url("/notifications"))
                .bearer_auth(token)
                .query(&[("limit", limit)]),
        )
        .await
    }

    async fn price_predictions(&self, token: &str) -> Result<Vec<PricePrediction>, ClientError> {
        self.fetch(self.client.get(self.url("/predictions")).bearer_auth(token))
            .await
    }

    async fn crop_advisories(&self, token: &str) -> Result<Vec<CropAdvisory>, ClientError> {
        self.fetch(self.client.get(self.url("/advisories")).bearer_auth(token))
            .await
    }

    async fn add_crop_advisory(
        &self,
        token: &str,
        req: &NewCropAdvisoryRequest,
    ) -> Result<CropAdvisory, ClientError> {
        self.fetch(
            self.client
                .post(self.url("/advisories"))
                .bearer_auth(token)
                .json(req),
        )
        .await
    }
}
