use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use millet_types::api::{AuthResponse, SignUpRequest, UpdateProfileRequest};
use millet_types::{Profile, Role};

use crate::backend::Backend;
use crate::error::ClientError;

/// A signed-in user. Passed explicitly to every dashboard operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    /// `None` when the account exists but its profile row could not be read.
    pub profile: Option<Profile>,
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            token: resp.token,
            user_id: resp.user_id,
            profile: Some(resp.profile),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(Session),
}

/// Owns the current auth state and publishes every change to subscribers.
pub struct SessionStore {
    state: watch::Sender<AuthState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(AuthState::SignedOut);
        Self { state }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Option<Session> {
        match &*self.state.borrow() {
            AuthState::SignedIn(session) => Some(session.clone()),
            AuthState::SignedOut => None,
        }
    }

    pub async fn sign_up<B: Backend>(
        &self,
        backend: &B,
        req: &SignUpRequest,
    ) -> Result<Session, ClientError> {
        let session = Session::from(backend.sign_up(req).await?);
        info!("Signed up {}", session.user_id);
        self.publish(AuthState::SignedIn(session.clone()));
        Ok(session)
    }

    pub async fn sign_in<B: Backend>(
        &self,
        backend: &B,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let session = Session::from(backend.sign_in(email, password).await?);
        info!("Signed in {}", session.user_id);
        self.publish(AuthState::SignedIn(session.clone()));
        Ok(session)
    }

    /// Drop the local session even when the server call fails.
    pub async fn sign_out<B: Backend>(&self, backend: &B) -> Result<(), ClientError> {
        let Some(session) = self.current() else {
            return Ok(());
        };
        self.publish(AuthState::SignedOut);
        backend.sign_out(&session.token).await
    }

    /// Resume from a stored token. An unusable token leaves the store
    /// signed out.
    pub async fn restore<B: Backend>(&self, backend: &B, token: &str) -> Option<Session> {
        match backend.session(token).await {
            Ok(resp) => {
                if resp.profile.is_none() {
                    warn!("Session for {} has no profile", resp.user_id);
                }
                let session = Session {
                    token: token.to_string(),
                    user_id: resp.user_id,
                    profile: resp.profile,
                };
                self.publish(AuthState::SignedIn(session.clone()));
                Some(session)
            }
            Err(e) => {
                warn!("Could not restore session: {}", e);
                self.publish(AuthState::SignedOut);
                None
            }
        }
    }

    pub async fn update_profile<B: Backend>(
        &self,
        backend: &B,
        req: &UpdateProfileRequest,
    ) -> Result<Profile, ClientError> {
        let mut session = self.current().ok_or(ClientError::NotSignedIn)?;
        let profile = backend.update_profile(&session.token, req).await?;
        session.profile = Some(profile.clone());
        self.publish(AuthState::SignedIn(session));
        Ok(profile)
    }

    fn publish(&self, state: AuthState) {
        self.state.send_replace(state);
    }
}
