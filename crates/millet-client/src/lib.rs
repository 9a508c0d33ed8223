//! Millet Client
//!
//! The stateful half of the marketplace front end. Dashboards fetch rows
//! through a [`Backend`], hold the last good copy of each list and recompute
//! their derived views with `millet-core` after every change.

pub mod backend;
pub mod consumer;
pub mod error;
pub mod farmer;
pub mod prefs;
pub mod session;
pub mod voice;

#[cfg(test)]
mod fake;

use tracing::warn;

pub use backend::{Backend, HttpBackend};
pub use consumer::ConsumerDashboard;
pub use error::ClientError;
pub use farmer::FarmerDashboard;
pub use prefs::{PreferenceStore, PrefsError};
pub use session::{AuthState, Session, SessionStore};
pub use voice::{SpeechRecognizer, SpeechSynthesizer, Utterance, VoiceAssistant, VoiceError, VoiceTurn};

/// Where the marketplace API lives and how much the dashboards ask for.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Notifications shown on the farmer dashboard.
    pub notification_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            notification_limit: 5,
        }
    }
}

/// Store a fetched list, or log the failure and keep what was there.
pub(crate) fn keep_or_warn<T>(slot: &mut T, fetched: Result<T, ClientError>, what: &str) -> bool {
    match fetched {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(e) => {
            warn!("Failed to fetch {}: {}", what, e);
            false
        }
    }
}
