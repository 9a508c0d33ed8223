use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected credentials or a taken email. The text is the server's and
    /// is shown to the user as-is.
    #[error("{0}")]
    Auth(String),

    /// The bearer token was refused on a data call. The caller should sign
    /// in again.
    #[error("{0}")]
    SessionExpired(String),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("not signed in")]
    NotSignedIn,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
