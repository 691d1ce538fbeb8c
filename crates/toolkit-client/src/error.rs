use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to construct HTTP client")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("rate limited after {attempts} attempt(s) to {url}")]
    RateLimitExhausted { url: String, attempts: u32 },

    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("authentication failed: no token received")]
    AuthRejected,

    #[error("no authentication token available")]
    NotAuthenticated,

    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
