use std::fmt;

use url::Url;

use super::reply::StatusReply;

/// Errors from the remote status service. Folded into the fallback
/// occupancy before anything reaches the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Bad base URL or a building name that cannot form a path.
    InvalidUrl(String),
    /// Connection, TLS or timeout failure.
    Transport(String),
    /// Non-success HTTP status with an unreadable body.
    Http(u16),
    /// Body was not a status reply.
    Decode(String),
    /// The service answered with `{ "error": ... }`.
    Service(String),
    /// No HTTP transport on this target.
    Unsupported,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(msg) => write!(f, "Invalid status URL: {msg}"),
            FetchError::Transport(msg) => write!(f, "Transport error: {msg}"),
            FetchError::Http(code) => write!(f, "HTTP {code} from status service"),
            FetchError::Decode(msg) => write!(f, "Malformed status reply: {msg}"),
            FetchError::Service(msg) => write!(f, "Status service error: {msg}"),
            FetchError::Unsupported => write!(f, "Remote status is not supported on this platform"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}

/// Blocking request/response seam to the status service. Runs on the IO
/// task pool, never on the frame loop.
pub trait StatusTransport: Send + Sync + 'static {
    fn get_status(&self, building: &str) -> Result<StatusReply, FetchError>;
}

impl<F> StatusTransport for F
where
    F: Fn(&str) -> Result<StatusReply, FetchError> + Send + Sync + 'static,
{
    fn get_status(&self, building: &str) -> Result<StatusReply, FetchError> {
        self(building)
    }
}

/// `{base}/api/status/{building}` with the building name escaped as one
/// path segment.
pub fn status_url(base: &str, building: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(["api", "status", building]);
    Ok(url)
}

/// Decode a reply body, keeping the HTTP status for bodies that don't parse.
pub fn decode_reply(http_status: u16, body: &str) -> Result<StatusReply, FetchError> {
    match serde_json::from_str::<StatusReply>(body) {
        Ok(reply) => Ok(reply),
        Err(_) if !(200..300).contains(&http_status) => Err(FetchError::Http(http_status)),
        Err(e) => Err(FetchError::Decode(e.to_string())),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::HttpStatusTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use super::{decode_reply, status_url, FetchError, StatusReply, StatusTransport};
    use crate::config::STATUS_TIMEOUT_SECS;

    /// `reqwest` blocking client against a fixed base URL.
    pub struct HttpStatusTransport {
        base: String,
        client: reqwest::blocking::Client,
    }

    impl HttpStatusTransport {
        pub fn new(base: impl Into<String>) -> Result<Self, FetchError> {
            let base = base.into();
            // A bad base is rejected here rather than on the first hover.
            status_url(&base, "HOD")?;
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(STATUS_TIMEOUT_SECS))
                .build()
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            Ok(Self { base, client })
        }
    }

    impl StatusTransport for HttpStatusTransport {
        fn get_status(&self, building: &str) -> Result<StatusReply, FetchError> {
            let url = status_url(&self.base, building)?;
            let response = self
                .client
                .get(url)
                .send()
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            let code = response.status().as_u16();
            let body = response
                .text()
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            decode_reply(code, &body)
        }
    }
}
