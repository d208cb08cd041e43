// Response envelope and error classification
//
// Every gstd endpoint answers with {code, description, response}. A reply is
// only trusted when the HTTP exchange landed in [200, 500); anything else is
// treated as the daemon not being there at all.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::{ErrorCode, GstcError, Result};

/// Raw outcome of one HTTP exchange
///
/// `status` is 0 when no HTTP response arrived (refused, reset, DNS failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// No response at all
    pub fn unreachable() -> Self {
        Self {
            status: 0,
            body: String::new(),
        }
    }

    /// Statuses the client hands to the envelope parser
    pub fn is_answered(&self) -> bool {
        (200..500).contains(&self.status)
    }
}

/// The daemon's response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i32,
    #[serde(default)]
    pub description: String,
    /// Operation-specific payload
    #[serde(default)]
    pub response: Value,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Ok as i32
    }

    /// Typed code; `None` for integers outside the protocol table
    pub fn kind(&self) -> Option<ErrorCode> {
        ErrorCode::try_from(self.code).ok()
    }
}

/// Turn one HTTP exchange into an envelope or a typed error
pub fn interpret(raw: &RawResponse) -> Result<Envelope> {
    if !raw.is_answered() {
        return Err(GstcError::unreachable());
    }

    let envelope: Envelope = serde_json::from_str(&raw.body).map_err(|e| {
        GstcError::client(
            ErrorCode::Malformed,
            format!("Malformed response from daemon: {}", e),
        )
    })?;

    if envelope.is_success() {
        Ok(envelope)
    } else {
        warn!(
            code = envelope.code,
            description = %envelope.description,
            "Daemon reported an error"
        );
        Err(GstcError::daemon(envelope.code, envelope.description))
    }
}
