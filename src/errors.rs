// Error types and user-friendly error messages
//
// GstcError is what every client operation fails with. The helpers at the
// bottom turn those errors into actionable messages for the CLI.
//
// Localization Support:
// Hint labels follow the LANG environment variable (en, es, fr, de).

use anyhow::Context;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// Message used for every transport-level failure
pub const UNREACHABLE_MESSAGE: &str = "Server did not respond. Is it up?";

/// Status codes shared with the daemon protocol
///
/// The integer values are fixed by gstd and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    NullArgument = -1,
    Unreachable = -2,
    Timeout = -3,
    OutOfMemory = -4,
    TypeError = -5,
    Malformed = -6,
    NotFound = -7,
    SendError = -8,
    RecvError = -9,
    SocketError = -10,
    ThreadError = -11,
    BusTimeout = -12,
    SocketTimeout = -13,
}

impl ErrorCode {
    /// Protocol name, as the daemon documents it
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::Ok => "OK",
            ErrorCode::NullArgument => "NULL_ARGUMENT",
            ErrorCode::Unreachable => "UNREACHABLE",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::OutOfMemory => "OUT_OF_MEMORY",
            ErrorCode::TypeError => "TYPE_ERROR",
            ErrorCode::Malformed => "MALFORMED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::SendError => "SEND_ERROR",
            ErrorCode::RecvError => "RECV_ERROR",
            ErrorCode::SocketError => "SOCKET_ERROR",
            ErrorCode::ThreadError => "THREAD_ERROR",
            ErrorCode::BusTimeout => "BUS_TIMEOUT",
            ErrorCode::SocketTimeout => "SOCKET_TIMEOUT",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ErrorCode::Ok)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), *self as i32)
    }
}

impl TryFrom<i32> for ErrorCode {
    /// The unrecognized integer
    type Error = i32;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Ok,
            -1 => ErrorCode::NullArgument,
            -2 => ErrorCode::Unreachable,
            -3 => ErrorCode::Timeout,
            -4 => ErrorCode::OutOfMemory,
            -5 => ErrorCode::TypeError,
            -6 => ErrorCode::Malformed,
            -7 => ErrorCode::NotFound,
            -8 => ErrorCode::SendError,
            -9 => ErrorCode::RecvError,
            -10 => ErrorCode::SocketError,
            -11 => ErrorCode::ThreadError,
            -12 => ErrorCode::BusTimeout,
            -13 => ErrorCode::SocketTimeout,
            other => return Err(other),
        };
        Ok(code)
    }
}

/// Errors raised by daemon client operations
#[derive(Error, Debug, Clone)]
pub enum GstcError {
    /// Detected on the client side: bad usage, unreachable server, unparsable reply
    #[error("{message} ({code})")]
    Client {
        code: ErrorCode,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// Reported by the daemon in the response envelope
    #[error("{description} (code {code})")]
    Daemon {
        /// Raw envelope code, kept verbatim
        code: i32,
        description: String,
        timestamp: DateTime<Utc>,
    },
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, GstcError>;

impl GstcError {
    pub fn client(code: ErrorCode, message: impl Into<String>) -> Self {
        GstcError::Client {
            code,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn daemon(code: i32, description: impl Into<String>) -> Self {
        GstcError::Daemon {
            code,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    /// Transport failure: refused, reset, or a fatal HTTP status
    pub fn unreachable() -> Self {
        Self::client(ErrorCode::Unreachable, UNREACHABLE_MESSAGE)
    }

    /// Integer code, identical to what travels on the wire
    pub fn code(&self) -> i32 {
        match self {
            GstcError::Client { code, .. } => *code as i32,
            GstcError::Daemon { code, .. } => *code,
        }
    }

    /// Typed code; `None` when the daemon sent an integer outside the table
    pub fn kind(&self) -> Option<ErrorCode> {
        ErrorCode::try_from(self.code()).ok()
    }

    pub fn message(&self) -> &str {
        match self {
            GstcError::Client { message, .. } => message,
            GstcError::Daemon { description, .. } => description,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            GstcError::Client { timestamp, .. } | GstcError::Daemon { timestamp, .. } => {
                *timestamp
            }
        }
    }

    pub fn is_daemon_error(&self) -> bool {
        matches!(self, GstcError::Daemon { .. })
    }
}

/// Get the current locale from environment
fn get_locale() -> &'static str {
    if let Ok(lang) = std::env::var("LANG") {
        if lang.starts_with("es") {
            return "es";
        } else if lang.starts_with("fr") {
            return "fr";
        } else if lang.starts_with("de") {
            return "de";
        }
    }
    "en"
}

/// Localized text helper
fn t(key: &str) -> String {
    let text = match (get_locale(), key) {
        ("es", "try") => "Intenta:",
        ("es", "suggestion") => "Sugerencia",
        ("es", "possible_causes") => "Posibles causas:",

        ("fr", "try") => "Essayez:",
        ("fr", "suggestion") => "Suggestion",
        ("fr", "possible_causes") => "Causes possibles:",

        ("de", "try") => "Versuchen Sie:",
        ("de", "suggestion") => "Vorschlag",
        ("de", "possible_causes") => "Mögliche Ursachen:",

        _ => match key {
            "try" => "Try:",
            "suggestion" => "Suggestion",
            "possible_causes" => "Possible causes:",
            _ => key,
        },
    };

    text.to_string()
}

/// Wrap an error with user-friendly context
pub trait UserFriendlyError {
    /// Add user-friendly context with a suggestion
    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self;
}

impl<T> UserFriendlyError for anyhow::Result<T> {
    fn user_context_with_suggestion(self, problem: &str, suggestion: &str) -> Self {
        self.with_context(|| {
            format!(
                "{}\n\n\x1b[1;33m{}:\x1b[0m {}",
                problem,
                t("suggestion"),
                suggestion
            )
        })
    }
}

/// Format an unreachable-daemon error with helpful suggestions
pub fn unreachable_hint(address: &str) -> String {
    format!(
        "Could not reach gstd at {}\n\n\
        \x1b[1;33m{}\x1b[0m\n\
        • gstd is not running\n\
        • gstd was started without the HTTP protocol\n\
        • Wrong host or port\n\n\
        \x1b[1;32m{}\x1b[0m\n\
        1. Start the daemon with HTTP enabled:\n\
           \x1b[36mgstd --enable-http-protocol --http-port=5000\x1b[0m\n\n\
        2. Point the client at it:\n\
           \x1b[36mgstc --host http://localhost --port 5000 list-pipelines\x1b[0m\n\n\
        3. Or persist the address:\n\
           \x1b[36mgstc config-init && $EDITOR ~/.gstc/config.toml\x1b[0m",
        address,
        t("possible_causes"),
        t("try")
    )
}

/// Format a daemon-reported error, adding a suggestion when the code has one
pub fn daemon_error_hint(error: &GstcError) -> String {
    let suggestion = match error.kind() {
        Some(ErrorCode::NotFound) => {
            Some("Check the name with `gstc list-pipelines` or `gstc list-elements <pipe>`")
        }
        Some(ErrorCode::NullArgument) => Some("A required argument was empty"),
        Some(ErrorCode::BusTimeout) => {
            Some("No bus message matched in time; raise it with `gstc bus-timeout`")
        }
        Some(ErrorCode::Timeout) | Some(ErrorCode::SocketTimeout) => {
            Some("The daemon took too long to answer; check its load")
        }
        _ => None,
    };

    match suggestion {
        Some(s) => wrap_error_with_suggestion(error, s),
        None => error.to_string(),
    }
}

/// Wrap a generic error with suggestions
pub fn wrap_error_with_suggestion(error: impl fmt::Display, suggestion: &str) -> String {
    format!(
        "{}\n\n\
        \x1b[1;33m{}:\x1b[0m {}",
        error,
        t("suggestion"),
        suggestion
    )
}
