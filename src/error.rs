//! Error types for the lantern client.
//!
//! This module defines `LanternError`, the unified error type used throughout
//! the crate. Every failure surfaces immediately as one of these variants;
//! there is no internal retry or silent recovery. Callers that want backoff
//! can classify transport failures with
//! [`is_communication_failure`](LanternError::is_communication_failure).

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::resolver::Category;

/// Unified error type for all lantern operations.
///
/// Each variant carries the context a caller needs to react: reference
/// lookups name what was missing, person searches carry their criteria,
/// attach failures carry both identifiers involved.
#[derive(Error, Debug)]
pub enum LanternError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The remote could not be reached at the transport level.
    ///
    /// This is distinct from a remote 4xx/5xx: the request never produced
    /// a response. Callers may retry with backoff; lantern itself never
    /// retries.
    #[error("communication failure: {0}")]
    Communication(#[source] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {duration:?} during {operation}")]
    Timeout {
        /// How long we waited before giving up.
        duration: Duration,
        /// The operation that timed out, e.g. `GET applications`.
        operation: String,
    },

    /// The remote rejected the bearer token (HTTP 401).
    #[error("not authorized - the auth token is missing, expired, or invalid")]
    NotAuthorized,

    /// The remote returned a non-2xx status not otherwise classified.
    #[error("request failed with HTTP {status}: {body}")]
    RequestFailed {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// A name was not found in the resolver table.
    ///
    /// Raised both for names genuinely unknown to the remote and for
    /// categories that have not been populated yet - the table cannot tell
    /// the difference.
    #[error("no {category} mapping for {name:?}{}", app_suffix(.app))]
    ReferenceNotFound {
        /// The category that was consulted.
        category: Category,
        /// The display name that failed to resolve.
        name: String,
        /// The application scope, for app-scoped categories.
        app: Option<String>,
    },

    /// A custom attribute was not present on a document.
    #[error("document has no attribute named {name:?}")]
    AttributeNotFound {
        /// The attribute display name that was searched for.
        name: String,
    },

    /// A person search returned no matches.
    #[error("no person matched the search criteria: {criteria}")]
    PersonNotFound {
        /// The criteria that produced zero matches, for diagnostics.
        criteria: String,
    },

    /// A search expected exactly one match but found several.
    #[error("ambiguous match: {matches} {entity} records matched")]
    AmbiguousMatch {
        /// The kind of entity that was searched for.
        entity: &'static str,
        /// How many records matched.
        matches: usize,
    },

    /// Attaching an asset to a ticket was rejected by the remote.
    ///
    /// The remote does not structure this response well enough to tell
    /// "already attached" apart from other failures, so the generic failure
    /// is reported with both identifiers.
    #[error("failed to attach asset {asset_id} to ticket {ticket_id}")]
    AttachFailed {
        /// The ticket the asset was being attached to.
        ticket_id: String,
        /// The asset that was being attached.
        asset_id: String,
    },

    /// Dispatch was asked to use a method other than GET or POST.
    #[error("unsupported HTTP method {0}, expected GET or POST")]
    UnsupportedMethod(String),

    /// A caller-supplied parameter was missing or invalid.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing the token file failed.
    ///
    /// A missing file on load is fatal; there is no fallback token source.
    #[error("token file {path:?}: {source}")]
    TokenFile {
        /// The file that could not be read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Formats the app-scope suffix for `ReferenceNotFound` messages.
fn app_suffix(app: &Option<String>) -> String {
    match app {
        Some(app) => format!(" in application {app:?}"),
        None => String::new(),
    }
}

impl LanternError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        LanternError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        LanternError::Config(message.into())
    }

    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        LanternError::InvalidParameter(message.into())
    }

    /// Creates a reference-not-found error.
    pub fn reference_not_found(
        category: Category,
        name: impl Into<String>,
        app: Option<&str>,
    ) -> Self {
        LanternError::ReferenceNotFound {
            category,
            name: name.into(),
            app: app.map(str::to_string),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        LanternError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Returns true if the failure happened at the transport level rather
    /// than in the remote application.
    ///
    /// Communication failures are the ones worth retrying with backoff.
    /// An authorization or validation failure will not improve by waiting.
    #[must_use]
    pub fn is_communication_failure(&self) -> bool {
        matches!(
            self,
            LanternError::Communication(_) | LanternError::Timeout { .. }
        )
    }
}
