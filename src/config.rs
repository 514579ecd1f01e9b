//! Configuration for a TeamDynamix instance.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present. A `Config`
//! describes one remote instance; construct one per instance you talk to,
//! there is no ambient global.

use std::env;

use url::Url;

use crate::error::LanternError;

/// Which TeamDynamix environment to target.
///
/// The sandbox and production environments live under the same domain but
/// different base path segments, and sandbox data is periodically reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// The sandbox environment (`SBTDWebApi`). Safe for experimentation.
    #[default]
    Sandbox,
    /// The production environment (`TDWebApi`).
    Production,
}

impl Environment {
    /// Returns the base path segment for this environment.
    pub fn api_root(self) -> &'static str {
        match self {
            Environment::Sandbox => "SBTDWebApi",
            Environment::Production => "TDWebApi",
        }
    }
}

/// Configuration for connecting to a TeamDynamix instance.
///
/// The auth token is optional here: it can be supplied up front, loaded
/// from a token file, or set later on the client once obtained.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Domain of the remote instance (e.g. `teamdynamix.example.edu`).
    /// A bare host name, not a URL.
    pub domain: String,

    /// Which environment to target. Defaults to sandbox.
    pub environment: Environment,

    /// Ticket application used when an operation is not given one.
    pub default_ticket_app: Option<String>,

    /// Asset application used when an operation is not given one.
    pub default_asset_app: Option<String>,

    /// Bearer token for authenticated calls, if already known.
    pub auth_token: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TDX_DOMAIN` (required): domain of the TeamDynamix instance
    /// - `TDX_SANDBOX` (optional): `true`/`false`, defaults to `true`
    /// - `TDX_TICKET_APP` (optional): default ticket application name
    /// - `TDX_ASSET_APP` (optional): default asset application name
    /// - `TDX_AUTH_TOKEN` (optional): bearer token
    ///
    /// # Errors
    ///
    /// Returns `LanternError::Config` if a required variable is missing or
    /// a value fails validation.
    pub fn from_env() -> Result<Self, LanternError> {
        let domain = Self::get_required_env("TDX_DOMAIN")?;
        let domain = Self::validate_domain(domain)?;

        let environment = match env::var("TDX_SANDBOX") {
            Ok(value) => Self::parse_sandbox_flag(&value)?,
            Err(_) => Environment::Sandbox,
        };

        Ok(Config {
            domain,
            environment,
            default_ticket_app: Self::get_optional_env("TDX_TICKET_APP"),
            default_asset_app: Self::get_optional_env("TDX_ASSET_APP"),
            auth_token: Self::get_optional_env("TDX_AUTH_TOKEN"),
        })
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, LanternError> {
        env::var(name)
            .map_err(|_| LanternError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(LanternError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Gets an optional environment variable, treating empty values as unset.
    fn get_optional_env(name: &str) -> Option<String> {
        env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Validates and normalizes the instance domain.
    ///
    /// The domain is a bare host (`teamdynamix.example.edu`); schemes and
    /// paths are rejected so URL construction stays predictable.
    fn validate_domain(domain: String) -> Result<String, LanternError> {
        let domain = domain.trim().trim_end_matches('/').to_string();

        if domain.contains("://") {
            return Err(LanternError::invalid_config(
                "TDX_DOMAIN must be a bare host, without a scheme",
            ));
        }
        if domain.contains('/') {
            return Err(LanternError::invalid_config(
                "TDX_DOMAIN must be a bare host, without a path",
            ));
        }

        let parsed = Url::parse(&format!("https://{}/", domain))
            .map_err(|e| LanternError::invalid_config(format!("invalid TDX_DOMAIN: {}", e)))?;
        if parsed.host_str() != Some(domain.as_str()) {
            return Err(LanternError::invalid_config(
                "TDX_DOMAIN must be a plain host name",
            ));
        }

        Ok(domain)
    }

    /// Parses the `TDX_SANDBOX` flag.
    fn parse_sandbox_flag(value: &str) -> Result<Environment, LanternError> {
        match value.trim().to_lowercase().as_str() {
            "" | "true" | "1" | "yes" => Ok(Environment::Sandbox),
            "false" | "0" | "no" => Ok(Environment::Production),
            other => Err(LanternError::invalid_config(format!(
                "TDX_SANDBOX must be true or false, got {:?}",
                other
            ))),
        }
    }
}
