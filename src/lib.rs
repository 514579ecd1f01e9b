//! # Lantern
//!
//! Lantern is an async client for the TeamDynamix Web API, the ITSM
//! platform behind many university help desks. It wraps the remote's
//! ticket, asset, and people endpoints behind operations that take
//! human-readable names instead of the opaque numeric identifiers the API
//! actually wants.
//!
//! ## Features
//!
//! - **Identifier resolution**: a populate-once cache of name-to-ID
//!   mappings for applications, locations, statuses, groups, and custom
//!   attribute definitions, with per-application namespaces where the
//!   remote partitions them
//! - **Resource operations**: search and mutate tickets and assets, check
//!   assets in, look people up, all by name
//! - **Typed errors**: every failure mode is a distinct variant carrying
//!   the context needed to react to it
//! - **Token plumbing**: file-based token persistence and a scheduled
//!   renewal task decoupled from the client core
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - The crate-wide error type
//! - [`client`] - Request dispatch: base URLs, bearer auth, timeouts
//! - [`resolver`] - The name-to-identifier resolution cache
//! - [`instance`] - The per-instance context object carrying the above,
//!   with ticket/asset/people operations implemented on it
//! - [`models`] - Data models for remote documents and request bodies
//! - [`renewal`] - Scheduled token renewal
//!
//! ## Usage
//!
//! ```ignore
//! use lantern::config::Config;
//! use lantern::instance::TdxInstance;
//!
//! async fn example() -> Result<(), lantern::error::LanternError> {
//!     let config = Config::from_env()?;
//!     let tdx = TdxInstance::new(config)?;
//!     tdx.client().load_auth_token("tdx.key").await?;
//!
//!     // Fetch the name-to-ID listings the operations below rely on.
//!     tdx.initialize().await?;
//!
//!     // Find a loaner laptop and check it back into stock.
//!     let matches = tdx.search_assets("C02XL0GWJG5H", None).await?;
//!     if let [only] = matches.as_slice() {
//!         let asset = tdx.get_asset(&only.id.to_string(), None).await?;
//!         tdx.check_in_asset(
//!             asset,
//!             "Media Union",
//!             "In Stock",
//!             None,
//!             Some("returned at front desk"),
//!             None,
//!         )
//!         .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Environments
//!
//! TeamDynamix exposes a sandbox (`SBTDWebApi`) and a production
//! (`TDWebApi`) API under the same domain. Lantern defaults to the
//! sandbox; set `TDX_SANDBOX=false` to talk to production.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod instance;
pub mod models;
mod ops;
pub mod renewal;
pub mod resolver;
