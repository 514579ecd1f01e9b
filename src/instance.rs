//! The TeamDynamix instance context object.
//!
//! A `TdxInstance` bundles configuration, the dispatch client, and the
//! identifier resolver for one remote instance. Construct one per instance
//! you talk to and tear it down by dropping it; there is no ambient
//! singleton. Resource operations (tickets, assets, people) are
//! implemented on this type in the `ops` modules.

use futures::future::try_join_all;

use crate::client::TdxClient;
use crate::config::Config;
use crate::error::LanternError;
use crate::models::{Person, RefId};
use crate::resolver::{Category, Resolver};

/// A connected TeamDynamix instance.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let tdx = TdxInstance::new(config)?;
/// tdx.client().load_auth_token("tdx.key").await?;
/// tdx.initialize().await?;
///
/// let assets = tdx.search_assets("C02", None).await?;
/// ```
pub struct TdxInstance {
    config: Config,
    client: TdxClient,
    resolver: Resolver,
}

impl TdxInstance {
    /// Creates an instance from configuration.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(config: Config) -> Result<Self, LanternError> {
        let client = TdxClient::new(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Wires an instance around an existing client.
    ///
    /// Lets tests and nonstandard deployments aim at an arbitrary base
    /// URL via [`TdxClient::with_base_url`].
    pub fn with_client(config: Config, client: TdxClient) -> Self {
        let resolver = Resolver::new(client.clone());
        Self {
            config,
            client,
            resolver,
        }
    }

    /// Returns the dispatch client.
    pub fn client(&self) -> &TdxClient {
        &self.client
    }

    /// Returns the identifier resolver.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Returns the instance configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the currently authenticated user.
    pub async fn current_user(&self) -> Result<Person, LanternError> {
        self.client.current_user().await
    }

    /// Populates the resolver from the remote instance.
    ///
    /// Runs in three strictly ordered phases:
    ///
    /// 1. Global categories (applications, locations, custom-attribute
    ///    definitions), concurrently. Application identifiers must land
    ///    before anything application-scoped can be fetched.
    /// 2. Application-scoped categories (statuses and forms) for each
    ///    configured default application, concurrently.
    /// 3. Group identifiers, best-effort: some instances restrict the
    ///    group listing, so a failure here logs a warning and leaves the
    ///    subtree unpopulated - later group resolution then fails with
    ///    `ReferenceNotFound` instead of answering from stale data.
    ///
    /// # Errors
    ///
    /// Any failure in the first two phases is surfaced immediately.
    pub async fn initialize(&self) -> Result<(), LanternError> {
        let user = self.current_user().await?;
        tracing::info!(
            user = %user.display_name(),
            email = %user.display_email(),
            "authenticated to TeamDynamix"
        );

        tokio::try_join!(
            self.resolver.populate(Category::AppIds, None),
            self.resolver.populate(Category::LocationIds, None),
            self.resolver.populate(Category::AssetAttributes, None),
            self.resolver.populate(Category::TicketAttributes, None),
        )?;

        let mut scoped = Vec::new();
        if let Some(app) = self.config.default_ticket_app.as_deref() {
            scoped.push(self.resolver.populate(Category::TicketStatuses, Some(app)));
            scoped.push(self.resolver.populate(Category::TicketForms, Some(app)));
        }
        if let Some(app) = self.config.default_asset_app.as_deref() {
            scoped.push(self.resolver.populate(Category::AssetStatuses, Some(app)));
            scoped.push(self.resolver.populate(Category::AssetForms, Some(app)));
        }
        try_join_all(scoped).await?;

        if let Err(error) = self.resolver.populate(Category::GroupIds, None).await {
            tracing::warn!(error = %error, "could not populate group identifiers");
        }

        Ok(())
    }

    /// Resolves the ticket application to operate on: the explicit name
    /// if given, otherwise the configured default.
    pub(crate) fn ticket_app<'a>(
        &'a self,
        app_name: Option<&'a str>,
    ) -> Result<&'a str, LanternError> {
        app_name
            .or(self.config.default_ticket_app.as_deref())
            .ok_or_else(|| {
                LanternError::invalid_parameter(
                    "no ticket application named and no default configured",
                )
            })
    }

    /// Resolves the asset application to operate on: the explicit name
    /// if given, otherwise the configured default.
    pub(crate) fn asset_app<'a>(
        &'a self,
        app_name: Option<&'a str>,
    ) -> Result<&'a str, LanternError> {
        app_name
            .or(self.config.default_asset_app.as_deref())
            .ok_or_else(|| {
                LanternError::invalid_parameter(
                    "no asset application named and no default configured",
                )
            })
    }

    /// Resolves an application name to its identifier.
    pub(crate) async fn resolve_app_id(&self, app_name: &str) -> Result<RefId, LanternError> {
        self.resolver.resolve(Category::AppIds, app_name, None).await
    }
}
