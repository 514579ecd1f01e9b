//! Name-to-identifier resolution cache.
//!
//! The remote API wants opaque numeric identifiers everywhere a human
//! would use a name: applications, locations, statuses, groups, custom
//! attribute definitions. The resolver caches full name-to-identifier
//! listings per category so operations can accept display names and
//! translate them on the way out.
//!
//! The cache is populate-once / refresh-on-demand. Nothing is evicted, and
//! a category that has not been populated simply fails resolution with
//! `ReferenceNotFound`. Callers must await a population before resolving
//! against its category.

use std::collections::HashMap;
use std::fmt;

use reqwest::Method;
use tokio::sync::RwLock;

use crate::client::TdxClient;
use crate::error::LanternError;
use crate::models::RefId;

// Component identifiers are fixed by the remote schema.
const TICKET_COMPONENT_ID: u32 = 9;
const ASSET_COMPONENT_ID: u32 = 27;

/// A class of identifier mapping the resolver can hold.
///
/// Global categories have one namespace per instance. Application-scoped
/// categories ([`AssetStatuses`](Category::AssetStatuses) and
/// [`TicketStatuses`](Category::TicketStatuses)) are partitioned per named
/// application, since status names are only unique within one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Application names to application identifiers.
    AppIds,
    /// Location names to location identifiers.
    LocationIds,
    /// Asset status names to status identifiers (application-scoped).
    AssetStatuses,
    /// Ticket status names to status identifiers (application-scoped).
    TicketStatuses,
    /// Asset form names to form identifiers (application-scoped).
    AssetForms,
    /// Ticket form names to form identifiers (application-scoped).
    TicketForms,
    /// Asset custom-attribute names to attribute-definition identifiers.
    AssetAttributes,
    /// Ticket custom-attribute names to attribute-definition identifiers.
    TicketAttributes,
    /// Group names to group identifiers.
    GroupIds,
}

impl Category {
    /// Returns true if this category's namespace is partitioned per
    /// application.
    pub fn is_app_scoped(self) -> bool {
        matches!(
            self,
            Category::AssetStatuses
                | Category::TicketStatuses
                | Category::AssetForms
                | Category::TicketForms
        )
    }

    /// Describes how to populate this category from the remote.
    pub(crate) fn population_spec(self) -> PopulationSpec {
        match self {
            Category::AppIds => PopulationSpec {
                name_field: "Name",
                id_field: "AppID",
                endpoint: "applications".to_string(),
                method: Method::GET,
                app_scoped: false,
            },
            Category::LocationIds => PopulationSpec {
                name_field: "Name",
                id_field: "ID",
                endpoint: "locations".to_string(),
                method: Method::GET,
                app_scoped: false,
            },
            Category::AssetStatuses => PopulationSpec {
                name_field: "Name",
                id_field: "ID",
                endpoint: "assets/statuses".to_string(),
                method: Method::GET,
                app_scoped: true,
            },
            Category::TicketStatuses => PopulationSpec {
                name_field: "Name",
                id_field: "ID",
                endpoint: "tickets/statuses".to_string(),
                method: Method::GET,
                app_scoped: true,
            },
            Category::AssetForms => PopulationSpec {
                name_field: "Name",
                id_field: "ID",
                endpoint: "assets/forms".to_string(),
                method: Method::GET,
                app_scoped: true,
            },
            Category::TicketForms => PopulationSpec {
                name_field: "Name",
                id_field: "ID",
                endpoint: "tickets/forms".to_string(),
                method: Method::GET,
                app_scoped: true,
            },
            Category::AssetAttributes => PopulationSpec {
                name_field: "Name",
                id_field: "ID",
                endpoint: format!("attributes/custom?componentId={}", ASSET_COMPONENT_ID),
                method: Method::GET,
                app_scoped: false,
            },
            Category::TicketAttributes => PopulationSpec {
                name_field: "Name",
                id_field: "ID",
                endpoint: format!("attributes/custom?componentId={}", TICKET_COMPONENT_ID),
                method: Method::GET,
                app_scoped: false,
            },
            // The group listing is only reachable through its search
            // endpoint; an empty criteria body returns every group.
            Category::GroupIds => PopulationSpec {
                name_field: "Name",
                id_field: "ID",
                endpoint: "groups/search".to_string(),
                method: Method::POST,
                app_scoped: false,
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::AppIds => "application",
            Category::LocationIds => "location",
            Category::AssetStatuses => "asset status",
            Category::TicketStatuses => "ticket status",
            Category::AssetForms => "asset form",
            Category::TicketForms => "ticket form",
            Category::AssetAttributes => "asset attribute",
            Category::TicketAttributes => "ticket attribute",
            Category::GroupIds => "group",
        })
    }
}

/// How to populate one category: which remote fields carry the display
/// name and identifier, which endpoint lists the objects, and whether the
/// endpoint is prefixed with an application identifier.
pub(crate) struct PopulationSpec {
    pub name_field: &'static str,
    pub id_field: &'static str,
    pub endpoint: String,
    pub method: Method,
    pub app_scoped: bool,
}

/// One fully-populated leaf: display name to identifier.
type Mapping = HashMap<String, RefId>;

/// The two-level table behind the resolver.
///
/// Global categories map directly; app-scoped categories nest one level
/// deeper under the owning application's name. Leaves are only ever
/// replaced wholesale, never mutated entry-by-entry.
#[derive(Debug, Default)]
struct ResolverTable {
    global: HashMap<Category, Mapping>,
    scoped: HashMap<String, HashMap<Category, Mapping>>,
}

impl ResolverTable {
    fn mapping(&self, category: Category, app_name: Option<&str>) -> Option<&Mapping> {
        match app_name {
            Some(app) => self
                .scoped
                .get(app)
                .and_then(|categories| categories.get(&category)),
            None => self.global.get(&category),
        }
    }
}

/// The identifier resolution cache.
///
/// Population fetches happen outside the table lock, so populations of
/// disjoint categories or app scopes can run concurrently; each one
/// replaces its own leaf under a short write lock. A population that is
/// cancelled mid-fetch leaves the table exactly as it was.
pub struct Resolver {
    client: TdxClient,
    table: RwLock<ResolverTable>,
}

impl Resolver {
    /// Creates an empty resolver over the given client.
    pub fn new(client: TdxClient) -> Self {
        Self {
            client,
            table: RwLock::new(ResolverTable::default()),
        }
    }

    /// Fetches the full listing for a category and replaces its mapping.
    ///
    /// For app-scoped categories the application identifier is resolved
    /// first, so [`Category::AppIds`] must be populated before any scoped
    /// population. Duplicate display names in the listing keep the
    /// last-seen identifier; the remote permits duplicates and listing
    /// order is the only tiebreak it offers.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidParameter` when an app-scoped category is given
    /// no application name, `ReferenceNotFound` when the application name
    /// cannot be resolved, or any dispatch error from the listing fetch.
    pub async fn populate(
        &self,
        category: Category,
        app_name: Option<&str>,
    ) -> Result<(), LanternError> {
        let spec = category.population_spec();

        let endpoint = if spec.app_scoped {
            let app = app_name.ok_or_else(|| {
                LanternError::invalid_parameter(format!(
                    "populating {} mappings requires an application name",
                    category
                ))
            })?;
            let app_id = self.resolve(Category::AppIds, app, None).await?;
            format!("{}/{}", app_id, spec.endpoint)
        } else {
            spec.endpoint.clone()
        };

        let objects: Vec<serde_json::Value> = if spec.method == Method::POST {
            self.client
                .post_json(&endpoint, &serde_json::json!({}))
                .await?
        } else {
            self.client.get_json(&endpoint).await?
        };

        let mut mapping = Mapping::with_capacity(objects.len());
        for object in &objects {
            let name = object.get(spec.name_field).and_then(|v| v.as_str());
            let id = object.get(spec.id_field).and_then(RefId::from_value);
            if let (Some(name), Some(id)) = (name, id) {
                mapping.insert(name.to_string(), id);
            } else {
                tracing::debug!(
                    category = %category,
                    object = %object,
                    "skipping listing entry without name/id fields"
                );
            }
        }

        tracing::debug!(
            category = %category,
            app = app_name.unwrap_or("-"),
            entries = mapping.len(),
            "populated identifier mapping"
        );

        let mut table = self.table.write().await;
        match app_name {
            Some(app) if spec.app_scoped => {
                table
                    .scoped
                    .entry(app.to_string())
                    .or_default()
                    .insert(category, mapping);
            }
            _ => {
                table.global.insert(category, mapping);
            }
        }
        Ok(())
    }

    /// Resolves a display name to its identifier.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidParameter` when an app-scoped category is given
    /// no application name, and `ReferenceNotFound` when the category, app
    /// scope, or name is absent from the table - whether because the name
    /// is unknown to the remote or because the category was never
    /// populated.
    pub async fn resolve(
        &self,
        category: Category,
        name: &str,
        app_name: Option<&str>,
    ) -> Result<RefId, LanternError> {
        if category.is_app_scoped() && app_name.is_none() {
            return Err(LanternError::invalid_parameter(format!(
                "resolving a {} requires an application name",
                category
            )));
        }

        let table = self.table.read().await;
        table
            .mapping(category, app_name)
            .and_then(|mapping| mapping.get(name))
            .cloned()
            .ok_or_else(|| LanternError::reference_not_found(category, name, app_name))
    }

    /// Returns true if the category (under the given app scope) has been
    /// populated.
    pub async fn is_populated(&self, category: Category, app_name: Option<&str>) -> bool {
        self.table.read().await.mapping(category, app_name).is_some()
    }
}
