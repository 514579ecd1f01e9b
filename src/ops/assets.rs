//! Asset operations.

use chrono::Local;
use serde_json::json;

use crate::error::LanternError;
use crate::instance::TdxInstance;
use crate::models::{upsert_attribute, Asset, AssetSearch, AssetSummary, NO_OWNER_UID};
use crate::resolver::Category;

/// Custom attributes maintained by check-in.
const NOTES_ATTRIBUTE: &str = "Notes";
const LAST_INVENTORIED_ATTRIBUTE: &str = "Last Inventoried";

impl TdxInstance {
    /// Fetches an asset by identifier, including custom attributes.
    pub async fn get_asset(
        &self,
        asset_id: &str,
        app_name: Option<&str>,
    ) -> Result<Asset, LanternError> {
        let app = self.asset_app(app_name)?;
        let app_id = self.resolve_app_id(app).await?;
        self.client()
            .get_json(&format!("{}/assets/{}", app_id, asset_id))
            .await
    }

    /// Searches an asset application by serial or name substring.
    ///
    /// The remote never includes custom attributes in search results;
    /// callers needing them should fetch each asset individually with
    /// [`get_asset`](Self::get_asset).
    pub async fn search_assets(
        &self,
        search_text: &str,
        app_name: Option<&str>,
    ) -> Result<Vec<AssetSummary>, LanternError> {
        let app = self.asset_app(app_name)?;
        let app_id = self.resolve_app_id(app).await?;
        let body = AssetSearch {
            serial_like: search_text.to_string(),
        };
        self.client()
            .post_json(&format!("{}/assets/search", app_id), &body)
            .await
    }

    /// Submits an asset document back to the remote.
    ///
    /// # Errors
    ///
    /// A non-2xx response fails with `RequestFailed`.
    pub async fn update_asset(
        &self,
        asset: &Asset,
        app_name: Option<&str>,
    ) -> Result<Asset, LanternError> {
        let app = self.asset_app(app_name)?;
        let app_id = self.resolve_app_id(app).await?;
        self.client()
            .post_json(&format!("{}/assets/{}", app_id, asset.id), asset)
            .await
    }

    /// Checks in an asset: updates its location, status, owner, and the
    /// `Notes` / `Last Inventoried` custom attributes, then submits it.
    ///
    /// The owner is cleared to the no-owner sentinel when `owner_uid` is
    /// absent. `Last Inventoried` is stamped with the call-time date in
    /// `MM/DD/YYYY` form. Both attributes are upserted - mutated in place
    /// when present, appended with their resolved definition identifiers
    /// when not - and no other attribute is disturbed.
    ///
    /// # Errors
    ///
    /// Requires `LocationIds`, `AssetAttributes`, and the application's
    /// `AssetStatuses` to be populated; unknown names fail with
    /// `ReferenceNotFound` before the asset is modified.
    pub async fn check_in_asset(
        &self,
        mut asset: Asset,
        location_name: &str,
        status_name: &str,
        owner_uid: Option<&str>,
        notes: Option<&str>,
        app_name: Option<&str>,
    ) -> Result<Asset, LanternError> {
        let app = self.asset_app(app_name)?;
        let resolver = self.resolver();

        let location_id = resolver
            .resolve(Category::LocationIds, location_name, None)
            .await?;
        let status_id = resolver
            .resolve(Category::AssetStatuses, status_name, Some(app))
            .await?;
        let notes_id = resolver
            .resolve(Category::AssetAttributes, NOTES_ATTRIBUTE, None)
            .await?;
        let inventoried_id = resolver
            .resolve(Category::AssetAttributes, LAST_INVENTORIED_ATTRIBUTE, None)
            .await?;

        asset.location_id = Some(location_id);
        asset.status_id = Some(status_id);
        // Clearing the owner means writing the sentinel, not omitting the field.
        asset.owning_customer_id = Some(owner_uid.unwrap_or(NO_OWNER_UID).to_string());

        upsert_attribute(
            &mut asset.attributes,
            NOTES_ATTRIBUTE,
            notes_id,
            json!(notes.unwrap_or_default()),
        );
        let stamp = Local::now().format("%m/%d/%Y").to_string();
        upsert_attribute(
            &mut asset.attributes,
            LAST_INVENTORIED_ATTRIBUTE,
            inventoried_id,
            json!(stamp),
        );

        self.update_asset(&asset, Some(app)).await
    }
}
