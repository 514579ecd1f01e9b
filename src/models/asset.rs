//! Asset models for the TeamDynamix API.
//!
//! Assets are passed through largely as the remote sent them: the typed
//! fields below are the ones operations read or write, and everything else
//! rides along in the flattened `extra` map so an update POST returns the
//! document intact.

use serde::{Deserialize, Serialize};

use super::{find_attribute, CustomAttribute, RefId};
use crate::error::LanternError;

/// The remote's well-known "unassigned owner" GUID.
///
/// Clearing an asset's owner means setting `OwningCustomerID` to this
/// sentinel, not omitting the field.
pub const NO_OWNER_UID: &str = "00000000-0000-0000-0000-000000000000";

/// A full asset document, including custom attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Internal identifier of the asset.
    #[serde(rename = "ID")]
    pub id: RefId,

    /// Asset name.
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Manufacturer serial number.
    #[serde(
        rename = "SerialNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub serial_number: Option<String>,

    /// Identifier of the asset's location.
    #[serde(rename = "LocationID", default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<RefId>,

    /// Identifier of the asset's status within its application.
    #[serde(rename = "StatusID", default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<RefId>,

    /// GUID of the owning person, or [`NO_OWNER_UID`] when unassigned.
    #[serde(
        rename = "OwningCustomerID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub owning_customer_id: Option<String>,

    /// Custom attribute records.
    #[serde(rename = "Attributes", default)]
    pub attributes: Vec<CustomAttribute>,

    /// Remaining remote fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Asset {
    /// Looks up a custom attribute by display name.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::AttributeNotFound` if no attribute with that
    /// name is present.
    pub fn attribute(&self, name: &str) -> Result<&CustomAttribute, LanternError> {
        find_attribute(&self.attributes, name).ok_or_else(|| LanternError::AttributeNotFound {
            name: name.to_string(),
        })
    }
}

/// An asset as returned by the search endpoint.
///
/// Search results never include custom attributes; fetch the asset
/// individually when attributes are needed.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetSummary {
    /// Internal identifier of the asset.
    #[serde(rename = "ID")]
    pub id: RefId,

    /// Asset name.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    /// Manufacturer serial number.
    #[serde(rename = "SerialNumber", default)]
    pub serial_number: Option<String>,

    /// Identifier of the asset's status within its application.
    #[serde(rename = "StatusID", default)]
    pub status_id: Option<RefId>,

    /// Remaining remote fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body for the asset search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AssetSearch {
    /// Substring matched against serial numbers and names.
    #[serde(rename = "SerialLike")]
    pub serial_like: String,
}
