//! Custom attribute records and the upsert helper.
//!
//! Tickets, assets, and people all carry an `Attributes` list of
//! `{ID, Name, Value}` records for institution-defined custom fields.
//! This module is the one place that scans and mutates those lists.

use serde::{Deserialize, Serialize};

use super::RefId;

/// A single custom attribute on a remote document.
///
/// The flattened `extra` map preserves whatever else the remote sent
/// (choice IDs, display values) so documents round-trip unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomAttribute {
    /// Identifier of the attribute definition.
    #[serde(rename = "ID")]
    pub id: RefId,

    /// Display name of the attribute. The remote omits it on entries a
    /// client appended itself.
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Current value. Shape varies by attribute definition.
    #[serde(rename = "Value", default)]
    pub value: serde_json::Value,

    /// Remaining remote fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CustomAttribute {
    /// Creates a new attribute entry for appending to a document.
    pub fn new(id: RefId, name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            id,
            name: Some(name.into()),
            value,
            extra: serde_json::Map::new(),
        }
    }

    /// Returns true if this attribute's display name matches `name`.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// Finds an attribute by display name with a linear scan.
pub fn find_attribute<'a>(
    attributes: &'a [CustomAttribute],
    name: &str,
) -> Option<&'a CustomAttribute> {
    attributes.iter().find(|attr| attr.is_named(name))
}

/// Updates the named attribute in place, or appends a new entry with the
/// given definition identifier if no attribute with that name exists.
///
/// Other entries in the list are never touched, and an in-place update
/// leaves the list length unchanged.
pub fn upsert_attribute(
    attributes: &mut Vec<CustomAttribute>,
    name: &str,
    definition_id: RefId,
    value: serde_json::Value,
) {
    match attributes.iter_mut().find(|attr| attr.is_named(name)) {
        Some(existing) => existing.value = value,
        None => attributes.push(CustomAttribute::new(definition_id, name, value)),
    }
}
