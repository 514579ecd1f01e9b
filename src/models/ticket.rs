//! Ticket models for the TeamDynamix API.

use serde::{Deserialize, Serialize};

use super::{find_attribute, CustomAttribute, RefId};
use crate::error::LanternError;

/// A ticket document.
///
/// Search results return tickets without custom attributes; fetching a
/// ticket by identifier includes them.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    /// Ticket number.
    #[serde(rename = "ID")]
    pub id: RefId,

    /// Ticket title.
    #[serde(rename = "Title", default)]
    pub title: String,

    /// Custom attribute records.
    #[serde(rename = "Attributes", default)]
    pub attributes: Vec<CustomAttribute>,

    /// Remaining remote fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Ticket {
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

/// Body for the ticket search endpoint.
///
/// Title is deliberately absent: the remote cannot filter on it, so ticket
/// search post-filters titles locally after this body comes back.
#[derive(Debug, Clone, Serialize)]
pub struct TicketSearch {
    /// Requester GUIDs the ticket may belong to.
    #[serde(rename = "RequestorUids")]
    pub requestor_uids: Vec<String>,

    /// Status identifiers the ticket may be in.
    #[serde(rename = "StatusIDs")]
    pub status_ids: Vec<RefId>,

    /// Responsible-group identifiers, when filtering by group.
    #[serde(
        rename = "ResponsibilityGroupIDs",
        skip_serializing_if = "Option::is_none"
    )]
    pub responsibility_group_ids: Option<Vec<RefId>>,
}

/// Body for a ticket feed entry that moves the ticket to a new status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusFeedEntry {
    /// Identifier of the status to move the ticket to.
    #[serde(rename = "NewStatusID")]
    pub new_status_id: RefId,

    /// Comment attached alongside the status change.
    #[serde(rename = "Comments")]
    pub comments: String,

    /// Whether the entry is hidden from the requester.
    #[serde(rename = "IsPrivate")]
    pub is_private: bool,

    /// Whether the comment body is rich HTML.
    #[serde(rename = "IsRichHTML")]
    pub is_rich_html: bool,
}

impl StatusFeedEntry {
    /// Builds the private, plain-text feed entry used by status updates.
    pub fn private_comment(new_status_id: RefId, comments: impl Into<String>) -> Self {
        Self {
            new_status_id,
            comments: comments.into(),
            is_private: true,
            is_rich_html: false,
        }
    }
}
