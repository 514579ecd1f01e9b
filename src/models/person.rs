//! Person models for the TeamDynamix API.

use serde::{Deserialize, Serialize};

use super::CustomAttribute;

/// A person record.
///
/// Also returned by `auth/getuser`, which makes it double as the "who am I
/// logged in as" answer during initialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    /// GUID of the person.
    #[serde(rename = "UID")]
    pub uid: String,

    /// Full display name.
    #[serde(rename = "FullName", default)]
    pub full_name: Option<String>,

    /// Primary email address.
    #[serde(rename = "PrimaryEmail", default)]
    pub primary_email: Option<String>,

    /// Institution-assigned alternate identifier.
    #[serde(rename = "AlternateID", default)]
    pub alternate_id: Option<String>,

    /// Custom attribute records.
    #[serde(rename = "Attributes", default)]
    pub attributes: Vec<CustomAttribute>,

    /// Remaining remote fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Person {
    /// Returns the full name, falling back to email or UID.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.primary_email.as_deref())
            .unwrap_or(&self.uid)
    }

    /// Returns the primary email, or a placeholder when absent.
    pub fn display_email(&self) -> &str {
        self.primary_email.as_deref().unwrap_or("(no email)")
    }
}

/// Body for the people search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PersonSearch {
    /// Alternate identifier to match.
    #[serde(rename = "AlternateID")]
    pub alternate_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_person_display_name_fallbacks() {
        let person: Person = serde_json::from_value(json!({
            "UID": "abc-123",
            "PrimaryEmail": "jdoe@example.edu"
        }))
        .unwrap();
        assert_eq!(person.display_name(), "jdoe@example.edu");

        let bare: Person = serde_json::from_value(json!({"UID": "abc-123"})).unwrap();
        assert_eq!(bare.display_name(), "abc-123");
        assert_eq!(bare.display_email(), "(no email)");
    }

    #[test]
    fn test_person_search_body() {
        let body = PersonSearch {
            alternate_id: "jdoe".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"AlternateID": "jdoe"})
        );
    }
}
