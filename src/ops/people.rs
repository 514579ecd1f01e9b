//! People operations.

use crate::error::LanternError;
use crate::instance::TdxInstance;
use crate::models::{Person, PersonSearch};

impl TdxInstance {
    /// Finds exactly one person by alternate identifier.
    ///
    /// # Errors
    ///
    /// Zero matches fail with `PersonNotFound` carrying the search
    /// criteria; two or more fail with `AmbiguousMatch`. The first match
    /// is never silently picked.
    pub async fn find_person(&self, alternate_id: &str) -> Result<Person, LanternError> {
        let body = PersonSearch {
            alternate_id: alternate_id.to_string(),
        };
        let mut people: Vec<Person> = self.client().post_json("people/search", &body).await?;

        match people.len() {
            0 => Err(LanternError::PersonNotFound {
                criteria: format!("AlternateID={}", alternate_id),
            }),
            1 => Ok(people.remove(0)),
            matches => Err(LanternError::AmbiguousMatch {
                entity: "person",
                matches,
            }),
        }
    }
}
