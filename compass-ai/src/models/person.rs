//! People placed on the compass

use chrono::NaiveDateTime;
use compass_common::events::PersonPayload;
use serde::{Deserialize, Serialize};

/// Maximum name length in characters, after trimming
pub const MAX_NAME_CHARS: usize = 50;

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_LONG: &str = "Name must be 50 characters or less";

/// Trim and validate a requested name
///
/// Returns the client-facing message on failure.
pub fn normalize_name(raw: &str) -> Result<String, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NAME_REQUIRED);
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(NAME_TOO_LONG);
    }
    Ok(trimmed.to_string())
}

/// Finalized result of a pipeline run, ready for the store
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    pub name: String,
    /// In [-10, 10], two decimals
    pub x: f64,
    /// In [-10, 10], two decimals
    pub y: f64,
    pub reference_url: Option<String>,
}

/// Stored person, with the identity assigned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub wikipedia_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Manual add request (`POST /api/people`)
#[derive(Debug, Clone, Deserialize)]
pub struct NewPerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub x: Option<serde_json::Value>,
    #[serde(default)]
    pub y: Option<serde_json::Value>,
    #[serde(default)]
    pub wikipedia_url: Option<String>,
}

impl NewPerson {
    /// Convert into a record, or `None` when name or coordinates are unusable
    ///
    /// Coordinates are stored as given, without clamping.
    pub fn into_record(self) -> Option<PersonRecord> {
        let name = self.name.as_deref().and_then(|n| normalize_name(n).ok())?;
        let x = self.x.as_ref().and_then(serde_json::Value::as_f64)?;
        let y = self.y.as_ref().and_then(serde_json::Value::as_f64)?;
        let reference_url = self.wikipedia_url.filter(|url| !url.trim().is_empty());

        Some(PersonRecord {
            name,
            x,
            y,
            reference_url,
        })
    }
}

impl From<&Person> for PersonPayload {
    fn from(person: &Person) -> Self {
        PersonPayload {
            name: person.name.clone(),
            x: person.x,
            y: person.y,
            wikipedia_url: person.wikipedia_url.clone(),
        }
    }
}
