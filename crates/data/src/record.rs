use chrono::NaiveDate;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::date;

/// Stable identifier of a person. Ordering is plain string ordering, which is
/// what decides who is the primary spouse of a couple.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, From, Display,
)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Borrow<str> for PersonId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Gender as understood by the renderers. Records keep the raw string, this
/// is only the parsed view of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(UnknownGender(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender {0:?}")]
pub struct UnknownGender(pub String);

/// One member of a family tree, as supplied by the application.
///
/// Only `id`, `parent_id`, `spouse_id` and `birth_date` influence the layout.
/// Everything else is payload that is handed back to the renderer untouched,
/// including attributes this type doesn't know about (kept in `extra`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: PersonId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<PersonId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<PersonId>,
    #[serde(
        default,
        with = "date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub death_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PersonRecord {
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nickname: None,
            email: None,
            profile_picture: None,
            gender: None,
            parent_id: None,
            spouse_id: None,
            birth_date: None,
            death_date: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<PersonId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn with_spouse(mut self, spouse: impl Into<PersonId>) -> Self {
        self.spouse_id = Some(spouse.into());
        self
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Parsed gender, `None` when missing or not one of the known values.
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(|g| g.parse().ok())
    }
}
