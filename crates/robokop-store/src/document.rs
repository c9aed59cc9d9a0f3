use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

pub type DocumentId = String;

/// Who can see a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Visibility {
    Invisible = 0,
    Private = 1,
    Shareable = 2,
    Public = 3,
}

impl Visibility {
    pub const ALL: [Visibility; 4] = [
        Visibility::Invisible,
        Visibility::Private,
        Visibility::Shareable,
        Visibility::Public,
    ];

    pub fn to_int(self) -> u8 {
        self as u8
    }

    pub fn from_int(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.to_int() == value)
    }

    pub fn name(self) -> &'static str {
        match self {
            Visibility::Invisible => "Invisible",
            Visibility::Private => "Private",
            Visibility::Shareable => "Shareable",
            Visibility::Public => "Public",
        }
    }
}

impl From<Visibility> for u8 {
    fn from(value: Visibility) -> Self {
        value.to_int()
    }
}

impl TryFrom<u8> for Visibility {
    type Error = StoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Visibility::from_int(value).ok_or_else(|| StoreError::InvalidVisibility(value.to_string()))
    }
}

impl FromStr for Visibility {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StoreError::InvalidVisibility(s.to_string()))
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default)]
    pub name: String,
    /// An uploaded answer with no question behind it.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub answer_only: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_answers: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A question or answer record. Its TRAPI payload is stored separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Empty until the store assigns one.
    #[serde(default)]
    pub id: DocumentId,
    /// Question id for answers; empty for questions.
    #[serde(default)]
    pub parent: DocumentId,
    pub visibility: Visibility,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn has_parent(&self) -> bool {
        !self.parent.is_empty()
    }
}

pub fn default_question() -> Document {
    Document {
        id: String::new(),
        parent: String::new(),
        visibility: Visibility::Shareable,
        metadata: DocumentMetadata {
            name: "New Question".to_string(),
            ..DocumentMetadata::default()
        },
        created_at: None,
        updated_at: None,
    }
}

pub fn default_answer() -> Document {
    Document {
        metadata: DocumentMetadata {
            name: "Uploaded Answer".to_string(),
            answer_only: true,
            has_answers: true,
            ..DocumentMetadata::default()
        },
        ..default_question()
    }
}
