use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::timestamp::Timestamp;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is blank
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Backend identifier of a topic
    TopicId
);
string_id!(
    /// Backend identifier of a category
    CategoryId
);
string_id!(
    /// Backend identifier of a user
    UserId
);

/// Topic model - a single learning item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Unique topic identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: TopicId,
    /// Topic title
    pub title: String,
    /// Topic body text
    #[serde(default)]
    pub content: String,
    /// Category the topic belongs to, populated or not
    #[serde(default)]
    pub category: Option<CategoryRef>,
    /// How many users favorited this topic
    #[serde(default)]
    pub favorite_count: u32,
    /// Who created the topic
    #[serde(default)]
    pub created_by: Option<Author>,
}

impl Topic {
    /// Name of the category, if the topic has one
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(CategoryRef::name)
    }

    /// Case-insensitive match against a category name
    pub fn in_category(&self, name: &str) -> bool {
        self.category_name()
            .is_some_and(|category| category.to_lowercase() == name.to_lowercase())
    }
}

/// Reference from a topic to its category.
///
/// Endpoints that populate the relation send `{ "_id", "name" }`; the others
/// send the category name as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    /// Populated `{ _id, name }` object
    Embedded(CategorySummary),
    /// Bare category name
    Name(String),
}

impl CategoryRef {
    /// Display name of the referenced category
    pub fn name(&self) -> &str {
        match self {
            Self::Embedded(summary) => &summary.name,
            Self::Name(name) => name,
        }
    }

    /// Identifier, when the relation was populated
    pub fn id(&self) -> Option<&CategoryId> {
        match self {
            Self::Embedded(summary) => Some(&summary.id),
            Self::Name(_) => None,
        }
    }
}

/// Populated category reference embedded in a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
}

/// Populated creator reference embedded in a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
}

/// Category model - groups topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    /// Category name, unique per backend
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

/// User model with reading statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Last time the user marked a topic as read
    #[serde(default)]
    pub last_read_date: Option<Timestamp>,
    /// Topics read today
    #[serde(default)]
    pub daily_read_count: u32,
    /// Last time the user favorited a topic
    #[serde(default)]
    pub last_favorite_added: Option<Timestamp>,
}

/// Body returned by `POST /users/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Identifier of the logged-in user
    pub user_id: UserId,
}

/// Body returned by mutation endpoints (mark read, favorites, register).
///
/// Only `message` has a fixed meaning; everything else is kept as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
