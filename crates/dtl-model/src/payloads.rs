//! Request bodies sent to the backend.

use serde::{Deserialize, Serialize};

use crate::{
    models::{CategoryId, TopicId},
    validation::{ValidationError, validate_email, validate_required},
};

/// `POST /users/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)
    }
}

/// `POST /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
}

impl RegisterUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("Name", &self.name)?;
        validate_email(&self.email)
    }
}

/// `POST /topics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTopic {
    pub title: String,
    pub content: String,
    pub category_id: CategoryId,
}

impl NewTopic {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("Title", &self.title)?;
        validate_required("Content", &self.content)?;
        validate_required("Category ID", self.category_id.as_str())
    }
}

/// `POST /categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("Name", &self.name)
    }
}

/// `POST /users/{id}/favorites`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub topic_id: TopicId,
}
