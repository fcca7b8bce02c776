use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityRef, required_text};
use crate::error::DomainError;

/// Post entity - a blog entry written by a user under a theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    #[serde(rename = "criador")]
    pub creator: EntityRef,
    #[serde(rename = "tema")]
    pub theme: EntityRef,
    #[serde(rename = "dataCriacao")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Materialize a stored post from its id, validated fields and creation time.
    pub fn from_draft(id: i32, draft: PostDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            photo: draft.photo,
            creator: EntityRef::from(draft.creator_id),
            theme: EntityRef::from(draft.theme_id),
            created_at,
        }
    }

    /// Replace every mutable field with the draft's. Id and creation time are kept.
    pub fn apply(self, draft: PostDraft) -> Self {
        Self::from_draft(self.id, draft, self.created_at)
    }
}

/// The mutable fields of a post, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    description: String,
    photo: Option<String>,
    creator_id: i32,
    theme_id: i32,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        photo: Option<String>,
        creator_id: i32,
        theme_id: i32,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            title: required_text("titulo", title.into())?,
            description: required_text("descricao", description.into())?,
            photo,
            creator_id,
            theme_id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn creator_id(&self) -> i32 {
        self.creator_id
    }

    pub fn theme_id(&self) -> i32 {
        self.theme_id
    }
}
