use serde::{Deserialize, Serialize};

use super::required_text;
use crate::error::DomainError;

/// Theme entity - the topic a post is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: i32,
    #[serde(rename = "descricao")]
    pub description: String,
}

impl Theme {
    /// Materialize a stored theme from its id and validated fields.
    pub fn from_draft(id: i32, draft: ThemeDraft) -> Self {
        Self {
            id,
            description: draft.description,
        }
    }
}

/// The mutable fields of a theme, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDraft {
    description: String,
}

impl ThemeDraft {
    pub fn new(description: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            description: required_text("descricao", description.into())?,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
