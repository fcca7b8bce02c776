//! Data Transfer Objects - request bodies accepted by the API.

use serde::{Deserialize, Serialize};

/// Reference to another resource by id, e.g. `"tema": { "id": 1 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: i32,
}

/// Body of `POST /api/Temas` and `PUT /api/Temas`.
///
/// ```json
/// { "id": 1, "descricao": "Linguagens de programação" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "descricao", default)]
    pub description: String,
}

/// Body of `POST /api/Postagens` and `PUT /api/Postagens`.
///
/// ```json
/// {
///   "titulo": "Um dia na vida",
///   "descricao": "Um pouco mais...",
///   "foto": "URLFOTO",
///   "criador": { "id": 1 },
///   "tema": { "id": 1 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    #[serde(rename = "criador", default)]
    pub creator: Option<ResourceRef>,
    #[serde(rename = "tema", default)]
    pub theme: Option<ResourceRef>,
}
