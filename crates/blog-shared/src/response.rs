//! Failure body returned by every endpoint.

use serde::{Deserialize, Serialize};

/// `{"Mensagem": "..."}` - the single-field error body of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(rename = "Mensagem")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_mensagem() {
        let json = serde_json::to_string(&MessageResponse::new("Theme with id 9 not found")).unwrap();
        assert_eq!(json, r#"{"Mensagem":"Theme with id 9 not found"}"#);
    }
}
