//! Domain entities - the core business objects.

mod post;
mod reference;
mod theme;

pub use post::{Post, PostDraft};
pub use reference::EntityRef;
pub use theme::{Theme, ThemeDraft};

use crate::error::DomainError;

/// Reject a blank required text field. The value is kept as given.
fn required_text(field: &str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(value)
}
