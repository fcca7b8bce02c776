//! # Blog Core
//!
//! The domain layer of the blog API.
//! Entities, validation rules and the ports infrastructure must implement.
//! No database, HTTP or token code lives here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
