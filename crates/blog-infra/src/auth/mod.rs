//! Authentication implementations.

mod jwt;

pub use jwt::{DEFAULT_SECRET, JwtConfig, JwtTokenService};
