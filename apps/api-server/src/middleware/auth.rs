//! Capability guards.
//!
//! A handler states what it needs by taking `Authorized<C>` as its first
//! argument. The guard is extracted before the body and before any other
//! argument, so a caller who lacks the capability is turned away without
//! the repository ever being called:
//!
//! ```ignore
//! async fn delete_theme(_caller: Authorized<Administrator>, ...) -> AppResult<HttpResponse>
//! ```

use std::future::{Ready, ready};
use std::marker::PhantomData;
use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use blog_core::ports::{AuthError, TokenClaims, TokenService};

use super::error::AppError;

/// Role that may change or remove themes.
pub const ADMIN_ROLE: &str = "ADMINISTRADOR";

/// Caller identity decoded from a bearer token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub email: String,
    pub roles: Vec<String>,
}

impl Identity {
    /// Check if the user has a specific role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Authenticate the request's `Authorization: Bearer <token>` header.
    fn authenticate(req: &HttpRequest, tokens: &dyn TokenService) -> Result<Self, AuthError> {
        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingAuth)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

        tokens.validate_token(token.trim()).map(Identity::from)
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            roles: claims.roles,
        }
    }
}

/// Something a caller must be able to do for a handler to run.
pub trait Capability {
    fn permits(identity: &Identity) -> bool;
}

/// Any caller holding a valid token.
pub struct Authenticated;

impl Capability for Authenticated {
    fn permits(_identity: &Identity) -> bool {
        true
    }
}

/// A caller holding a valid token with the administrator role.
pub struct Administrator;

impl Capability for Administrator {
    fn permits(identity: &Identity) -> bool {
        identity.has_role(ADMIN_ROLE)
    }
}

/// Proof that the caller holds capability `C`.
#[derive(Debug)]
pub struct Authorized<C> {
    identity: Identity,
    _capability: PhantomData<C>,
}

impl<C> Authorized<C> {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

/// Run the capability check for `C` against a request.
pub fn authorize<C: Capability>(req: &HttpRequest) -> Result<Authorized<C>, AppError> {
    let Some(tokens) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
        tracing::error!("TokenService not found in app data");
        return Err(AppError::Internal("token service not configured".to_string()));
    };

    let identity = Identity::authenticate(req, tokens.get_ref().as_ref())?;

    if !C::permits(&identity) {
        tracing::debug!(
            user_id = identity.user_id,
            path = %req.path(),
            "Caller lacks required role"
        );
        return Err(AuthError::InsufficientPermissions.into());
    }

    Ok(Authorized {
        identity,
        _capability: PhantomData,
    })
}

impl<C: Capability> FromRequest for Authorized<C> {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize::<C>(req))
    }
}
