//! Identity extraction.
//!
//! Authentication itself is a collaborator concern: requests arrive with an
//! already-authenticated role asserted by the fronting proxy in a trusted
//! header. This extractor only reads that fact; a missing or unrecognized
//! value means the request is anonymous. Authorization decisions stay in
//! the core policy table, consulted by the handlers.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use supermarket_core::Role;

/// Trusted header carrying the authenticated role (`shopper` or `admin`).
pub const ROLE_HEADER: &str = "x-supermarket-role";

/// The per-request identity, opaque to the core beyond its role.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(identity: Identity) -> impl IntoResponse {
///     authorize(identity.role, Action::ViewShopping)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    /// The authenticated role; `Role::Anonymous` when the header is absent.
    pub role: Role,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = Role::from_header(
            parts
                .headers
                .get(ROLE_HEADER)
                .and_then(|value| value.to_str().ok()),
        );

        Ok(Self { role })
    }
}
