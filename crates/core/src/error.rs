//! The shared error taxonomy.
//!
//! Every operation in this crate returns these as explicit `Result` values;
//! nothing is swallowed and nothing is fatal to the process. The hosting
//! layer decides presentation (HTTP status, message) but must never turn one
//! of these into a successful-looking state transition.

use thiserror::Error;

use crate::policy::Action;

/// Errors produced by the catalog, cart and policy operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input: non-positive product id or quantity, missing
    /// required field.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unknown product or cart line.
    #[error("not found: {0}")]
    NotFound(String),

    /// The access policy denied the requested action. Terminal, never
    /// retried.
    #[error("access denied for action {0}")]
    AccessDenied(Action),

    /// Checkout was attempted on a cart with zero lines.
    #[error("cart is empty")]
    EmptyCart,

    /// The backing catalog store failed. Surfaced, not retried; retry
    /// policy belongs to the collaborator.
    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Convenience constructor for invalid-argument errors.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Convenience constructor for not-found errors.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use crate::policy::Action;

    #[test]
    fn test_display_strings() {
        assert_eq!(
            Error::invalid("quantity must be positive").to_string(),
            "invalid argument: quantity must be positive"
        );
        assert_eq!(Error::not_found("product 9").to_string(), "not found: product 9");
        assert_eq!(
            Error::AccessDenied(Action::MutateCatalog).to_string(),
            "access denied for action mutate-catalog"
        );
        assert_eq!(Error::EmptyCart.to_string(), "cart is empty");
    }
}
