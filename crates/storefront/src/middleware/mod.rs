//! Request middleware: session layer and identity extraction.

pub mod auth;
pub mod session;

pub use auth::{Identity, ROLE_HEADER};
pub use session::{SESSION_COOKIE_NAME, session_layer};
