//! Newtype wrappers shared across the workspace.

mod id;

pub use id::ProductId;
