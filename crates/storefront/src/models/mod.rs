//! Types stored in or keyed against the session.

pub mod session;
