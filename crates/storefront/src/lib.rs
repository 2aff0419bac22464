//! Supermarket storefront library.
//!
//! Hosts the `supermarket-core` domain behind an HTTP surface: the session
//! cart controller, shopper catalog browsing and the admin inventory CRUD.
//! Exposed as a library so the route tree can be exercised in-process by
//! integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
