//! HTTP API layer for yatube-rs.
//!
//! This crate provides the web surface:
//!
//! - **Endpoints**: feeds, post detail, post create/edit, comments,
//!   follow/unfollow, signup/login
//! - **Extractors**: Authentication
//! - **Middleware**: auth resolution, home-feed page caching
//! - **Fallback pages**: dedicated 404/403/500 responses
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod cache;
pub mod endpoints;
pub mod extractors;
pub mod fallback;
pub mod middleware;
pub mod response;

pub use endpoints::router;
