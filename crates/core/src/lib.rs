//! Core business logic for yatube-rs.

pub mod pagination;
pub mod services;

pub use pagination::{FeedPage, Paginator};
pub use services::*;
