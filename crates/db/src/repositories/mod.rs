//! Database repositories.

#![allow(missing_docs)]

pub mod comment;
pub mod follow;
pub mod group;
pub mod post;
pub mod user;

pub use comment::CommentRepository;
pub use follow::FollowRepository;
pub use group::GroupRepository;
pub use post::{FeedScope, PostRepository};
pub use user::UserRepository;
