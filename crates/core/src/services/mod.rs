//! Business logic services.

#![allow(missing_docs)]

pub mod comment;
pub mod follow;
pub mod group;
pub mod post;
pub mod user;

pub use comment::{CommentService, CreateCommentInput};
pub use follow::FollowService;
pub use group::{CreateGroupInput, GroupService};
pub use post::{CreatePostInput, PostDetail, PostService, UpdatePostInput};
pub use user::{CreateUserInput, UserService};
