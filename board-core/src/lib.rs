//! Core of the comment board: data model, service client, and the store that
//! keeps a local snapshot in step with the remote collection.
//!
//! Nothing here touches the terminal. The `board` binary drives a
//! [`store::CommentStore`] from its event loop and runs [`sync::execute`] on
//! background tasks.

pub mod service;
pub mod session;
pub mod store;
pub mod sync;
pub mod types;

pub use service::{CommentService, HttpCommentService, ServiceError};
pub use session::EditSession;
pub use store::{Applied, CommentStore};
pub use sync::{execute, Action, Completion, Generation, Request};
pub use types::{Comment, CommentId, SortOrder};
