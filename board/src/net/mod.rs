//! Network side of board.
//!
//! The worker owns the `CommentService` handle. The UI loop never awaits a
//! service call; it hands `Request`s to the worker and later receives the
//! matching `Completion` as an `AppEvent::NetResult`.
pub mod worker;
