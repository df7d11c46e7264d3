//! Requests, completions, and the execute step that links them to the service.
//!
//! A [`Request`] is issued by the store with a fresh [`Generation`]. Executing
//! it calls the service and, when a mutation succeeds, immediately re-lists the
//! collection so that mutation and refresh complete as one unit. The resulting
//! [`Completion`] is applied back onto the store by whoever owns it.

use crate::service::{CommentService, ServiceError};
use crate::types::{Comment, CommentId, SortOrder};

/// Monotonic stamp given to every request at issue time.
///
/// Snapshots are only accepted when their generation is newer than the last
/// accepted one, so the last *issued* operation wins regardless of the order
/// in which responses arrive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub(crate) fn next(self) -> Self {
        Generation(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// What a request asks the service to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Create { text: String },
    Update { id: CommentId, text: String },
    Delete { id: CommentId },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Refresh => "refresh",
            Action::Create { .. } => "create",
            Action::Update { .. } => "update",
            Action::Delete { .. } => "delete",
        }
    }
}

/// A unit of work ready to be executed against the service.
#[derive(Debug, Clone)]
pub struct Request {
    pub generation: Generation,
    pub order: SortOrder,
    pub action: Action,
}

/// Result of executing a [`Request`].
#[derive(Debug)]
pub struct Completion {
    pub generation: Generation,
    pub action: Action,
    /// Outcome of the mutating call. Always `Ok` for [`Action::Refresh`].
    pub mutation: Result<(), ServiceError>,
    /// Follow-up listing. `None` when the mutation failed and no list was attempted.
    pub snapshot: Option<Result<Vec<Comment>, ServiceError>>,
}

/// Runs `request` against `service`.
///
/// A failed mutation skips the follow-up listing; local state will be left as
/// it was when the completion is applied.
pub async fn execute(service: &dyn CommentService, request: Request) -> Completion {
    let Request { generation, order, action } = request;

    let mutation = match &action {
        Action::Refresh => Ok(()),
        Action::Create { text } => service.create(text).await.map(drop),
        Action::Update { id, text } => service.update(id, text).await.map(drop),
        Action::Delete { id } => service.delete(id).await,
    };

    let snapshot = match mutation {
        Ok(()) => Some(service.list(order).await),
        Err(_) => None,
    };

    Completion { generation, action, mutation, snapshot }
}
