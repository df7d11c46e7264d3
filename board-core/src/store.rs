//! Client-side cache of the remote comment collection.
//!
//! `CommentStore` owns the snapshot, the pending new-comment draft, and the
//! optional [`EditSession`]. It never patches the snapshot in place: every
//! successful mutation is followed by a full re-list and the whole vector is
//! replaced.
//!
//! Operations come in two shapes:
//!
//! - `begin_*` methods issue a [`Request`] without touching the network, and
//!   [`CommentStore::apply`] folds the matching [`Completion`] back in. The
//!   terminal client uses these so that requests run on background tasks while
//!   the store stays on the UI loop.
//! - `refresh` / `create` / `update` / `delete` / `save_edit` are async
//!   conveniences that issue, execute, and apply inline.

use tracing::{debug, info, warn};

use crate::service::CommentService;
use crate::session::EditSession;
use crate::sync::{execute, Action, Completion, Generation, Request};
use crate::types::{Comment, CommentId, SortOrder};

/// What applying a completion changed, for status reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Applied {
    /// The completion carried a snapshot newer than the current one and it replaced it.
    pub snapshot_replaced: bool,
    /// Display message for the first failed call in the completion, if any.
    pub error: Option<String>,
}

/// Authoritative local view of the comment collection plus local edit state.
#[derive(Debug, Default)]
pub struct CommentStore {
    comments: Vec<Comment>,
    draft: String,
    edit: Option<EditSession>,
    order: SortOrder,
    issued: Generation,
    accepted: Generation,
}

impl CommentStore {
    pub fn new(order: SortOrder) -> Self {
        Self { order, ..Self::default() }
    }

    /// The last accepted snapshot, in the order the service returned it.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == id)
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Changes the listing order used by subsequent requests.
    ///
    /// The current snapshot is left alone until the next refresh lands.
    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    /// Generation of the snapshot currently held.
    pub fn accepted_generation(&self) -> Generation {
        self.accepted
    }

    // -- draft --------------------------------------------------------------

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    // -- edit session -------------------------------------------------------

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn edit_session_mut(&mut self) -> Option<&mut EditSession> {
        self.edit.as_mut()
    }

    /// Opens an edit session on `id`, seeded with the comment's current text.
    ///
    /// Any session already open is dropped without saving. Returns `false` and
    /// leaves state untouched when `id` is not in the snapshot.
    pub fn start_edit(&mut self, id: &CommentId) -> bool {
        let Some(seed) = self.get(id).map(|c| c.text.clone()) else {
            return false;
        };
        if let Some(prev) = self.edit.as_ref().filter(|s| !s.is_editing(id)) {
            debug!(abandoned = %prev.editing_id(), "edit session replaced");
        }
        self.edit = Some(EditSession::new(id.clone(), seed));
        true
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// True when a draft or an edit session holds text that has not been sent.
    pub fn has_unsaved_input(&self) -> bool {
        !self.draft.trim().is_empty() || self.edit.is_some()
    }

    // -- request issue ------------------------------------------------------

    fn issue(&mut self, action: Action) -> Request {
        self.issued = self.issued.next();
        Request { generation: self.issued, order: self.order, action }
    }

    pub fn begin_refresh(&mut self) -> Request {
        self.issue(Action::Refresh)
    }

    /// Issues a create request, or `None` when `text` is blank.
    pub fn begin_create(&mut self, text: &str) -> Option<Request> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.issue(Action::Create { text: text.to_owned() }))
    }

    /// Issues a create request for the current draft, or `None` when it is blank.
    pub fn submit_draft(&mut self) -> Option<Request> {
        let text = self.draft.clone();
        self.begin_create(&text)
    }

    pub fn begin_update(&mut self, id: &CommentId, text: &str) -> Request {
        self.issue(Action::Update { id: id.clone(), text: text.to_owned() })
    }

    /// Issues an update for the open edit session, or `None` when idle.
    ///
    /// The session stays open until the update is acknowledged.
    pub fn begin_save_edit(&mut self) -> Option<Request> {
        let session = self.edit.as_ref()?;
        let action = Action::Update {
            id: session.editing_id().clone(),
            text: session.edit_text.clone(),
        };
        Some(self.issue(action))
    }

    pub fn begin_delete(&mut self, id: &CommentId) -> Request {
        self.issue(Action::Delete { id: id.clone() })
    }

    // -- completion ---------------------------------------------------------

    /// Folds a completion into local state.
    ///
    /// Failures are logged and otherwise leave state as it was: the draft and
    /// edit session survive so the user can retry. A snapshot is accepted only
    /// if its generation is newer than the one currently held.
    pub fn apply(&mut self, completion: Completion) -> Applied {
        let Completion { generation, action, mutation, snapshot } = completion;
        let mut applied = Applied::default();

        if let Err(e) = mutation {
            warn!(action = action.name(), generation = generation.get(), error = %e, "comment service call failed");
            applied.error = Some(format!("{} failed: {e}", action.name()));
            return applied;
        }

        match &action {
            Action::Refresh => {}
            Action::Create { .. } => self.draft.clear(),
            Action::Update { id, .. } | Action::Delete { id } => {
                if self.edit.as_ref().is_some_and(|s| s.is_editing(id)) {
                    self.edit = None;
                }
            }
        }

        match snapshot {
            Some(Ok(comments)) if generation > self.accepted => {
                info!(action = action.name(), generation = generation.get(), count = comments.len(), "snapshot replaced");
                self.comments = comments;
                self.accepted = generation;
                applied.snapshot_replaced = true;
            }
            Some(Ok(_)) => {
                debug!(
                    generation = generation.get(),
                    accepted = self.accepted.get(),
                    "stale snapshot dropped"
                );
            }
            Some(Err(e)) => {
                warn!(action = action.name(), generation = generation.get(), error = %e, "refresh failed, keeping previous snapshot");
                applied.error = Some(format!("refresh failed: {e}"));
            }
            None => {}
        }

        applied
    }

    // -- inline operations --------------------------------------------------

    async fn run(&mut self, service: &dyn CommentService, request: Request) -> Applied {
        let completion = execute(service, request).await;
        self.apply(completion)
    }

    /// Re-lists the collection and replaces the snapshot on success.
    pub async fn refresh(&mut self, service: &dyn CommentService) -> Applied {
        let request = self.begin_refresh();
        self.run(service, request).await
    }

    /// Creates a comment, then refreshes. Blank text is rejected without a call.
    ///
    /// Returns `None` when the text was rejected locally.
    pub async fn create(&mut self, service: &dyn CommentService, text: &str) -> Option<Applied> {
        let request = self.begin_create(text)?;
        Some(self.run(service, request).await)
    }

    pub async fn update(
        &mut self,
        service: &dyn CommentService,
        id: &CommentId,
        text: &str,
    ) -> Applied {
        let request = self.begin_update(id, text);
        self.run(service, request).await
    }

    /// Saves the open edit session. Returns `None` when no session is open.
    pub async fn save_edit(&mut self, service: &dyn CommentService) -> Option<Applied> {
        let request = self.begin_save_edit()?;
        Some(self.run(service, request).await)
    }

    pub async fn delete(&mut self, service: &dyn CommentService, id: &CommentId) -> Applied {
        let request = self.begin_delete(id);
        self.run(service, request).await
    }
}
