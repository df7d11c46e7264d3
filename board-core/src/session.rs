use crate::types::CommentId;

/// Local, unsaved edit of a single comment.
///
/// At most one exists at a time; it is held as `Option<EditSession>` by the
/// store, where `None` means idle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    editing_id: CommentId,
    /// Working copy of the comment text. Discarded on cancel.
    pub edit_text: String,
}

impl EditSession {
    pub fn new(editing_id: CommentId, seed_text: impl Into<String>) -> Self {
        Self { editing_id, edit_text: seed_text.into() }
    }

    pub fn editing_id(&self) -> &CommentId {
        &self.editing_id
    }

    pub fn is_editing(&self, id: &CommentId) -> bool {
        &self.editing_id == id
    }
}
