//! Store behaviour against an in-memory comments service.
//!
//! Exercises: refresh, create, update, save_edit, delete, start_edit,
//! cancel_edit, and stale-snapshot rejection when requests overlap.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use board_core::{
    execute, Comment, CommentId, CommentService, CommentStore, ServiceError, SortOrder,
};

#[derive(Default)]
struct FakeService {
    comments: Mutex<Vec<Comment>>,
    calls: AtomicUsize,
    fail_mutations: AtomicBool,
    fail_list: AtomicBool,
}

impl FakeService {
    fn with(comments: Vec<Comment>) -> Self {
        Self { comments: Mutex::new(comments), ..Self::default() }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn server_ids(&self) -> Vec<String> {
        self.comments.lock().unwrap().iter().map(|c| c.id.to_string()).collect()
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if flag.load(Ordering::SeqCst) {
            Err(ServiceError::Status { status: 503, body: "unavailable".to_owned() })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CommentService for FakeService {
    async fn list(&self, _order: SortOrder) -> Result<Vec<Comment>, ServiceError> {
        self.check(&self.fail_list)?;
        Ok(self.comments.lock().unwrap().clone())
    }

    async fn create(&self, text: &str) -> Result<Comment, ServiceError> {
        self.check(&self.fail_mutations)?;
        let c = Comment {
            id: CommentId::new(uuid::Uuid::new_v4().to_string()),
            author: Some("Admin".to_owned()),
            text: text.to_owned(),
            date: Some("2024-01-01T00:00:00Z".to_owned()),
            image: None,
            likes: 0,
        };
        self.comments.lock().unwrap().push(c.clone());
        Ok(c)
    }

    async fn update(&self, id: &CommentId, text: &str) -> Result<Comment, ServiceError> {
        self.check(&self.fail_mutations)?;
        let mut comments = self.comments.lock().unwrap();
        let c = comments
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or(ServiceError::Status { status: 404, body: "Comment not found".to_owned() })?;
        c.text = text.to_owned();
        Ok(c.clone())
    }

    async fn delete(&self, id: &CommentId) -> Result<(), ServiceError> {
        self.check(&self.fail_mutations)?;
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| &c.id != id);
        if comments.len() == before {
            return Err(ServiceError::Status { status: 404, body: "Comment not found".to_owned() });
        }
        Ok(())
    }
}

fn comment(id: &str, text: &str, likes: i64) -> Comment {
    Comment {
        id: CommentId::new(id),
        author: None,
        text: text.to_owned(),
        date: None,
        image: None,
        likes,
    }
}

fn seed() -> Vec<Comment> {
    vec![comment("3", "third", 1), comment("1", "first", 5), comment("2", "second", 0)]
}

#[tokio::test]
async fn refresh_mirrors_service_in_order() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();

    let applied = store.refresh(&service).await;
    assert!(applied.snapshot_replaced);
    assert_eq!(store.comments(), seed().as_slice());
}

#[tokio::test]
async fn failed_refresh_leaves_previous_snapshot() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.refresh(&service).await;

    service.fail_list.store(true, Ordering::SeqCst);
    service.comments.lock().unwrap().clear();
    let applied = store.refresh(&service).await;

    assert!(applied.error.is_some());
    assert_eq!(store.comments().len(), 3);
}

#[tokio::test]
async fn blank_create_makes_no_call() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.refresh(&service).await;
    let calls = service.calls();

    assert!(store.create(&service, "").await.is_none());
    assert!(store.create(&service, "   ").await.is_none());

    assert_eq!(service.calls(), calls);
    assert_eq!(store.comments().len(), 3);
}

#[tokio::test]
async fn create_appears_in_next_snapshot_and_clears_draft() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.set_draft("hello");

    let text = store.draft().to_owned();
    let applied = store.create(&service, &text).await.unwrap();

    assert!(applied.error.is_none());
    assert_eq!(store.draft(), "");
    assert!(store.comments().iter().any(|c| c.text == "hello"));
    assert_eq!(store.comments().len(), 4);
}

#[tokio::test]
async fn failed_create_keeps_draft() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.refresh(&service).await;
    service.fail_mutations.store(true, Ordering::SeqCst);
    store.set_draft("retry me");

    let text = store.draft().to_owned();
    let applied = store.create(&service, &text).await.unwrap();

    assert!(applied.error.is_some());
    assert_eq!(store.draft(), "retry me");
    assert_eq!(store.comments().len(), 3);
}

#[tokio::test]
async fn second_edit_abandons_first() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.refresh(&service).await;

    assert!(store.start_edit(&CommentId::new("1")));
    store.edit_session_mut().unwrap().edit_text = "unsaved change".to_owned();
    assert!(store.start_edit(&CommentId::new("2")));

    let session = store.edit_session().unwrap();
    assert_eq!(session.editing_id().as_str(), "2");
    assert_eq!(session.edit_text, "second");
}

#[tokio::test]
async fn save_edit_updates_and_closes_session() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.refresh(&service).await;

    store.start_edit(&CommentId::new("1"));
    store.edit_session_mut().unwrap().edit_text = "first, edited".to_owned();
    let applied = store.save_edit(&service).await.unwrap();

    assert!(applied.snapshot_replaced);
    assert!(store.edit_session().is_none());
    assert_eq!(store.get(&CommentId::new("1")).unwrap().text, "first, edited");
}

#[tokio::test]
async fn failed_update_keeps_session_with_attempted_text() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.refresh(&service).await;
    service.fail_mutations.store(true, Ordering::SeqCst);

    store.start_edit(&CommentId::new("2"));
    store.edit_session_mut().unwrap().edit_text = "attempt".to_owned();
    let applied = store.save_edit(&service).await.unwrap();

    assert!(applied.error.is_some());
    let session = store.edit_session().unwrap();
    assert_eq!(session.editing_id().as_str(), "2");
    assert_eq!(session.edit_text, "attempt");
    assert_eq!(store.get(&CommentId::new("2")).unwrap().text, "second");
}

#[tokio::test]
async fn update_by_id_without_session() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.refresh(&service).await;

    store.update(&service, &CommentId::new("3"), "third!").await;
    assert_eq!(store.get(&CommentId::new("3")).unwrap().text, "third!");
}

#[tokio::test]
async fn delete_removes_from_snapshot() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.refresh(&service).await;

    let applied = store.delete(&service, &CommentId::new("1")).await;
    assert!(applied.error.is_none());
    assert!(store.get(&CommentId::new("1")).is_none());
    assert_eq!(service.server_ids(), vec!["3", "2"]);
}

#[tokio::test]
async fn failed_delete_leaves_snapshot() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();
    store.refresh(&service).await;
    service.fail_mutations.store(true, Ordering::SeqCst);

    let applied = store.delete(&service, &CommentId::new("1")).await;
    assert!(applied.error.is_some());
    assert_eq!(store.comments(), seed().as_slice());
}

#[tokio::test]
async fn overlapping_refreshes_keep_latest_issued() {
    let service = FakeService::with(seed());
    let mut store = CommentStore::default();

    // Issue a plain refresh, then a delete; complete the delete first.
    let refresh = store.begin_refresh();
    let stale = execute(&service, refresh).await;
    let delete = store.begin_delete(&CommentId::new("3"));
    let fresh = execute(&service, delete).await;

    assert!(store.apply(fresh).snapshot_replaced);
    assert!(!store.apply(stale).snapshot_replaced);
    assert!(store.get(&CommentId::new("3")).is_none());
    assert_eq!(store.comments().len(), 2);
}
