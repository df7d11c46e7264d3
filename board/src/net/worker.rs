//! Background task that runs comment requests off the UI loop.
//!
//! Requests run one at a time in the order they were issued. A mutation and its
//! follow-up list finish before the next request starts, so a later refresh can
//! never read the server ahead of an earlier delete or create. Completions come
//! back in issue order; the store's generation check still drops anything stale.

use std::sync::Arc;

use board_core::{execute, CommentService, Request};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::event::AppEvent;

/// Starts the worker and returns the sender the UI loop submits requests on.
///
/// The worker exits when the returned sender is dropped.
pub fn spawn_net_worker(
    service: Arc<dyn CommentService>,
    event_tx: UnboundedSender<AppEvent>,
) -> UnboundedSender<Request> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(net_worker_loop(service, rx, event_tx));
    tx
}

async fn net_worker_loop(
    service: Arc<dyn CommentService>,
    mut rx: UnboundedReceiver<Request>,
    event_tx: UnboundedSender<AppEvent>,
) {
    while let Some(request) = rx.recv().await {
        debug!(action = request.action.name(), generation = request.generation.get(), "request dispatched");
        let completion = execute(service.as_ref(), request).await;
        if event_tx.send(AppEvent::NetResult(Box::new(completion))).is_err() {
            debug!("event loop gone, network worker exiting");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use board_core::{Action, Comment, CommentId, CommentStore, ServiceError, SortOrder};

    fn comment(id: &str, text: &str) -> Comment {
        Comment {
            id: CommentId::new(id),
            author: None,
            text: text.to_owned(),
            date: None,
            image: None,
            likes: 0,
        }
    }

    struct OneComment;

    #[async_trait]
    impl CommentService for OneComment {
        async fn list(&self, _order: SortOrder) -> Result<Vec<Comment>, ServiceError> {
            Ok(vec![comment("1", "only")])
        }
        async fn create(&self, _text: &str) -> Result<Comment, ServiceError> {
            Err(ServiceError::Status { status: 500, body: String::new() })
        }
        async fn update(&self, _id: &CommentId, _text: &str) -> Result<Comment, ServiceError> {
            Err(ServiceError::Status { status: 500, body: String::new() })
        }
        async fn delete(&self, _id: &CommentId) -> Result<(), ServiceError> {
            Err(ServiceError::Status { status: 500, body: String::new() })
        }
    }

    #[tokio::test]
    async fn completions_come_back_on_the_event_channel() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let net_tx = spawn_net_worker(Arc::new(OneComment), event_tx);
        let mut store = CommentStore::default();

        net_tx.send(store.begin_refresh()).unwrap();
        let Some(AppEvent::NetResult(completion)) = event_rx.recv().await else {
            panic!("expected a network result");
        };
        assert_eq!(completion.action, Action::Refresh);
        assert!(store.apply(*completion).snapshot_replaced);
        assert_eq!(store.comments().len(), 1);
    }

    #[tokio::test]
    async fn failed_mutation_skips_refresh() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let net_tx = spawn_net_worker(Arc::new(OneComment), event_tx);
        let mut store = CommentStore::default();

        net_tx.send(store.begin_create("hi").unwrap()).unwrap();
        let Some(AppEvent::NetResult(completion)) = event_rx.recv().await else {
            panic!("expected a network result");
        };
        assert!(completion.mutation.is_err());
        assert!(completion.snapshot.is_none());
    }

    /// Lists instantly but takes a while to commit mutations, so a refresh
    /// issued right after a mutation would overtake it if both ran at once.
    struct SlowWrites {
        comments: Mutex<Vec<Comment>>,
    }

    impl SlowWrites {
        fn with(ids: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                comments: Mutex::new(ids.iter().map(|id| comment(id, id)).collect()),
            })
        }
    }

    #[async_trait]
    impl CommentService for SlowWrites {
        async fn list(&self, _order: SortOrder) -> Result<Vec<Comment>, ServiceError> {
            Ok(self.comments.lock().unwrap().clone())
        }
        async fn create(&self, text: &str) -> Result<Comment, ServiceError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let created = comment("new", text);
            self.comments.lock().unwrap().push(created.clone());
            Ok(created)
        }
        async fn update(&self, _id: &CommentId, _text: &str) -> Result<Comment, ServiceError> {
            Err(ServiceError::Status { status: 500, body: String::new() })
        }
        async fn delete(&self, id: &CommentId) -> Result<(), ServiceError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.comments.lock().unwrap().retain(|c| &c.id != id);
            Ok(())
        }
    }

    /// Receives `n` completions, applying each to `store` as it arrives.
    async fn apply_next(
        n: usize,
        store: &mut CommentStore,
        event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
    ) -> Vec<Action> {
        let mut order = Vec::new();
        for _ in 0..n {
            let Some(AppEvent::NetResult(completion)) = event_rx.recv().await else {
                panic!("expected a network result");
            };
            order.push(completion.action.clone());
            store.apply(*completion);
        }
        order
    }

    fn ids(store: &CommentStore) -> Vec<&str> {
        store.comments().iter().map(|c| c.id.as_str()).collect()
    }

    #[tokio::test]
    async fn refresh_behind_a_slow_delete_does_not_resurrect_it() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let net_tx = spawn_net_worker(SlowWrites::with(&["a", "b"]), event_tx);
        let mut store = CommentStore::default();

        net_tx.send(store.begin_refresh()).unwrap();
        apply_next(1, &mut store, &mut event_rx).await;
        assert_eq!(ids(&store), ["a", "b"]);

        net_tx.send(store.begin_delete(&CommentId::new("a"))).unwrap();
        net_tx.send(store.begin_refresh()).unwrap();
        let order = apply_next(2, &mut store, &mut event_rx).await;

        assert_eq!(order, [Action::Delete { id: CommentId::new("a") }, Action::Refresh]);
        assert_eq!(ids(&store), ["b"]);
    }

    #[tokio::test]
    async fn refresh_behind_a_slow_create_still_shows_it() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let net_tx = spawn_net_worker(SlowWrites::with(&["a"]), event_tx);
        let mut store = CommentStore::default();

        net_tx.send(store.begin_create("hello").unwrap()).unwrap();
        net_tx.send(store.begin_refresh()).unwrap();
        apply_next(2, &mut store, &mut event_rx).await;

        assert_eq!(ids(&store), ["a", "new"]);
        assert_eq!(store.get(&CommentId::new("new")).map(|c| c.text.as_str()), Some("hello"));
    }
}
