use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crate::io::store::{ItemStore, TransportError};
use crate::ops::{Completion, Op, Reply, Request, RequestId, ViewState};

/// Perform one request against the store.
pub fn execute(store: &dyn ItemStore, op: &Op) -> Result<Reply, TransportError> {
    match op {
        Op::List => store.list().map(Reply::Items),
        Op::Create { title, completed } => store.create(title, *completed).map(Reply::Created),
        Op::Update(item) => store.update(item).map(Reply::Updated),
        Op::Delete(id) => store.delete(*id).map(|()| Reply::Deleted),
    }
}

/// Runs every request on its own worker thread. Completions queue up on a
/// channel that the event loop drains with [`ThreadedDispatcher::poll`], so
/// the view state is only ever touched from the loop's thread.
pub struct ThreadedDispatcher {
    store: Arc<dyn ItemStore>,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
}

impl ThreadedDispatcher {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        ThreadedDispatcher { store, tx, rx }
    }

    pub fn dispatch(&self, requests: Vec<Request>) {
        for request in requests {
            let id = request.id;
            let store = Arc::clone(&self.store);
            let tx = self.tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("tend-{}", request.op.name()))
                .spawn(move || {
                    let started = Instant::now();
                    let result = execute(store.as_ref(), &request.op);
                    tracing::debug!(
                        request = %request.id,
                        op = request.op.name(),
                        ok = result.is_ok(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "request settled"
                    );
                    // The receiver only goes away when the UI is shutting down.
                    let _ = tx.send(Completion {
                        request: request.id,
                        result,
                    });
                });
            if let Err(e) = spawned {
                self.spawn_failed(id, e);
            }
        }
    }

    /// The request never ran; settle it as failed so it still completes.
    fn spawn_failed(&self, request: RequestId, error: std::io::Error) {
        tracing::error!(%request, %error, "could not spawn request worker");
        let _ = self.tx.send(Completion::err(request, TransportError::Spawn(error)));
    }

    /// Non-blocking poll for settled requests.
    /// Returns all queued completions (may be empty).
    pub fn poll(&self) -> Vec<Completion> {
        let mut completions = Vec::new();
        while let Ok(c) = self.rx.try_recv() {
            completions.push(c);
        }
        completions
    }
}

/// Execute requests synchronously in issue order, applying each completion
/// before running the next request.
pub fn run_inline(state: &mut ViewState, store: &dyn ItemStore, requests: Vec<Request>) {
    for request in requests {
        let result = execute(store, &request.op);
        tracing::debug!(
            request = %request.id,
            op = request.op.name(),
            ok = result.is_ok(),
            "request settled"
        );
        state.complete(
            Completion {
                request: request.id,
                result,
            },
            Instant::now(),
        );
    }
}
