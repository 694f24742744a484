//! Cancellable background work bound to a component.
//!
//! Every request a view starts goes through a [`TaskScope`]. When the view is
//! cleaned up the scope aborts whatever is still in flight, so a late response
//! never writes into signals that no longer exist.

use futures::future::{AbortHandle, Abortable};
use leptos::prelude::*;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use wasm_bindgen_futures::spawn_local;

#[derive(Default)]
struct ScopeState {
    handles: Vec<AbortHandle>,
    closed: bool,
}

#[derive(Clone, Default)]
pub struct TaskScope {
    state: Arc<Mutex<ScopeState>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScopeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Wrap `fut` so that it stops at its next suspension point once the scope
    /// is cancelled. A future bound after cancellation never runs.
    pub fn bind<F>(&self, fut: F) -> Abortable<F>
    where
        F: Future,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let mut state = self.lock();
        if state.closed {
            handle.abort();
        } else {
            state.handles.retain(|h| !h.is_aborted());
            state.handles.push(handle);
        }
        Abortable::new(fut, registration)
    }

    /// Run `fut` on the browser executor under this scope
    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let task = self.bind(fut);
        spawn_local(async move {
            if task.await.is_err() {
                log::debug!("task cancelled");
            }
        });
    }

    pub fn cancel_all(&self) {
        let mut state = self.lock();
        state.closed = true;
        for handle in state.handles.drain(..) {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().closed
    }
}

/// Scope tied to the current reactive owner
pub fn use_task_scope() -> TaskScope {
    let scope = TaskScope::new();
    let on_drop = scope.clone();
    on_cleanup(move || on_drop.cancel_all());
    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_completes_when_not_cancelled() {
        let scope = TaskScope::new();
        let result = block_on(scope.bind(async { 42 }));
        assert_eq!(result.ok(), Some(42));
    }

    #[test]
    fn test_cancel_stops_pending_task() {
        let scope = TaskScope::new();
        let (tx, rx) = oneshot::channel::<u32>();
        let written = Rc::new(Cell::new(None));

        let mut pool = LocalPool::new();
        let sink = written.clone();
        let task = scope.bind(async move {
            if let Ok(v) = rx.await {
                sink.set(Some(v));
            }
        });
        pool.spawner()
            .spawn_local(async move {
                let _ = task.await;
            })
            .unwrap();

        pool.run_until_stalled();
        scope.cancel_all();
        let _ = tx.send(7);
        pool.run_until_stalled();

        assert_eq!(written.get(), None);
        assert!(scope.is_cancelled());
    }

    #[test]
    fn test_bind_after_cancel_never_runs() {
        let scope = TaskScope::new();
        scope.cancel_all();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        let result = block_on(scope.bind(async move { flag.set(true) }));
        assert!(result.is_err());
        assert!(!ran.get());
    }
}
