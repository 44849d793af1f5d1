//! Cancellation group for the requests issued by one view.
//!
//! A view creates a scope when it mounts and cancels it when it unmounts.
//! Requests still in flight are aborted; a request whose response lands after
//! cancellation resolves to [`ApiError::Cancelled`] instead of its payload, so
//! nothing gets written into a view that no longer exists.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{AbortHandle, Abortable};

use crate::error::{ApiError, Result};

#[derive(Debug, Default)]
struct ScopeState {
    cancelled: bool,
    next_id: u64,
    in_flight: HashMap<u64, AbortHandle>,
}

#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    state: Arc<Mutex<ScopeState>>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScopeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `request` under this scope.
    pub async fn run<T, F>(&self, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut state = self.lock();
            if state.cancelled {
                return Err(ApiError::Cancelled);
            }
            let id = state.next_id;
            state.next_id += 1;
            state.in_flight.insert(id, handle);
            id
        };

        let outcome = Abortable::new(request, registration).await;

        let cancelled = {
            let mut state = self.lock();
            state.in_flight.remove(&id);
            state.cancelled
        };

        match outcome {
            Err(_aborted) => Err(ApiError::Cancelled),
            Ok(_) if cancelled => {
                tracing::debug!(request = id, "dropping response for cancelled scope");
                Err(ApiError::Cancelled)
            }
            Ok(result) => result,
        }
    }

    /// Abort everything in flight and refuse new requests.
    pub fn cancel(&self) {
        let handles: Vec<AbortHandle> = {
            let mut state = self.lock();
            state.cancelled = true;
            state.in_flight.drain().map(|(_, handle)| handle).collect()
        };
        for handle in handles {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::{pin_mut, poll};
    use std::task::Poll;

    #[test]
    fn completed_request_passes_through() {
        let scope = RequestScope::new();
        let value = block_on(scope.run(async { Ok::<_, ApiError>(42) }));
        assert_eq!(value, Ok(42));
        assert_eq!(scope.in_flight(), 0);
    }

    #[test]
    fn errors_are_not_rewritten() {
        let scope = RequestScope::new();
        let rejected = ApiError::Unauthorized { message: None };
        let err = block_on(scope.run(async { Err::<(), _>(rejected) }));
        assert_eq!(err, Err(ApiError::Unauthorized { message: None }));
    }

    #[test]
    fn cancel_aborts_pending_request() {
        let scope = RequestScope::new();
        block_on(async {
            let request = scope.run(futures::future::pending::<Result<u32>>());
            pin_mut!(request);
            assert!(matches!(poll!(request.as_mut()), Poll::Pending));
            assert_eq!(scope.in_flight(), 1);

            scope.cancel();
            assert_eq!(request.await, Err(ApiError::Cancelled));
        });
        assert_eq!(scope.in_flight(), 0);
    }

    #[test]
    fn cancelled_scope_refuses_new_requests() {
        let scope = RequestScope::new();
        scope.cancel();
        assert!(scope.is_cancelled());
        let result = block_on(scope.run(async { Ok::<_, ApiError>("late") }));
        assert!(result.unwrap_err().is_cancelled());
    }

    #[test]
    fn clones_share_cancellation() {
        let scope = RequestScope::new();
        let view_copy = scope.clone();
        view_copy.cancel();
        assert!(scope.is_cancelled());
    }
}
