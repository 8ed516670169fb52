//! Mutations
//!
//! Write-like backend calls with an explicit pending/success/error
//! lifecycle. Unlike queries, results are not cached by key.

use futures_util::future::{FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;

use crate::api::{ApiError, ApiResult};

/// Lifecycle of one mutation instance
///
/// `Idle -> Pending -> Success | Error`; a settled mutation accepts the
/// next trigger just like an idle one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Errors returned by [`Mutation::mutate`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    /// Triggered while a previous call was still pending; nothing was sent
    #[error("A request is already pending")]
    AlreadyPending,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone)]
struct MutationState<O> {
    status: MutationStatus,
    data: Option<O>,
    error: Option<ApiError>,
}

impl<O> Default for MutationState<O> {
    fn default() -> Self {
        Self {
            status: MutationStatus::Idle,
            data: None,
            error: None,
        }
    }
}

type MutationFn<I, O> = Rc<dyn Fn(I) -> LocalBoxFuture<'static, ApiResult<O>>>;

/// A single mutation instance with success/error callbacks
///
/// Clones share state, so a view and its event handlers see the same status.
pub struct Mutation<I, O> {
    mutation_fn: MutationFn<I, O>,
    state: Rc<RefCell<MutationState<O>>>,
    on_success: Option<Rc<dyn Fn(&O)>>,
    on_error: Option<Rc<dyn Fn(&ApiError)>>,
    listeners: Rc<RefCell<Vec<Rc<dyn Fn(MutationStatus)>>>>,
}

impl<I, O> Clone for Mutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            mutation_fn: Rc::clone(&self.mutation_fn),
            state: Rc::clone(&self.state),
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<I: 'static, O: Clone + 'static> Mutation<I, O> {
    pub fn new<F, Fut>(mutation_fn: F) -> Self
    where
        F: Fn(I) -> Fut + 'static,
        Fut: Future<Output = ApiResult<O>> + 'static,
    {
        Self {
            mutation_fn: Rc::new(move |input| mutation_fn(input).boxed_local()),
            state: Rc::new(RefCell::new(MutationState::default())),
            on_success: None,
            on_error: None,
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Builder method: callback invoked with each successful result
    pub fn on_success(mut self, callback: impl Fn(&O) + 'static) -> Self {
        self.on_success = Some(Rc::new(callback));
        self
    }

    /// Builder method: callback invoked with each failure
    pub fn on_error(mut self, callback: impl Fn(&ApiError) + 'static) -> Self {
        self.on_error = Some(Rc::new(callback));
        self
    }

    /// Call `listener` after every status change
    pub fn subscribe(&self, listener: impl Fn(MutationStatus) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Run the mutation
    ///
    /// Rejected with [`MutationError::AlreadyPending`] while a previous call
    /// is pending. Failures are stored in the mutation state and returned.
    pub async fn mutate(&self, input: I) -> Result<O, MutationError> {
        if self.is_pending() {
            tracing::warn!("Mutation triggered while pending; ignoring");
            return Err(MutationError::AlreadyPending);
        }

        self.transition(|state| {
            state.status = MutationStatus::Pending;
            state.data = None;
            state.error = None;
        });

        let result = (self.mutation_fn)(input).await;

        match result {
            Ok(data) => {
                self.transition(|state| {
                    state.status = MutationStatus::Success;
                    state.data = Some(data.clone());
                });
                if let Some(callback) = &self.on_success {
                    callback(&data);
                }
                Ok(data)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Mutation failed");
                self.transition(|state| {
                    state.status = MutationStatus::Error;
                    state.error = Some(err.clone());
                });
                if let Some(callback) = &self.on_error {
                    callback(&err);
                }
                Err(MutationError::Api(err))
            }
        }
    }

    /// Forget the last result and return to `Idle`
    pub fn reset(&self) {
        if self.is_pending() {
            return;
        }
        self.transition(|state| *state = MutationState::default());
    }

    pub fn status(&self) -> MutationStatus {
        self.state.borrow().status
    }

    pub fn is_pending(&self) -> bool {
        self.status() == MutationStatus::Pending
    }

    pub fn data(&self) -> Option<O> {
        self.state.borrow().data.clone()
    }

    pub fn error(&self) -> Option<ApiError> {
        self.state.borrow().error.clone()
    }

    fn transition(&self, update: impl FnOnce(&mut MutationState<O>)) {
        let status = {
            let mut state = self.state.borrow_mut();
            update(&mut state);
            state.status
        };

        let listeners: Vec<_> = self.listeners.borrow().iter().cloned().collect();
        for listener in listeners {
            listener(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::sync::Notify;

    fn doubler() -> Mutation<u32, u32> {
        Mutation::new(|x: u32| async move { Ok(x * 2) })
    }

    #[tokio::test]
    async fn test_success_lifecycle() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let succeeded = Rc::new(Cell::new(0));

        let hits = Rc::clone(&succeeded);
        let mutation = doubler().on_success(move |value| hits.set(*value));
        let log = Rc::clone(&seen);
        mutation.subscribe(move |status| log.borrow_mut().push(status));

        assert_eq!(mutation.status(), MutationStatus::Idle);
        assert_eq!(mutation.mutate(21).await, Ok(42));

        assert_eq!(mutation.status(), MutationStatus::Success);
        assert_eq!(mutation.data(), Some(42));
        assert_eq!(succeeded.get(), 42);
        assert_eq!(
            seen.borrow().as_slice(),
            &[MutationStatus::Pending, MutationStatus::Success]
        );
    }

    #[tokio::test]
    async fn test_error_lifecycle() {
        let failures = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&failures);

        let mutation: Mutation<u32, u32> = Mutation::new(|_| async {
            Err(ApiError::Http {
                status: 422,
                message: "bad input".to_string(),
            })
        })
        .on_error(move |err| log.borrow_mut().push(err.clone()));

        let err = mutation.mutate(1).await.unwrap_err();
        assert!(matches!(err, MutationError::Api(ApiError::Http { status: 422, .. })));
        assert_eq!(mutation.status(), MutationStatus::Error);
        assert_eq!(mutation.error(), failures.borrow().first().cloned());
        assert!(mutation.data().is_none());
    }

    #[tokio::test]
    async fn test_pending_rejects_second_trigger() {
        let gate = Rc::new(Notify::new());
        let calls = Rc::new(Cell::new(0));

        let request_gate = Rc::clone(&gate);
        let counter = Rc::clone(&calls);
        let mutation = Mutation::new(move |x: u32| {
            counter.set(counter.get() + 1);
            let gate = Rc::clone(&request_gate);
            async move {
                gate.notified().await;
                Ok(x)
            }
        });

        let first = mutation.mutate(1);
        let second = async {
            tokio::task::yield_now().await;
            assert!(mutation.is_pending());
            let rejected = mutation.mutate(2).await;
            gate.notify_one();
            rejected
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first, Ok(1));
        assert_eq!(second, Err(MutationError::AlreadyPending));
        assert_eq!(calls.get(), 1);
        assert!(!mutation.is_pending());
    }

    #[tokio::test]
    async fn test_settled_accepts_next_trigger() {
        let mutation = doubler();
        mutation.mutate(1).await.unwrap();
        assert_eq!(mutation.mutate(5).await, Ok(10));
        assert_eq!(mutation.data(), Some(10));

        mutation.reset();
        assert_eq!(mutation.status(), MutationStatus::Idle);
        assert!(mutation.data().is_none());
    }
}
