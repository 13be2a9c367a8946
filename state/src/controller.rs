use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use crate::listeners::{Listeners, Subscription};
use crate::options::{AsyncOptions, OnError};
use crate::runtime::Runtime;
use crate::{AsyncError, ExecutionToken, Status};

type AsyncFn<A, T, E> = Rc<dyn Fn(A) -> LocalBoxFuture<'static, Result<T, E>>>;

/// Outcome of a single trigger call.
pub type Outcome<T, E> = Result<T, AsyncError<E>>;

/// Wraps an async function with status tracking, artificial delays and
/// latest-call-wins completion.
///
/// Cloning is cheap and every clone shares the same state. The controller
/// starts mounted; hosts with an attach/detach lifecycle call
/// [`mount`](Self::mount) and [`unmount`](Self::unmount).
///
/// # Example
///
/// ```rust,ignore
/// let state = AsyncState::new(
///     |(a, b): (i32, i32)| async move { Ok::<_, String>(a + b) },
///     AsyncOptions::default(),
///     TokioRuntime,
/// );
/// let sum = state.trigger((4, 5)).await?;
/// assert_eq!(sum, 9);
/// assert!(state.status().loaded());
/// assert_eq!(state.value(), Some(9));
/// ```
pub struct AsyncState<A, T, E> {
    inner: Rc<Inner<A, T, E>>,
}

impl<A, T, E> Clone for AsyncState<A, T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<A, T, E> {
    func: AsyncFn<A, T, E>,
    start_delay: Duration,
    response_delay: Duration,
    run_on_mount_args: Option<A>,
    on_error: Option<OnError<E>>,
    runtime: Rc<dyn Runtime>,
    current: Cell<ExecutionToken>,
    mounted: Cell<bool>,
    status: RefCell<Status<E>>,
    value: RefCell<Option<T>>,
    listeners: Rc<RefCell<Listeners>>,
}

impl<A, T, E> AsyncState<A, T, E>
where
    A: 'static,
    T: Clone + 'static,
    E: Clone + 'static,
{
    pub fn new<F, Fut>(
        func: F,
        options: AsyncOptions<A, E>,
        runtime: impl Runtime,
    ) -> Self
    where
        F: Fn(A) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let AsyncOptions {
            start_delay,
            response_delay,
            initial_status,
            run_on_mount_args,
            on_error,
        } = options;

        Self {
            inner: Rc::new(Inner {
                func: Rc::new(move |args| func(args).boxed_local()),
                start_delay,
                response_delay,
                run_on_mount_args,
                on_error,
                runtime: Rc::new(runtime),
                current: Cell::new(ExecutionToken::new()),
                mounted: Cell::new(true),
                status: RefCell::new(initial_status.into()),
                value: RefCell::new(None),
                listeners: Rc::new(RefCell::new(Listeners::default())),
            }),
        }
    }

    /// Run the wrapped function with `args`.
    ///
    /// The call becomes the current execution immediately, superseding any
    /// earlier call that has not completed, and runs as its own task on the
    /// runtime. Shared status and value only change if this call is still
    /// current and the owner is still mounted when it completes. The
    /// returned future settles with the wrapped function's own result;
    /// dropping it does not stop the execution.
    pub fn trigger(&self, args: A) -> LocalBoxFuture<'static, Outcome<T, E>> {
        let token = ExecutionToken::new();
        self.inner.current.set(token);

        let (sender, receiver) = oneshot::channel();
        let execution = self.inner.clone().execute(token, args);
        self.inner.runtime.spawn_local(Box::pin(async move {
            if sender.send(execution.await).is_err() {
                tracing::trace!(%token, "Outcome receiver dropped");
            }
        }));

        receiver
            .map(|outcome| outcome.unwrap_or(Err(AsyncError::Cancelled)))
            .boxed_local()
    }

    /// Trigger without awaiting the outcome.
    pub fn spawn(&self, args: A) {
        let outcome = self.trigger(args);
        self.inner.runtime.spawn_local(Box::pin(async move {
            match outcome.await {
                Ok(_) => {}
                Err(AsyncError::Detached) => {
                    tracing::debug!("Spawned execution skipped, owner detached");
                }
                Err(AsyncError::Failed(_)) => {
                    tracing::debug!("Spawned execution failed");
                }
                Err(AsyncError::Cancelled) => {
                    tracing::debug!("Spawned execution cancelled");
                }
            }
        }));
    }

    pub fn status(&self) -> Status<E> {
        self.inner.status.borrow().clone()
    }

    pub fn value(&self) -> Option<T> {
        self.inner.value.borrow().clone()
    }

    /// Replace the value without touching the status.
    pub fn set_value(&self, value: Option<T>) {
        *self.inner.value.borrow_mut() = value;
        self.inner.notify();
    }

    /// Replace the value with one computed from the current value, without
    /// touching the status. The updater gets a snapshot, so it may itself
    /// read or write this state.
    pub fn update_value(&self, updater: impl FnOnce(Option<&T>) -> Option<T>) {
        let current = self.value();
        let next = updater(current.as_ref());
        *self.inner.value.borrow_mut() = next;
        self.inner.notify();
    }

    /// Mark the owner attached, then trigger once with the configured mount
    /// arguments, if any.
    pub fn mount(&self)
    where
        A: Clone,
    {
        self.inner.mounted.set(true);
        if let Some(args) = self.inner.run_on_mount_args.clone() {
            tracing::debug!("Running on mount");
            self.spawn(args);
        }
    }

    /// Mark the owner detached. Pending executions complete without
    /// changing shared state.
    pub fn unmount(&self) {
        self.inner.mounted.set(false);
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    /// Call `listener` after every change of status or value.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        Listeners::insert(&self.inner.listeners, listener)
    }
}

impl<A, T, E> Inner<A, T, E>
where
    A: 'static,
    T: Clone + 'static,
    E: Clone + 'static,
{
    async fn execute(
        self: Rc<Self>,
        token: ExecutionToken,
        args: A,
    ) -> Outcome<T, E> {
        if !self.start_delay.is_zero() {
            self.runtime.sleep(self.start_delay).await;
        }

        if !self.mounted.get() {
            tracing::debug!(%token, "Owner detached during start delay");
            return Err(AsyncError::Detached);
        }

        tracing::debug!(%token, "Loading");
        *self.status.borrow_mut() = Status::Loading;
        self.notify();

        let delay = if self.response_delay.is_zero() {
            future::ready(()).boxed_local()
        } else {
            self.runtime.sleep(self.response_delay)
        };
        let (result, ()) = future::join((self.func)(args), delay).await;

        let applies = self.applies(token);
        match result {
            Ok(value) => {
                if applies {
                    tracing::debug!(%token, "Loaded");
                    *self.value.borrow_mut() = Some(value.clone());
                    *self.status.borrow_mut() = Status::Loaded;
                    self.notify();
                }
                Ok(value)
            }
            Err(error) => {
                if applies {
                    tracing::debug!(%token, "Failed");
                    if let Some(on_error) = &self.on_error {
                        on_error(&error);
                    }
                    *self.value.borrow_mut() = None;
                    *self.status.borrow_mut() = Status::Error(error.clone());
                    self.notify();
                }
                Err(AsyncError::Failed(error))
            }
        }
    }

    /// Whether a completed execution may write shared state.
    fn applies(&self, token: ExecutionToken) -> bool {
        if !self.mounted.get() {
            tracing::debug!(%token, "Owner detached, dropping result");
            return false;
        }
        if self.current.get() != token {
            tracing::debug!(
                %token,
                current = %self.current.get(),
                "Superseded by a later call, dropping result"
            );
            return false;
        }
        true
    }

    fn notify(&self) {
        Listeners::notify(&self.listeners);
    }
}
