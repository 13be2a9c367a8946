use futures::future::LocalBoxFuture;
use std::time::Duration;

/// Timers and task spawning for a single-threaded executor.
///
/// The controller never blocks; every wait goes through [`Runtime::sleep`]
/// and detached work through [`Runtime::spawn_local`].
pub trait Runtime: 'static {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

/// Runtime backed by tokio's timer and `spawn_local`.
///
/// Spawning requires the controller to be used inside a
/// [`tokio::task::LocalSet`].
#[cfg(feature = "tokio")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRuntime;

#[cfg(feature = "tokio")]
impl Runtime for TokioRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}
