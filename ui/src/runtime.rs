use async_state::Runtime;
use futures::future::LocalBoxFuture;
use std::time::Duration;

/// Browser timers and Yew's local task spawner.
#[derive(Debug, Clone, Copy, Default)]
pub struct YewRuntime;

impl Runtime for YewRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration))
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        yew::platform::spawn_local(task);
    }
}
