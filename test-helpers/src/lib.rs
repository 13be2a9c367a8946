pub mod mock;
pub mod telemetry;

use async_state::{AsyncOptions, AsyncState, StatusKind, Subscription, TokioRuntime};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub use mock::{MockFn, sum_or_invalid};

/// Install the test subscriber. Safe to call from every test.
pub fn init_tracing() {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();
}

/// Run `future` on a LocalSet so controllers can spawn `!Send` tasks.
pub async fn run_local<F: Future>(future: F) -> F::Output {
    init_tracing();
    LocalSet::new().run_until(future).await
}

/// A controller over `mock`, running on tokio.
pub fn spawn_state<A, T, E>(
    mock: &MockFn<A, T, E>,
    options: AsyncOptions<A, E>,
) -> AsyncState<A, T, E>
where
    A: Clone + 'static,
    T: Clone + 'static,
    E: Clone + 'static,
{
    AsyncState::new(mock.func(), options, TokioRuntime)
}

/// Advance paused tokio time and let woken tasks run.
///
/// Pending tasks are polled first so their timers start from the current
/// instant rather than the advanced one.
pub async fn advance(duration: Duration) {
    settle().await;
    tokio::time::advance(duration).await;
    settle().await;
}

/// Let every ready task run without moving the clock.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Every status a controller passes through, in order, starting with the
/// status it had when attached.
pub struct StatusLog {
    kinds: Rc<RefCell<Vec<StatusKind>>>,
    _subscription: Subscription,
}

impl StatusLog {
    pub fn attach<A, T, E>(state: &AsyncState<A, T, E>) -> Self
    where
        A: 'static,
        T: Clone + 'static,
        E: Clone + 'static,
    {
        let kinds = Rc::new(RefCell::new(vec![state.status().kind()]));
        let subscription = {
            let kinds = kinds.clone();
            let watched = state.clone();
            state.subscribe(move || {
                let kind = watched.status().kind();
                let mut kinds = kinds.borrow_mut();
                if kinds.last() != Some(&kind) {
                    kinds.push(kind);
                }
            })
        };

        Self {
            kinds,
            _subscription: subscription,
        }
    }

    pub fn kinds(&self) -> Vec<StatusKind> {
        self.kinds.borrow().clone()
    }

    pub fn count(&self, kind: StatusKind) -> usize {
        self.kinds.borrow().iter().filter(|k| **k == kind).count()
    }
}
