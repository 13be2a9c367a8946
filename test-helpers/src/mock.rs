//! A recording stand-in for the wrapped async function.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

type Respond<A, T, E> = Rc<dyn Fn(&A) -> Result<T, E>>;
type Latency<A> = Rc<dyn Fn(&A) -> Duration>;

/// Async function double that records every call's arguments and answers
/// from a scripted responder, optionally after a per-call latency.
pub struct MockFn<A, T, E> {
    calls: Rc<RefCell<Vec<A>>>,
    respond: Respond<A, T, E>,
    latency: Option<Latency<A>>,
}

impl<A, T, E> Clone for MockFn<A, T, E> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            respond: self.respond.clone(),
            latency: self.latency.clone(),
        }
    }
}

impl<A, T, E> MockFn<A, T, E>
where
    A: Clone + 'static,
    T: 'static,
    E: 'static,
{
    pub fn new(respond: impl Fn(&A) -> Result<T, E> + 'static) -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            respond: Rc::new(respond),
            latency: None,
        }
    }

    /// Delay each answer by the duration computed from the call's arguments.
    pub fn with_latency(
        mut self,
        latency: impl Fn(&A) -> Duration + 'static,
    ) -> Self {
        self.latency = Some(Rc::new(latency));
        self
    }

    /// The function to hand to a controller.
    pub fn func(
        &self,
    ) -> impl Fn(A) -> LocalBoxFuture<'static, Result<T, E>> + use<A, T, E> {
        let mock = self.clone();
        move |args: A| {
            mock.calls.borrow_mut().push(args.clone());
            let latency = mock.latency.as_ref().map(|latency| latency(&args));
            let result = (mock.respond)(&args);
            async move {
                if let Some(latency) = latency {
                    tokio::time::sleep(latency).await;
                }
                result
            }
            .boxed_local()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<A> {
        self.calls.borrow().clone()
    }

    pub fn last_call(&self) -> Option<A> {
        self.calls.borrow().last().cloned()
    }
}

/// Adds its two arguments, failing with "invalid" when the sum is zero.
pub fn sum_or_invalid() -> MockFn<(i32, i32), i32, String> {
    MockFn::new(|(a, b): &(i32, i32)| {
        if a + b == 0 {
            Err("invalid".to_string())
        } else {
            Ok(a + b)
        }
    })
}
