use async_state::{AsyncError, AsyncOptions};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use test_helpers::{advance, run_local, settle, spawn_state, sum_or_invalid};

/// Calls summing to 2 take half a second, everything else answers at once.
fn slow_twos() -> test_helpers::MockFn<(i32, i32), i32, String> {
    sum_or_invalid().with_latency(|(a, b)| {
        if a + b == 2 {
            Duration::from_millis(500)
        } else {
            Duration::ZERO
        }
    })
}

#[tokio::test(start_paused = true)]
async fn later_call_wins_when_earlier_finishes_last() {
    run_local(async {
        let mock = slow_twos();
        let state = spawn_state(&mock, AsyncOptions::default().no_delays());

        let first = state.trigger((1, 1));
        let second = state.trigger((2, 2));
        let (first, second) = tokio::join!(first, second);

        // The superseded caller still gets its own result.
        assert_eq!(first, Ok(2));
        assert_eq!(second, Ok(4));
        assert!(state.status().loaded());
        assert_eq!(state.value(), Some(4));
        assert_eq!(mock.calls(), vec![(1, 1), (2, 2)]);
    })
    .await
}

#[tokio::test(start_paused = true)]
async fn earlier_call_finishing_first_is_ignored() {
    run_local(async {
        // first call answers at once, second after half a second
        let mock = slow_twos();
        let state = spawn_state(&mock, AsyncOptions::default().no_delays());

        let first = tokio::task::spawn_local(state.trigger((3, 3)));
        let second = tokio::task::spawn_local(state.trigger((1, 1)));

        settle().await;
        assert!(first.is_finished());
        assert!(state.status().loading());
        assert_eq!(state.value(), None);

        advance(Duration::from_millis(501)).await;
        assert!(second.is_finished());
        assert!(state.status().loaded());
        assert_eq!(state.value(), Some(2));

        assert_eq!(first.await.ok(), Some(Ok(6)));
        assert_eq!(second.await.ok(), Some(Ok(2)));
    })
    .await
}

#[tokio::test(start_paused = true)]
async fn superseded_failure_is_not_reported() {
    run_local(async {
        let errors = Rc::new(RefCell::new(Vec::<String>::new()));
        let mock = sum_or_invalid().with_latency(|(a, b)| {
            if a + b == 0 {
                Duration::from_millis(500)
            } else {
                Duration::ZERO
            }
        });
        let options = {
            let errors = errors.clone();
            AsyncOptions::default()
                .no_delays()
                .on_error(move |error: &String| {
                    errors.borrow_mut().push(error.clone())
                })
        };
        let state = spawn_state(&mock, options);

        let failing = state.trigger((0, 0));
        let winning = state.trigger((5, 5));
        let (failing, winning) = tokio::join!(failing, winning);

        assert_eq!(failing, Err(AsyncError::Failed("invalid".to_string())));
        assert_eq!(winning, Ok(10));
        assert!(state.status().loaded());
        assert_eq!(state.value(), Some(10));
        assert!(errors.borrow().is_empty());
    })
    .await
}

#[tokio::test(start_paused = true)]
async fn only_latest_of_many_calls_is_applied() {
    run_local(async {
        let mock = sum_or_invalid()
            .with_latency(|(a, _)| Duration::from_millis(100 * (5 - *a as u64)));
        let state = spawn_state(&mock, AsyncOptions::default());

        let handles: Vec<_> = (1..=4)
            .map(|a| tokio::task::spawn_local(state.trigger((a, 10))))
            .collect();
        for handle in handles {
            assert!(handle.await.is_ok());
        }

        assert!(state.status().loaded());
        assert_eq!(state.value(), Some(14));
        assert_eq!(mock.call_count(), 4);
    })
    .await
}
