use async_state::AsyncOptions;
use std::cell::Cell;
use std::rc::Rc;
use test_helpers::{run_local, spawn_state, sum_or_invalid};

fn counter() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
    let count = Rc::new(Cell::new(0));
    let listener = {
        let count = count.clone();
        move || count.set(count.get() + 1)
    };
    (count, listener)
}

#[tokio::test(start_paused = true)]
async fn listeners_see_each_state_change() -> anyhow::Result<()> {
    run_local(async {
        let mock = sum_or_invalid();
        let state = spawn_state(&mock, AsyncOptions::default());
        let (count, listener) = counter();
        let subscription = state.subscribe(listener);

        state.trigger((1, 2)).await?;
        // loading, then loaded
        assert_eq!(count.get(), 2);

        state.set_value(Some(0));
        assert_eq!(count.get(), 3);

        drop(subscription);
        state.trigger((1, 2)).await?;
        assert_eq!(count.get(), 3);
        Ok::<_, anyhow::Error>(())
    })
    .await
}

#[tokio::test(start_paused = true)]
async fn suppressed_results_do_not_notify() {
    run_local(async {
        let mock = sum_or_invalid();
        let state = spawn_state(&mock, AsyncOptions::default().no_delays());
        let (count, listener) = counter();
        let _subscription = state.subscribe(listener);

        let first = state.trigger((1, 1));
        let second = state.trigger((2, 2));
        let _ = tokio::join!(first, second);

        // two loading notifications, one loaded
        assert_eq!(count.get(), 3);
        assert_eq!(state.value(), Some(4));
    })
    .await
}

#[tokio::test(start_paused = true)]
async fn listener_may_read_state() -> anyhow::Result<()> {
    run_local(async {
        let mock = sum_or_invalid();
        let state = spawn_state(&mock, AsyncOptions::default().no_delays());
        let seen = Rc::new(Cell::new(None));
        let _subscription = {
            let seen = seen.clone();
            let watched = state.clone();
            state.subscribe(move || seen.set(watched.value()))
        };

        state.trigger((20, 22)).await?;
        assert_eq!(seen.get(), Some(42));
        Ok::<_, anyhow::Error>(())
    })
    .await
}
