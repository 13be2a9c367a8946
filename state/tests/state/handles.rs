use async_state::{AsyncOptions, StatusKind};
use std::time::Duration;
use test_helpers::{StatusLog, advance, run_local, spawn_state, sum_or_invalid};

#[tokio::test(start_paused = true)]
async fn abandoned_outcome_still_applies() {
    run_local(async {
        let mock = sum_or_invalid().with_latency(|_| Duration::from_millis(50));
        let state = spawn_state(&mock, AsyncOptions::default().no_delays());
        let log = StatusLog::attach(&state);

        let gave_up = tokio::time::timeout(
            Duration::from_millis(10),
            state.trigger((4, 5)),
        )
        .await;
        assert!(gave_up.is_err());
        assert!(state.status().loading());

        advance(Duration::from_secs(5)).await;

        assert!(state.status().loaded());
        assert_eq!(state.value(), Some(9));
        assert_eq!(mock.call_count(), 1);
        assert_eq!(
            log.kinds(),
            vec![StatusKind::Init, StatusKind::Loading, StatusKind::Loaded]
        );
    })
    .await
}

#[tokio::test(start_paused = true)]
async fn unpolled_call_still_runs_after_superseding() {
    run_local(async {
        let mock = sum_or_invalid().with_latency(|(a, b)| {
            if a + b == 2 {
                Duration::from_millis(500)
            } else {
                Duration::ZERO
            }
        });
        let state = spawn_state(&mock, AsyncOptions::default().no_delays());

        state.spawn((1, 1));
        drop(state.trigger((2, 2)));
        advance(Duration::from_secs(1)).await;

        assert!(state.status().loaded());
        assert_eq!(state.value(), Some(4));
        assert_eq!(mock.calls(), vec![(1, 1), (2, 2)]);
    })
    .await
}

#[tokio::test(start_paused = true)]
async fn abandoned_failure_still_reports() {
    run_local(async {
        let mock = sum_or_invalid().with_latency(|_| Duration::from_millis(50));
        let reported = std::rc::Rc::new(std::cell::Cell::new(0));
        let options = {
            let reported = reported.clone();
            AsyncOptions::default()
                .no_delays()
                .on_error(move |_| reported.set(reported.get() + 1))
        };
        let state = spawn_state(&mock, options);

        drop(state.trigger((0, 0)));
        advance(Duration::from_millis(100)).await;

        assert_eq!(state.status().error_message(), Some(&"invalid".to_string()));
        assert_eq!(reported.get(), 1);
    })
    .await
}
