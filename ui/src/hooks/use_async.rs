use async_state::{AsyncOptions, AsyncSettings, AsyncState, Outcome, Status};
use futures::future::LocalBoxFuture;
use std::fmt::Display;
use std::future::Future;
use yew::prelude::*;

use crate::YewRuntime;

/// Hook return type for [`use_async`].
///
/// `status` and `value` are snapshots taken at render time; the component
/// re-renders whenever either changes.
pub struct UseAsyncHandle<A, T, E> {
    pub status: Status<E>,
    pub value: Option<T>,
    /// Trigger the wrapped function without awaiting the outcome.
    pub trigger: Callback<A>,
    state: AsyncState<A, T, E>,
}

impl<A, T, E> UseAsyncHandle<A, T, E>
where
    A: 'static,
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Trigger the wrapped function and await this call's own outcome.
    ///
    /// The outcome settles even when a later call or an unmount keeps it
    /// from updating the component. Dropping the returned future does not
    /// cancel the call.
    pub fn run(&self, args: A) -> LocalBoxFuture<'static, Outcome<T, E>> {
        self.state.trigger(args)
    }

    /// The controller behind this handle, for use outside the render.
    pub fn state(&self) -> AsyncState<A, T, E> {
        self.state.clone()
    }

    pub fn set_value(&self, value: Option<T>) {
        self.state.set_value(value);
    }

    pub fn update_value(&self, updater: impl FnOnce(Option<&T>) -> Option<T>) {
        self.state.update_value(updater);
    }

    /// Returns true while the first result is pending (loading with no
    /// value yet).
    pub fn is_initial_loading(&self) -> bool {
        self.status.loading() && self.value.is_none()
    }

    /// Render based on status and value with contextual messages.
    ///
    /// - No value + loading: "Loading {context}..."
    /// - No value + error: "Error loading {context}: ..."
    /// - No value + loaded: "No {context} found"
    /// - No value + init: nothing
    /// - Has value: `render_fn(value, is_loading, error)`, so the previous
    ///   value stays visible during a reload
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        E: Display,
        F: Fn(&T, bool, Option<&E>) -> Html,
    {
        match (&self.value, &self.status) {
            (Some(value), status) => {
                render_fn(value, status.loading(), status.error_message())
            }
            (None, Status::Loading) => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("Loading {}...", context)}
                    </p>
                </div>
            },
            (None, Status::Error(error)) => html! {
                <div class="p-4 rounded-md bg-red-50 \
                           dark:bg-red-900/20 border \
                           border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">
                        {format!("Error loading {}: {}", context, error)}
                    </p>
                </div>
            },
            (None, Status::Loaded) => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("No {} found", context)}
                    </p>
                </div>
            },
            (None, Status::Init) => html! {},
        }
    }
}

/// Wrap an async function with status tracking tied to the component's
/// lifecycle.
///
/// The controller is created on first render and lives as long as the
/// component; later renders reuse it, so `func` and `options` are read
/// once. Give the component a new `key` to start over with different ones.
///
/// `options.initial_status` cannot be an error; see
/// [`InitialStatus`](async_state::InitialStatus).
///
/// On mount the hook subscribes the component to state changes and, if
/// `options.run_on_mount_args` is set, triggers once with those arguments.
/// After unmount, pending calls still settle their own outcome but no
/// longer update state.
///
/// # Example
///
/// ```rust,ignore
/// #[function_component]
/// fn Sum() -> Html {
///     let sum = use_async(
///         |(a, b): (i32, i32)| async move { Ok::<_, String>(a + b) },
///         AsyncOptions::default().run_on_mount((4, 5)),
///     );
///     let onclick = {
///         let trigger = sum.trigger.clone();
///         Callback::from(move |_| trigger.emit((1, 2)))
///     };
///
///     html! {
///         <div>
///             {sum.render("sum", |value, _, _| html! { <p>{*value}</p> })}
///             <button {onclick}>{"Add 1 and 2"}</button>
///         </div>
///     }
/// }
/// ```
#[hook]
pub fn use_async<A, T, E, F, Fut>(
    func: F,
    options: AsyncOptions<A, E>,
) -> UseAsyncHandle<A, T, E>
where
    A: Clone + 'static,
    T: Clone + 'static,
    E: Clone + 'static,
    F: Fn(A) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let force_update = use_force_update();
    let state =
        use_memo((), move |_| AsyncState::new(func, options, YewRuntime));

    // Subscribe and mount once; unmount on teardown
    {
        let state = (*state).clone();

        use_effect_with((), move |_| {
            let subscription =
                state.subscribe(move || force_update.force_update());
            state.mount();

            move || {
                tracing::debug!("Unmounting async state");
                state.unmount();
                drop(subscription);
            }
        });
    }

    let trigger = {
        let state = (*state).clone();
        Callback::from(move |args: A| state.spawn(args))
    };

    UseAsyncHandle {
        status: state.status(),
        value: state.value(),
        trigger,
        state: (*state).clone(),
    }
}

/// [`use_async`] with options built from deserialized settings.
#[hook]
pub fn use_async_with_settings<A, T, E, F, Fut>(
    func: F,
    settings: AsyncSettings,
) -> UseAsyncHandle<A, T, E>
where
    A: Clone + 'static,
    T: Clone + 'static,
    E: Clone + 'static,
    F: Fn(A) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    use_async(func, AsyncOptions::from(settings))
}
