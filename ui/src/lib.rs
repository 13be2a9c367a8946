//! Yew binding for [`async_state`]: the [`use_async`] hook wraps an async
//! function with loading/loaded/error status that follows the component's
//! mount lifecycle.

pub mod hooks;
pub mod logs;
mod runtime;

pub use async_state::{
    AsyncError, AsyncOptions, AsyncSettings, AsyncState, InitialStatus,
    Outcome, Status, StatusKind,
};
pub use hooks::{UseAsyncHandle, use_async, use_async_with_settings};
pub use runtime::YewRuntime;
