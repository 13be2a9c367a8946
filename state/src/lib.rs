//! Status tracking for a single async operation.
//!
//! [`AsyncState`] wraps a caller-supplied async function and exposes a
//! trigger, a [`Status`] snapshot, the last resolved value and a setter for
//! it. Each trigger call waits an optional start delay, switches to
//! loading, and then waits for both the function and a minimum response
//! delay before publishing the result:
//!
//! ```text
//!  trigger(args)
//!      |  start_delay          response_delay
//!      v<------------->|<----------------------->|
//!                      ^                          ^
//!                  loading         loaded / error (latest call only)
//! ```
//!
//! Only the most recent trigger call may publish, and nothing is published
//! once the owner has been unmounted. Time and task spawning come from a
//! [`Runtime`] so the same controller serves a browser event loop and
//! native tokio code.

mod controller;
mod error;
mod listeners;
mod options;
mod runtime;
mod status;
mod token;

pub use controller::{AsyncState, Outcome};
pub use error::AsyncError;
pub use listeners::Subscription;
pub use options::{
    AsyncOptions, AsyncSettings, DEFAULT_RESPONSE_DELAY, DEFAULT_START_DELAY,
    OnError, SettingsError,
};
#[cfg(feature = "tokio")]
pub use runtime::TokioRuntime;
pub use runtime::Runtime;
pub use status::{InitialStatus, Status, StatusKind, UnknownStatus};
pub use token::ExecutionToken;
