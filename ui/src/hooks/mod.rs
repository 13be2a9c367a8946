pub mod use_async;

pub use use_async::{UseAsyncHandle, use_async, use_async_with_settings};
