use serde::Deserialize;
use std::rc::Rc;
use std::time::Duration;

use crate::status::{InitialStatus, UnknownStatus};

pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(250);

/// Callback invoked with the failure value of an applied execution.
pub type OnError<E> = Rc<dyn Fn(&E)>;

/// Construction parameters for [`AsyncState`](crate::AsyncState).
///
/// `A` is the argument type of the wrapped function and `E` its error type.
pub struct AsyncOptions<A, E> {
    /// Wait after a trigger call before the operation begins.
    pub start_delay: Duration,
    /// Minimum time the operation appears to take, measured from just
    /// before the wrapped function is called.
    pub response_delay: Duration,
    /// Status before the first trigger. Error is not a starting status, see
    /// [`InitialStatus`].
    pub initial_status: InitialStatus,
    /// Arguments for a single automatic trigger on mount. `Some(())` is a
    /// zero-argument call, `None` disables it.
    pub run_on_mount_args: Option<A>,
    pub on_error: Option<OnError<E>>,
}

impl<A, E> Default for AsyncOptions<A, E> {
    fn default() -> Self {
        Self {
            start_delay: DEFAULT_START_DELAY,
            response_delay: DEFAULT_RESPONSE_DELAY,
            initial_status: InitialStatus::Init,
            run_on_mount_args: None,
            on_error: None,
        }
    }
}

impl<A, E> AsyncOptions<A, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    /// Disable both artificial delays.
    pub fn no_delays(self) -> Self {
        self.start_delay(Duration::ZERO).response_delay(Duration::ZERO)
    }

    pub fn initial_status(mut self, status: InitialStatus) -> Self {
        self.initial_status = status;
        self
    }

    pub fn run_on_mount(mut self, args: A) -> Self {
        self.run_on_mount_args = Some(args);
        self
    }

    pub fn on_error(mut self, on_error: impl Fn(&E) + 'static) -> Self {
        self.on_error = Some(Rc::new(on_error));
        self
    }
}

impl<A, E> From<AsyncSettings> for AsyncOptions<A, E> {
    fn from(settings: AsyncSettings) -> Self {
        Self {
            start_delay: Duration::from_millis(settings.start_delay_ms),
            response_delay: Duration::from_millis(settings.response_delay_ms),
            initial_status: settings.initial_status,
            ..Self::default()
        }
    }
}

/// The serializable part of [`AsyncOptions`].
///
/// Every field is optional in the serialized form:
///
/// ```json
/// { "start_delay_ms": 0, "response_delay_ms": 500, "initial_status": "loading" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AsyncSettings {
    pub start_delay_ms: u64,
    pub response_delay_ms: u64,
    pub initial_status: InitialStatus,
}

impl Default for AsyncSettings {
    fn default() -> Self {
        Self {
            start_delay_ms: DEFAULT_START_DELAY.as_millis() as u64,
            response_delay_ms: DEFAULT_RESPONSE_DELAY.as_millis() as u64,
            initial_status: InitialStatus::Init,
        }
    }
}

impl AsyncSettings {
    /// Read settings from the environment, falling back to defaults for
    /// unset variables.
    ///
    /// - ASYNC_START_DELAY_MS: start delay in milliseconds
    /// - ASYNC_RESPONSE_DELAY_MS: minimum response delay in milliseconds
    /// - ASYNC_INITIAL_STATUS: one of init, loading, loaded
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        if let Some(raw) = lookup("ASYNC_START_DELAY_MS") {
            settings.start_delay_ms = parse_millis("ASYNC_START_DELAY_MS", &raw)?;
        }
        if let Some(raw) = lookup("ASYNC_RESPONSE_DELAY_MS") {
            settings.response_delay_ms =
                parse_millis("ASYNC_RESPONSE_DELAY_MS", &raw)?;
        }
        if let Some(raw) = lookup("ASYNC_INITIAL_STATUS") {
            settings.initial_status = raw.parse()?;
        }

        Ok(settings)
    }
}

fn parse_millis(variable: &'static str, raw: &str) -> Result<u64, SettingsError> {
    raw.trim()
        .parse()
        .map_err(|source| SettingsError::InvalidDelay { variable, source })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{variable} must be a whole number of milliseconds")]
    InvalidDelay {
        variable: &'static str,
        source: std::num::ParseIntError,
    },
    #[error(transparent)]
    InitialStatus(#[from] UnknownStatus),
}
