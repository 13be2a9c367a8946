/// Outcome error of a single trigger call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AsyncError<E> {
    /// The wrapped function failed with this value.
    #[error("{0}")]
    Failed(E),
    /// The owner detached during the start delay, so the wrapped function
    /// was never called.
    #[error("Detached before the operation started")]
    Detached,
    /// The runtime dropped the execution before it finished, for example
    /// because its task executor shut down.
    #[error("Execution cancelled before it finished")]
    Cancelled,
}

impl<E> AsyncError<E> {
    /// The failure value, if the wrapped function ran and failed.
    pub fn failure(&self) -> Option<&E> {
        match self {
            AsyncError::Failed(error) => Some(error),
            AsyncError::Detached | AsyncError::Cancelled => None,
        }
    }

    pub fn into_failure(self) -> Option<E> {
        match self {
            AsyncError::Failed(error) => Some(error),
            AsyncError::Detached | AsyncError::Cancelled => None,
        }
    }
}
