use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Lifecycle status of the wrapped operation.
///
/// Exactly one of the four states holds at any time, and the failure value
/// only exists while in [`Status::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status<E> {
    #[default]
    Init,
    Loading,
    Loaded,
    Error(E),
}

impl<E> Status<E> {
    pub fn init(&self) -> bool {
        matches!(self, Status::Init)
    }

    pub fn loading(&self) -> bool {
        matches!(self, Status::Loading)
    }

    pub fn loaded(&self) -> bool {
        matches!(self, Status::Loaded)
    }

    pub fn error(&self) -> bool {
        matches!(self, Status::Error(_))
    }

    /// The failure value of the last applied execution, if it failed.
    pub fn error_message(&self) -> Option<&E> {
        match self {
            Status::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn kind(&self) -> StatusKind {
        match self {
            Status::Init => StatusKind::Init,
            Status::Loading => StatusKind::Loading,
            Status::Loaded => StatusKind::Loaded,
            Status::Error(_) => StatusKind::Error,
        }
    }
}

impl<E> From<InitialStatus> for Status<E> {
    fn from(initial: InitialStatus) -> Self {
        match initial {
            InitialStatus::Init => Status::Init,
            InitialStatus::Loading => Status::Loading,
            InitialStatus::Loaded => Status::Loaded,
        }
    }
}

/// Discriminant of [`Status`] without the failure value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StatusKind {
    #[display("init")]
    Init,
    #[display("loading")]
    Loading,
    #[display("loaded")]
    Loaded,
    #[display("error")]
    Error,
}

/// Status a controller starts in before its first trigger.
///
/// An error status carries a failure value, so it cannot be a starting
/// point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum InitialStatus {
    #[default]
    #[display("init")]
    Init,
    #[display("loading")]
    Loading,
    #[display("loaded")]
    Loaded,
}

impl std::str::FromStr for InitialStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "init" => Ok(InitialStatus::Init),
            "loading" => Ok(InitialStatus::Loading),
            "loaded" => Ok(InitialStatus::Loaded),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown initial status '{0}', expected init, loading or loaded")]
pub struct UnknownStatus(pub String);
