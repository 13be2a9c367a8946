use derive_more::Display;
use uuid::Uuid;

/// Identifies a single trigger call.
///
/// Only the execution holding the most recently issued token may write
/// shared status and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct ExecutionToken(Uuid);

impl ExecutionToken {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
