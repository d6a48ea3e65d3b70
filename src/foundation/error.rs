/// Convenience result type used across rendevice.
pub type RendeviceResult<T> = Result<T, RendeviceError>;

/// Top-level error taxonomy used by selection, configuration and job APIs.
///
/// Absence of acceleration hardware is not an error at this level: the selector reports it
/// through [`SelectionStatus::NoHardwareFound`](crate::SelectionStatus::NoHardwareFound).
/// Only job planning under [`Fallback::Abort`](crate::Fallback::Abort) turns it into
/// [`RendeviceError::NoAcceleration`].
#[derive(thiserror::Error, Debug)]
pub enum RendeviceError {
    /// Candidate list, acceptance policy or render settings are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The device provider misbehaved outside of a probe (e.g. activation failed).
    #[error("inventory error: {0}")]
    Inventory(String),

    /// No acceleration hardware was found and the caller asked to abort.
    #[error("no acceleration hardware available")]
    NoAcceleration,

    /// Errors when serializing or deserializing config or inventory data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RendeviceError {
    /// Build a [`RendeviceError::InvalidConfiguration`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`RendeviceError::Inventory`] value.
    pub fn inventory(msg: impl Into<String>) -> Self {
        Self::Inventory(msg.into())
    }

    /// Build a [`RendeviceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error stems from configuration rather than hardware or IO.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

impl From<serde_json::Error> for RendeviceError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

/// Failure of a single candidate probe.
///
/// Always recovered locally by the selector and recorded as a
/// [`ProbeOutcome::Failed`](crate::ProbeOutcome::Failed) attempt.
#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    /// The backend cannot be activated on this host (missing driver, unsupported kind).
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Wrapped lower-level error raised while switching backend or enumerating.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProbeError {
    /// Build a [`ProbeError::Unavailable`] value.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
