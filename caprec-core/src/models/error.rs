use thiserror::Error;

use super::session_kind::SlotKind;

/// Errors that can occur while orchestrating capture sessions.
///
/// Exclusivity and input-validation failures (`SlotOccupied`,
/// `InvalidProcess`, `NoInputDevices`, `DeviceNotFound`) are raised before
/// any engine call, so they never leave partial engine-side state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("capture engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("{0} slot is already occupied")]
    SlotOccupied(SlotKind),

    #[error("invalid process id: {0}")]
    InvalidProcess(i64),

    #[error("no input devices available")]
    NoInputDevices,

    #[error("input device not found: {0}")]
    DeviceNotFound(String),

    #[error("engine call failed [{code}]: {message}")]
    EngineCallFailed { code: i32, message: String },
}

impl RecorderError {
    /// The engine result code, if this error wraps one.
    pub fn engine_code(&self) -> Option<i32> {
        match self {
            Self::EngineCallFailed { code, .. } => Some(*code),
            _ => None,
        }
    }
}
