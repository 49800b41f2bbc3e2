use std::fmt;

use serde::{Deserialize, Serialize};

/// The source feeding a mixed session: a single process or the system mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MixSource {
    Process(u32),
    System,
}

impl MixSource {
    /// The process id the engine captures for this source.
    pub fn engine_pid(self) -> u32 {
        match self {
            Self::Process(pid) => pid,
            Self::System => super::descriptors::SYSTEM_AUDIO_PID,
        }
    }
}

/// The kind of an active capture session.
///
/// `Process` and `System` share the engine's process-id space (system audio
/// is pid 0), but they are tracked as distinct slots because the caller
/// toggles them independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    Process(u32),
    System,
    Microphone(String),
    Mixed {
        source: MixSource,
        microphone_device_id: Option<String>,
    },
}

impl SessionKind {
    pub fn slot(&self) -> SlotKind {
        match self {
            Self::Process(_) => SlotKind::Process,
            Self::System => SlotKind::System,
            Self::Microphone(_) => SlotKind::Microphone,
            Self::Mixed { .. } => SlotKind::Mixed,
        }
    }
}

/// One of the four mutually-constrained capture roles in the slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Process,
    Microphone,
    System,
    Mixed,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Process => "process",
            Self::Microphone => "microphone",
            Self::System => "system",
            Self::Mixed => "mixed",
        };
        f.write_str(name)
    }
}
