use serde::{Deserialize, Serialize};

/// Reserved process id meaning "system/desktop audio" rather than a real
/// process. The engine represents system capture as a capture on this id.
pub const SYSTEM_AUDIO_PID: u32 = 0;

/// A process as reported by the capture engine's process listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub process_id: u32,
    pub process_name: String,
    pub window_title: String,
    pub has_active_audio: bool,
}

/// An audio input device as reported by the capture engine.
///
/// Exactly one device in a non-empty listing should carry `is_default`;
/// the resolver falls back to the first entry when none does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDeviceDescriptor {
    pub device_id: String,
    pub friendly_name: String,
    pub is_default: bool,
}
