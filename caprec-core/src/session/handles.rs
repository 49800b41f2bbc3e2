//! Caller-facing tokens for active sessions.
//!
//! A handle is the only object the caller keeps for a running capture.
//! `stop()` consumes the handle; it always clears the orchestrator's slot,
//! even when the engine-side stop fails. Handles do not stop on drop; an
//! abandoned slot is reclaimed through `stop_slot` or `stop_all`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::error::RecorderError;
use crate::models::session_kind::{MixSource, SlotKind};
use crate::session::orchestrator::SessionOrchestrator;

/// An active per-process capture.
pub struct ProcessSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    pid: u32,
    label: String,
    orchestrator: Arc<SessionOrchestrator>,
}

impl ProcessSession {
    pub(crate) fn new(orchestrator: Arc<SessionOrchestrator>, pid: u32, label: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            pid,
            label,
            orchestrator,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Human-readable label for the captured process.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_recording(&self) -> Result<bool, RecorderError> {
        self.orchestrator.is_capturing(self.pid)
    }

    /// Set the capture volume multiplier, clamped to 0.0–2.0.
    pub fn set_volume(&self, volume: f32) -> Result<(), RecorderError> {
        self.orchestrator.set_capture_volume(self.pid, volume)
    }

    pub fn stop(self) {
        self.orchestrator.stop_slot(SlotKind::Process);
    }
}

/// An active system-mix capture (reserved pid 0 on the engine side).
pub struct SystemSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    orchestrator: Arc<SessionOrchestrator>,
}

impl SystemSession {
    pub(crate) fn new(orchestrator: Arc<SessionOrchestrator>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            orchestrator,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_recording(&self) -> Result<bool, RecorderError> {
        self.orchestrator
            .is_capturing(crate::models::descriptors::SYSTEM_AUDIO_PID)
    }

    pub fn stop(self) {
        self.orchestrator.stop_slot(SlotKind::System);
    }
}

/// An active microphone capture.
pub struct MicrophoneSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    device_id: String,
    orchestrator: Arc<SessionOrchestrator>,
}

impl MicrophoneSession {
    pub(crate) fn new(orchestrator: Arc<SessionOrchestrator>, device_id: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            device_id,
            orchestrator,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The concrete device the resolver settled on.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn stop(self) {
        self.orchestrator.stop_slot(SlotKind::Microphone);
    }
}

/// An active mixed session: monitor source + optional monitor microphone,
/// muxed into one output file.
pub struct MixedSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    source: MixSource,
    microphone_device_id: Option<String>,
    orchestrator: Arc<SessionOrchestrator>,
}

impl MixedSession {
    pub(crate) fn new(
        orchestrator: Arc<SessionOrchestrator>,
        source: MixSource,
        microphone_device_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            source,
            microphone_device_id,
            orchestrator,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn source(&self) -> MixSource {
        self.source
    }

    pub fn microphone_device_id(&self) -> Option<&str> {
        self.microphone_device_id.as_deref()
    }

    pub fn is_mixing(&self) -> Result<bool, RecorderError> {
        self.orchestrator.engine().is_mixed_output_active()
    }

    pub fn stop(self) {
        self.orchestrator.stop_slot(SlotKind::Mixed);
    }
}
