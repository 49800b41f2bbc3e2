//! # caprec-core
//!
//! Platform-agnostic capture session orchestration.
//!
//! Sits between a caller (hotkey layer, UI, scripting host) and an opaque
//! native capture engine, enforcing which capture sessions may coexist
//! and driving multi-step session setup with rollback. Platform backends
//! implement the `CaptureEngine` trait and plug into the generic
//! `SessionOrchestrator`.
//!
//! ## Architecture
//!
//! ```text
//! caprec-core (this crate)
//! ├── traits/    ← CaptureEngine (the narrow engine command surface)
//! ├── models/    ← RecorderError, CaptureFormat, descriptors, options, config
//! ├── resolve    ← microphone + process-label resolution
//! ├── session/   ← SlotTable, SessionOrchestrator, session handles
//! └── recorder   ← process-wide Recorder context (engine lifecycle)
//! ```
//!
//! Four slots constrain concurrency: at most one of {process, system,
//! mixed} may run at a time, and a microphone session may coexist with
//! process or system capture but never with a mixed session.

pub mod models;
pub mod recorder;
pub mod resolve;
pub mod session;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience.
pub use models::config::{default_output_dir, RecorderConfig};
pub use models::descriptors::{InputDeviceDescriptor, ProcessDescriptor, SYSTEM_AUDIO_PID};
pub use models::error::RecorderError;
pub use models::format::CaptureFormat;
pub use models::options::{CaptureOptions, CaptureTarget, OutputTarget};
pub use models::session_kind::{MixSource, SessionKind, SlotKind};
pub use recorder::Recorder;
pub use session::handles::{MicrophoneSession, MixedSession, ProcessSession, SystemSession};
pub use session::orchestrator::SessionOrchestrator;
pub use session::slots::SlotTable;
pub use traits::capture_engine::CaptureEngine;
