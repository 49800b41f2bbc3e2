use crate::models::descriptors::{InputDeviceDescriptor, ProcessDescriptor};
use crate::models::error::RecorderError;
use crate::models::format::CaptureFormat;
use crate::models::options::{CaptureOptions, CaptureTarget, OutputTarget};

/// The narrow command/result surface of the native capture engine.
///
/// Every mutating call either completes synchronously or fails with an
/// `EngineCallFailed` carrying the engine's result code and last-error
/// text. Enumerations return owned collections; there is no streaming.
///
/// Implemented by:
/// - `NativeEngine` (caprec-windows) over the engine DLL's C ABI
/// - `FakeEngine` (tests) with injectable per-call failures
///
/// The engine does not enforce the orchestrator's slot exclusivity; it
/// happily runs overlapping captures. All "may this start" policy lives
/// in `SessionOrchestrator`.
pub trait CaptureEngine: Send + Sync {
    fn initialize(&self) -> Result<(), RecorderError>;
    fn shutdown(&self);
    fn is_initialized(&self) -> bool;

    /// List capturable processes, optionally only those with active audio.
    fn list_processes(
        &self,
        only_active_audio: bool,
    ) -> Result<Vec<ProcessDescriptor>, RecorderError>;

    /// List audio input devices.
    fn list_input_devices(&self) -> Result<Vec<InputDeviceDescriptor>, RecorderError>;

    /// Start capturing one process (pid 0 = system mix) to `target`.
    fn start_process_capture(
        &self,
        process_id: u32,
        target: &CaptureTarget,
        format: CaptureFormat,
        options: &CaptureOptions,
    ) -> Result<(), RecorderError>;

    fn stop_process_capture(&self, process_id: u32) -> Result<(), RecorderError>;

    /// Stop every process capture. Infallible at the ABI level.
    fn stop_all_process_captures(&self);

    fn is_capturing(&self, process_id: u32) -> Result<bool, RecorderError>;

    /// Set the capture volume multiplier (0.0–2.0) for a process capture.
    fn set_capture_volume(&self, process_id: u32, volume: f32) -> Result<(), RecorderError>;

    /// Start capturing one input device to `target`.
    fn start_microphone_capture(
        &self,
        device_id: &str,
        target: &CaptureTarget,
        format: CaptureFormat,
        options: &CaptureOptions,
    ) -> Result<(), RecorderError>;

    fn stop_microphone_capture(&self, device_id: &str) -> Result<(), RecorderError>;

    /// Stop every microphone capture. Infallible at the ABI level.
    fn stop_all_microphone_captures(&self);

    /// Begin writing the mixed output of all monitor captures.
    ///
    /// `base_name` names the auto-generated file in directory mode and is
    /// ignored for file targets.
    fn enable_mixed_output(
        &self,
        target: &OutputTarget,
        format: CaptureFormat,
        bitrate: u32,
        base_name: &str,
    ) -> Result<(), RecorderError>;

    /// Stop writing mixed output. Infallible at the ABI level.
    fn disable_mixed_output(&self);

    fn is_mixed_output_active(&self) -> Result<bool, RecorderError>;

    /// Number of engine-side capture sessions, monitor captures included.
    fn active_session_count(&self) -> Result<i32, RecorderError>;
}
