//! Single authority for "can this session start now" and for the
//! transactional mixed-session startup.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::descriptors::SYSTEM_AUDIO_PID;
use crate::models::error::RecorderError;
use crate::models::format::CaptureFormat;
use crate::models::options::{clamp_volume, CaptureOptions, CaptureTarget, OutputTarget};
use crate::models::session_kind::{MixSource, SessionKind, SlotKind};
use crate::resolve;
use crate::session::handles::{MicrophoneSession, MixedSession, ProcessSession, SystemSession};
use crate::session::slots::SlotTable;
use crate::traits::capture_engine::CaptureEngine;

/// Owns the logical session table and drives the capture engine through
/// session start/stop.
///
/// Every mutating operation runs under one table lock, so two starts
/// racing for a slot, or a start racing a stop, observe a consistent
/// table. Exclusivity is validated before the engine sees the request:
/// a rejected start never touches the engine.
pub struct SessionOrchestrator {
    engine: Arc<dyn CaptureEngine>,
    table: Mutex<SlotTable>,
}

impl SessionOrchestrator {
    pub fn new(engine: Arc<dyn CaptureEngine>) -> Self {
        Self {
            engine,
            table: Mutex::new(SlotTable::new()),
        }
    }

    pub(crate) fn engine(&self) -> &dyn CaptureEngine {
        self.engine.as_ref()
    }

    /// Start capturing a single process.
    ///
    /// `label_hint` is the caller's name for the process (focused-window
    /// app name, typically); the resolver falls back to the engine's
    /// process listing when it is empty.
    pub fn start_process_session(
        self: &Arc<Self>,
        pid: u32,
        label_hint: &str,
        output: OutputTarget,
        format: CaptureFormat,
        options: &CaptureOptions,
    ) -> Result<ProcessSession, RecorderError> {
        if pid == SYSTEM_AUDIO_PID {
            return Err(RecorderError::InvalidProcess(pid as i64));
        }

        let mut table = self.table.lock();
        table.claim_process(pid)?;

        let target = CaptureTarget::from(output);
        if let Err(err) = self
            .engine
            .start_process_capture(pid, &target, format, options)
        {
            table.release(SlotKind::Process);
            return Err(err);
        }

        self.apply_volume(pid, options);
        let label = resolve::resolve_process_label(self.engine.as_ref(), pid, label_hint);
        log::debug!("process session started for pid {pid} ({label})");

        Ok(ProcessSession::new(Arc::clone(self), pid, label))
    }

    /// Start capturing the system mix (reserved pid 0).
    ///
    /// Process isolation is forced off: system capture is inherently
    /// cross-process.
    pub fn start_system_session(
        self: &Arc<Self>,
        output: OutputTarget,
        format: CaptureFormat,
        options: &CaptureOptions,
    ) -> Result<SystemSession, RecorderError> {
        let mut table = self.table.lock();
        table.claim_system()?;

        let target = CaptureTarget::from(output);
        let options = CaptureOptions {
            strict_process_isolation: false,
            ..options.clone()
        };
        if let Err(err) =
            self.engine
                .start_process_capture(SYSTEM_AUDIO_PID, &target, format, &options)
        {
            table.release(SlotKind::System);
            return Err(err);
        }

        log::debug!("system audio session started");
        Ok(SystemSession::new(Arc::clone(self)))
    }

    /// Start capturing a microphone, resolving `device_id` against the
    /// engine's current listing (default device when omitted).
    pub fn start_microphone_session(
        self: &Arc<Self>,
        output: OutputTarget,
        format: CaptureFormat,
        device_id: Option<&str>,
        options: &CaptureOptions,
    ) -> Result<MicrophoneSession, RecorderError> {
        let mut table = self.table.lock();
        // Claim before resolving so a blocked request never reaches the
        // engine, not even for the device listing.
        table.claim_microphone(String::new())?;

        let resolved = match resolve::resolve_microphone(self.engine.as_ref(), device_id) {
            Ok(id) => id,
            Err(err) => {
                table.release(SlotKind::Microphone);
                return Err(err);
            }
        };
        table.set_microphone(resolved.clone());

        let target = CaptureTarget::from(output);
        if let Err(err) =
            self.engine
                .start_microphone_capture(&resolved, &target, format, options)
        {
            table.release(SlotKind::Microphone);
            return Err(err);
        }

        log::debug!("microphone session started on {resolved}");
        Ok(MicrophoneSession::new(Arc::clone(self), resolved))
    }

    /// Start a mixed session: a monitor-only capture on `source`, an
    /// optional monitor-only microphone capture, and mixed output into
    /// `output` under `base_name`.
    ///
    /// The startup is transactional. The engine has no all-or-nothing
    /// primitive, so on any failure the completed steps are undone in
    /// reverse order before the original error is returned; rollback
    /// failures are logged and never mask it.
    pub fn start_mixed_session(
        self: &Arc<Self>,
        source: MixSource,
        output: OutputTarget,
        format: CaptureFormat,
        base_name: &str,
        include_microphone: bool,
        device_id: Option<&str>,
        options: &CaptureOptions,
    ) -> Result<MixedSession, RecorderError> {
        if let MixSource::Process(pid) = source {
            if pid == SYSTEM_AUDIO_PID {
                return Err(RecorderError::InvalidProcess(pid as i64));
            }
        }

        let mut table = self.table.lock();
        table.claim_mixed(source, None)?;

        let source_pid = source.engine_pid();
        let source_options = CaptureOptions {
            strict_process_isolation: options.strict_process_isolation
                && matches!(source, MixSource::Process(_)),
            ..options.clone()
        };

        // Step 1: monitor-only source capture.
        if let Err(err) = self.engine.start_process_capture(
            source_pid,
            &CaptureTarget::Monitor,
            format,
            &source_options,
        ) {
            table.release(SlotKind::Mixed);
            return Err(err);
        }

        // Step 2: optional monitor-only microphone capture.
        let mut mic_device: Option<String> = None;
        if include_microphone {
            let started = resolve::resolve_microphone(self.engine.as_ref(), device_id)
                .and_then(|id| {
                    self.engine
                        .start_microphone_capture(&id, &CaptureTarget::Monitor, format, options)
                        .map(|()| id)
                });
            match started {
                Ok(id) => {
                    table.set_mixed_microphone(Some(id.clone()));
                    mic_device = Some(id);
                }
                Err(err) => {
                    self.rollback_mixed(source_pid, None);
                    table.release(SlotKind::Mixed);
                    return Err(err);
                }
            }
        }

        // Step 3: enable mixed output.
        if let Err(err) = self
            .engine
            .enable_mixed_output(&output, format, options.bitrate, base_name)
        {
            self.rollback_mixed(source_pid, mic_device.as_deref());
            table.release(SlotKind::Mixed);
            return Err(err);
        }

        if matches!(source, MixSource::Process(_)) {
            self.apply_volume(source_pid, options);
        }

        log::debug!("mixed session started (source pid {source_pid}, mic {mic_device:?})");
        Ok(MixedSession::new(Arc::clone(self), source, mic_device))
    }

    /// Stop whatever occupies `slot`.
    ///
    /// The table entry is cleared even when the engine-side stop fails; a
    /// stuck engine session must not wedge the orchestrator. Stopping an
    /// empty slot is a no-op.
    pub fn stop_slot(&self, slot: SlotKind) {
        let mut table = self.table.lock();
        let Some(session) = table.release(slot) else {
            return;
        };

        match session {
            SessionKind::Process(pid) => self.stop_engine_process(pid),
            SessionKind::System => self.stop_engine_process(SYSTEM_AUDIO_PID),
            SessionKind::Microphone(device_id) => self.stop_engine_microphone(&device_id),
            SessionKind::Mixed {
                source,
                microphone_device_id,
            } => {
                // Reverse of the startup order.
                self.engine.disable_mixed_output();
                if let Some(device_id) = microphone_device_id {
                    self.stop_engine_microphone(&device_id);
                }
                self.stop_engine_process(source.engine_pid());
            }
        }
    }

    /// Stop everything: mixed output, every microphone capture, every
    /// process capture, and clear the whole table.
    pub fn stop_all(&self) {
        let mut table = self.table.lock();
        table.clear();
        self.engine.disable_mixed_output();
        self.engine.stop_all_microphone_captures();
        self.engine.stop_all_process_captures();
    }

    /// Occupied slots, from the cached table only. No engine call.
    pub fn status(&self) -> Vec<SlotKind> {
        self.table.lock().occupied()
    }

    pub fn is_capturing(&self, pid: u32) -> Result<bool, RecorderError> {
        self.engine.is_capturing(pid)
    }

    pub fn set_capture_volume(&self, pid: u32, volume: f32) -> Result<(), RecorderError> {
        self.engine.set_capture_volume(pid, clamp_volume(volume))
    }

    pub fn active_session_count(&self) -> Result<i32, RecorderError> {
        self.engine.active_session_count()
    }

    /// Best-effort volume apply after a successful start. Failures are
    /// logged; the session stays up.
    fn apply_volume(&self, pid: u32, options: &CaptureOptions) {
        let Some(volume) = options.volume else {
            return;
        };
        if let Err(err) = self.engine.set_capture_volume(pid, clamp_volume(volume)) {
            log::warn!("volume apply for pid {pid} failed: {err}");
        }
    }

    /// Undo the monitor captures of a failed mixed start, microphone
    /// first, then source.
    fn rollback_mixed(&self, source_pid: u32, mic_device: Option<&str>) {
        if let Some(device_id) = mic_device {
            self.stop_engine_microphone(device_id);
        }
        self.stop_engine_process(source_pid);
    }

    fn stop_engine_process(&self, pid: u32) {
        if let Err(err) = self.engine.stop_process_capture(pid) {
            log::warn!("engine stop for process capture {pid} failed: {err}");
        }
    }

    fn stop_engine_microphone(&self, device_id: &str) {
        if let Err(err) = self.engine.stop_microphone_capture(device_id) {
            log::warn!("engine stop for microphone capture {device_id} failed: {err}");
        }
    }
}
