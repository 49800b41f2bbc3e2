//! Process-wide recorder context.
//!
//! One `Recorder` is constructed per process, owning the engine lifecycle
//! and the session orchestrator. There is no ambient global: the host
//! application builds the instance once and injects it wherever sessions
//! are started.

use std::sync::Arc;

use crate::models::descriptors::{InputDeviceDescriptor, ProcessDescriptor};
use crate::models::error::RecorderError;
use crate::session::orchestrator::SessionOrchestrator;
use crate::traits::capture_engine::CaptureEngine;

pub struct Recorder {
    engine: Arc<dyn CaptureEngine>,
    orchestrator: Arc<SessionOrchestrator>,
}

impl Recorder {
    /// Initialize the engine and build the orchestrator around it.
    ///
    /// An engine that fails to initialize is reported as
    /// `EngineUnavailable` with the underlying failure text.
    pub fn new(engine: Arc<dyn CaptureEngine>) -> Result<Self, RecorderError> {
        engine
            .initialize()
            .map_err(|err| RecorderError::EngineUnavailable(err.to_string()))?;

        let orchestrator = Arc::new(SessionOrchestrator::new(Arc::clone(&engine)));
        Ok(Self {
            engine,
            orchestrator,
        })
    }

    /// The session orchestrator. Session starts take `&Arc<_>`, so hand
    /// out clones of this.
    pub fn orchestrator(&self) -> &Arc<SessionOrchestrator> {
        &self.orchestrator
    }

    pub fn is_engine_initialized(&self) -> bool {
        self.engine.is_initialized()
    }

    /// All capturable processes.
    pub fn list_processes(&self) -> Result<Vec<ProcessDescriptor>, RecorderError> {
        self.engine.list_processes(false)
    }

    /// Only processes currently emitting audio.
    pub fn list_active_processes(&self) -> Result<Vec<ProcessDescriptor>, RecorderError> {
        self.engine.list_processes(true)
    }

    pub fn list_microphones(&self) -> Result<Vec<InputDeviceDescriptor>, RecorderError> {
        self.engine.list_input_devices()
    }

    pub fn active_session_count(&self) -> Result<i32, RecorderError> {
        self.engine.active_session_count()
    }

    /// Stop every session and shut the engine down.
    pub fn shutdown(self) {
        self.orchestrator.stop_all();
        self.engine.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::descriptors::ProcessDescriptor;
    use crate::models::format::CaptureFormat;
    use crate::models::options::{CaptureOptions, OutputTarget};
    use crate::testing::{two_devices, FakeEngine, FakeOp};
    use std::path::PathBuf;

    #[test]
    fn new_initializes_engine() {
        let engine = Arc::new(FakeEngine::new());
        let recorder = Recorder::new(Arc::clone(&engine) as Arc<dyn CaptureEngine>).unwrap();
        assert!(recorder.is_engine_initialized());
    }

    #[test]
    fn failed_initialize_is_engine_unavailable() {
        let engine = FakeEngine::new();
        engine.fail_on(FakeOp::Initialize);
        let err = Recorder::new(Arc::new(engine) as Arc<dyn CaptureEngine>)
            .err()
            .expect("initialize should fail");
        assert!(matches!(err, RecorderError::EngineUnavailable(_)));
    }

    #[test]
    fn listing_helpers_filter_active_audio() {
        let engine = Arc::new(FakeEngine::new());
        engine.set_devices(two_devices());
        engine.set_processes(vec![
            ProcessDescriptor {
                process_id: 1,
                process_name: "quiet.exe".into(),
                window_title: String::new(),
                has_active_audio: false,
            },
            ProcessDescriptor {
                process_id: 2,
                process_name: "loud.exe".into(),
                window_title: "Player".into(),
                has_active_audio: true,
            },
        ]);

        let recorder = Recorder::new(Arc::clone(&engine) as Arc<dyn CaptureEngine>).unwrap();
        assert_eq!(recorder.list_processes().unwrap().len(), 2);
        let active = recorder.list_active_processes().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].process_id, 2);
        assert_eq!(recorder.list_microphones().unwrap().len(), 2);
    }

    #[test]
    fn shutdown_stops_sessions_and_engine() {
        let engine = Arc::new(FakeEngine::new());
        let recorder = Recorder::new(Arc::clone(&engine) as Arc<dyn CaptureEngine>).unwrap();

        let orchestrator = Arc::clone(recorder.orchestrator());
        let _session = orchestrator
            .start_process_session(
                42,
                "",
                OutputTarget::Directory(PathBuf::from("/tmp/recordings")),
                CaptureFormat::Wav,
                &CaptureOptions::default(),
            )
            .unwrap();

        recorder.shutdown();
        assert!(!engine.is_initialized());
        assert_eq!(engine.active_session_count().unwrap(), 0);
    }
}
