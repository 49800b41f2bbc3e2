//! In-memory capture engine for exercising the orchestrator without the
//! native DLL. Failures can be injected per operation to drive the
//! rollback paths.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use crate::models::descriptors::{InputDeviceDescriptor, ProcessDescriptor};
use crate::models::error::RecorderError;
use crate::models::format::CaptureFormat;
use crate::models::options::{CaptureOptions, CaptureTarget, OutputTarget};
use crate::traits::capture_engine::CaptureEngine;

/// Operations whose next invocations can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum FakeOp {
    Initialize,
    ListProcesses,
    ListDevices,
    StartProcess,
    StopProcess,
    SetVolume,
    StartMicrophone,
    StopMicrophone,
    EnableMixed,
}

#[derive(Default)]
struct FakeState {
    initialized: bool,
    processes: Vec<ProcessDescriptor>,
    devices: Vec<InputDeviceDescriptor>,
    /// pid → monitor-only flag
    process_captures: HashMap<u32, bool>,
    /// device id → monitor-only flag
    mic_captures: HashMap<String, bool>,
    mixed_active: bool,
    volumes: HashMap<u32, f32>,
    fail: HashSet<FakeOp>,
    calls: Vec<String>,
}

pub(crate) struct FakeEngine {
    state: Mutex<FakeState>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn with_devices(devices: Vec<InputDeviceDescriptor>) -> Self {
        let engine = Self::new();
        engine.state.lock().devices = devices;
        engine
    }

    pub fn set_processes(&self, processes: Vec<ProcessDescriptor>) {
        self.state.lock().processes = processes;
    }

    pub fn set_devices(&self, devices: Vec<InputDeviceDescriptor>) {
        self.state.lock().devices = devices;
    }

    /// Make every following invocation of `op` fail.
    pub fn fail_on(&self, op: FakeOp) {
        self.state.lock().fail.insert(op);
    }

    pub fn clear_failures(&self) {
        self.state.lock().fail.clear();
    }

    /// Chronological log of engine calls, for ordering assertions.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    /// Engine-side captures (process + microphone) flagged monitor-only.
    pub fn monitor_capture_count(&self) -> usize {
        let state = self.state.lock();
        state.process_captures.values().filter(|m| **m).count()
            + state.mic_captures.values().filter(|m| **m).count()
    }

    pub fn has_process_capture(&self, pid: u32) -> bool {
        self.state.lock().process_captures.contains_key(&pid)
    }

    pub fn has_mic_capture(&self, device_id: &str) -> bool {
        self.state.lock().mic_captures.contains_key(device_id)
    }

    pub fn mixed_active(&self) -> bool {
        self.state.lock().mixed_active
    }

    pub fn volume_for(&self, pid: u32) -> Option<f32> {
        self.state.lock().volumes.get(&pid).copied()
    }

    fn check(state: &mut FakeState, op: FakeOp, call: &str) -> Result<(), RecorderError> {
        state.calls.push(call.to_string());
        if state.fail.contains(&op) {
            return Err(RecorderError::EngineCallFailed {
                code: -1,
                message: format!("injected failure: {call}"),
            });
        }
        Ok(())
    }
}

impl CaptureEngine for FakeEngine {
    fn initialize(&self) -> Result<(), RecorderError> {
        let mut state = self.state.lock();
        Self::check(&mut state, FakeOp::Initialize, "initialize")?;
        state.initialized = true;
        Ok(())
    }

    fn shutdown(&self) {
        let mut state = self.state.lock();
        state.calls.push("shutdown".into());
        state.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    fn list_processes(
        &self,
        only_active_audio: bool,
    ) -> Result<Vec<ProcessDescriptor>, RecorderError> {
        let mut state = self.state.lock();
        Self::check(&mut state, FakeOp::ListProcesses, "list_processes")?;
        let mut processes = state.processes.clone();
        if only_active_audio {
            processes.retain(|p| p.has_active_audio);
        }
        Ok(processes)
    }

    fn list_input_devices(&self) -> Result<Vec<InputDeviceDescriptor>, RecorderError> {
        let mut state = self.state.lock();
        Self::check(&mut state, FakeOp::ListDevices, "list_input_devices")?;
        Ok(state.devices.clone())
    }

    fn start_process_capture(
        &self,
        process_id: u32,
        target: &CaptureTarget,
        _format: CaptureFormat,
        _options: &CaptureOptions,
    ) -> Result<(), RecorderError> {
        let mut state = self.state.lock();
        Self::check(
            &mut state,
            FakeOp::StartProcess,
            &format!("start_process({process_id})"),
        )?;
        state.process_captures.insert(process_id, target.is_monitor());
        Ok(())
    }

    fn stop_process_capture(&self, process_id: u32) -> Result<(), RecorderError> {
        let mut state = self.state.lock();
        Self::check(
            &mut state,
            FakeOp::StopProcess,
            &format!("stop_process({process_id})"),
        )?;
        if state.process_captures.remove(&process_id).is_none() {
            return Err(RecorderError::EngineCallFailed {
                code: -2,
                message: format!("no capture for pid {process_id}"),
            });
        }
        Ok(())
    }

    fn stop_all_process_captures(&self) {
        let mut state = self.state.lock();
        state.calls.push("stop_all_processes".into());
        state.process_captures.clear();
    }

    fn is_capturing(&self, process_id: u32) -> Result<bool, RecorderError> {
        Ok(self.state.lock().process_captures.contains_key(&process_id))
    }

    fn set_capture_volume(&self, process_id: u32, volume: f32) -> Result<(), RecorderError> {
        let mut state = self.state.lock();
        Self::check(
            &mut state,
            FakeOp::SetVolume,
            &format!("set_volume({process_id})"),
        )?;
        state.volumes.insert(process_id, volume);
        Ok(())
    }

    fn start_microphone_capture(
        &self,
        device_id: &str,
        target: &CaptureTarget,
        _format: CaptureFormat,
        _options: &CaptureOptions,
    ) -> Result<(), RecorderError> {
        let mut state = self.state.lock();
        Self::check(
            &mut state,
            FakeOp::StartMicrophone,
            &format!("start_mic({device_id})"),
        )?;
        state
            .mic_captures
            .insert(device_id.to_string(), target.is_monitor());
        Ok(())
    }

    fn stop_microphone_capture(&self, device_id: &str) -> Result<(), RecorderError> {
        let mut state = self.state.lock();
        Self::check(
            &mut state,
            FakeOp::StopMicrophone,
            &format!("stop_mic({device_id})"),
        )?;
        state.mic_captures.remove(device_id);
        Ok(())
    }

    fn stop_all_microphone_captures(&self) {
        let mut state = self.state.lock();
        state.calls.push("stop_all_mics".into());
        state.mic_captures.clear();
    }

    fn enable_mixed_output(
        &self,
        _target: &OutputTarget,
        _format: CaptureFormat,
        _bitrate: u32,
        _base_name: &str,
    ) -> Result<(), RecorderError> {
        let mut state = self.state.lock();
        Self::check(&mut state, FakeOp::EnableMixed, "enable_mixed")?;
        state.mixed_active = true;
        Ok(())
    }

    fn disable_mixed_output(&self) {
        let mut state = self.state.lock();
        state.calls.push("disable_mixed".into());
        state.mixed_active = false;
    }

    fn is_mixed_output_active(&self) -> Result<bool, RecorderError> {
        Ok(self.state.lock().mixed_active)
    }

    fn active_session_count(&self) -> Result<i32, RecorderError> {
        let state = self.state.lock();
        Ok((state.process_captures.len() + state.mic_captures.len()) as i32)
    }
}

/// A plausible device listing: one non-default, one default.
pub(crate) fn two_devices() -> Vec<InputDeviceDescriptor> {
    vec![
        InputDeviceDescriptor {
            device_id: "mic-a".into(),
            friendly_name: "Line In".into(),
            is_default: false,
        },
        InputDeviceDescriptor {
            device_id: "mic-b".into(),
            friendly_name: "Headset Microphone".into(),
            is_default: true,
        },
    ]
}
