//! `CaptureEngine` implementation over the native engine DLL.
//!
//! Maps each trait call onto the `cpr_*` ABI, composing negative result
//! codes with the engine's last-error text into `EngineCallFailed`.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_void};
use std::path::Path;

use parking_lot::Mutex;

use caprec_core::models::descriptors::{InputDeviceDescriptor, ProcessDescriptor};
use caprec_core::models::error::RecorderError;
use caprec_core::models::format::CaptureFormat;
use caprec_core::models::options::{CaptureOptions, CaptureTarget, OutputTarget};
use caprec_core::traits::capture_engine::CaptureEngine;

use crate::ffi;

/// The native capture engine, reached through its C ABI.
///
/// The last-error text is engine-global, so calls are serialized under an
/// internal lock: a failing call must read its own error text, not a
/// concurrent caller's.
pub struct NativeEngine {
    call_lock: Mutex<()>,
}

impl NativeEngine {
    pub fn new() -> Self {
        Self {
            call_lock: Mutex::new(()),
        }
    }

    /// Compose a failed result code with the engine's error accessors.
    fn check(code: c_int, context: &str) -> Result<c_int, RecorderError> {
        if code >= 0 {
            return Ok(code);
        }
        let result_text = unsafe { text_from(ffi::cpr_result_to_string(code)) };
        let last_error = unsafe { text_from(ffi::cpr_get_last_error()) };
        log::debug!("{context} failed: code {code} ({result_text}) {last_error}");
        Err(RecorderError::EngineCallFailed {
            code,
            message: format!("{context}: {result_text} {last_error}").trim_end().to_string(),
        })
    }
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureEngine for NativeEngine {
    fn initialize(&self) -> Result<(), RecorderError> {
        let _guard = self.call_lock.lock();
        Self::check(unsafe { ffi::cpr_initialize() }, "cpr_initialize").map(|_| ())
    }

    fn shutdown(&self) {
        let _guard = self.call_lock.lock();
        unsafe { ffi::cpr_shutdown() }
    }

    fn is_initialized(&self) -> bool {
        unsafe { ffi::cpr_is_initialized() != 0 }
    }

    fn list_processes(
        &self,
        only_active_audio: bool,
    ) -> Result<Vec<ProcessDescriptor>, RecorderError> {
        let _guard = self.call_lock.lock();
        let mut processes: Vec<ProcessDescriptor> = Vec::new();
        let code = unsafe {
            ffi::cpr_list_processes(
                only_active_audio as c_int,
                collect_process,
                &mut processes as *mut _ as *mut c_void,
            )
        };
        Self::check(code, "cpr_list_processes")?;
        Ok(processes)
    }

    fn list_input_devices(&self) -> Result<Vec<InputDeviceDescriptor>, RecorderError> {
        let _guard = self.call_lock.lock();
        let mut devices: Vec<InputDeviceDescriptor> = Vec::new();
        let code = unsafe {
            ffi::cpr_list_input_devices(collect_device, &mut devices as *mut _ as *mut c_void)
        };
        Self::check(code, "cpr_list_input_devices")?;
        Ok(devices)
    }

    fn start_process_capture(
        &self,
        process_id: u32,
        target: &CaptureTarget,
        format: CaptureFormat,
        options: &CaptureOptions,
    ) -> Result<(), RecorderError> {
        let _guard = self.call_lock.lock();
        let isolation = options.strict_process_isolation as c_int;
        let skip = options.skip_silence as c_int;
        let code = match target {
            CaptureTarget::File(path) => {
                let path = path_cstring(path)?;
                unsafe {
                    ffi::cpr_start_capture_to_file(
                        process_id,
                        path.as_ptr(),
                        format.engine_code(),
                        options.bitrate,
                        skip,
                        std::ptr::null(),
                        0,
                        isolation,
                    )
                }
            }
            CaptureTarget::Directory(path) => {
                let path = path_cstring(path)?;
                unsafe {
                    ffi::cpr_start_capture_to_directory(
                        process_id,
                        path.as_ptr(),
                        format.engine_code(),
                        options.bitrate,
                        skip,
                        std::ptr::null(),
                        0,
                        isolation,
                    )
                }
            }
            // Monitor captures write no file of their own: empty path,
            // monitor flag set.
            CaptureTarget::Monitor => {
                let path = text_cstring("")?;
                unsafe {
                    ffi::cpr_start_capture_to_directory(
                        process_id,
                        path.as_ptr(),
                        format.engine_code(),
                        options.bitrate,
                        skip,
                        std::ptr::null(),
                        1,
                        isolation,
                    )
                }
            }
        };
        Self::check(code, "cpr_start_capture").map(|_| ())
    }

    fn stop_process_capture(&self, process_id: u32) -> Result<(), RecorderError> {
        let _guard = self.call_lock.lock();
        Self::check(unsafe { ffi::cpr_stop_capture(process_id) }, "cpr_stop_capture").map(|_| ())
    }

    fn stop_all_process_captures(&self) {
        let _guard = self.call_lock.lock();
        unsafe { ffi::cpr_stop_all_captures() }
    }

    fn is_capturing(&self, process_id: u32) -> Result<bool, RecorderError> {
        let _guard = self.call_lock.lock();
        let code = Self::check(unsafe { ffi::cpr_is_capturing(process_id) }, "cpr_is_capturing")?;
        Ok(code != 0)
    }

    fn set_capture_volume(&self, process_id: u32, volume: f32) -> Result<(), RecorderError> {
        let _guard = self.call_lock.lock();
        Self::check(
            unsafe { ffi::cpr_set_capture_volume(process_id, volume) },
            "cpr_set_capture_volume",
        )
        .map(|_| ())
    }

    fn start_microphone_capture(
        &self,
        device_id: &str,
        target: &CaptureTarget,
        format: CaptureFormat,
        options: &CaptureOptions,
    ) -> Result<(), RecorderError> {
        let _guard = self.call_lock.lock();
        let device = text_cstring(device_id)?;
        let skip = options.skip_silence as c_int;
        let code = match target {
            CaptureTarget::File(path) => {
                let path = path_cstring(path)?;
                unsafe {
                    ffi::cpr_start_microphone_capture_to_file(
                        device.as_ptr(),
                        path.as_ptr(),
                        format.engine_code(),
                        options.bitrate,
                        skip,
                        0,
                    )
                }
            }
            CaptureTarget::Directory(path) => {
                let path = path_cstring(path)?;
                unsafe {
                    ffi::cpr_start_microphone_capture_to_directory(
                        device.as_ptr(),
                        path.as_ptr(),
                        format.engine_code(),
                        options.bitrate,
                        skip,
                        0,
                    )
                }
            }
            CaptureTarget::Monitor => {
                let path = text_cstring("")?;
                unsafe {
                    ffi::cpr_start_microphone_capture_to_directory(
                        device.as_ptr(),
                        path.as_ptr(),
                        format.engine_code(),
                        options.bitrate,
                        skip,
                        1,
                    )
                }
            }
        };
        Self::check(code, "cpr_start_microphone_capture").map(|_| ())
    }

    fn stop_microphone_capture(&self, device_id: &str) -> Result<(), RecorderError> {
        let _guard = self.call_lock.lock();
        let device = text_cstring(device_id)?;
        Self::check(
            unsafe { ffi::cpr_stop_microphone_capture(device.as_ptr()) },
            "cpr_stop_microphone_capture",
        )
        .map(|_| ())
    }

    fn stop_all_microphone_captures(&self) {
        let _guard = self.call_lock.lock();
        unsafe { ffi::cpr_stop_all_microphone_captures() }
    }

    fn enable_mixed_output(
        &self,
        target: &OutputTarget,
        format: CaptureFormat,
        bitrate: u32,
        base_name: &str,
    ) -> Result<(), RecorderError> {
        let _guard = self.call_lock.lock();
        let code = match target {
            OutputTarget::File(path) => {
                let path = path_cstring(path)?;
                unsafe {
                    ffi::cpr_enable_mixed_recording_to_file(
                        path.as_ptr(),
                        format.engine_code(),
                        bitrate,
                    )
                }
            }
            OutputTarget::Directory(path) => {
                let path = path_cstring(path)?;
                let base = text_cstring(base_name)?;
                unsafe {
                    ffi::cpr_enable_mixed_recording_to_directory(
                        path.as_ptr(),
                        format.engine_code(),
                        bitrate,
                        base.as_ptr(),
                    )
                }
            }
        };
        Self::check(code, "cpr_enable_mixed_recording").map(|_| ())
    }

    fn disable_mixed_output(&self) {
        let _guard = self.call_lock.lock();
        unsafe { ffi::cpr_disable_mixed_recording() }
    }

    fn is_mixed_output_active(&self) -> Result<bool, RecorderError> {
        let _guard = self.call_lock.lock();
        let code = Self::check(
            unsafe { ffi::cpr_is_mixed_recording_active() },
            "cpr_is_mixed_recording_active",
        )?;
        Ok(code != 0)
    }

    fn active_session_count(&self) -> Result<i32, RecorderError> {
        let _guard = self.call_lock.lock();
        Self::check(
            unsafe { ffi::cpr_get_active_session_count() },
            "cpr_get_active_session_count",
        )
    }
}

/// Lossy UTF-8 from a possibly-null engine string.
unsafe fn text_from(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Item callback accumulating process entries through the user-data
/// pointer. Returning non-zero would abort the enumeration; collection
/// into a `Vec` never does.
unsafe extern "C" fn collect_process(info: *const ffi::RawProcessInfo, user: *mut c_void) -> c_int {
    if info.is_null() || user.is_null() {
        return 1;
    }
    let out = &mut *(user as *mut Vec<ProcessDescriptor>);
    let info = &*info;
    out.push(ProcessDescriptor {
        process_id: info.process_id,
        process_name: text_from(info.process_name_utf8),
        window_title: text_from(info.window_title_utf8),
        has_active_audio: info.has_active_audio != 0,
    });
    0
}

unsafe extern "C" fn collect_device(
    info: *const ffi::RawInputDeviceInfo,
    user: *mut c_void,
) -> c_int {
    if info.is_null() || user.is_null() {
        return 1;
    }
    let out = &mut *(user as *mut Vec<InputDeviceDescriptor>);
    let info = &*info;
    out.push(InputDeviceDescriptor {
        device_id: text_from(info.device_id_utf8),
        friendly_name: text_from(info.friendly_name_utf8),
        is_default: info.is_default != 0,
    });
    0
}

fn text_cstring(text: &str) -> Result<CString, RecorderError> {
    CString::new(text).map_err(|_| RecorderError::EngineCallFailed {
        code: -1,
        message: format!("argument contains an interior NUL byte: {text:?}"),
    })
}

fn path_cstring(path: &Path) -> Result<CString, RecorderError> {
    text_cstring(&path.to_string_lossy())
}
