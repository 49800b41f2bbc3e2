//! Raw C ABI of the native capture engine (`caprec_engine.dll`).
//!
//! Every mutating entry point returns a signed result code; negative is
//! failure, and the engine keeps out-of-band error text retrievable via
//! `cpr_get_last_error`. Enumerations invoke a caller-supplied callback
//! once per item during a single synchronous call; a non-zero callback
//! return aborts the enumeration early.

use std::os::raw::{c_char, c_float, c_int, c_uint, c_void};

#[repr(C)]
pub struct RawProcessInfo {
    pub process_id: c_uint,
    pub process_name_utf8: *const c_char,
    pub window_title_utf8: *const c_char,
    pub has_active_audio: c_int,
}

#[repr(C)]
pub struct RawInputDeviceInfo {
    pub device_id_utf8: *const c_char,
    pub friendly_name_utf8: *const c_char,
    pub is_default: c_int,
}

pub type ProcessCallback =
    unsafe extern "C" fn(info: *const RawProcessInfo, user_data: *mut c_void) -> c_int;

pub type InputDeviceCallback =
    unsafe extern "C" fn(info: *const RawInputDeviceInfo, user_data: *mut c_void) -> c_int;

#[link(name = "caprec_engine")]
extern "C" {
    pub fn cpr_initialize() -> c_int;
    pub fn cpr_shutdown();
    pub fn cpr_is_initialized() -> c_int;

    pub fn cpr_result_to_string(code: c_int) -> *const c_char;
    pub fn cpr_get_last_error() -> *const c_char;

    pub fn cpr_list_processes(
        only_active_audio: c_int,
        callback: ProcessCallback,
        user_data: *mut c_void,
    ) -> c_int;
    pub fn cpr_list_input_devices(
        callback: InputDeviceCallback,
        user_data: *mut c_void,
    ) -> c_int;

    pub fn cpr_start_capture_to_file(
        process_id: c_uint,
        output_file_utf8: *const c_char,
        format: c_int,
        bitrate: c_uint,
        skip_silence: c_int,
        passthrough_device_utf8: *const c_char,
        monitor_only: c_int,
        strict_process_isolation: c_int,
    ) -> c_int;
    pub fn cpr_start_capture_to_directory(
        process_id: c_uint,
        output_dir_utf8: *const c_char,
        format: c_int,
        bitrate: c_uint,
        skip_silence: c_int,
        passthrough_device_utf8: *const c_char,
        monitor_only: c_int,
        strict_process_isolation: c_int,
    ) -> c_int;
    pub fn cpr_stop_capture(process_id: c_uint) -> c_int;
    pub fn cpr_stop_all_captures();
    pub fn cpr_is_capturing(process_id: c_uint) -> c_int;
    pub fn cpr_set_capture_volume(process_id: c_uint, volume: c_float) -> c_int;
    pub fn cpr_get_active_session_count() -> c_int;

    pub fn cpr_start_microphone_capture_to_file(
        device_id_utf8: *const c_char,
        output_file_utf8: *const c_char,
        format: c_int,
        bitrate: c_uint,
        skip_silence: c_int,
        monitor_only: c_int,
    ) -> c_int;
    pub fn cpr_start_microphone_capture_to_directory(
        device_id_utf8: *const c_char,
        output_dir_utf8: *const c_char,
        format: c_int,
        bitrate: c_uint,
        skip_silence: c_int,
        monitor_only: c_int,
    ) -> c_int;
    pub fn cpr_stop_microphone_capture(device_id_utf8: *const c_char) -> c_int;
    pub fn cpr_stop_all_microphone_captures();

    pub fn cpr_enable_mixed_recording_to_file(
        output_file_utf8: *const c_char,
        format: c_int,
        bitrate: c_uint,
    ) -> c_int;
    pub fn cpr_enable_mixed_recording_to_directory(
        output_dir_utf8: *const c_char,
        format: c_int,
        bitrate: c_uint,
        base_name_utf8: *const c_char,
    ) -> c_int;
    pub fn cpr_disable_mixed_recording();
    pub fn cpr_is_mixed_recording_active() -> c_int;
}
