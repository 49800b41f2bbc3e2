//! Ambiguous-input resolution: which microphone does "the default" mean,
//! and what do we call a process we only know by pid.

use crate::models::error::RecorderError;
use crate::traits::capture_engine::CaptureEngine;

/// Spoken/displayed label when a process cannot be identified.
pub const FALLBACK_PROCESS_LABEL: &str = "current application";

/// Pick a concrete input device id.
///
/// A requested id must match the engine's current listing exactly;
/// otherwise the default-flagged device wins, then the first listed one.
pub fn resolve_microphone(
    engine: &dyn CaptureEngine,
    requested: Option<&str>,
) -> Result<String, RecorderError> {
    let devices = engine.list_input_devices()?;
    if devices.is_empty() {
        return Err(RecorderError::NoInputDevices);
    }

    if let Some(id) = requested {
        return devices
            .iter()
            .find(|d| d.device_id == id)
            .map(|d| d.device_id.clone())
            .ok_or_else(|| RecorderError::DeviceNotFound(id.to_string()));
    }

    let chosen = devices.iter().find(|d| d.is_default).unwrap_or(&devices[0]);
    Ok(chosen.device_id.clone())
}

/// Produce a human-readable label for `pid`, preferring `hint`.
///
/// Never fails: a listing error or an unknown pid degrades to
/// [`FALLBACK_PROCESS_LABEL`].
pub fn resolve_process_label(engine: &dyn CaptureEngine, pid: u32, hint: &str) -> String {
    let from_hint = normalize_label(hint);
    if !from_hint.is_empty() {
        return from_hint;
    }

    match engine.list_processes(false) {
        Ok(processes) => {
            for process in processes {
                if process.process_id == pid {
                    let name = normalize_label(&process.process_name);
                    if !name.is_empty() {
                        return name;
                    }
                }
            }
        }
        Err(err) => {
            log::debug!("process listing failed while resolving label for {pid}: {err}");
        }
    }

    FALLBACK_PROCESS_LABEL.to_string()
}

/// Trim and strip a trailing case-insensitive `.exe`.
fn normalize_label(raw: &str) -> String {
    let name = raw.trim();
    let name = if name.to_ascii_lowercase().ends_with(".exe") {
        // ".exe" is pure ASCII, so the byte offset is a char boundary.
        name[..name.len() - 4].trim_end()
    } else {
        name
    };
    name.to_string()
}
