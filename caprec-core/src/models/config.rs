use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::format::CaptureFormat;
use super::options::CaptureOptions;

/// Caller-side recording defaults, typically loaded from the host
/// application's settings store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Directory recordings are written into.
    pub output_directory: PathBuf,

    /// Output encoding for new sessions.
    pub format: CaptureFormat,

    /// Drop silent stretches instead of encoding them.
    pub skip_silence: bool,

    /// Capture volume for process captures, in percent (0–200).
    pub process_volume_percent: u32,

    /// Preferred microphone device id; empty means "system default".
    pub microphone_id: String,
}

impl RecorderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.output_directory.as_os_str().is_empty() {
            return Err("output directory must not be empty".into());
        }
        if self.process_volume_percent > 200 {
            return Err(format!(
                "process volume must be 0-200, got {}",
                self.process_volume_percent
            ));
        }
        Ok(())
    }

    /// Volume percent converted to the engine's 0.0–2.0 multiplier.
    pub fn volume_multiplier(&self) -> f32 {
        self.process_volume_percent as f32 / 100.0
    }

    /// Per-start options derived from these defaults.
    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            skip_silence: self.skip_silence,
            volume: Some(self.volume_multiplier()),
            ..CaptureOptions::default()
        }
    }

    /// The preferred microphone, or `None` to let the resolver pick the
    /// default device.
    pub fn microphone(&self) -> Option<&str> {
        if self.microphone_id.is_empty() {
            None
        } else {
            Some(&self.microphone_id)
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_dir(),
            format: CaptureFormat::default(),
            skip_silence: false,
            process_volume_percent: 100,
            microphone_id: String::new(),
        }
    }
}

/// Default recordings directory: `Documents/CapRec` under the user
/// profile, degrading to the profile root when no Documents folder exists.
pub fn default_output_dir() -> PathBuf {
    let profile = env::var_os("USERPROFILE")
        .or_else(|| env::var_os("HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let documents = profile.join("Documents");
    let base = if documents.is_dir() { documents } else { profile };
    base.join("CapRec")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(RecorderConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let config = RecorderConfig {
            process_volume_percent: 250,
            ..RecorderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn volume_percent_maps_to_multiplier() {
        let config = RecorderConfig {
            process_volume_percent: 150,
            ..RecorderConfig::default()
        };
        assert_eq!(config.volume_multiplier(), 1.5);
        assert_eq!(config.capture_options().volume, Some(1.5));
    }

    #[test]
    fn empty_microphone_id_means_default_device() {
        let mut config = RecorderConfig::default();
        assert_eq!(config.microphone(), None);
        config.microphone_id = "mic-7".into();
        assert_eq!(config.microphone(), Some("mic-7"));
    }
}
