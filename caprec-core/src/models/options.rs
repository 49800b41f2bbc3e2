use std::path::PathBuf;

/// Where a capture writes its output.
///
/// `Directory` lets the engine auto-name a timestamped file with the
/// format's extension; `File` names the output exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Directory(PathBuf),
    File(PathBuf),
}

/// Destination of an engine-side capture.
///
/// `Monitor` captures exist only to feed the mixer: no file is written.
/// They are started internally by mixed sessions and never handed to the
/// caller directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTarget {
    Directory(PathBuf),
    File(PathBuf),
    Monitor,
}

impl CaptureTarget {
    pub fn is_monitor(&self) -> bool {
        matches!(self, Self::Monitor)
    }
}

impl From<OutputTarget> for CaptureTarget {
    fn from(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Directory(p) => Self::Directory(p),
            OutputTarget::File(p) => Self::File(p),
        }
    }
}

/// Per-start capture options forwarded to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    /// Encoder bitrate in bits per second; 0 lets the engine choose.
    pub bitrate: u32,

    /// Drop silent stretches instead of encoding them.
    pub skip_silence: bool,

    /// Keep a per-process capture free of loopback/system audio.
    /// Forced off for system and mixed-system captures.
    pub strict_process_isolation: bool,

    /// Capture volume multiplier (0.0–2.0) applied best-effort after a
    /// process or mixed start. Apply failures never fail the session.
    pub volume: Option<f32>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            bitrate: 0,
            skip_silence: false,
            strict_process_isolation: true,
            volume: None,
        }
    }
}

/// Clamp a volume multiplier into the engine's accepted 0.0–2.0 range.
pub fn clamp_volume(volume: f32) -> f32 {
    volume.clamp(0.0, 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_target_converts_to_capture_target() {
        let dir = OutputTarget::Directory(PathBuf::from("/tmp/rec"));
        assert_eq!(
            CaptureTarget::from(dir),
            CaptureTarget::Directory(PathBuf::from("/tmp/rec"))
        );
        assert!(!CaptureTarget::File(PathBuf::from("a.wav")).is_monitor());
        assert!(CaptureTarget::Monitor.is_monitor());
    }

    #[test]
    fn volume_is_clamped_to_engine_range() {
        assert_eq!(clamp_volume(-0.5), 0.0);
        assert_eq!(clamp_volume(1.0), 1.0);
        assert_eq!(clamp_volume(3.5), 2.0);
    }
}
