use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output encoding for a capture session. Immutable once the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    Wav,
    Mp3,
    Opus,
    Flac,
}

impl CaptureFormat {
    /// Stable code understood by the capture engine ABI.
    pub fn engine_code(self) -> i32 {
        match self {
            Self::Wav => 0,
            Self::Mp3 => 1,
            Self::Opus => 2,
            Self::Flac => 3,
        }
    }

    /// File extension the engine appends to auto-named output files.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Flac => "flac",
        }
    }
}

impl Default for CaptureFormat {
    fn default() -> Self {
        Self::Wav
    }
}

impl fmt::Display for CaptureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported capture format: {}", self.0)
    }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for CaptureFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "mp3" => Ok(Self::Mp3),
            "opus" => Ok(Self::Opus),
            "flac" => Ok(Self::Flac),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" WAV ".parse::<CaptureFormat>(), Ok(CaptureFormat::Wav));
        assert_eq!("Opus".parse::<CaptureFormat>(), Ok(CaptureFormat::Opus));
        assert_eq!("flac".parse::<CaptureFormat>(), Ok(CaptureFormat::Flac));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("ogg".parse::<CaptureFormat>().is_err());
        assert!("".parse::<CaptureFormat>().is_err());
    }

    #[test]
    fn engine_codes_are_stable() {
        assert_eq!(CaptureFormat::Wav.engine_code(), 0);
        assert_eq!(CaptureFormat::Mp3.engine_code(), 1);
        assert_eq!(CaptureFormat::Opus.engine_code(), 2);
        assert_eq!(CaptureFormat::Flac.engine_code(), 3);
    }

    #[test]
    fn serde_round_trip() {
        let json = serde_json::to_string(&CaptureFormat::Mp3).unwrap();
        assert_eq!(json, "\"mp3\"");
        let back: CaptureFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CaptureFormat::Mp3);
    }
}
