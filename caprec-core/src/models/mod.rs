pub mod config;
pub mod descriptors;
pub mod error;
pub mod format;
pub mod options;
pub mod session_kind;
