//! # caprec-windows
//!
//! Windows binding for the native caprec capture engine.
//!
//! Provides:
//! - `NativeEngine`: `CaptureEngine` implementation over the engine
//!   DLL's C ABI (`cpr_*` symbols in `caprec_engine.dll`)
//! - `ffi`: the raw declarations and callback types of that ABI
//!
//! The DLL must be resolvable at load time (next to the executable or on
//! the DLL search path); arranging that is the installer's concern.
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use caprec_core::Recorder;
//! use caprec_windows::NativeEngine;
//!
//! let recorder = Recorder::new(Arc::new(NativeEngine::new()))?;
//! let orchestrator = Arc::clone(recorder.orchestrator());
//! ```

#[cfg(target_os = "windows")]
pub mod ffi;
#[cfg(target_os = "windows")]
pub mod native_engine;

#[cfg(target_os = "windows")]
pub use native_engine::NativeEngine;
