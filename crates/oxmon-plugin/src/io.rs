//! Output and exit collaborators of a check run.

use oxmon_common::types::Severity;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Terminates the plugin with the exit code of the final severity.
///
/// [`ProcessExit`] is what real plugins use. Tests and embedders pass a hook
/// that only records the severity, in which case the run methods return
/// normally after finalization.
pub trait ExitHook: Send {
    fn exit(&mut self, severity: Severity);
}

/// Calls [`std::process::exit`] with the severity's exit code.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl ExitHook for ProcessExit {
    fn exit(&mut self, severity: Severity) {
        std::process::exit(severity.exit_code())
    }
}

/// Remembers the last severity it was called with. Clones share state.
#[derive(Debug, Default, Clone)]
pub struct RecordingExit {
    severity: Arc<Mutex<Option<Severity>>>,
}

impl RecordingExit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn severity(&self) -> Option<Severity> {
        *self.severity.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.severity().map(Severity::exit_code)
    }
}

impl ExitHook for RecordingExit {
    fn exit(&mut self, severity: Severity) {
        *self.severity.lock().unwrap_or_else(PoisonError::into_inner) = Some(severity);
    }
}

/// In-memory output sink. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
