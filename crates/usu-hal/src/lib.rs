//! Host abstraction for the usu privilege mediator.
//!
//! The kernel core never reaches into a global log sink or clock.
//! Everything host-specific is behind the `HAL` trait and injected as a
//! collaborator, so the transition engine stays testable and the
//! device-node transport can live entirely outside this workspace.

#![no_std]
extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// Host abstraction layer.
///
/// Implementations must be cheap to call from any thread; `debug_write`
/// is best-effort and must never block a credential transition.
pub trait HAL {
    /// Write a line to the host debug log sink.
    fn debug_write(&self, msg: &str);

    /// Monotonic time in nanoseconds since an arbitrary epoch.
    fn now_nanos(&self) -> u64;
}

/// HAL that discards all output and reports time zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHal;

impl HAL for NullHal {
    fn debug_write(&self, _msg: &str) {}

    fn now_nanos(&self) -> u64 {
        0
    }
}

/// HAL that records every debug line, for assertions in tests.
#[derive(Default)]
pub struct RecordingHal {
    lines: spin::Mutex<Vec<String>>,
}

impl RecordingHal {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            lines: spin::Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// True if any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|l| l.contains(needle))
    }
}

impl HAL for RecordingHal {
    fn debug_write(&self, msg: &str) {
        self.lines.lock().push(String::from(msg));
    }

    fn now_nanos(&self) -> u64 {
        0
    }
}
