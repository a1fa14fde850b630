//! Append-only audit journal.
//!
//! Every command that reaches the control channel is recorded here with
//! the caller's pid, uid, and process name, whether it was accepted or
//! rejected. Appends are best-effort observability: ordering across
//! concurrent callers is not guaranteed relative to commit order.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{Pid, Uid};

/// One audited command decision.
#[derive(Clone, Debug)]
pub struct AuditEntry {
    /// Monotonic sequence number within this log
    pub seq: u64,
    /// Uptime in nanoseconds when the command entered the channel
    pub timestamp: u64,
    /// Calling process id
    pub pid: Pid,
    /// Caller's uid at the time of the call
    pub uid: Uid,
    /// Caller's process name
    pub comm: String,
    /// Raw command opcode
    pub opcode: u32,
    /// Wire status returned to the caller
    pub status: i32,
}

struct AuditInner {
    entries: Vec<AuditEntry>,
    next_seq: u64,
}

/// The audit log. Interior mutability so concurrent callers can append
/// without an exclusive borrow of the kernel.
pub struct AuditLog {
    inner: spin::Mutex<AuditInner>,
}

impl AuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            inner: spin::Mutex::new(AuditInner {
                entries: Vec::new(),
                next_seq: 0,
            }),
        }
    }

    /// Append one decision, returning its sequence number.
    pub fn record(
        &self,
        timestamp: u64,
        pid: Pid,
        uid: Uid,
        comm: &str,
        opcode: u32,
        status: i32,
    ) -> u64 {
        let mut inner = self.inner.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.push(AuditEntry {
            seq,
            timestamp,
            pid,
            uid,
            comm: String::from(comm),
            opcode,
            status,
        });
        seq
    }

    /// Snapshot of all entries recorded so far.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.inner.lock().entries.clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
