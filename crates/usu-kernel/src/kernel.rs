//! Kernel wrapper implementation.
//!
//! The Kernel struct is a thin wrapper around KernelCore that adds the
//! audit journal and the boot clock. Raw commands enter through
//! `dispatch::execute_raw_command`; registration of processes that
//! attach to the control channel goes through the methods here. The
//! device node carrying the channel is an external collaborator with
//! its own init/teardown lifecycle, outside this crate.

use alloc::sync::Arc;

use crate::audit::AuditLog;
use crate::core::{KernelCore, SecurityContext};
use crate::cred::CredentialSnapshot;
use crate::types::{Gid, Pid, Uid};
use usu_hal::HAL;

/// The privilege mediator, generic over the HAL implementation.
pub struct Kernel<H: HAL> {
    /// The core holding the process registry and collaborators.
    /// Note: pub(crate) for dispatch module access
    pub(crate) core: KernelCore<H>,
    /// Append-only audit journal of accepted and rejected commands
    audit: AuditLog,
    /// Boot time (for uptime calculation)
    boot_time: u64,
}

impl<H: HAL> Kernel<H> {
    /// Create a new kernel with the given HAL and context stub.
    pub fn new(hal: H, secctx: SecurityContext) -> Self {
        let boot_time = hal.now_nanos();
        if secctx.is_present() {
            hal.debug_write("[usu] context subsystem present (label transitions are log-only)");
        } else {
            hal.debug_write("[usu] context subsystem not present");
        }
        hal.debug_write("[usu] ready");
        Self {
            core: KernelCore::new(hal, secctx),
            audit: AuditLog::new(),
            boot_time,
        }
    }

    /// Get reference to HAL
    pub fn hal(&self) -> &H {
        self.core.hal()
    }

    /// Get the audit journal.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Get uptime in nanoseconds
    pub fn uptime_nanos(&self) -> u64 {
        self.core.hal().now_nanos().saturating_sub(self.boot_time)
    }

    // ========================================================================
    // Process Management
    // ========================================================================

    /// Register a process with default user credentials.
    pub fn register_process(&mut self, name: &str, uid: Uid, gid: Gid) -> Pid {
        self.core.register_process(name, uid, gid)
    }

    /// Register a process under its host pid with explicit initial
    /// credentials (inherited from its parent).
    pub fn register_process_with_pid(
        &mut self,
        pid: Pid,
        name: &str,
        initial: CredentialSnapshot,
    ) -> Pid {
        self.core.register_process_with_pid(pid, name, initial)
    }

    /// Remove a process from the registry.
    pub fn kill_process(&mut self, pid: Pid) -> bool {
        self.core.kill_process(pid)
    }

    /// The process's current live credential snapshot.
    pub fn current_creds(&self, pid: Pid) -> Option<Arc<CredentialSnapshot>> {
        self.core.current_creds(pid)
    }

    /// Get a reference to the core (read-only helpers and transitions).
    pub fn core(&self) -> &KernelCore<H> {
        &self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usu_hal::{NullHal, RecordingHal};

    #[test]
    fn test_new_kernel_logs_context_probe() {
        let kernel = Kernel::new(RecordingHal::new(), SecurityContext::new(true));
        assert!(kernel.hal().contains("context subsystem present"));
        assert!(kernel.hal().contains("[usu] ready"));
    }

    #[test]
    fn test_register_and_read_creds() {
        let mut kernel = Kernel::new(NullHal, SecurityContext::new(false));
        let pid = kernel.register_process("sh", Uid(2000), Gid(2000));
        let creds = kernel.current_creds(pid).unwrap();
        assert_eq!(creds.uid, Uid(2000));
        assert!(kernel.audit().is_empty());
    }
}
