//! Process registry for KernelCore.
//!
//! This module contains methods for:
//! - Registering processes that attach to the control channel
//! - Removing processes when they detach or terminate
//! - Snapshotting a caller's identity for policy decisions

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::cred::{CredSlot, CredentialSnapshot};
use crate::types::{CallerIdentity, Gid, Pid, Uid};
use usu_hal::HAL;

use super::{KernelCore, Process};

impl<H: HAL> KernelCore<H> {
    /// Register a process with default user credentials for `uid`/`gid`.
    ///
    /// The initial snapshot is what a new process inherits: all four
    /// uid and gid fields set, no capabilities, no supplementary groups.
    pub fn register_process(&mut self, name: &str, uid: Uid, gid: Gid) -> Pid {
        let pid = Pid(self.next_pid);
        self.next_pid += 1;
        self.insert_process(pid, name, CredentialSnapshot::for_user(uid, gid));
        pid
    }

    /// Register a process under a specific pid (callers arrive with
    /// their host pid, not one we assign).
    ///
    /// If the pid is already registered the existing entry is kept.
    pub fn register_process_with_pid(
        &mut self,
        pid: Pid,
        name: &str,
        initial: CredentialSnapshot,
    ) -> Pid {
        if self.processes.contains_key(&pid) {
            self.hal.debug_write(&alloc::format!(
                "[usu] process {} (pid {}) already attached",
                name,
                pid.0
            ));
            return pid;
        }
        if pid.0 >= self.next_pid {
            self.next_pid = pid.0 + 1;
        }
        self.insert_process(pid, name, initial);
        pid
    }

    fn insert_process(&mut self, pid: Pid, name: &str, initial: CredentialSnapshot) {
        self.hal.debug_write(&alloc::format!(
            "[usu] channel opened by pid {} (uid {}, comm={})",
            pid.0,
            initial.uid.0,
            name
        ));
        self.processes.insert(
            pid,
            Process {
                pid,
                name: String::from(name),
                creds: CredSlot::new(initial),
            },
        );
    }

    /// Remove a process from the registry. Its credential snapshot is
    /// released once the last concurrent reader drops it.
    pub fn kill_process(&mut self, pid: Pid) -> bool {
        match self.processes.remove(&pid) {
            Some(proc) => {
                self.hal.debug_write(&alloc::format!(
                    "[usu] channel closed by pid {} (comm={})",
                    pid.0,
                    proc.name
                ));
                true
            }
            None => false,
        }
    }

    /// Get process info
    pub fn get_process(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(&pid)
    }

    /// Get all registered processes
    pub fn list_processes(&self) -> Vec<(Pid, &Process)> {
        self.processes.iter().map(|(&pid, p)| (pid, p)).collect()
    }

    /// The calling process's live credential slot.
    pub(crate) fn cred_slot(&self, pid: Pid) -> Option<&CredSlot> {
        self.processes.get(&pid).map(|p| &p.creds)
    }

    /// The calling process's current live snapshot.
    pub fn current_creds(&self, pid: Pid) -> Option<Arc<CredentialSnapshot>> {
        self.cred_slot(pid).map(|slot| slot.current())
    }

    /// Snapshot the caller's identity for policy decisions.
    ///
    /// Reads the live snapshot once; the identity is immutable from
    /// then on even if a concurrent transition commits.
    pub fn caller_identity(&self, pid: Pid) -> Option<CallerIdentity> {
        let proc = self.processes.get(&pid)?;
        let creds = proc.creds.current();
        Some(CallerIdentity {
            pid,
            uid: creds.uid,
            gid: creds.gid,
            caps: creds.cap_effective,
            name: proc.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::{CapSet, CAP_SETUID};
    use crate::core::SecurityContext;
    use usu_hal::{NullHal, RecordingHal};

    fn core() -> KernelCore<NullHal> {
        KernelCore::new(NullHal, SecurityContext::new(true))
    }

    #[test]
    fn test_register_assigns_pids() {
        let mut core = core();
        let a = core.register_process("sh", Uid(2000), Gid(2000));
        let b = core.register_process("app", Uid(10001), Gid(10001));
        assert_ne!(a, b);
        assert_eq!(core.list_processes().len(), 2);
        assert_eq!(core.get_process(a).unwrap().name, "sh");
    }

    #[test]
    fn test_register_with_pid_keeps_existing() {
        let mut core = core();
        let pid = Pid(77);
        core.register_process_with_pid(pid, "first", CredentialSnapshot::for_user(Uid(1), Gid(1)));
        core.register_process_with_pid(pid, "second", CredentialSnapshot::for_user(Uid(2), Gid(2)));
        assert_eq!(core.get_process(pid).unwrap().name, "first");
        assert_eq!(core.current_creds(pid).unwrap().uid, Uid(1));
    }

    #[test]
    fn test_caller_identity_reflects_live_creds() {
        let mut core = core();
        let pid = core.register_process("sh", Uid(2000), Gid(2000));
        let identity = core.caller_identity(pid).unwrap();
        assert_eq!(identity.pid, pid);
        assert_eq!(identity.uid, Uid(2000));
        assert_eq!(identity.gid, Gid(2000));
        assert_eq!(identity.caps, CapSet::EMPTY);
        assert_eq!(identity.name, "sh");
        assert!(!identity.caps.has(CAP_SETUID));
    }

    #[test]
    fn test_kill_process_removes_entry() {
        let mut core = core();
        let pid = core.register_process("app", Uid(10001), Gid(10001));
        assert!(core.kill_process(pid));
        assert!(!core.kill_process(pid));
        assert!(core.caller_identity(pid).is_none());
    }

    #[test]
    fn test_attach_and_detach_are_logged() {
        let hal = RecordingHal::new();
        let mut core = KernelCore::new(hal, SecurityContext::new(false));
        let pid = core.register_process("shell", Uid(2000), Gid(2000));
        core.kill_process(pid);
        assert!(core.hal().contains("channel opened by pid 1"));
        assert!(core.hal().contains("channel closed by pid 1"));
    }
}
