//! KernelCore implementation - modular organization of core state and methods.
//!
//! This module contains the core state and its method implementations,
//! split into logical submodules:
//!
//! - `process` - Process registry (register, kill, caller identity)
//! - `transition` - The credential transition engine
//! - `secctx` - Security context stub (log-only label transitions)

mod process;
mod secctx;
mod transition;

pub use secctx::SecurityContext;

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::cred::CredSlot;
use crate::types::Pid;
use usu_hal::HAL;

/// A registered process attached to the control channel.
pub struct Process {
    /// Process id
    pub pid: Pid,
    /// Process name
    pub name: String,
    /// Live credential slot; the only state a transition may replace
    pub creds: CredSlot,
}

/// The core holds the process registry and the collaborators every
/// transition needs.
///
/// Credential transitions take `&self`: each one touches only the
/// issuing process's own [`CredSlot`], which supplies its own atomic
/// publish, so distinct callers never contend on a shared lock.
/// Registry changes (register/kill) take `&mut self`.
pub struct KernelCore<H: HAL> {
    /// HAL reference for debug output only (no state changes)
    hal: H,
    /// Registered processes
    pub(crate) processes: BTreeMap<Pid, Process>,
    /// Label transition collaborator (stub)
    pub(crate) secctx: SecurityContext,
    /// Next process id to assign
    pub(crate) next_pid: u64,
}

impl<H: HAL> KernelCore<H> {
    /// Create a new core with the given HAL and security context stub.
    pub fn new(hal: H, secctx: SecurityContext) -> Self {
        Self {
            hal,
            processes: BTreeMap::new(),
            secctx,
            next_pid: 1,
        }
    }

    /// Get a reference to the HAL (for debug output)
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Get the security context collaborator.
    pub fn security_context(&self) -> &SecurityContext {
        &self.secctx
    }
}
