//! usu credential transition core
//!
//! This crate implements the privilege mediation core:
//! - Credential snapshots and their atomic per-process publish slot
//! - The policy gate for full elevation
//! - The credential transition engine (grant, drop, set, group growth)
//! - The security context stub
//! - Raw control-channel dispatch with audit logging
//!
//! # Module Organization
//!
//! - `types` - Core types (Pid, Uid, Gid, CallerIdentity, AID_*)
//! - `caps` - Fixed-width capability bitsets
//! - `cred` - CredentialSnapshot, ROOT_GROUPS, CredSlot
//! - `groups` - Supplementary group list growth
//! - `policy` - The GrantRoot allow-list
//! - `audit` - Append-only audit journal
//! - `error` - The closed error taxonomy
//! - `dispatch` - Raw command dispatch
//! - `core` - KernelCore implementation (internal)
//! - `kernel` - Kernel wrapper with audit integration

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

// Submodules
pub mod audit;
pub mod caps;
pub mod cred;
pub mod dispatch;
pub mod error;
pub mod groups;
pub mod policy;
pub mod types;

// Internal modules
mod core;
mod kernel;

// Re-export the public surface
pub use audit::{AuditEntry, AuditLog};
pub use caps::{CapSet, CAP_COUNT, CAP_SETGID, CAP_SETUID, CAP_SYS_ADMIN};
pub use core::{KernelCore, Process, SecurityContext};
pub use cred::{CredSlot, CredentialSnapshot, ROOT_GROUPS};
pub use dispatch::execute_raw_command;
pub use error::SuError;
pub use kernel::Kernel;
pub use types::{CallerIdentity, Gid, Pid, Uid};

// Re-export HAL types
pub use usu_hal::{NullHal, RecordingHal, HAL};

// Re-export the wire ABI
pub use usu_proto::{Command, DecodeError, PROTOCOL_VERSION};
