//! Core kernel types
//!
//! This module contains the fundamental types used throughout the core:
//! - Process, user, and group identifiers
//! - The read-only caller identity handed to policy decisions
//! - Reserved platform identities (the AID_* namespace)

use alloc::string::String;

use crate::caps::CapSet;

/// Process identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(pub u64);

/// User identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uid(pub u32);

/// Group identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gid(pub u32);

// ============================================================================
// Reserved platform identities
// ============================================================================

/// Traditional unix root user
pub const AID_ROOT: u32 = 0;
/// System server
pub const AID_SYSTEM: u32 = 1000;
/// Graphics devices
pub const AID_GRAPHICS: u32 = 1003;
/// Wifi subsystem
pub const AID_WIFI: u32 = 1010;
/// Mediaserver process
pub const AID_MEDIA: u32 = 1013;
/// External storage write access
pub const AID_SDCARD_RW: u32 = 1015;
/// Interactive debug shell (adb)
pub const AID_SHELL: u32 = 2000;
/// Cache access
pub const AID_CACHE: u32 = 2001;
/// Access to diagnostic resources
pub const AID_DIAG: u32 = 2002;
/// Bluetooth admin network group
pub const AID_NET_BT_ADMIN: u32 = 3002;
/// Socket-creating network group
pub const AID_INET: u32 = 3003;

/// Snapshot of who is calling, taken when a command enters the channel.
///
/// Read-only input to the policy gate and the per-command capability
/// checks; the transition engine never mutates it.
#[derive(Clone, Debug)]
pub struct CallerIdentity {
    /// Calling process id
    pub pid: Pid,
    /// Current real uid
    pub uid: Uid,
    /// Current real gid
    pub gid: Gid,
    /// Current effective capability set
    pub caps: CapSet,
    /// Process name
    pub name: String,
}

impl CallerIdentity {
    /// True if the caller's current uid is the super-user identity.
    pub fn is_root(&self) -> bool {
        self.uid.0 == AID_ROOT
    }
}
