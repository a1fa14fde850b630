//! Credential snapshots and the per-process live-credential slot.
//!
//! A [`CredentialSnapshot`] is the complete privilege state of one
//! process: the uid and gid quadruples, the five capability bitsets,
//! and the ordered supplementary group list. The live snapshot is never
//! edited in place — a transition builds a private copy off to the side
//! and publishes it through [`CredSlot`] in one atomic replace, so any
//! concurrent reader of the same process observes either the fully-old
//! or the fully-new state.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::caps::CapSet;
use crate::error::SuError;
use crate::types::{
    Gid, Uid, AID_CACHE, AID_DIAG, AID_GRAPHICS, AID_INET, AID_MEDIA, AID_NET_BT_ADMIN, AID_ROOT,
    AID_SDCARD_RW, AID_SHELL, AID_WIFI,
};

/// Supplementary groups installed by a full elevation, in this order.
///
/// This is a compiled constant, not policy-derived: root on this
/// platform conventionally carries the shell, cache, diagnostics,
/// graphics, storage-write, media, and network groups plus the two
/// low-level socket groups.
pub const ROOT_GROUPS: [Gid; 10] = [
    Gid(AID_ROOT),
    Gid(AID_SHELL),
    Gid(AID_CACHE),
    Gid(AID_DIAG),
    Gid(AID_GRAPHICS),
    Gid(AID_SDCARD_RW),
    Gid(AID_MEDIA),
    Gid(AID_WIFI),
    Gid(AID_INET),
    Gid(AID_NET_BT_ADMIN),
];

/// The complete privilege state of a process at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialSnapshot {
    /// Real uid
    pub uid: Uid,
    /// Effective uid
    pub euid: Uid,
    /// Saved uid
    pub suid: Uid,
    /// Filesystem uid
    pub fsuid: Uid,
    /// Real gid
    pub gid: Gid,
    /// Effective gid
    pub egid: Gid,
    /// Saved gid
    pub sgid: Gid,
    /// Filesystem gid
    pub fsgid: Gid,
    /// Effective capability set
    pub cap_effective: CapSet,
    /// Permitted capability set
    pub cap_permitted: CapSet,
    /// Inheritable capability set
    pub cap_inheritable: CapSet,
    /// Bounding capability set
    pub cap_bset: CapSet,
    /// Ambient capability set
    pub cap_ambient: CapSet,
    /// Supplementary groups, caller order and duplicates preserved
    pub groups: Vec<Gid>,
}

impl CredentialSnapshot {
    /// Default credentials for an unprivileged user: all four uid and
    /// gid fields set, no capabilities, no supplementary groups.
    pub fn for_user(uid: Uid, gid: Gid) -> Self {
        Self {
            uid,
            euid: uid,
            suid: uid,
            fsuid: uid,
            gid,
            egid: gid,
            sgid: gid,
            fsgid: gid,
            cap_effective: CapSet::EMPTY,
            cap_permitted: CapSet::EMPTY,
            cap_inheritable: CapSet::EMPTY,
            cap_bset: CapSet::EMPTY,
            cap_ambient: CapSet::EMPTY,
            groups: Vec::new(),
        }
    }

    /// The shape a full elevation commits: all identity fields 0, every
    /// capability set full, and the [`ROOT_GROUPS`] roster.
    pub fn root() -> Self {
        Self {
            uid: Uid(AID_ROOT),
            euid: Uid(AID_ROOT),
            suid: Uid(AID_ROOT),
            fsuid: Uid(AID_ROOT),
            gid: Gid(AID_ROOT),
            egid: Gid(AID_ROOT),
            sgid: Gid(AID_ROOT),
            fsgid: Gid(AID_ROOT),
            cap_effective: CapSet::FULL,
            cap_permitted: CapSet::FULL,
            cap_inheritable: CapSet::FULL,
            cap_bset: CapSet::FULL,
            cap_ambient: CapSet::FULL,
            groups: ROOT_GROUPS.to_vec(),
        }
    }

    /// Set all four uid fields to the same value.
    pub fn set_uids(&mut self, uid: Uid) {
        self.uid = uid;
        self.euid = uid;
        self.suid = uid;
        self.fsuid = uid;
    }

    /// Set all four gid fields to the same value.
    pub fn set_gids(&mut self, gid: Gid) {
        self.gid = gid;
        self.egid = gid;
        self.sgid = gid;
        self.fsgid = gid;
    }

    /// Clear all five capability sets.
    pub fn clear_caps(&mut self) {
        self.cap_effective = CapSet::EMPTY;
        self.cap_permitted = CapSet::EMPTY;
        self.cap_inheritable = CapSet::EMPTY;
        self.cap_bset = CapSet::EMPTY;
        self.cap_ambient = CapSet::EMPTY;
    }
}

/// Holder of a process's live credentials.
///
/// The mutex guards only the instant of the `Arc` swap, never the build
/// of a new snapshot. Readers take an `Arc` clone and can keep reading
/// a superseded snapshot after a transition commits; it is released
/// when the last reader drops it.
pub struct CredSlot {
    live: spin::Mutex<Arc<CredentialSnapshot>>,
}

impl CredSlot {
    /// Create a slot holding the given initial snapshot.
    pub fn new(initial: CredentialSnapshot) -> Self {
        Self {
            live: spin::Mutex::new(Arc::new(initial)),
        }
    }

    /// The current live snapshot.
    pub fn current(&self) -> Arc<CredentialSnapshot> {
        self.live.lock().clone()
    }

    /// Build a private, mutable copy seeded from the live snapshot.
    ///
    /// The group list is the only unbounded allocation, so it is
    /// reserved fallibly; on failure the live snapshot is untouched and
    /// the caller gets `ResourceExhausted`.
    pub fn prepare(&self) -> Result<CredentialSnapshot, SuError> {
        let live = self.current();
        let mut groups = Vec::new();
        groups
            .try_reserve_exact(live.groups.len())
            .map_err(|_| SuError::ResourceExhausted)?;
        groups.extend_from_slice(&live.groups);
        Ok(CredentialSnapshot {
            uid: live.uid,
            euid: live.euid,
            suid: live.suid,
            fsuid: live.fsuid,
            gid: live.gid,
            egid: live.egid,
            sgid: live.sgid,
            fsgid: live.fsgid,
            cap_effective: live.cap_effective,
            cap_permitted: live.cap_permitted,
            cap_inheritable: live.cap_inheritable,
            cap_bset: live.cap_bset,
            cap_ambient: live.cap_ambient,
            groups,
        })
    }

    /// Publish a snapshot as the new live credentials.
    ///
    /// The superseded snapshot is released only after the replace, and
    /// only once the last concurrent reader drops its `Arc`.
    pub fn publish(&self, snapshot: CredentialSnapshot) {
        let superseded = {
            let mut live = self.live.lock();
            core::mem::replace(&mut *live, Arc::new(snapshot))
        };
        drop(superseded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::CAP_SETUID;

    #[test]
    fn test_root_snapshot_shape() {
        let root = CredentialSnapshot::root();
        assert_eq!(root.uid, Uid(0));
        assert_eq!(root.euid, Uid(0));
        assert_eq!(root.suid, Uid(0));
        assert_eq!(root.fsuid, Uid(0));
        assert_eq!(root.gid, Gid(0));
        assert_eq!(root.fsgid, Gid(0));
        assert!(root.cap_effective.is_full());
        assert!(root.cap_permitted.is_full());
        assert!(root.cap_inheritable.is_full());
        assert!(root.cap_bset.is_full());
        assert!(root.cap_ambient.is_full());
        assert_eq!(root.groups, ROOT_GROUPS.to_vec());
    }

    #[test]
    fn test_user_snapshot_shape() {
        let cred = CredentialSnapshot::for_user(Uid(2000), Gid(2000));
        assert_eq!(cred.uid, Uid(2000));
        assert_eq!(cred.euid, Uid(2000));
        assert_eq!(cred.egid, Gid(2000));
        assert!(cred.cap_effective.is_empty());
        assert!(cred.groups.is_empty());
    }

    #[test]
    fn test_prepare_does_not_touch_live() {
        let slot = CredSlot::new(CredentialSnapshot::for_user(Uid(1000), Gid(1000)));
        let mut copy = slot.prepare().unwrap();
        copy.set_uids(Uid(0));
        copy.cap_effective.raise(CAP_SETUID);
        copy.groups.push(Gid(3003));

        let live = slot.current();
        assert_eq!(live.uid, Uid(1000));
        assert!(live.cap_effective.is_empty());
        assert!(live.groups.is_empty());
    }

    #[test]
    fn test_publish_replaces_whole_snapshot() {
        let slot = CredSlot::new(CredentialSnapshot::for_user(Uid(1000), Gid(1000)));
        let before = slot.current();

        slot.publish(CredentialSnapshot::root());
        let after = slot.current();

        assert_eq!(*after, CredentialSnapshot::root());
        // A reader holding the superseded snapshot still sees it whole.
        assert_eq!(before.uid, Uid(1000));
        assert!(before.groups.is_empty());
    }
}
