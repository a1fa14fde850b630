//! The credential transition engine.
//!
//! Every mutating command follows the same three steps:
//!
//! 1. Acquire a private copy seeded from the caller's live snapshot
//!    (`CredSlot::prepare`; allocation failure is `ResourceExhausted`
//!    and the live snapshot is untouched).
//! 2. Mutate only the fields the command targets, on the private copy.
//! 3. Publish the copy in one atomic replace (`CredSlot::publish`).
//!
//! A failure at any step leaves the live snapshot byte-for-byte
//! unchanged; there is no retry and no partial progress. CheckRoot and
//! GetVersion are read-only and never enter this path.

use crate::caps::{CapSet, CAP_COUNT, CAP_SETGID, CAP_SETUID};
use crate::cred::ROOT_GROUPS;
use crate::error::SuError;
use crate::types::{CallerIdentity, Gid, Uid, AID_ROOT};
use crate::{groups, policy};
use usu_hal::HAL;

use super::KernelCore;

impl<H: HAL> KernelCore<H> {
    /// Full elevation: all identity fields to root, every capability
    /// set raised, and the supplementary list replaced wholesale with
    /// the [`ROOT_GROUPS`] roster.
    pub fn grant_root(&self, caller: &CallerIdentity) -> Result<(), SuError> {
        if !policy::elevation_allowed(caller) {
            self.hal.debug_write(&alloc::format!(
                "[usu] permission denied for pid {} (uid {}, comm={})",
                caller.pid.0,
                caller.uid.0,
                caller.name
            ));
            return Err(SuError::PermissionDenied);
        }

        let slot = self.cred_slot(caller.pid).ok_or(SuError::InvalidTransfer)?;
        let mut cred = slot.prepare()?;

        cred.set_uids(Uid(AID_ROOT));
        cred.set_gids(Gid(AID_ROOT));
        for cap in 0..CAP_COUNT {
            cred.cap_effective.raise(cap);
            cred.cap_permitted.raise(cap);
            cred.cap_inheritable.raise(cap);
        }
        cred.cap_bset = CapSet::FULL;
        cred.cap_ambient = CapSet::FULL;
        cred.groups = ROOT_GROUPS.to_vec();

        slot.publish(cred);
        self.hal.debug_write(&alloc::format!(
            "[usu] granted root to pid {}, comm={} (original uid {})",
            caller.pid.0,
            caller.name,
            caller.uid.0
        ));
        Ok(())
    }

    /// Drop to `target`: the one identifier is applied to both the uid
    /// and gid quadruples, and all five capability sets are cleared.
    ///
    /// The single-identifier shape is deliberate wire behavior; a
    /// two-argument drop would be a new command, not a change here.
    pub fn drop_root(&self, caller: &CallerIdentity, target: u32) -> Result<(), SuError> {
        let slot = self.cred_slot(caller.pid).ok_or(SuError::InvalidTransfer)?;
        let mut cred = slot.prepare()?;

        cred.set_uids(Uid(target));
        cred.set_gids(Gid(target));
        cred.clear_caps();

        slot.publish(cred);
        self.hal.debug_write(&alloc::format!(
            "[usu] dropped privileges for pid {} to uid {}, gid {}",
            caller.pid.0,
            target,
            target
        ));
        Ok(())
    }

    /// Set the uid quadruple. Requires CAP_SETUID; capability sets and
    /// the group list are left untouched.
    pub fn set_uid(&self, caller: &CallerIdentity, uid: u32) -> Result<(), SuError> {
        if !caller.caps.has(CAP_SETUID) {
            return Err(SuError::CapabilityMissing);
        }
        let slot = self.cred_slot(caller.pid).ok_or(SuError::InvalidTransfer)?;
        let mut cred = slot.prepare()?;

        cred.set_uids(Uid(uid));

        slot.publish(cred);
        self.hal.debug_write(&alloc::format!(
            "[usu] set uid to {} for pid {}",
            uid,
            caller.pid.0
        ));
        Ok(())
    }

    /// Set the gid quadruple. Requires CAP_SETGID; capability sets and
    /// the group list are left untouched.
    pub fn set_gid(&self, caller: &CallerIdentity, gid: u32) -> Result<(), SuError> {
        if !caller.caps.has(CAP_SETGID) {
            return Err(SuError::CapabilityMissing);
        }
        let slot = self.cred_slot(caller.pid).ok_or(SuError::InvalidTransfer)?;
        let mut cred = slot.prepare()?;

        cred.set_gids(Gid(gid));

        slot.publish(cred);
        self.hal.debug_write(&alloc::format!(
            "[usu] set gid to {} for pid {}",
            gid,
            caller.pid.0
        ));
        Ok(())
    }

    /// Append one supplementary gid. Requires CAP_SETGID. The grown
    /// list replaces the old one in the same atomic commit.
    pub fn add_supp_gid(&self, caller: &CallerIdentity, gid: u32) -> Result<(), SuError> {
        if !caller.caps.has(CAP_SETGID) {
            return Err(SuError::CapabilityMissing);
        }
        let slot = self.cred_slot(caller.pid).ok_or(SuError::InvalidTransfer)?;
        let mut cred = slot.prepare()?;

        cred.groups = groups::grow(&cred.groups, Gid(gid))?;

        slot.publish(cred);
        self.hal.debug_write(&alloc::format!(
            "[usu] added supplementary gid {} to pid {}",
            gid,
            caller.pid.0
        ));
        Ok(())
    }

    /// Read-only root query: true iff the caller's current uid is 0.
    pub fn check_root(&self, caller: &CallerIdentity) -> Result<bool, SuError> {
        let slot = self.cred_slot(caller.pid).ok_or(SuError::InvalidTransfer)?;
        Ok(slot.current().uid.0 == AID_ROOT)
    }
}
