//! The policy gate for full elevation.
//!
//! A hardcoded allow-list, evaluated in order with first match winning.
//! It governs `GrantRoot` only: SetUid/SetGid/AddSuppGid are gated by
//! their own capability checks in the transition engine and never
//! consult this list. Extending this into an authorization database,
//! signature verification, or rate limiting is out of scope.

use crate::caps::CAP_SYS_ADMIN;
use crate::types::{CallerIdentity, AID_SHELL, AID_SYSTEM};

/// Decide whether `caller` may request full elevation.
///
/// Rules, in order:
/// 1. already the super-user identity
/// 2. the interactive debug shell identity
/// 3. the system service identity
/// 4. holds CAP_SYS_ADMIN in its effective set
///
/// Anything else is denied. Denial mutates nothing.
pub fn elevation_allowed(caller: &CallerIdentity) -> bool {
    if caller.is_root() {
        return true;
    }
    if caller.uid.0 == AID_SHELL {
        return true;
    }
    if caller.uid.0 == AID_SYSTEM {
        return true;
    }
    if caller.caps.has(CAP_SYS_ADMIN) {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::{CapSet, CAP_SETUID};
    use crate::types::{Gid, Pid, Uid};
    use alloc::string::String;

    fn caller(uid: u32, caps: CapSet) -> CallerIdentity {
        CallerIdentity {
            pid: Pid(42),
            uid: Uid(uid),
            gid: Gid(uid),
            caps,
            name: String::from("test"),
        }
    }

    #[test]
    fn test_root_is_allowed() {
        assert!(elevation_allowed(&caller(0, CapSet::EMPTY)));
    }

    #[test]
    fn test_shell_and_system_are_allowed() {
        assert!(elevation_allowed(&caller(AID_SHELL, CapSet::EMPTY)));
        assert!(elevation_allowed(&caller(AID_SYSTEM, CapSet::EMPTY)));
    }

    #[test]
    fn test_admin_capability_is_allowed() {
        let mut caps = CapSet::EMPTY;
        caps.raise(CAP_SYS_ADMIN);
        assert!(elevation_allowed(&caller(9999, caps)));
    }

    #[test]
    fn test_everyone_else_is_denied() {
        assert!(!elevation_allowed(&caller(9999, CapSet::EMPTY)));
        // An unrelated capability does not open the gate.
        let mut caps = CapSet::EMPTY;
        caps.raise(CAP_SETUID);
        assert!(!elevation_allowed(&caller(1013, caps)));
    }
}
