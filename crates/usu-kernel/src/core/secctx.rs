//! Security context stub.
//!
//! Label transitions need an enforcing subsystem this core does not
//! ship: when one is present the request is logged and reported as
//! success without any real transition, and when it is absent the
//! command is `Unsupported`. Real enforcement is a separate subsystem
//! and must not be folded in here.

use crate::error::SuError;
use crate::types::CallerIdentity;
use usu_hal::HAL;

use super::KernelCore;

/// Presence of the label-transition subsystem, probed once at kernel
/// construction.
#[derive(Clone, Copy, Debug)]
pub struct SecurityContext {
    present: bool,
}

impl SecurityContext {
    /// Create the stub with the probed presence flag.
    pub fn new(present: bool) -> Self {
        Self { present }
    }

    /// True if the enforcing subsystem was present at construction.
    pub fn is_present(&self) -> bool {
        self.present
    }
}

impl<H: HAL> KernelCore<H> {
    /// Handle a label transition request. Log-only by contract.
    pub fn set_context(&self, caller: &CallerIdentity, label: &str) -> Result<(), SuError> {
        if !self.secctx.is_present() {
            self.hal.debug_write("[usu] context subsystem not present");
            return Err(SuError::Unsupported);
        }
        self.hal.debug_write(&alloc::format!(
            "[usu] context change requested by pid {}: {}",
            caller.pid.0,
            label
        ));
        self.hal
            .debug_write("[usu] label transition requires external policy; not transitioned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gid, Uid};
    use usu_hal::RecordingHal;

    #[test]
    fn test_set_context_present_logs_and_succeeds() {
        let mut core = KernelCore::new(RecordingHal::new(), SecurityContext::new(true));
        let pid = core.register_process("sh", Uid(2000), Gid(2000));
        let caller = core.caller_identity(pid).unwrap();
        let before = core.current_creds(pid).unwrap();

        core.set_context(&caller, "u:r:su:s0").unwrap();

        assert!(core.hal().contains("context change requested by pid 1: u:r:su:s0"));
        // stub performs no transition of any kind
        assert_eq!(*before, *core.current_creds(pid).unwrap());
    }

    #[test]
    fn test_set_context_absent_is_unsupported() {
        let mut core = KernelCore::new(RecordingHal::new(), SecurityContext::new(false));
        let pid = core.register_process("sh", Uid(2000), Gid(2000));
        let caller = core.caller_identity(pid).unwrap();

        assert_eq!(
            core.set_context(&caller, "u:r:su:s0"),
            Err(SuError::Unsupported)
        );
    }
}
