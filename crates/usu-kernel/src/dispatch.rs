//! Raw command dispatch.
//!
//! This module is the control-channel entry point. It handles:
//! - Resolving the caller's identity snapshot
//! - Decoding the raw (opcode, payload) pair into a typed `Command`
//! - Executing the command against the transition engine
//! - Recording the decision in the audit journal
//!
//! The channel itself is stateless: no per-session data survives
//! between commands, and a transition either commits fully or leaves
//! the caller's live snapshot untouched.

use alloc::vec::Vec;

use crate::error::SuError;
use crate::kernel::Kernel;
use crate::types::{CallerIdentity, Pid};
use usu_hal::HAL;
use usu_proto::{write_i32, Command, PROTOCOL_VERSION, STATUS_OK};

/// Execute a raw command from a registered process.
///
/// Returns (status, out payload). The status is `STATUS_OK` or one of
/// the negative codes from `usu-proto`; the out payload is non-empty
/// only for CheckRoot and GetVersion.
pub fn execute_raw_command<H: HAL>(
    kernel: &Kernel<H>,
    sender: Pid,
    opcode: u32,
    payload: &[u8],
) -> (i32, Vec<u8>) {
    let timestamp = kernel.uptime_nanos();

    // A command from a pid that never attached to the channel has no
    // identity to read; the exchange is treated as a failed transfer.
    let caller = match kernel.core.caller_identity(sender) {
        Some(identity) => identity,
        None => {
            kernel.hal().debug_write(&alloc::format!(
                "[usu] command 0x{:02x} from unattached pid {}",
                opcode,
                sender.0
            ));
            return (SuError::InvalidTransfer.status(), Vec::new());
        }
    };

    let (result, out) = match Command::decode(opcode, payload) {
        Ok(command) => execute_command(kernel, &caller, &command),
        Err(e) => {
            kernel.hal().debug_write(&alloc::format!(
                "[usu] invalid command 0x{:02x} from pid {}",
                opcode,
                sender.0
            ));
            (Err(SuError::from(e)), Vec::new())
        }
    };

    let status = match result {
        Ok(()) => STATUS_OK,
        Err(e) => e.status(),
    };
    kernel
        .audit()
        .record(timestamp, caller.pid, caller.uid, &caller.name, opcode, status);

    (status, out)
}

/// Execute a decoded command on behalf of `caller`.
fn execute_command<H: HAL>(
    kernel: &Kernel<H>,
    caller: &CallerIdentity,
    command: &Command,
) -> (Result<(), SuError>, Vec<u8>) {
    match command {
        Command::GrantRoot => (kernel.core.grant_root(caller), Vec::new()),
        Command::DropRoot { target } => (kernel.core.drop_root(caller, *target), Vec::new()),
        Command::CheckRoot => match kernel.core.check_root(caller) {
            Ok(rooted) => (Ok(()), write_i32(rooted as i32).to_vec()),
            Err(e) => (Err(e), Vec::new()),
        },
        Command::SetUid { uid } => (kernel.core.set_uid(caller, *uid), Vec::new()),
        Command::SetGid { gid } => (kernel.core.set_gid(caller, *gid), Vec::new()),
        Command::GetVersion => (Ok(()), write_i32(PROTOCOL_VERSION).to_vec()),
        Command::SetContext { label } => (kernel.core.set_context(caller, label), Vec::new()),
        Command::AddSuppGid { gid } => (kernel.core.add_supp_gid(caller, *gid), Vec::new()),
    }
}
