//! Control-channel ABI for usu.
//!
//! This crate is the single source of truth for everything a caller and
//! the kernel must agree on:
//! - Command opcodes and the protocol version
//! - Wire status codes (0 = success, negative = error)
//! - Payload layout (little-endian u32 arguments, NUL-terminated
//!   context label) and the typed [`Command`] decoder
//!
//! The channel is stateless: every command is a one-shot request with a
//! fixed-shape in payload and a fixed-shape out payload.

#![no_std]
extern crate alloc;

use alloc::string::String;

// ============================================================================
// Canonical Command Opcodes (ABI)
// ============================================================================

/// Elevate the caller to full root credentials (policy gated)
pub const CMD_GRANT_ROOT: u32 = 0x01;
/// Drop the caller to a target identity, clearing all capabilities
pub const CMD_DROP_ROOT: u32 = 0x02;
/// Query whether the caller's current uid is root
pub const CMD_CHECK_ROOT: u32 = 0x03;
/// Set the caller's uid quadruple (requires CAP_SETUID)
pub const CMD_SET_UID: u32 = 0x04;
/// Set the caller's gid quadruple (requires CAP_SETGID)
pub const CMD_SET_GID: u32 = 0x05;
/// Query the protocol version
pub const CMD_GET_VERSION: u32 = 0x06;
/// Request a security context (label) transition - stub, log only
pub const CMD_SET_CONTEXT: u32 = 0x07;
/// Append one supplementary gid (requires CAP_SETGID)
pub const CMD_ADD_SUPP_GID: u32 = 0x08;

/// Protocol version returned by `CMD_GET_VERSION`.
pub const PROTOCOL_VERSION: i32 = 1;

/// Context payload buffer size. The label itself is at most
/// `MAX_CONTEXT_LEN - 1` bytes followed by a NUL terminator.
pub const MAX_CONTEXT_LEN: usize = 256;

// ============================================================================
// Wire status codes
// ============================================================================

/// Command completed and committed.
pub const STATUS_OK: i32 = 0;
/// Policy gate rejected the elevation request.
pub const STATUS_PERMISSION_DENIED: i32 = -1;
/// Caller lacks the capability the command requires.
pub const STATUS_CAPABILITY_MISSING: i32 = -2;
/// Allocation for the private credential copy failed.
pub const STATUS_RESOURCE_EXHAUSTED: i32 = -3;
/// Payload could not be transferred across the trust boundary.
pub const STATUS_INVALID_TRANSFER: i32 = -4;
/// Opcode is not part of this protocol version.
pub const STATUS_UNKNOWN_COMMAND: i32 = -5;
/// The requested subsystem is not present on this host.
pub const STATUS_UNSUPPORTED: i32 = -6;

// ============================================================================
// Typed commands
// ============================================================================

/// A decoded control-channel command.
///
/// Carries no session state; each variant is a complete, one-shot
/// operation on the calling process's own credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Full elevation (CMD_GRANT_ROOT 0x01)
    GrantRoot,
    /// Drop to `target`, applied to both uid and gid quadruples
    /// (CMD_DROP_ROOT 0x02)
    DropRoot { target: u32 },
    /// Root query (CMD_CHECK_ROOT 0x03)
    CheckRoot,
    /// Set uid quadruple (CMD_SET_UID 0x04)
    SetUid { uid: u32 },
    /// Set gid quadruple (CMD_SET_GID 0x05)
    SetGid { gid: u32 },
    /// Version query (CMD_GET_VERSION 0x06)
    GetVersion,
    /// Label transition request (CMD_SET_CONTEXT 0x07)
    SetContext { label: String },
    /// Append supplementary gid (CMD_ADD_SUPP_GID 0x08)
    AddSuppGid { gid: u32 },
}

/// Why a raw command could not be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload shape does not match the opcode's contract.
    MalformedPayload,
    /// Opcode is not part of the protocol.
    UnknownOpcode,
}

impl Command {
    /// Decode a raw (opcode, payload) pair from the channel.
    pub fn decode(opcode: u32, payload: &[u8]) -> Result<Command, DecodeError> {
        match opcode {
            CMD_GRANT_ROOT => Ok(Command::GrantRoot),
            CMD_DROP_ROOT => Ok(Command::DropRoot {
                target: read_u32(payload)?,
            }),
            CMD_CHECK_ROOT => Ok(Command::CheckRoot),
            CMD_SET_UID => Ok(Command::SetUid {
                uid: read_u32(payload)?,
            }),
            CMD_SET_GID => Ok(Command::SetGid {
                gid: read_u32(payload)?,
            }),
            CMD_GET_VERSION => Ok(Command::GetVersion),
            CMD_SET_CONTEXT => Ok(Command::SetContext {
                label: read_context_label(payload)?,
            }),
            CMD_ADD_SUPP_GID => Ok(Command::AddSuppGid {
                gid: read_u32(payload)?,
            }),
            _ => Err(DecodeError::UnknownOpcode),
        }
    }

    /// The opcode this command travels under.
    pub fn opcode(&self) -> u32 {
        match self {
            Command::GrantRoot => CMD_GRANT_ROOT,
            Command::DropRoot { .. } => CMD_DROP_ROOT,
            Command::CheckRoot => CMD_CHECK_ROOT,
            Command::SetUid { .. } => CMD_SET_UID,
            Command::SetGid { .. } => CMD_SET_GID,
            Command::GetVersion => CMD_GET_VERSION,
            Command::SetContext { .. } => CMD_SET_CONTEXT,
            Command::AddSuppGid { .. } => CMD_ADD_SUPP_GID,
        }
    }
}

// ============================================================================
// Payload helpers
// ============================================================================

/// Read exactly one little-endian u32 argument.
fn read_u32(payload: &[u8]) -> Result<u32, DecodeError> {
    let bytes: [u8; 4] = payload
        .try_into()
        .map_err(|_| DecodeError::MalformedPayload)?;
    Ok(u32::from_le_bytes(bytes))
}

/// Encode an i32 out payload (CheckRoot and GetVersion results).
pub fn write_i32(value: i32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Extract the context label from a `CMD_SET_CONTEXT` payload.
///
/// The payload is at most [`MAX_CONTEXT_LEN`] bytes and must contain a
/// NUL terminator; the label is everything before the first NUL and
/// must be valid UTF-8.
fn read_context_label(payload: &[u8]) -> Result<String, DecodeError> {
    if payload.is_empty() || payload.len() > MAX_CONTEXT_LEN {
        return Err(DecodeError::MalformedPayload);
    }
    let nul = payload
        .iter()
        .position(|&b| b == 0)
        .ok_or(DecodeError::MalformedPayload)?;
    let label = core::str::from_utf8(&payload[..nul]).map_err(|_| DecodeError::MalformedPayload)?;
    Ok(String::from(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_u32_commands() {
        let cmd = Command::decode(CMD_DROP_ROOT, &2000u32.to_le_bytes()).unwrap();
        assert_eq!(cmd, Command::DropRoot { target: 2000 });

        let cmd = Command::decode(CMD_SET_UID, &1013u32.to_le_bytes()).unwrap();
        assert_eq!(cmd, Command::SetUid { uid: 1013 });

        let cmd = Command::decode(CMD_ADD_SUPP_GID, &3003u32.to_le_bytes()).unwrap();
        assert_eq!(cmd, Command::AddSuppGid { gid: 3003 });
    }

    #[test]
    fn test_decode_rejects_short_and_long_payloads() {
        assert_eq!(
            Command::decode(CMD_SET_UID, &[1, 2, 3]),
            Err(DecodeError::MalformedPayload)
        );
        assert_eq!(
            Command::decode(CMD_SET_GID, &[1, 2, 3, 4, 5]),
            Err(DecodeError::MalformedPayload)
        );
    }

    #[test]
    fn test_decode_unknown_opcode() {
        assert_eq!(Command::decode(0x99, &[]), Err(DecodeError::UnknownOpcode));
    }

    #[test]
    fn test_decode_context_label() {
        let cmd = Command::decode(CMD_SET_CONTEXT, b"u:r:su:s0\0").unwrap();
        assert_eq!(
            cmd,
            Command::SetContext {
                label: String::from("u:r:su:s0")
            }
        );
    }

    #[test]
    fn test_context_label_requires_nul() {
        assert_eq!(
            Command::decode(CMD_SET_CONTEXT, b"u:r:su:s0"),
            Err(DecodeError::MalformedPayload)
        );
    }

    #[test]
    fn test_context_label_max_buffer() {
        // 255 label bytes + NUL fills the buffer exactly
        let mut payload = alloc::vec![b'a'; MAX_CONTEXT_LEN - 1];
        payload.push(0);
        assert!(Command::decode(CMD_SET_CONTEXT, &payload).is_ok());

        // One byte over the buffer is a malformed transfer
        let mut payload = alloc::vec![b'a'; MAX_CONTEXT_LEN];
        payload.push(0);
        assert_eq!(
            Command::decode(CMD_SET_CONTEXT, &payload),
            Err(DecodeError::MalformedPayload)
        );
    }

    #[test]
    fn test_opcode_round_trip() {
        let cmd = Command::decode(CMD_GRANT_ROOT, &[]).unwrap();
        assert_eq!(cmd.opcode(), CMD_GRANT_ROOT);
        let cmd = Command::decode(CMD_GET_VERSION, &[]).unwrap();
        assert_eq!(cmd.opcode(), CMD_GET_VERSION);
    }

    #[test]
    fn test_write_i32() {
        assert_eq!(write_i32(1), [1, 0, 0, 0]);
        assert_eq!(write_i32(PROTOCOL_VERSION), 1i32.to_le_bytes());
    }
}
