//! Kernel error types
//!
//! The taxonomy is closed: every failure a caller can observe on the
//! control channel is one of these variants, and each maps to exactly
//! one wire status code from `usu-proto`.

use usu_proto::DecodeError;

/// Errors returned to control-channel callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuError {
    /// Policy gate rejected the elevation request
    PermissionDenied,
    /// Caller lacks the capability the command requires
    CapabilityMissing,
    /// Allocation for the private credential copy failed
    ResourceExhausted,
    /// Payload could not be transferred across the trust boundary
    InvalidTransfer,
    /// Opcode is not part of this protocol version
    UnknownCommand,
    /// The requested subsystem is not present on this host
    Unsupported,
}

impl SuError {
    /// Wire status code for this error.
    pub fn status(self) -> i32 {
        match self {
            SuError::PermissionDenied => usu_proto::STATUS_PERMISSION_DENIED,
            SuError::CapabilityMissing => usu_proto::STATUS_CAPABILITY_MISSING,
            SuError::ResourceExhausted => usu_proto::STATUS_RESOURCE_EXHAUSTED,
            SuError::InvalidTransfer => usu_proto::STATUS_INVALID_TRANSFER,
            SuError::UnknownCommand => usu_proto::STATUS_UNKNOWN_COMMAND,
            SuError::Unsupported => usu_proto::STATUS_UNSUPPORTED,
        }
    }
}

impl From<DecodeError> for SuError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::MalformedPayload => SuError::InvalidTransfer,
            DecodeError::UnknownOpcode => SuError::UnknownCommand,
        }
    }
}
