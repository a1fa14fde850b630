//! Supplementary group list growth.
//!
//! A grown list is always built off to the side: every existing entry
//! is copied in its original order, then the new id is appended. The
//! engine publishes the result as part of the same atomic commit, so on
//! any failure the original list remains live and untouched.

use alloc::vec::Vec;

use crate::error::SuError;
use crate::types::Gid;

/// Build a list of length `old.len() + 1`: `old` in order, then `gid`.
///
/// Duplicates are preserved, not deduplicated — the caller's view of
/// its own group order is part of the contract.
pub fn grow(old: &[Gid], gid: Gid) -> Result<Vec<Gid>, SuError> {
    let mut grown = Vec::new();
    grown
        .try_reserve_exact(old.len() + 1)
        .map_err(|_| SuError::ResourceExhausted)?;
    grown.extend_from_slice(old);
    grown.push(gid);
    Ok(grown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_appends_exactly_one() {
        let old = [Gid(1000), Gid(1003)];
        let grown = grow(&old, Gid(3003)).unwrap();
        assert_eq!(grown, [Gid(1000), Gid(1003), Gid(3003)]);
    }

    #[test]
    fn test_grow_from_empty() {
        let grown = grow(&[], Gid(2001)).unwrap();
        assert_eq!(grown, [Gid(2001)]);
    }

    #[test]
    fn test_grow_preserves_duplicates_and_order() {
        let old = [Gid(7), Gid(7), Gid(3)];
        let grown = grow(&old, Gid(7)).unwrap();
        assert_eq!(grown, [Gid(7), Gid(7), Gid(3), Gid(7)]);
    }
}
