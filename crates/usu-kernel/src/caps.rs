//! Capability bitsets
//!
//! A `CapSet` is a fixed-width set over capability numbers
//! `0..CAP_COUNT`. The transition engine only ever fully raises or
//! fully clears these sets, so the exact platform width is confined to
//! the [`CAP_COUNT`] constant and the [`CapSet::FULL`] mask.

/// Number of capability bits on this platform (capabilities are
/// numbered `0..CAP_COUNT`).
pub const CAP_COUNT: u32 = 41;

/// Make arbitrary manipulations of gids
pub const CAP_SETGID: u32 = 6;
/// Make arbitrary manipulations of uids
pub const CAP_SETUID: u32 = 7;
/// Broad administrative capability
pub const CAP_SYS_ADMIN: u32 = 21;

/// Fixed-width capability bitset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CapSet(u64);

impl CapSet {
    /// No capabilities.
    pub const EMPTY: CapSet = CapSet(0);

    /// Every capability `0..CAP_COUNT`.
    pub const FULL: CapSet = CapSet((1u64 << CAP_COUNT) - 1);

    /// Raise one capability bit.
    pub fn raise(&mut self, cap: u32) {
        if cap < CAP_COUNT {
            self.0 |= 1u64 << cap;
        }
    }

    /// Lower one capability bit.
    pub fn lower(&mut self, cap: u32) {
        if cap < CAP_COUNT {
            self.0 &= !(1u64 << cap);
        }
    }

    /// True if the given capability is raised.
    pub fn has(&self, cap: u32) -> bool {
        cap < CAP_COUNT && self.0 & (1u64 << cap) != 0
    }

    /// True if no capability is raised.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if every capability `0..CAP_COUNT` is raised.
    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_full() {
        assert!(CapSet::EMPTY.is_empty());
        assert!(CapSet::FULL.is_full());
        for cap in 0..CAP_COUNT {
            assert!(!CapSet::EMPTY.has(cap));
            assert!(CapSet::FULL.has(cap));
        }
    }

    #[test]
    fn test_raise_and_lower() {
        let mut set = CapSet::EMPTY;
        set.raise(CAP_SETUID);
        assert!(set.has(CAP_SETUID));
        assert!(!set.has(CAP_SETGID));
        set.lower(CAP_SETUID);
        assert!(set.is_empty());
    }

    #[test]
    fn test_raising_every_bit_yields_full() {
        let mut set = CapSet::EMPTY;
        for cap in 0..CAP_COUNT {
            set.raise(cap);
        }
        assert_eq!(set, CapSet::FULL);
    }

    #[test]
    fn test_out_of_range_bits_are_ignored() {
        let mut set = CapSet::FULL;
        set.raise(CAP_COUNT);
        assert!(set.is_full());
        assert!(!set.has(CAP_COUNT + 3));
    }
}
