use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier of a grid cell.
///
/// - `u32` keeps per-cell tables small
/// - `NonZero` enables `Option<CellId>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(NonZeroU32);

impl CellId {
    /// Create an id from a 0-based index by storing index+1.
    ///
    /// `u32::MAX` saturates and shares its id with `u32::MAX - 1`.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellId({})", self.index())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl From<u32> for CellId {
    fn from(index: u32) -> Self {
        Self::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = CellId::from_index(i);
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<CellId>(),
            core::mem::size_of::<Option<CellId>>()
        );
    }

    #[test]
    fn ids_order_by_index() {
        assert!(CellId::from_index(3) < CellId::from_index(7));
    }
}
