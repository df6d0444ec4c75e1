//! Region resolution from per-cell integer ids.

use std::collections::HashMap;

/// Per-cell region ids, from a precomputed file or a named grid property.
///
/// Both sources reduce to the same lookup; every active cell must be covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSource {
    /// Where the ids came from, for error messages.
    pub origin: String,
    pub ids: HashMap<u32, i64>,
}

impl RegionSource {
    pub fn new(origin: impl Into<String>, ids: HashMap<u32, i64>) -> Self {
        Self {
            origin: origin.into(),
            ids,
        }
    }

    pub(crate) fn get(&self, index: u32) -> Option<i64> {
        self.ids.get(&index).copied()
    }
}
