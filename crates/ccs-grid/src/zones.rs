//! Zone resolution: layer ranges or per-cell labels.

use std::collections::{BTreeSet, HashMap};

use crate::labels::ZoneLabel;

/// A named, inclusive range of 1-based layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRange {
    pub name: String,
    pub first_layer: u32,
    pub last_layer: u32,
}

impl ZoneRange {
    pub fn new(name: impl Into<String>, first_layer: u32, last_layer: u32) -> Self {
        Self {
            name: name.into(),
            first_layer,
            last_layer,
        }
    }

    pub fn contains(&self, layer: u32) -> bool {
        (self.first_layer..=self.last_layer).contains(&layer)
    }

    pub fn overlaps(&self, other: &ZoneRange) -> bool {
        self.first_layer <= other.last_layer && other.first_layer <= self.last_layer
    }
}

/// Where zone labels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneSource {
    /// Every cell in a layer inherits the zone whose range covers it.
    Ranges(Vec<ZoneRange>),
    /// Explicit label per cell index.
    PerCell(HashMap<u32, String>),
}

impl ZoneSource {
    /// Resolve the zone of one cell. Cells not covered are `Unassigned`.
    pub(crate) fn resolve(&self, index: u32, layer: u32) -> ZoneLabel {
        match self {
            ZoneSource::Ranges(ranges) => ranges
                .iter()
                .find(|r| r.contains(layer))
                .map(|r| ZoneLabel::named(r.name.clone()))
                .unwrap_or(ZoneLabel::Unassigned),
            ZoneSource::PerCell(labels) => labels
                .get(&index)
                .map(|name| ZoneLabel::named(name.clone()))
                .unwrap_or(ZoneLabel::Unassigned),
        }
    }

    /// Every zone name the input declares, whether or not a cell lands in it.
    pub(crate) fn declared(&self) -> BTreeSet<ZoneLabel> {
        match self {
            ZoneSource::Ranges(ranges) => ranges
                .iter()
                .map(|r| ZoneLabel::named(r.name.clone()))
                .collect(),
            ZoneSource::PerCell(labels) => labels
                .values()
                .map(|name| ZoneLabel::named(name.clone()))
                .collect(),
        }
    }
}
