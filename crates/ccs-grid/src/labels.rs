//! Grouping labels for the zone and region dimensions.
//!
//! An absent grouping input degrades to the explicit `All` value, so every
//! output row carries a concrete label and joins never see nulls.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Label rendered for the implicit single group of an inactive dimension.
pub const ALL_LABEL: &str = "all";

/// Label rendered for cells whose layer matches no declared zone range.
pub const UNASSIGNED_LABEL: &str = "UNASSIGNED";

/// Stratigraphic zone of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ZoneLabel {
    /// No zone input was supplied for the run.
    All,
    Named(String),
    /// Zone input was supplied but does not cover this cell.
    Unassigned,
}

impl ZoneLabel {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Whether `name` collides with one of the reserved renderings.
    pub fn is_reserved(name: &str) -> bool {
        name.eq_ignore_ascii_case(ALL_LABEL) || name == UNASSIGNED_LABEL
    }
}

impl fmt::Display for ZoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneLabel::All => f.write_str(ALL_LABEL),
            ZoneLabel::Named(name) => f.write_str(name),
            ZoneLabel::Unassigned => f.write_str(UNASSIGNED_LABEL),
        }
    }
}

impl From<ZoneLabel> for String {
    fn from(label: ZoneLabel) -> Self {
        label.to_string()
    }
}

impl From<String> for ZoneLabel {
    fn from(s: String) -> Self {
        match s.as_str() {
            ALL_LABEL => ZoneLabel::All,
            UNASSIGNED_LABEL => ZoneLabel::Unassigned,
            _ => ZoneLabel::Named(s),
        }
    }
}

impl From<&str> for ZoneLabel {
    fn from(s: &str) -> Self {
        ZoneLabel::from(s.to_string())
    }
}

/// Region (e.g. fault compartment) of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RegionLabel {
    /// No region input was supplied for the run.
    All,
    Id(i64),
}

impl fmt::Display for RegionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionLabel::All => f.write_str(ALL_LABEL),
            RegionLabel::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<RegionLabel> for String {
    fn from(label: RegionLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for RegionLabel {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl core::str::FromStr for RegionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL_LABEL) {
            return Ok(RegionLabel::All);
        }
        s.parse::<i64>()
            .map(RegionLabel::Id)
            .map_err(|_| format!("invalid region label '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_labels_render_and_parse() {
        assert_eq!(ZoneLabel::All.to_string(), "all");
        assert_eq!(ZoneLabel::Unassigned.to_string(), "UNASSIGNED");
        assert_eq!(ZoneLabel::from("Ruby"), ZoneLabel::named("Ruby"));
        assert_eq!(ZoneLabel::from("UNASSIGNED"), ZoneLabel::Unassigned);
    }

    #[test]
    fn zone_ordering_puts_unassigned_last() {
        let mut labels = vec![
            ZoneLabel::Unassigned,
            ZoneLabel::named("Topaz"),
            ZoneLabel::named("Amethyst"),
        ];
        labels.sort();
        assert_eq!(labels[0], ZoneLabel::named("Amethyst"));
        assert_eq!(labels[2], ZoneLabel::Unassigned);
    }

    #[test]
    fn region_labels_parse() {
        assert_eq!("all".parse::<RegionLabel>(), Ok(RegionLabel::All));
        assert_eq!(" 4 ".parse::<RegionLabel>(), Ok(RegionLabel::Id(4)));
        assert!("north".parse::<RegionLabel>().is_err());
    }

    #[test]
    fn reserved_zone_names() {
        assert!(ZoneLabel::is_reserved("ALL"));
        assert!(ZoneLabel::is_reserved("UNASSIGNED"));
        assert!(!ZoneLabel::is_reserved("Ruby"));
    }
}
