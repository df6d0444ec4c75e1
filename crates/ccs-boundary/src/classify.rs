//! Per-cell containment classification.

use core::fmt;

use ccs_grid::CellCatalog;
use serde::{Deserialize, Serialize};

use crate::polygon::Boundary;

/// Where a cell sits relative to the run's boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainmentCategory {
    Contained,
    Hazardous,
    Outside,
}

impl ContainmentCategory {
    pub const ALL: [ContainmentCategory; 3] = [
        ContainmentCategory::Contained,
        ContainmentCategory::Hazardous,
        ContainmentCategory::Outside,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContainmentCategory::Contained => "contained",
            ContainmentCategory::Hazardous => "hazardous",
            ContainmentCategory::Outside => "outside",
        }
    }
}

impl fmt::Display for ContainmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for ContainmentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContainmentCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown containment category '{s}'"))
    }
}

/// Assigns each cell exactly one category from zero, one or two boundaries.
///
/// The containment boundary is tested first; the hazardous boundary only
/// applies to cells it leaves uncontained.
#[derive(Debug, Clone, Default)]
pub struct BoundaryClassifier {
    containment: Option<Boundary>,
    hazardous: Option<Boundary>,
}

impl BoundaryClassifier {
    pub fn new(containment: Option<Boundary>, hazardous: Option<Boundary>) -> Self {
        Self {
            containment,
            hazardous,
        }
    }

    pub fn containment(&self) -> Option<&Boundary> {
        self.containment.as_ref()
    }

    pub fn hazardous(&self) -> Option<&Boundary> {
        self.hazardous.as_ref()
    }

    /// Category of a single plan-view point.
    pub fn classify_point(&self, x: f64, y: f64) -> ContainmentCategory {
        let contained = match &self.containment {
            None => true,
            Some(boundary) => boundary.contains(x, y),
        };
        if contained {
            return ContainmentCategory::Contained;
        }
        match &self.hazardous {
            Some(boundary) if boundary.contains(x, y) => ContainmentCategory::Hazardous,
            _ => ContainmentCategory::Outside,
        }
    }

    /// Classify every cell of the catalog by its centroid.
    pub fn classify(&self, catalog: &CellCatalog) -> Classification {
        if self.containment.is_none() {
            tracing::warn!("No containment polygon specified; counting all cells as contained");
        }
        if self.hazardous.is_none() {
            tracing::info!("No hazardous polygon specified");
        }

        let mut counts = CategoryCounts::default();
        let categories: Vec<ContainmentCategory> = catalog
            .cells()
            .iter()
            .map(|cell| {
                let (x, y) = cell.centroid();
                let category = self.classify_point(x, y);
                counts.add(category);
                category
            })
            .collect();

        tracing::info!(
            contained = counts.contained,
            hazardous = counts.hazardous,
            outside = counts.outside,
            total = counts.total(),
            "Classified active cells"
        );

        Classification {
            categories,
            counts,
            has_hazardous: self.hazardous.is_some(),
        }
    }
}

/// Number of cells per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub contained: usize,
    pub hazardous: usize,
    pub outside: usize,
}

impl CategoryCounts {
    fn add(&mut self, category: ContainmentCategory) {
        match category {
            ContainmentCategory::Contained => self.contained += 1,
            ContainmentCategory::Hazardous => self.hazardous += 1,
            ContainmentCategory::Outside => self.outside += 1,
        }
    }

    pub fn get(&self, category: ContainmentCategory) -> usize {
        match category {
            ContainmentCategory::Contained => self.contained,
            ContainmentCategory::Hazardous => self.hazardous,
            ContainmentCategory::Outside => self.outside,
        }
    }

    pub fn total(&self) -> usize {
        self.contained + self.hazardous + self.outside
    }
}

/// Categories aligned with `CellCatalog::cells()`. Static for the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    categories: Vec<ContainmentCategory>,
    counts: CategoryCounts,
    has_hazardous: bool,
}

impl Classification {
    pub fn categories(&self) -> &[ContainmentCategory] {
        &self.categories
    }

    pub fn get(&self, position: usize) -> Option<ContainmentCategory> {
        self.categories.get(position).copied()
    }

    pub fn counts(&self) -> CategoryCounts {
        self.counts
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories that appear as rows in the output.
    ///
    /// `Hazardous` is only reported when a hazardous boundary was supplied.
    pub fn reported_categories(&self) -> Vec<ContainmentCategory> {
        ContainmentCategory::ALL
            .into_iter()
            .filter(|c| self.has_hazardous || *c != ContainmentCategory::Hazardous)
            .collect()
    }
}
