//! Static inputs: the cell catalog and its classification.

use std::collections::HashMap;
use std::path::Path;

use ccs_accounting::{CalculationMode, PhaseAccountant};
use ccs_boundary::{BoundaryClassifier, CategoryCounts, Classification};
use ccs_grid::{CatalogBuilder, CellCatalog, RegionLabel, ZoneLabel};
use ccs_project::{
    RunConfig, list_snapshots, read_grid, read_polygon, read_region_file, read_snapshot_date,
    read_zone_file,
};

use crate::error::{AppError, AppResult};

/// Everything a timestep needs besides its own snapshot. Read-only once built.
#[derive(Debug, Clone)]
pub struct StaticInputs {
    pub catalog: CellCatalog,
    pub classification: Classification,
    pub accountant: PhaseAccountant,
}

impl StaticInputs {
    pub fn new(
        catalog: CellCatalog,
        classification: Classification,
        accountant: PhaseAccountant,
    ) -> Self {
        Self {
            catalog,
            classification,
            accountant,
        }
    }

    /// Build all static inputs for `config`.
    pub fn load(config: &RunConfig, mode: CalculationMode) -> AppResult<Self> {
        let catalog = build_catalog(config)?;
        let classifier = build_classifier(config)?;
        let classification = classifier.classify(&catalog);
        let accountant = build_accountant(config, mode)?;
        Ok(Self::new(catalog, classification, accountant))
    }
}

/// Read the grid and grouping inputs and build the catalog.
pub fn build_catalog(config: &RunConfig) -> AppResult<CellCatalog> {
    let grid = read_grid(&config.grid)?;
    let mut builder = CatalogBuilder::new();
    builder.add_cells(grid.cells.iter().cloned());

    match &config.zone_file {
        Some(path) => {
            builder.zones(read_zone_file(path)?);
        }
        None => tracing::info!("No zone file specified; using a single zone"),
    }

    match (&config.region_file, &config.region_property) {
        (Some(path), None) => {
            builder.regions(read_region_file(path)?);
        }
        (None, Some(property)) => {
            builder.regions(grid.region_property(property)?);
        }
        (Some(_), Some(_)) => {
            return Err(AppError::InvalidInput(
                "region_file and region_property cannot both be given".to_string(),
            ));
        }
        (None, None) => tracing::info!("No region input specified; using a single region"),
    }

    let catalog = builder.build()?;
    let stats = catalog.stats();
    tracing::info!(
        active = stats.active_cells,
        inactive = stats.inactive_cells,
        total = stats.total_cells,
        zones = catalog.zone_labels().len(),
        regions = catalog.region_labels().len(),
        "Built cell catalog"
    );
    Ok(catalog)
}

/// Read the optional containment and hazardous polygons.
pub fn build_classifier(config: &RunConfig) -> AppResult<BoundaryClassifier> {
    let tolerance = config.auto_close_tolerance;
    let containment = config
        .containment_polygon
        .as_deref()
        .map(|path| read_polygon(path, "containment", tolerance))
        .transpose()?;
    let hazardous = config
        .hazardous_polygon
        .as_deref()
        .map(|path| read_polygon(path, "hazardous", tolerance))
        .transpose()?;
    Ok(BoundaryClassifier::new(containment, hazardous))
}

pub fn build_accountant(config: &RunConfig, mode: CalculationMode) -> AppResult<PhaseAccountant> {
    Ok(PhaseAccountant::new(mode)
        .with_threshold(config.saturation_threshold)?
        .with_residual_trapping(config.residual_trapping))
}

/// What `validate_inputs` found.
#[derive(Debug, Clone)]
pub struct InputReport {
    pub name: String,
    pub mode: CalculationMode,
    pub active_cells: usize,
    pub inactive_cells: usize,
    pub counts: CategoryCounts,
    pub zones: Vec<ZoneLabel>,
    pub regions: Vec<RegionLabel>,
    pub snapshots: usize,
    /// Snapshots whose date could not be read; they would be skipped.
    pub unreadable_snapshots: Vec<String>,
}

/// Load the configuration and every static input without running.
///
/// Also reads each snapshot's date, so duplicate dates are reported here.
pub fn validate_inputs(config_path: &Path) -> AppResult<InputReport> {
    let config = ccs_project::load_yaml(config_path)?;
    let mode = config.mode()?;
    let inputs = StaticInputs::load(&config, mode)?;

    let snapshots = list_snapshots(&config)?;
    let mut seen: HashMap<chrono::NaiveDate, String> = HashMap::new();
    let mut unreadable = Vec::new();
    for path in &snapshots {
        let source = path.display().to_string();
        match read_snapshot_date(path) {
            Ok(date) => {
                if let Some(first) = seen.insert(date, source.clone()) {
                    return Err(AppError::DuplicateDate {
                        date,
                        first,
                        second: source,
                    });
                }
            }
            Err(err) => {
                tracing::warn!(snapshot = %source, "{err}");
                unreadable.push(source);
            }
        }
    }

    let stats = inputs.catalog.stats();
    Ok(InputReport {
        name: config.name.clone(),
        mode,
        active_cells: stats.active_cells,
        inactive_cells: stats.inactive_cells,
        counts: inputs.classification.counts(),
        zones: inputs.catalog.zone_labels().to_vec(),
        regions: inputs.catalog.region_labels().to_vec(),
        snapshots: snapshots.len(),
        unreadable_snapshots: unreadable,
    })
}
