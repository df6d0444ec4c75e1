//! ccs-project: run configuration format, validation and input readers.

pub mod readers;
pub mod schema;
pub mod validate;

pub use readers::{
    GridData, list_snapshots, read_grid, read_polygon, read_region_file, read_snapshot,
    read_snapshot_date, read_zone_file,
};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

use std::path::{Path, PathBuf};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid input file {path}: {reason}")]
    InputFile { path: PathBuf, reason: String },

    #[error("Invalid polygon file {path}: {source}")]
    Polygon {
        path: PathBuf,
        source: ccs_boundary::BoundaryError,
    },

    #[error("Grid property '{name}' not found")]
    MissingProperty { name: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ProjectError {
    pub(crate) fn input(path: &Path, reason: impl Into<String>) -> Self {
        ProjectError::InputFile {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

pub(crate) fn read_to_string(path: &Path) -> ProjectResult<String> {
    std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a run configuration, resolve its paths against the config's
/// directory and validate it.
pub fn load_yaml(path: &Path) -> ProjectResult<RunConfig> {
    let content = read_to_string(path)?;
    let mut config: RunConfig = serde_yaml::from_str(&content)?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    config.resolve_paths(base_dir);
    validate_config(&config)?;
    Ok(config)
}

pub fn save_yaml(path: &Path, config: &RunConfig) -> ProjectResult<()> {
    validate_config(config)?;
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
