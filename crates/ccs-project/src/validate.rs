//! Run configuration validation.

use ccs_accounting::AccountingError;

use crate::schema::{LATEST_VERSION, RunConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing input: {field} ({reason})")]
    MissingInput { field: String, reason: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Conflicting inputs: {first} and {second} cannot both be given")]
    Conflict { first: String, second: String },

    #[error(transparent)]
    Mode(#[from] AccountingError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    if config.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("'{}'", config.name),
            reason: "must not be empty".to_string(),
        });
    }

    config.mode()?;

    match (config.snapshots.is_empty(), &config.snapshot_dir) {
        (true, None) => {
            return Err(ValidationError::MissingInput {
                field: "snapshots".to_string(),
                reason: "give a list of snapshot files or a snapshot_dir".to_string(),
            });
        }
        (false, Some(_)) => {
            return Err(ValidationError::Conflict {
                first: "snapshots".to_string(),
                second: "snapshot_dir".to_string(),
            });
        }
        _ => {}
    }

    if config.region_file.is_some() && config.region_property.is_some() {
        return Err(ValidationError::Conflict {
            first: "region_file".to_string(),
            second: "region_property".to_string(),
        });
    }

    let threshold = config.saturation_threshold;
    if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
        return Err(ValidationError::InvalidValue {
            field: "saturation_threshold".to_string(),
            value: threshold.to_string(),
            reason: "must be finite and in [0, 1)".to_string(),
        });
    }

    let tolerance = config.auto_close_tolerance;
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "auto_close_tolerance".to_string(),
            value: tolerance.to_string(),
            reason: "must be finite and non-negative".to_string(),
        });
    }

    if let Some(property) = &config.region_property {
        if property.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "region_property".to_string(),
                value: "''".to_string(),
                reason: "must name a grid property".to_string(),
            });
        }
    }

    Ok(())
}
