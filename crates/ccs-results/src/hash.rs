//! Content-based hashing for run IDs.

use ccs_accounting::CalculationMode;
use ccs_project::RunConfig;
use sha2::{Digest, Sha256};

/// Hash of everything that determines a run's output.
///
/// `input_fingerprints` identifies the input files' current contents (the
/// caller decides how), so an edited snapshot invalidates the cache.
pub fn compute_run_id(
    config: &RunConfig,
    mode: CalculationMode,
    input_fingerprints: &[String],
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());

    hasher.update(mode.label().as_bytes());

    for fingerprint in input_fingerprints {
        hasher.update(fingerprint.as_bytes());
        hasher.update([0u8]);
    }

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
