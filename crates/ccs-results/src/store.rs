//! Run storage API.
//!
//! Layout under the output directory:
//! - `plume_<mode>.csv` and optionally `plume_<mode>_readable.csv`
//! - `.ccs/runs/<run_id>/manifest.json` and `timeseries.jsonl`

use std::fs;
use std::path::{Path, PathBuf};

use ccs_accounting::CalculationMode;

use crate::table::{readable_csv, records_csv};
use crate::types::{ContainmentRecord, RunManifest};
use crate::{ResultsError, ResultsResult};

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(".ccs").join("runs").join(run_id)
    }

    pub fn table_path(&self, mode: CalculationMode) -> PathBuf {
        self.root_dir.join(format!("plume_{mode}.csv"))
    }

    pub fn readable_path(&self, mode: CalculationMode) -> PathBuf {
        self.root_dir.join(format!("plume_{mode}_readable.csv"))
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[ContainmentRecord],
    ) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let timeseries_path = run_dir.join("timeseries.jsonl");
        let mut timeseries_content = String::new();
        for record in records {
            let line = serde_json::to_string(record)?;
            timeseries_content.push_str(&line);
            timeseries_content.push('\n');
        }
        fs::write(timeseries_path, timeseries_content)?;

        // Written last: its presence marks the run as complete.
        let manifest_path = run_dir.join("manifest.json");
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(manifest_path, manifest_json)?;

        Ok(())
    }

    /// Write `plume_<mode>.csv`, and the wide table if asked.
    pub fn write_tables(
        &self,
        mode: CalculationMode,
        records: &[ContainmentRecord],
        readable: bool,
    ) -> ResultsResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        let path = self.table_path(mode);
        fs::write(&path, records_csv(records))?;
        written.push(path);
        if readable {
            let path = self.readable_path(mode);
            fs::write(&path, readable_csv(records))?;
            written.push(path);
        }
        Ok(written)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_records(&self, run_id: &str) -> ResultsResult<Vec<ContainmentRecord>> {
        let timeseries_path = self.run_dir(run_id).join("timeseries.jsonl");

        if !timeseries_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(timeseries_path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                let record: ContainmentRecord = serde_json::from_str(line)?;
                records.push(record);
            }
        }

        Ok(records)
    }
}
