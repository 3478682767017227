//! Analysis Report - the JSON document combining every stage's output

use crate::error::Result;
use crate::insights::InsightReport;
use crate::outliers::OutlierReport;
use crate::statistics::StatisticsReport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub statistics: StatisticsReport,
    pub outliers: OutlierReport,
    pub insights: InsightReport,
}

impl AnalysisReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize fully in memory, write a sibling temp file, then rename it
    /// over `path` so a failed run never leaves a truncated report behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_json()?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        // a partial write or a failed rename must not leave the temp file behind
        if let Err(e) = fs::write(&tmp, content).and_then(|_| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        info!("Report saved to {}", path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
