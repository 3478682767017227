//! Analysis Configuration - thresholds and output locations for one run

use std::path::{Path, PathBuf};

pub const REPORT_FILE_NAME: &str = "data_analysis_report.json";
pub const PLOT_FILE_NAME: &str = "data_analysis_plots.png";

/// Tunables shared by every stage of the analyzer.
///
/// `Default` reproduces the fixed behaviour of the command line tool:
/// outputs in the working directory, 10% missing-data threshold,
/// |r| > 0.8 correlation threshold and 5% outlier threshold.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Directory receiving the JSON report and the PNG grid
    pub output_dir: PathBuf,

    pub report_file_name: String,
    pub plot_file_name: String,

    /// When false the visualizer is skipped entirely
    pub render_plots: bool,

    /// Missing-value percentage above which a column is flagged
    pub missing_threshold_pct: f64,

    /// Absolute Pearson r above which a pair is flagged
    pub correlation_threshold: f64,

    /// Outlier percentage above which a column is flagged
    pub outlier_threshold_pct: f64,

    /// Tukey fence multiplier applied to the IQR
    pub iqr_multiplier: f64,

    pub histogram_bins: usize,

    /// Fewer numeric columns than this and no image is produced
    pub min_numeric_for_plots: usize,

    /// Pixel size of the whole 2x3 grid
    pub plot_size: (u32, u32),
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            report_file_name: REPORT_FILE_NAME.to_string(),
            plot_file_name: PLOT_FILE_NAME.to_string(),
            render_plots: true,
            missing_threshold_pct: 10.0,
            correlation_threshold: 0.8,
            outlier_threshold_pct: 5.0,
            iqr_multiplier: 1.5,
            histogram_bins: 30,
            min_numeric_for_plots: 3,
            plot_size: (1600, 1200),
        }
    }
}

impl AnalysisConfig {
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_plots(mut self, render_plots: bool) -> Self {
        self.render_plots = render_plots;
        self
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }

    pub fn plot_path(&self) -> PathBuf {
        self.output_dir.join(&self.plot_file_name)
    }
}
