use std::path::PathBuf;

use crate::ports::diagram::LayoutAlgorithm;
use crate::ports::report::ReportFormat;

pub struct Config {
    /// Name of the analysed network. Used as the prefix of every output file.
    pub network_name: String,
    /// Directory receiving the report and the diagram.
    ///
    /// Defaults to `<network_name>_Reports` when not given on the command line.
    pub output_dir: PathBuf,
    pub layout: LayoutAlgorithm,
    pub report_format: ReportFormat,
    /// Skips writing the analysis report.
    pub no_report: bool,
    pub no_banner: bool,
    pub quiet: u8,
    /// Treats a failed layer as a failed run.
    pub strict: bool,
}

impl Config {
    pub fn new(network_name: impl Into<String>) -> Self {
        let network_name: String = network_name.into();
        let output_dir: PathBuf = default_output_dir(&network_name);
        Self {
            network_name,
            output_dir,
            layout: LayoutAlgorithm::default(),
            report_format: ReportFormat::default(),
            no_report: false,
            no_banner: false,
            quiet: 0,
            strict: false,
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir
            .join(format!(
                "{}_analysis_report.{}",
                self.network_name,
                self.report_format.extension()
            ))
    }

    pub fn diagram_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_network_map.drawio", self.network_name))
    }
}

pub fn default_output_dir(network_name: &str) -> PathBuf {
    PathBuf::from(format!("{network_name}_Reports"))
}
