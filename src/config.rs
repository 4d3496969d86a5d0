use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::data::schema::ColumnDef;

pub const DEFAULT_DATA_FILE: &str = "df_limpio.csv";
pub const DEFAULT_TARGET: &str = "diabetes";
pub const DEFAULT_BMI: &str = "bmi";
pub const DEFAULT_PHYSICAL: &str = "dias_salud_fisica";
pub const DEFAULT_MENTAL: &str = "dias_salud_mental";
pub const DEFAULT_SLEEP: &str = "horas_sueño";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Verbose logging and a status bar with the current selection.
    Debug,
    #[default]
    Production,
}

impl RunMode {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            RunMode::Debug => "debug",
            RunMode::Production => "info",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "diabetes-dashboard", version, about = "Exploratory dashboard for diabetes risk-factor survey data")]
pub struct Cli {
    /// Cleaned survey table (.csv, .parquet or .json)
    #[arg(long, env = "DIABETES_DASHBOARD_DATA", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    #[arg(long, value_enum, default_value_t = RunMode::Production)]
    pub mode: RunMode,

    /// Binary outcome column
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub target: String,

    #[arg(long, default_value = DEFAULT_BMI)]
    pub bmi_column: String,

    /// Days of poor physical health in the last month
    #[arg(long, default_value = DEFAULT_PHYSICAL)]
    pub physical_column: String,

    /// Days of poor mental health in the last month
    #[arg(long, default_value = DEFAULT_MENTAL)]
    pub mental_column: String,

    /// Hours of sleep per night
    #[arg(long, default_value = DEFAULT_SLEEP)]
    pub sleep_column: String,

    /// Print the view of one tab (e.g. `tab-corr`) as JSON and exit
    #[arg(long, value_name = "TAB_ID")]
    pub export: Option<String>,

    /// Numeric column selected in the exported view
    #[arg(long, requires = "export")]
    pub numeric: Option<String>,

    /// Categorical column selected in the exported view
    #[arg(long, requires = "export")]
    pub categorical: Option<String>,
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Column names the dashboard depends on, plus the run mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub mode: RunMode,
    pub target: String,
    pub bmi_column: String,
    pub physical_column: String,
    pub mental_column: String,
    pub sleep_column: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            target: DEFAULT_TARGET.to_string(),
            bmi_column: DEFAULT_BMI.to_string(),
            physical_column: DEFAULT_PHYSICAL.to_string(),
            mental_column: DEFAULT_MENTAL.to_string(),
            sleep_column: DEFAULT_SLEEP.to_string(),
        }
    }
}

impl From<&Cli> for DashboardConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            mode: cli.mode,
            target: cli.target.clone(),
            bmi_column: cli.bmi_column.clone(),
            physical_column: cli.physical_column.clone(),
            mental_column: cli.mental_column.clone(),
            sleep_column: cli.sleep_column.clone(),
        }
    }
}

impl DashboardConfig {
    /// The statically declared part of the schema. All are numeric.
    pub fn required_columns(&self) -> Vec<ColumnDef> {
        [
            &self.target,
            &self.physical_column,
            &self.mental_column,
            &self.sleep_column,
            &self.bmi_column,
        ]
        .into_iter()
        .map(|name| ColumnDef::numeric(name.as_str()))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_the_survey_file() {
        let cli = Cli::parse_from(["diabetes-dashboard"]);
        let config = DashboardConfig::from(&cli);
        assert_eq!(cli.data, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn cli_overrides_columns_and_mode() {
        let cli = Cli::parse_from([
            "diabetes-dashboard",
            "--mode",
            "debug",
            "--target",
            "outcome",
            "--export",
            "tab-uni",
            "--numeric",
            "edad",
        ]);
        let config = DashboardConfig::from(&cli);
        assert_eq!(config.mode, RunMode::Debug);
        assert_eq!(config.target, "outcome");
        assert_eq!(cli.numeric.as_deref(), Some("edad"));
        assert_eq!(RunMode::Debug.default_log_filter(), "debug");
    }

    #[test]
    fn numeric_selection_requires_export() {
        assert!(Cli::try_parse_from(["diabetes-dashboard", "--numeric", "bmi"]).is_err());
    }

    #[test]
    fn required_columns_are_numeric() {
        let defs = DashboardConfig::default().required_columns();
        assert_eq!(defs.len(), 5);
        assert_eq!(defs[0].name, DEFAULT_TARGET);
        assert!(defs
            .iter()
            .all(|d| d.kind == crate::data::model::ColumnKind::Numeric));
    }
}
