//! Domain error types for the dashboard.
//!
//! Configuration errors are fatal at startup. Selection and data errors are
//! rendered inside the affected chart region and never abort the process.

use thiserror::Error;

use crate::data::model::ColumnKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// A declared column is absent from the loaded file.
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    /// A declared column was loaded with the wrong value type.
    #[error("column '{column}' must be {expected}, but was loaded as {found}")]
    ColumnKindMismatch {
        column: String,
        expected: ColumnKind,
        found: ColumnKind,
    },

    /// No column qualifies for a feature list, so its dropdowns have no default.
    #[error("dataset has no {0} feature columns")]
    EmptyFeatureList(ColumnKind),

    /// A selection outside its feature list reached a chart generator.
    #[error("'{column}' is not a valid {kind} feature")]
    InvalidSelection { column: String, kind: ColumnKind },

    #[error("insufficient data: {0}")]
    InsufficientData(String),
}

impl DashboardError {
    /// Whether the error belongs to the startup configuration category.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            DashboardError::MissingColumn { .. }
                | DashboardError::ColumnKindMismatch { .. }
                | DashboardError::EmptyFeatureList(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
