use super::model::{ColumnKind, Dataset};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Declared columns
// ---------------------------------------------------------------------------

/// A column the dashboard requires, with the value type it must load as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnDef {
    pub fn numeric(name: impl Into<String>) -> Self {
        ColumnDef {
            name: name.into(),
            kind: ColumnKind::Numeric,
        }
    }
}

// ---------------------------------------------------------------------------
// Schema – feature lists derived once at startup
// ---------------------------------------------------------------------------

/// Feature lists in source-file column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub target: String,
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl Schema {
    /// Check that every declared column exists with its declared type.
    pub fn validate(dataset: &Dataset, declared: &[ColumnDef]) -> Result<()> {
        for def in declared {
            let column = dataset
                .column(&def.name)
                .ok_or_else(|| DashboardError::MissingColumn {
                    column: def.name.clone(),
                })?;
            if column.kind() != def.kind {
                return Err(DashboardError::ColumnKindMismatch {
                    column: def.name.clone(),
                    expected: def.kind,
                    found: column.kind(),
                });
            }
        }
        Ok(())
    }

    /// Partition the columns into numeric and categorical features.
    ///
    /// The target must be numeric and is left out of the numeric list. Both
    /// lists must be non-empty, otherwise the dropdowns have no default.
    pub fn inspect(dataset: &Dataset, target: &str) -> Result<Self> {
        Self::validate(dataset, &[ColumnDef::numeric(target)])?;

        let mut numeric = Vec::new();
        let mut categorical = Vec::new();
        for column in dataset.columns() {
            match column.kind() {
                ColumnKind::Numeric if column.name != target => numeric.push(column.name.clone()),
                ColumnKind::Numeric => {}
                ColumnKind::Categorical => categorical.push(column.name.clone()),
            }
        }

        if numeric.is_empty() {
            return Err(DashboardError::EmptyFeatureList(ColumnKind::Numeric));
        }
        if categorical.is_empty() {
            return Err(DashboardError::EmptyFeatureList(ColumnKind::Categorical));
        }

        log::info!(
            "Schema: target '{target}', {} numeric features {:?}, {} categorical features {:?}",
            numeric.len(),
            numeric,
            categorical.len(),
            categorical
        );

        Ok(Schema {
            target: target.to_string(),
            numeric,
            categorical,
        })
    }

    pub fn features(&self, kind: ColumnKind) -> &[String] {
        match kind {
            ColumnKind::Numeric => &self.numeric,
            ColumnKind::Categorical => &self.categorical,
        }
    }

    /// First entry of a feature list, used as the dropdown default.
    pub fn default_feature(&self, kind: ColumnKind) -> String {
        self.features(kind).first().cloned().unwrap_or_default()
    }

    /// Reject a selection that is not a member of its feature list.
    pub fn check_selection(&self, kind: ColumnKind, column: &str) -> Result<()> {
        if self.features(kind).iter().any(|c| c == column) {
            Ok(())
        } else {
            Err(DashboardError::InvalidSelection {
                column: column.to_string(),
                kind,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    fn dataset(text: &str) -> Dataset {
        read_csv(text.as_bytes()).unwrap()
    }

    #[test]
    fn partitions_in_file_order_without_target() {
        let ds = dataset("sexo,diabetes,bmi,fumador,edad\nM,0,22,No,40\nH,1,30,Si,61\n");
        let schema = Schema::inspect(&ds, "diabetes").unwrap();
        assert_eq!(schema.numeric, vec!["bmi", "edad"]);
        assert_eq!(schema.categorical, vec!["sexo", "fumador"]);
        assert_eq!(schema.default_feature(ColumnKind::Numeric), "bmi");
        assert_eq!(schema.default_feature(ColumnKind::Categorical), "sexo");
    }

    #[test]
    fn missing_target_is_a_config_error() {
        let ds = dataset("bmi,sexo\n22,M\n");
        let err = Schema::inspect(&ds, "diabetes").unwrap_err();
        assert_eq!(
            err,
            DashboardError::MissingColumn {
                column: "diabetes".into()
            }
        );
        assert!(err.is_config());
    }

    #[test]
    fn categorical_target_is_rejected() {
        let ds = dataset("diabetes,bmi,sexo\nsi,22,M\n");
        assert!(matches!(
            Schema::inspect(&ds, "diabetes"),
            Err(DashboardError::ColumnKindMismatch { .. })
        ));
    }

    #[test]
    fn empty_feature_lists_are_rejected() {
        let only_numeric = dataset("diabetes,bmi\n0,22\n");
        assert_eq!(
            Schema::inspect(&only_numeric, "diabetes"),
            Err(DashboardError::EmptyFeatureList(ColumnKind::Categorical))
        );

        let no_numeric = dataset("diabetes,sexo\n0,M\n");
        assert_eq!(
            Schema::inspect(&no_numeric, "diabetes"),
            Err(DashboardError::EmptyFeatureList(ColumnKind::Numeric))
        );
    }

    #[test]
    fn selections_are_checked_against_their_list() {
        let ds = dataset("diabetes,bmi,sexo\n0,22,M\n");
        let schema = Schema::inspect(&ds, "diabetes").unwrap();
        assert!(schema.check_selection(ColumnKind::Numeric, "bmi").is_ok());
        assert!(schema.check_selection(ColumnKind::Numeric, "diabetes").is_err());
        assert!(schema.check_selection(ColumnKind::Categorical, "bmi").is_err());
    }
}
