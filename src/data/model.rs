use std::collections::HashSet;
use std::fmt;

use anyhow::{bail, Result};
use serde::Serialize;

/// Tokens read as a missing value, mirroring the usual dataframe defaults.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
];

// ---------------------------------------------------------------------------
// CellValue – a single parsed cell before the column is typed
// ---------------------------------------------------------------------------

/// A numeric cell keeps its source text, which becomes the label if the
/// column turns out to be categorical.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64, String),
    Text(String),
    Missing,
}

impl CellValue {
    /// Guess the value type of a raw text cell. Text cells are kept verbatim.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() || MISSING_TOKENS.contains(&raw) {
            return CellValue::Missing;
        }
        match raw.trim().parse::<f64>() {
            Ok(v) => CellValue::Number(v, raw.to_string()),
            Err(_) => CellValue::Text(raw.to_string()),
        }
    }

    /// A number from a typed source (Parquet, JSON, fixtures).
    pub fn number(v: f64) -> Self {
        CellValue::Number(v, format_number(v))
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Typed storage for one column. Missing numbers are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Categorical(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    /// Type a column from its cells: any text cell makes it categorical.
    pub fn from_cells(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        let is_categorical = cells.iter().any(|c| matches!(c, CellValue::Text(_)));
        let data = if is_categorical {
            ColumnData::Categorical(
                cells
                    .into_iter()
                    .map(|c| match c {
                        CellValue::Text(s) => Some(s),
                        CellValue::Number(_, raw) => Some(raw),
                        CellValue::Missing => None,
                    })
                    .collect(),
            )
        } else {
            ColumnData::Numeric(
                cells
                    .into_iter()
                    .map(|c| match c {
                        CellValue::Number(v, _) => v,
                        _ => f64::NAN,
                    })
                    .collect(),
            )
        };
        Column {
            name: name.into(),
            data,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
        }
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&[Option<String>]> {
        match &self.data {
            ColumnData::Categorical(v) => Some(v),
            ColumnData::Numeric(_) => None,
        }
    }
}

/// Render a number the way it would appear in the source file:
/// integral values without a trailing `.0`.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable, column-oriented survey table.
///
/// Columns keep the order in which they appear in the source file; every
/// column has exactly `len()` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Build a dataset from named cell columns.
    pub fn from_cell_columns(names: Vec<String>, cells: Vec<Vec<CellValue>>) -> Result<Self> {
        if names.len() != cells.len() {
            bail!(
                "{} column names but {} columns of values",
                names.len(),
                cells.len()
            );
        }
        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, cells)| Column::from_cells(name, cells))
            .collect();
        Self::from_columns(columns)
    }

    /// Build a dataset from row-oriented cells (one `Vec` per row).
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let width = names.len();
        let mut cells: Vec<Vec<CellValue>> = (0..width)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();
        for (row_no, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                bail!("Row {row_no}: expected {width} values, found {}", row.len());
            }
            for (column, value) in cells.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Self::from_cell_columns(names, cells)
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for col in &columns {
            if col.name.is_empty() {
                bail!("Dataset contains a column with an empty name");
            }
            if !seen.insert(col.name.as_str()) {
                bail!("Duplicate column '{}'", col.name);
            }
        }
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            bail!(
                "Column '{}' has {} values, expected {n_rows}",
                bad.name,
                bad.len()
            );
        }
        Ok(Dataset { columns, n_rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        self.column(name).and_then(Column::as_numeric)
    }

    pub fn categorical(&self, name: &str) -> Option<&[Option<String>]> {
        self.column(name).and_then(Column::as_categorical)
    }
}
