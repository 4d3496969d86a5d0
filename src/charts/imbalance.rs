use super::{BarEntry, Chart, ChartKind};
use crate::color::CLASS_SEQUENCE;
use crate::data::model::{format_number, Dataset};
use crate::data::schema::Schema;
use crate::data::stats::numeric_value_counts;
use crate::error::{DashboardError, Result};

/// Frequency of each target class, annotated with its count.
///
/// Renders every distinct value the target holds, ascending.
pub fn class_imbalance(dataset: &Dataset, schema: &Schema) -> Result<Chart> {
    let target = dataset
        .numeric(&schema.target)
        .ok_or_else(|| DashboardError::MissingColumn {
            column: schema.target.clone(),
        })?;

    let bars = numeric_value_counts(target)
        .into_iter()
        .enumerate()
        .map(|(i, (class, count))| BarEntry {
            label: format_number(class),
            value: count,
            color: CLASS_SEQUENCE[i % CLASS_SEQUENCE.len()],
        })
        .collect();

    Ok(Chart {
        title: "Desbalance de Clases".to_string(),
        x_label: "clase".to_string(),
        y_label: "frecuencia".to_string(),
        kind: ChartKind::Bar {
            bars,
            annotate: true,
        },
    })
}
