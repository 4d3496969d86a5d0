use std::collections::HashMap;

use super::{BoxGroup, Chart, ChartKind};
use crate::color::CategoryColors;
use crate::data::model::{ColumnKind, Dataset};
use crate::data::schema::Schema;
use crate::data::stats::box_stats;
use crate::error::{DashboardError, Result};

/// Box plot of a numeric feature split by each value of a categorical one.
pub fn box_plot(
    dataset: &Dataset,
    schema: &Schema,
    numeric: &str,
    categorical: &str,
) -> Result<Chart> {
    schema.check_selection(ColumnKind::Numeric, numeric)?;
    schema.check_selection(ColumnKind::Categorical, categorical)?;

    let values = dataset
        .numeric(numeric)
        .ok_or_else(|| DashboardError::MissingColumn {
            column: numeric.to_string(),
        })?;
    let categories = dataset
        .categorical(categorical)
        .ok_or_else(|| DashboardError::MissingColumn {
            column: categorical.to_string(),
        })?;

    // Group rows by category in first-appearance order.
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<(&str, Vec<f64>)> = Vec::new();
    for (value, category) in values.iter().zip(categories) {
        let Some(category) = category.as_deref() else {
            continue;
        };
        let slot = *index.entry(category).or_insert_with(|| {
            grouped.push((category, Vec::new()));
            grouped.len() - 1
        });
        grouped[slot].1.push(*value);
    }

    let labels: Vec<&str> = grouped.iter().map(|(label, _)| *label).collect();
    let colors = CategoryColors::new(&labels);

    let groups = grouped
        .iter()
        .filter_map(|(label, vals)| {
            box_stats(vals).map(|stats| BoxGroup {
                label: label.to_string(),
                stats,
                color: colors.color_for(label),
            })
        })
        .collect();

    Ok(Chart {
        title: format!("{numeric} por {categorical}"),
        x_label: categorical.to_string(),
        y_label: numeric.to_string(),
        kind: ChartKind::BoxPlot { groups },
    })
}
