use super::{BarEntry, Chart, ChartKind};
use crate::color::{CategoryColors, PRIMARY};
use crate::data::model::{ColumnKind, Dataset};
use crate::data::schema::Schema;
use crate::data::stats::{histogram, value_counts};
use crate::error::{DashboardError, Result};

pub const HISTOGRAM_BINS: usize = 30;

/// Raw-value histogram of one numeric feature.
pub fn numeric_histogram(dataset: &Dataset, schema: &Schema, column: &str) -> Result<Chart> {
    schema.check_selection(ColumnKind::Numeric, column)?;
    let values = dataset
        .numeric(column)
        .ok_or_else(|| DashboardError::MissingColumn {
            column: column.to_string(),
        })?;

    Ok(Chart {
        title: format!("Distribución de {column}"),
        x_label: column.to_string(),
        y_label: "count".to_string(),
        kind: ChartKind::Histogram {
            bins: histogram(values, HISTOGRAM_BINS),
            color: PRIMARY,
        },
    })
}

/// Frequency bar chart of one categorical feature, one colour per category.
pub fn categorical_bars(dataset: &Dataset, schema: &Schema, column: &str) -> Result<Chart> {
    schema.check_selection(ColumnKind::Categorical, column)?;
    let values = dataset
        .categorical(column)
        .ok_or_else(|| DashboardError::MissingColumn {
            column: column.to_string(),
        })?;

    let counts = value_counts(values);
    let labels: Vec<&str> = counts.iter().map(|(label, _)| label.as_str()).collect();
    let colors = CategoryColors::new(&labels);

    let bars = counts
        .iter()
        .map(|(label, count)| BarEntry {
            label: label.clone(),
            value: *count,
            color: colors.color_for(label),
        })
        .collect();

    Ok(Chart {
        title: format!("Distribución de {column}"),
        x_label: "categoria".to_string(),
        y_label: "frecuencia".to_string(),
        kind: ChartKind::Bar {
            bars,
            annotate: false,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::survey;
    use crate::data::loader::read_csv;

    fn setup() -> (Dataset, Schema) {
        let ds = survey(257, 40);
        let schema = Schema::inspect(&ds, "diabetes").unwrap();
        (ds, schema)
    }

    #[test]
    fn every_numeric_histogram_counts_all_rows() {
        let (ds, schema) = setup();
        for column in &schema.numeric {
            let chart = numeric_histogram(&ds, &schema, column).unwrap();
            let ChartKind::Histogram { bins, color } = chart.kind else {
                panic!("expected a histogram for {column}");
            };
            assert!(bins.len() <= HISTOGRAM_BINS);
            assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), ds.len());
            assert_eq!(color, PRIMARY);
        }
    }

    #[test]
    fn every_categorical_chart_counts_all_rows() {
        let (ds, schema) = setup();
        for column in &schema.categorical {
            let chart = categorical_bars(&ds, &schema, column).unwrap();
            let ChartKind::Bar { bars, .. } = chart.kind else {
                panic!("expected bars for {column}");
            };
            assert_eq!(bars.iter().map(|b| b.value).sum::<usize>(), ds.len());
        }
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let (ds, schema) = setup();
        let chart = categorical_bars(&ds, &schema, "fumador").unwrap();
        let ChartKind::Bar { bars, annotate } = chart.kind else {
            panic!("expected bars");
        };
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["No", "Si", "Ex"]);
        assert!(!annotate);
        assert_eq!(chart.x_label, "categoria");
    }

    #[test]
    fn numeric_looking_categories_keep_their_file_text() {
        let text = "diabetes,bmi,codigo\n0,22,007\n1,30,A1\n0,25,1.50\n1,28,1e3\n0,21,1\n1,24,1.0\n";
        let ds = read_csv(text.as_bytes()).unwrap();
        let schema = Schema::inspect(&ds, "diabetes").unwrap();

        let chart = categorical_bars(&ds, &schema, "codigo").unwrap();
        let ChartKind::Bar { bars, .. } = chart.kind else {
            panic!("expected bars");
        };
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["007", "A1", "1.50", "1e3", "1", "1.0"]);
        assert!(bars.iter().all(|b| b.value == 1));
    }

    #[test]
    fn selections_outside_their_list_are_rejected() {
        let (ds, schema) = setup();
        assert_eq!(
            numeric_histogram(&ds, &schema, "diabetes"),
            Err(DashboardError::InvalidSelection {
                column: "diabetes".into(),
                kind: ColumnKind::Numeric
            })
        );
        assert!(numeric_histogram(&ds, &schema, "sexo").is_err());
        assert!(categorical_bars(&ds, &schema, "bmi").is_err());
    }
}
