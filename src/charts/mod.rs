/// Chart generators: pure functions of the immutable dataset and the
/// current selection, each returning a toolkit-independent description.
///
/// ```text
///   Dataset + Schema + selection
///        │
///        ├── kpi          → Vec<KpiCard>
///        ├── univariate   → Histogram / Bar
///        ├── imbalance    → Bar (annotated)
///        ├── correlation  → Heatmap
///        └── bivariate    → BoxPlot
/// ```
use serde::Serialize;

use crate::color::{ColorScale, Rgb};
use crate::data::stats::{BoxStats, HistogramBin};

pub mod bivariate;
pub mod correlation;
pub mod imbalance;
pub mod kpi;
pub mod univariate;

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(flatten)]
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Histogram {
        bins: Vec<HistogramBin>,
        color: Rgb,
    },
    Bar {
        bars: Vec<BarEntry>,
        /// Draw the value on top of each bar.
        annotate: bool,
    },
    Heatmap {
        labels: Vec<String>,
        /// Row-major, `labels.len()` × `labels.len()`.
        values: Vec<Vec<f64>>,
        scale: ColorScale,
        min: f64,
        max: f64,
    },
    BoxPlot {
        groups: Vec<BoxGroup>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub label: String,
    pub value: usize,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGroup {
    pub label: String,
    pub stats: BoxStats,
    pub color: Rgb,
}

#[cfg(test)]
mod properties {
    use std::collections::HashSet;

    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::{CellValue, Dataset};
    use crate::data::schema::Schema;

    /// Survey-shaped table with `positives` diabetic rows, a categorical
    /// column of the given cardinality and two numeric features.
    fn table(positives: usize, cardinality: usize, x: &[f64], codes: &[u8]) -> Dataset {
        let names = ["diabetes", "grupo", "x", "y"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = x
            .iter()
            .zip(codes)
            .enumerate()
            .map(|(i, (&x, &code))| {
                vec![
                    CellValue::number(if i < positives { 1.0 } else { 0.0 }),
                    CellValue::Text(format!("g{}", i % cardinality)),
                    CellValue::number(x),
                    CellValue::number(f64::from(code)),
                ]
            })
            .collect();
        Dataset::from_rows(names, rows).unwrap()
    }

    fn survey_inputs() -> impl Strategy<Value = (usize, usize, Vec<f64>, Vec<u8>)> {
        (1usize..200).prop_flat_map(|rows| {
            (
                0..=rows,
                1usize..8,
                vec(-1e3f64..1e3, rows),
                vec(0u8..5, rows),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn charts_account_for_every_row((positives, cardinality, x, codes) in survey_inputs()) {
            let rows = x.len();
            let ds = table(positives, cardinality, &x, &codes);
            let schema = Schema::inspect(&ds, "diabetes").unwrap();

            for column in &schema.numeric {
                let chart = univariate::numeric_histogram(&ds, &schema, column).unwrap();
                let ChartKind::Histogram { bins, .. } = chart.kind else {
                    panic!("expected a histogram");
                };
                prop_assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), rows);
            }

            let chart = univariate::categorical_bars(&ds, &schema, "grupo").unwrap();
            let ChartKind::Bar { bars, .. } = chart.kind else {
                panic!("expected bars");
            };
            prop_assert_eq!(bars.iter().map(|b| b.value).sum::<usize>(), rows);
            prop_assert_eq!(bars.len(), cardinality.min(rows));

            let chart = imbalance::class_imbalance(&ds, &schema).unwrap();
            let ChartKind::Bar { bars, .. } = chart.kind else {
                panic!("expected bars");
            };
            let classes: HashSet<bool> = (0..rows).map(|i| i < positives).collect();
            prop_assert_eq!(bars.iter().map(|b| b.value).sum::<usize>(), rows);
            prop_assert_eq!(bars.len(), classes.len());
        }

        #[test]
        fn correlation_is_symmetric_with_unit_diagonal((positives, cardinality, x, codes) in survey_inputs()) {
            let ds = table(positives, cardinality, &x, &codes);
            let schema = Schema::inspect(&ds, "diabetes").unwrap();

            let Ok(chart) = correlation::correlation_heatmap(&ds, &schema) else {
                // Every numeric column is constant.
                return Ok(());
            };
            let ChartKind::Heatmap { labels, values, .. } = chart.kind else {
                panic!("expected a heat-map");
            };
            prop_assert_eq!(values.len(), labels.len());
            for (i, row) in values.iter().enumerate() {
                prop_assert_eq!(row.len(), labels.len());
                prop_assert!(row[i] == 1.0 || row[i].is_nan());
                for (j, v) in row.iter().enumerate() {
                    prop_assert_eq!(v.to_bits(), values[j][i].to_bits());
                }
            }
        }
    }
}
