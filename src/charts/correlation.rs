use super::{Chart, ChartKind};
use crate::color::ColorScale;
use crate::data::model::Dataset;
use crate::data::schema::Schema;
use crate::data::stats::correlation_matrix;
use crate::error::{DashboardError, Result};

/// Pearson correlation heat-map over every numeric feature.
pub fn correlation_heatmap(dataset: &Dataset, schema: &Schema) -> Result<Chart> {
    if schema.numeric.len() < 2 {
        return Err(DashboardError::InsufficientData(format!(
            "correlation needs at least 2 numeric columns, found {}",
            schema.numeric.len()
        )));
    }

    let columns = schema
        .numeric
        .iter()
        .map(|name| {
            dataset
                .numeric(name)
                .ok_or_else(|| DashboardError::MissingColumn {
                    column: name.clone(),
                })
        })
        .collect::<Result<Vec<&[f64]>>>()?;

    let values = correlation_matrix(&columns);
    let (min, max) = values
        .iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return Err(DashboardError::InsufficientData(
            "every numeric column is constant".to_string(),
        ));
    }

    Ok(Chart {
        title: "Matriz de Correlación".to_string(),
        x_label: String::new(),
        y_label: String::new(),
        kind: ChartKind::Heatmap {
            labels: schema.numeric.clone(),
            values,
            scale: ColorScale::Viridis,
            min,
            max,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::survey;
    use crate::data::loader::read_csv;

    #[test]
    fn matrix_is_square_symmetric_with_unit_diagonal() {
        let ds = survey(300, 45);
        let schema = Schema::inspect(&ds, "diabetes").unwrap();
        let chart = correlation_heatmap(&ds, &schema).unwrap();
        let ChartKind::Heatmap {
            labels,
            values,
            scale,
            max,
            ..
        } = chart.kind
        else {
            panic!("expected a heatmap");
        };

        let n = schema.numeric.len();
        assert_eq!(labels, schema.numeric);
        assert_eq!(values.len(), n);
        for i in 0..n {
            assert_eq!(values[i].len(), n);
            assert!((values[i][i] - 1.0).abs() < 1e-9);
            for j in 0..n {
                assert_eq!(values[i][j].to_bits(), values[j][i].to_bits());
            }
        }
        assert_eq!(scale, ColorScale::Viridis);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn single_numeric_column_is_insufficient() {
        let ds = read_csv("diabetes,bmi,sexo\n0,22,M\n1,30,H\n".as_bytes()).unwrap();
        let schema = Schema::inspect(&ds, "diabetes").unwrap();
        assert!(matches!(
            correlation_heatmap(&ds, &schema),
            Err(DashboardError::InsufficientData(_))
        ));
    }

    #[test]
    fn constant_columns_are_insufficient() {
        let ds = read_csv("diabetes,a,b,sexo\n0,1,2,M\n1,1,2,H\n".as_bytes()).unwrap();
        let schema = Schema::inspect(&ds, "diabetes").unwrap();
        assert!(matches!(
            correlation_heatmap(&ds, &schema),
            Err(DashboardError::InsufficientData(_))
        ));
    }
}
