/// Data layer: core types, loading, schema inspection and aggregates.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (columns typed once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  declared columns + numeric / categorical feature lists
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  mean, value counts, histogram, correlation, quartiles
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod schema;
pub mod stats;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::model::{CellValue, Dataset};

    const SEX: [&str; 2] = ["Mujer", "Hombre"];
    const SMOKER: [&str; 3] = ["No", "Si", "Ex"];

    /// A survey with the default column names: `rows` respondents of which
    /// the first `positives` have diabetes.
    pub fn survey(rows: usize, positives: usize) -> Dataset {
        let names = [
            "diabetes",
            "bmi",
            "sexo",
            "dias_salud_fisica",
            "dias_salud_mental",
            "horas_sueño",
            "fumador",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let data = (0..rows)
            .map(|i| {
                vec![
                    CellValue::number(if i < positives { 1.0 } else { 0.0 }),
                    CellValue::number(20.0 + (i % 15) as f64),
                    CellValue::Text(SEX[i % 2].to_string()),
                    CellValue::number((i % 7) as f64),
                    CellValue::number((i % 5) as f64),
                    CellValue::number(5.0 + (i % 4) as f64),
                    CellValue::Text(SMOKER[i % 3].to_string()),
                ]
            })
            .collect();

        Dataset::from_rows(names, data).expect("fixture is rectangular")
    }
}
