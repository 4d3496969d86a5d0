use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one record per respondent (canonical)
/// * `.parquet` – the same table written by Pandas or Polars
/// * `.json`    – `[{ "diabetes": 0, "bmi": 27.1, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV text with a header row. Each column is typed numeric when every
/// non-missing cell parses as a number, categorical otherwise.
pub fn read_csv<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(CellValue::parse).collect());
    }

    Dataset::from_rows(headers, rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

/// Records-oriented JSON (`df.to_json(orient='records')`). Keys absent from a
/// record are treated as missing values.
pub fn read_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or(CellValue::Missing))
                .collect()
        })
        .collect();

    Dataset::from_rows(headers, rows)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Number(n) => n
            .as_f64()
            .map(|v| CellValue::Number(v, n.to_string()))
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Bool(b) => CellValue::Text(b.to_string()),
        JsonValue::Null => CellValue::Missing,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the survey table.
///
/// Integer, float and decimal columns become numeric; string, boolean and
/// dictionary-encoded columns become categorical.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (idx, name) in headers.iter().enumerate() {
            let cells = arrow_cells(batch.column(idx))
                .with_context(|| format!("reading column '{name}'"))?;
            columns[idx].extend(cells);
        }
    }

    Dataset::from_cell_columns(headers, columns)
}

/// Convert one Arrow column into cells.
fn arrow_cells(col: &ArrayRef) -> Result<Vec<CellValue>> {
    let data_type = col.data_type();
    if data_type.is_numeric() {
        let floats = cast(col, &DataType::Float64)?;
        let arr = floats.as_primitive::<Float64Type>();
        return Ok((0..arr.len())
            .map(|i| {
                if arr.is_null(i) {
                    CellValue::Missing
                } else {
                    CellValue::number(arr.value(i))
                }
            })
            .collect());
    }

    match data_type {
        DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Utf8View
        | DataType::Boolean
        | DataType::Dictionary(_, _) => {
            let strings = cast(col, &DataType::Utf8)?;
            let arr = strings.as_string::<i32>();
            Ok((0..arr.len())
                .map(|i| {
                    if arr.is_null(i) {
                        CellValue::Missing
                    } else {
                        CellValue::Text(arr.value(i).to_string())
                    }
                })
                .collect())
        }
        other => bail!("Unsupported column type {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{BooleanArray, DictionaryArray, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::Int32Type;
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::ColumnKind;

    #[test]
    fn csv_columns_are_typed_by_content() {
        let text = "diabetes,bmi,sexo\n0,22.5,Mujer\n1,31.0,Hombre\n0,,Mujer\n";
        let ds = read_csv(text.as_bytes()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names(), vec!["diabetes", "bmi", "sexo"]);
        assert_eq!(ds.column("diabetes").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(ds.column("sexo").unwrap().kind(), ColumnKind::Categorical);
        assert!(ds.numeric("bmi").unwrap()[2].is_nan());
    }

    #[test]
    fn csv_with_ragged_record_fails() {
        let text = "a,b\n1,2\n3\n";
        assert!(read_csv(text.as_bytes()).is_err());
    }

    #[test]
    fn json_records_keep_key_order_and_fill_gaps() {
        let text = r#"[
            {"diabetes": 1, "sexo": "Mujer", "bmi": 30.5},
            {"diabetes": 0, "sexo": "Hombre"}
        ]"#;
        let ds = read_json(text).unwrap();

        assert_eq!(ds.column_names(), vec!["diabetes", "sexo", "bmi"]);
        assert_eq!(ds.numeric("diabetes").unwrap(), &[1.0, 0.0]);
        assert!(ds.numeric("bmi").unwrap()[1].is_nan());
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(read_json(r#"{"diabetes": 1}"#).is_err());
    }

    #[test]
    fn csv_file_loads_through_extension_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("df_limpio.CSV");
        std::fs::write(&path, "diabetes,sexo,bmi\n1,Mujer,30.5\n0,NA,\n").unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.column_names(), vec!["diabetes", "sexo", "bmi"]);
        assert_eq!(
            ds.categorical("sexo").unwrap(),
            &[Some("Mujer".to_string()), None]
        );
        assert!(ds.numeric("bmi").unwrap()[1].is_nan());
    }

    #[test]
    fn json_file_loads_through_extension_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("df_limpio.json");
        std::fs::write(
            &path,
            r#"[{"diabetes": 0, "fumador": "No", "bmi": null}, {"diabetes": 1, "fumador": "Si", "bmi": 27}]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.column_names(), vec!["diabetes", "fumador", "bmi"]);
        assert_eq!(ds.column("fumador").unwrap().kind(), ColumnKind::Categorical);
        let bmi = ds.numeric("bmi").unwrap();
        assert!(bmi[0].is_nan());
        assert_eq!(bmi[1], 27.0);
    }

    #[test]
    fn parquet_columns_are_cast_and_nulls_become_missing() {
        let diabetes: ArrayRef = Arc::new(Int64Array::from(vec![0, 1, 0]));
        let bmi: ArrayRef = Arc::new(Float64Array::from(vec![Some(22.5), None, Some(30.0)]));
        let sexo: ArrayRef = Arc::new(StringArray::from(vec![Some("Mujer"), None, Some("Hombre")]));
        let fumador: ArrayRef = Arc::new(
            vec![Some("No"), Some("Si"), Some("No")]
                .into_iter()
                .collect::<DictionaryArray<Int32Type>>(),
        );
        let activo: ArrayRef = Arc::new(BooleanArray::from(vec![true, false, true]));
        let batch = RecordBatch::try_from_iter(vec![
            ("diabetes", diabetes),
            ("bmi", bmi),
            ("sexo", sexo),
            ("fumador", fumador),
            ("activo", activo),
        ])
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("df_limpio.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(
            ds.column_names(),
            vec!["diabetes", "bmi", "sexo", "fumador", "activo"]
        );
        assert_eq!(ds.numeric("diabetes").unwrap(), &[0.0, 1.0, 0.0]);
        let bmi = ds.numeric("bmi").unwrap();
        assert_eq!(bmi[0], 22.5);
        assert!(bmi[1].is_nan());
        assert_eq!(
            ds.categorical("sexo").unwrap(),
            &[Some("Mujer".to_string()), None, Some("Hombre".to_string())]
        );
        assert_eq!(
            ds.categorical("fumador").unwrap(),
            &[
                Some("No".to_string()),
                Some("Si".to_string()),
                Some("No".to_string())
            ]
        );
        assert_eq!(
            ds.categorical("activo").unwrap(),
            &[
                Some("true".to_string()),
                Some("false".to_string()),
                Some("true".to_string())
            ]
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("encuesta.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
