use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataLoadError;
use super::model::{Dataset, LaunchRecord, Outcome};

/// Required column headers, as written by the launch records export.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_OUTCOME: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

type Result<T> = std::result::Result<T, DataLoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; extra columns are ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field, any numeric type for mass / class
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv_reader(open(path)?),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }?;

    let bounds = dataset.payload_bounds();
    log::info!(
        "Loaded {} launches from {} (sites {:?}, payload {}..={} kg)",
        dataset.len(),
        path.display(),
        dataset.sites(),
        bounds.min,
        bounds.max
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Row validation shared by every format
// ---------------------------------------------------------------------------

/// Raw cells of one row, before validation.  `row` is 1-based.
struct RawRow<'a> {
    row: usize,
    site: &'a str,
    payload: &'a str,
    outcome: &'a str,
    booster: &'a str,
}

impl RawRow<'_> {
    fn validate(&self) -> Result<LaunchRecord> {
        let invalid = |column: &'static str, value: &str| DataLoadError::InvalidValue {
            row: self.row,
            column,
            value: value.to_string(),
        };

        let site = self.site.trim();
        if site.is_empty() {
            return Err(invalid(COL_SITE, self.site));
        }

        let payload_mass_kg = self
            .payload
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite() && *m >= 0.0)
            .ok_or_else(|| invalid(COL_PAYLOAD, self.payload))?;

        let outcome = Outcome::parse(self.outcome).ok_or_else(|| invalid(COL_OUTCOME, self.outcome))?;

        Ok(LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg,
            outcome,
            booster_version_category: self.booster.trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load from any CSV stream with a header row.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let index_of = |column: &'static str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(DataLoadError::MissingColumn { column })
    };
    let site_idx = index_of(COL_SITE)?;
    let payload_idx = index_of(COL_PAYLOAD)?;
    let outcome_idx = index_of(COL_OUTCOME)?;
    let booster_idx = index_of(COL_BOOSTER)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let raw = RawRow {
            row: i + 1,
            site: cell(site_idx),
            payload: cell(payload_idx),
            outcome: cell(outcome_idx),
            booster: cell(booster_idx),
        };
        records.push(raw.validate()?);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as produced by `df.to_json(orient="records")`.
fn load_json(path: &Path) -> Result<Dataset> {
    load_json_reader(BufReader::new(open(path)?))
}

fn load_json_reader<R: Read>(reader: R) -> Result<Dataset> {
    let rows: Vec<Map<String, JsonValue>> = serde_json::from_reader(reader)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, obj) in rows.iter().enumerate() {
        let site = json_cell(obj, COL_SITE)?;
        let payload = json_cell(obj, COL_PAYLOAD)?;
        let outcome = json_cell(obj, COL_OUTCOME)?;
        let booster = json_cell(obj, COL_BOOSTER)?;
        let raw = RawRow {
            row: i + 1,
            site: &site,
            payload: &payload,
            outcome: &outcome,
            booster: &booster,
        };
        records.push(raw.validate()?);
    }

    Ok(Dataset::from_records(records))
}

fn json_cell(obj: &Map<String, JsonValue>, column: &'static str) -> Result<String> {
    match obj.get(column) {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Null) => Ok(String::new()),
        Some(other) => Ok(other.to_string()),
        None => Err(DataLoadError::MissingColumn { column }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Text columns may be Utf8 or LargeUtf8; mass and class may be any
/// numeric type.  Everything is cast before validation.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    // A file without rows yields no batches, so check the schema up front.
    let schema = builder.schema();
    for column in [COL_SITE, COL_PAYLOAD, COL_OUTCOME, COL_BOOSTER] {
        if schema.column_with_name(column).is_none() {
            return Err(DataLoadError::MissingColumn { column });
        }
    }
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        let offset = records.len();
        append_batch(&batch, offset, &mut records)?;
    }

    Ok(Dataset::from_records(records))
}

fn append_batch(batch: &RecordBatch, offset: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let site_col = column_as(batch, COL_SITE, &DataType::Utf8)?;
    let booster_col = column_as(batch, COL_BOOSTER, &DataType::Utf8)?;
    let payload_col = column_as(batch, COL_PAYLOAD, &DataType::Float64)?;
    let outcome_col = column_as(batch, COL_OUTCOME, &DataType::Float64)?;

    let sites = downcast::<StringArray>(&site_col)?;
    let boosters = downcast::<StringArray>(&booster_col)?;
    let payloads = downcast::<Float64Array>(&payload_col)?;
    let outcomes = downcast::<Float64Array>(&outcome_col)?;

    let text = |arr: &StringArray, row: usize| {
        if arr.is_null(row) {
            String::new()
        } else {
            arr.value(row).to_string()
        }
    };
    let number = |arr: &Float64Array, row: usize| {
        if arr.is_null(row) {
            String::from("<null>")
        } else {
            arr.value(row).to_string()
        }
    };

    for row in 0..batch.num_rows() {
        let (site, booster) = (text(sites, row), text(boosters, row));
        let (payload, outcome) = (number(payloads, row), number(outcomes, row));
        let raw = RawRow {
            row: offset + row + 1,
            site: &site,
            payload: &payload,
            outcome: &outcome,
            booster: &booster,
        };
        out.push(raw.validate()?);
    }
    Ok(())
}

fn column_as(batch: &RecordBatch, column: &'static str, to: &DataType) -> Result<ArrayRef> {
    let col = batch
        .column_by_name(column)
        .ok_or(DataLoadError::MissingColumn { column })?;
    Ok(cast(col, to)?)
}

fn downcast<T: 'static>(col: &ArrayRef) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| DataLoadError::Parquet(format!("unexpected array type {:?}", col.data_type())))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::Int64Array;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const SAMPLE_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,1,525.0,F9 v1.0  B0005,v1.0
3,KSC LC-39A,1,9600.0,F9 FT B1031.1,FT
4,VAFB SLC-4E,0,500.0,F9 v1.1  B1003,v1.1
";

    #[test]
    fn test_csv_ignores_extra_columns() {
        let ds = load_csv_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);
        let first = &ds.records()[1];
        assert_eq!(first.launch_site, "CCAFS LC-40");
        assert_eq!(first.payload_mass_kg, 525.0);
        assert_eq!(first.outcome, Outcome::Success);
        assert_eq!(first.booster_version_category, "v1.0");
        assert_eq!(ds.payload_bounds().min, 0.0);
        assert_eq!(ds.payload_bounds().max, 9600.0);
    }

    #[test]
    fn test_csv_missing_outcome_column() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category\nKSC LC-39A,100,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { column: COL_OUTCOME }));
    }

    #[test]
    fn test_csv_rejects_bad_outcome() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,100,2,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        match err {
            DataLoadError::InvalidValue { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, COL_OUTCOME);
                assert_eq!(value, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_rejects_negative_payload() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,100,1,FT\nA,-3,1,FT\n";
        let err = load_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidValue { row: 2, column: COL_PAYLOAD, .. }
        ));
    }

    #[test]
    fn test_csv_trims_header_whitespace() {
        let csv = " Launch Site , Payload Mass (kg) ,class, Booster Version Category\nA,1,1,FT\n";
        assert_eq!(load_csv_reader(csv.as_bytes()).unwrap().len(), 1);
    }

    #[test]
    fn test_load_file_missing_path() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn test_load_file_unsupported_extension() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.sites(), ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);
    }

    #[test]
    fn test_load_json_records() {
        let json = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490.0, "class": 1, "Booster Version Category": "FT"},
            {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 9600, "class": 0, "Booster Version Category": "B4", "Flight Number": 7}
        ]"#;
        let ds = load_json_reader(json.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].payload_mass_kg, 9600.0);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn test_load_json_missing_column() {
        let json = r#"[{"Launch Site": "A", "Payload Mass (kg)": 1, "Booster Version Category": "FT"}]"#;
        let err = load_json_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { column: COL_OUTCOME }));
    }

    #[test]
    fn test_load_parquet_with_integer_class() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_OUTCOME, DataType::Int64, false),
            Field::new(COL_BOOSTER, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS SLC-40", "KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![3600.0, 15600.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["B5", "B5"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.payload_bounds().max, 15600.0);
    }

    #[test]
    fn test_empty_parquet_missing_outcome_column() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_BOOSTER, DataType::Utf8, false),
        ]));

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let writer = ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        writer.close().unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn { column: COL_OUTCOME }), "{err}");
    }
}
