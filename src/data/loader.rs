use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a happiness dataset from a file.  Dispatch by extension.
///
/// Every format carries the columns
/// `country, region, year, happiness_score, happiness_rank`:
/// * `.csv`     – header row, one row per country-year (extra columns ignored)
/// * `.json`    – `[{ "country": ..., "region": ..., ... }, ...]`
/// * `.parquet` – flat columns of the same names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    if records.is_empty() {
        bail!("{} contains no records", path.display());
    }

    let dataset = Dataset::from_records(records);
    log::info!(
        "Loaded {} records across {} regions from {}",
        dataset.len(),
        dataset.regions.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        // +2: header line, 1-based numbering
        let record = result.with_context(|| format!("CSV line {}", row_no + 2))?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Integer columns may be Int32 or Int64 and the score Float32 or Float64, so
/// files written by both Pandas and Polars load.
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut records)?;
    }
    Ok(records)
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<Record>) -> Result<()> {
    let country = column(batch, "country")?;
    let region = column(batch, "region")?;
    let year = column(batch, "year")?;
    let score = column(batch, "happiness_score")?;
    let rank = column(batch, "happiness_rank")?;

    for row in 0..batch.num_rows() {
        let record = Record {
            country: string_at(country, row).context("country")?,
            region: string_at(region, row).context("region")?,
            year: i32::try_from(int_at(year, row).context("year")?)
                .context("year out of range")?,
            happiness_score: float_at(score, row).context("happiness_score")?,
            happiness_rank: u32::try_from(int_at(rank, row).context("happiness_rank")?)
                .context("happiness_rank out of range")?,
        };
        out.push(record);
    }
    Ok(())
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

// -- Arrow cell helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("row {row}: null value");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("row {row}: expected a string column, got {other:?}"),
    }
}

fn int_at(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("row {row}: null value");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as i64)
    } else {
        bail!(
            "row {row}: expected Int32 or Int64, got {:?}",
            col.data_type()
        )
    }
}

fn float_at(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("row {row}: null value");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!(
            "row {row}: expected Float32 or Float64, got {:?}",
            col.data_type()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    const CSV: &str = "\
country,region,year,happiness_score,happiness_rank,gdp_per_capita
Canada,North America,2015,7.427,5,1.32629
Mexico,North America,2015,7.187,14,1.02054
Canada,North America,2016,7.404,6,1.44015
";

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_loads_records_and_ignores_extra_columns() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "happiness.csv", CSV);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.regions, vec!["North America"]);
        assert_eq!(ds.records[1].country, "Mexico");
        assert_eq!(ds.records[2].year, 2016);
        assert_eq!(ds.records[0].happiness_rank, 5);
        assert!((ds.records[0].happiness_score - 7.427).abs() < 1e-12);
    }

    #[test]
    fn malformed_csv_row_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "bad.csv",
            "country,region,year,happiness_score,happiness_rank\nCanada,North America,twenty,7.4,5\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 2"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_file(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn header_only_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "empty.csv",
            "country,region,year,happiness_score,happiness_rank\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("no records"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn json_records_load() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "happiness.json",
            r#"[
                {"country": "Norway", "region": "Western Europe", "year": 2017,
                 "happiness_score": 7.537, "happiness_rank": 1},
                {"country": "Denmark", "region": "Western Europe", "year": 2017,
                 "happiness_score": 7.522, "happiness_rank": 2}
            ]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.region_index["Western Europe"], vec!["Norway", "Denmark"]);
        assert_eq!(ds.records[1].happiness_rank, 2);
    }

    #[test]
    fn parquet_accepts_mixed_integer_widths() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("country", DataType::Utf8, false),
            Field::new("region", DataType::Utf8, false),
            Field::new("year", DataType::Int64, false),
            Field::new("happiness_score", DataType::Float64, false),
            Field::new("happiness_rank", DataType::Int32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Canada", "Canada"])),
                Arc::new(StringArray::from(vec!["North America", "North America"])),
                Arc::new(Int64Array::from(vec![2015, 2016])),
                Arc::new(Float64Array::from(vec![7.427, 7.404])),
                Arc::new(Int32Array::from(vec![5, 6])),
            ],
        )
        .unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("happiness.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].year, 2016);
        assert_eq!(ds.records[1].happiness_rank, 6);
        assert_eq!(ds.regions, vec!["North America"]);
    }
}
