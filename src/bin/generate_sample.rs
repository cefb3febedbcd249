use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic world happiness dataset.
#[derive(Debug, Parser)]
struct Args {
    /// Output file; `.parquet` writes Parquet, anything else CSV.
    #[arg(default_value = "world_happiness_dataset.csv")]
    output: PathBuf,

    #[arg(long, default_value_t = 2015)]
    first_year: i64,

    #[arg(long, default_value_t = 2020)]
    last_year: i64,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct Row {
    country: String,
    region: String,
    year: i64,
    happiness_score: f64,
    happiness_rank: i64,
}

const COUNTRIES: &[(&str, &str, f64)] = &[
    ("Canada", "North America", 7.3),
    ("United States", "North America", 7.0),
    ("Mexico", "North America", 6.6),
    ("Norway", "Western Europe", 7.5),
    ("Denmark", "Western Europe", 7.5),
    ("Switzerland", "Western Europe", 7.5),
    ("France", "Western Europe", 6.5),
    ("Brazil", "Latin America and Caribbean", 6.6),
    ("Chile", "Latin America and Caribbean", 6.5),
    ("Colombia", "Latin America and Caribbean", 6.2),
    ("Japan", "Eastern Asia", 5.9),
    ("South Korea", "Eastern Asia", 5.8),
    ("Australia", "Australia and New Zealand", 7.3),
    ("New Zealand", "Australia and New Zealand", 7.3),
    ("Nigeria", "Sub-Saharan Africa", 5.2),
    ("Kenya", "Sub-Saharan Africa", 4.5),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Scores drift as a random walk per country; ranks are assigned per year,
/// highest score first.
fn generate(args: &Args) -> Vec<Row> {
    let mut rng = SimpleRng::new(args.seed);
    let mut scores: Vec<f64> = COUNTRIES.iter().map(|&(_, _, base)| base).collect();
    let mut rows = Vec::new();

    for year in args.first_year..=args.last_year {
        for score in &mut scores {
            *score = (*score + rng.gauss(0.0, 0.08)).clamp(0.0, 10.0);
            *score = (*score * 1000.0).round() / 1000.0;
        }

        let mut order: Vec<usize> = (0..COUNTRIES.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        let mut ranks = vec![0i64; COUNTRIES.len()];
        for (pos, &idx) in order.iter().enumerate() {
            ranks[idx] = pos as i64 + 1;
        }

        for (idx, &(country, region, _)) in COUNTRIES.iter().enumerate() {
            rows.push(Row {
                country: country.to_string(),
                region: region.to_string(),
                year,
                happiness_score: scores[idx],
                happiness_rank: ranks[idx],
            });
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("country", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, false),
        Field::new("year", DataType::Int64, false),
        Field::new("happiness_score", DataType::Float64, false),
        Field::new("happiness_rank", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.country))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.region))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.happiness_score))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.happiness_rank))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let rows = generate(&args);

    let is_parquet = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        write_parquet(&rows, &args.output)?;
    } else {
        write_csv(&rows, &args.output)?;
    }

    println!(
        "Wrote {} rows ({} countries, {}–{}) to {}",
        rows.len(),
        COUNTRIES.len(),
        args.first_year,
        args.last_year,
        args.output.display()
    );
    Ok(())
}
