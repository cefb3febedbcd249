use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::selection::SelectionError;

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single country-year observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub region: String,
    pub year: i32,
    pub happiness_score: f64,
    pub happiness_rank: u32,
}

impl Record {
    /// Value of the chosen metric for this row.
    pub fn metric_value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::HappinessScore => self.happiness_score,
            Metric::HappinessRank => self.happiness_rank as f64,
        }
    }
}

// ---------------------------------------------------------------------------
// Metric – which measured quantity is plotted
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    #[default]
    HappinessScore,
    HappinessRank,
}

impl Metric {
    /// Both metrics, in the order they are offered to the user.
    pub const ALL: [Metric; 2] = [Metric::HappinessScore, Metric::HappinessRank];

    /// Column name of the metric in the source table.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::HappinessScore => "happiness_score",
            Metric::HappinessRank => "happiness_rank",
        }
    }

    /// Human-readable label: `happiness_score` → `Happiness Score`.
    pub fn label(self) -> String {
        self.as_str()
            .split('_')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SelectionError::UnknownMetric(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Region name → distinct countries, in first-occurrence order.
pub type RegionIndex = BTreeMap<String, Vec<String>>;

/// The full parsed dataset with a pre-computed region index.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in source order.
    pub records: Vec<Record>,
    /// Distinct regions in first-occurrence order.
    pub regions: Vec<String>,
    pub region_index: RegionIndex,
}

impl Dataset {
    /// Build the region list and index from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut regions: Vec<String> = Vec::new();
        let mut region_index = RegionIndex::new();
        let mut country_region: BTreeMap<&str, &str> = BTreeMap::new();

        for rec in &records {
            match country_region.get(rec.country.as_str()) {
                Some(known) if *known != rec.region => {
                    log::warn!(
                        "Country {:?} listed under both {:?} and {:?}",
                        rec.country,
                        known,
                        rec.region
                    );
                }
                Some(_) => {}
                None => {
                    country_region.insert(&rec.country, &rec.region);
                }
            }

            let countries = region_index.entry(rec.region.clone()).or_insert_with(|| {
                regions.push(rec.region.clone());
                Vec::new()
            });
            if !countries.contains(&rec.country) {
                countries.push(rec.country.clone());
            }
        }

        Dataset {
            records,
            regions,
            region_index,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_region(&self, region: &str) -> bool {
        self.region_index.contains_key(region)
    }
}

#[cfg(test)]
pub(crate) fn record(country: &str, region: &str, year: i32, score: f64, rank: u32) -> Record {
    Record {
        country: country.to_string(),
        region: region.to_string(),
        year,
        happiness_score: score,
        happiness_rank: rank,
    }
}
