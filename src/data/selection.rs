use thiserror::Error;

use super::model::{Dataset, Metric};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// The selection matched zero rows, so no mean exists.
    #[error("no data for {0:?}")]
    EmptySelection(String),

    #[error("unknown metric {0:?} (expected happiness_score or happiness_rank)")]
    UnknownMetric(String),
}

// ---------------------------------------------------------------------------
// Region → country cascade
// ---------------------------------------------------------------------------

/// Countries offered for a region, plus the one selected by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryOptions {
    pub countries: Vec<String>,
    /// First entry of `countries`, absent when the region matched nothing.
    pub default: Option<String>,
}

impl CountryOptions {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// Distinct countries whose rows carry `region`, in first-occurrence order.
pub fn options_for_region(dataset: &Dataset, region: &str) -> CountryOptions {
    let mut countries: Vec<String> = Vec::new();
    for rec in dataset.records.iter().filter(|r| r.region == region) {
        if !countries.contains(&rec.country) {
            countries.push(rec.country.clone());
        }
    }
    let default = countries.first().cloned();
    CountryOptions { countries, default }
}

// ---------------------------------------------------------------------------
// Country + metric → series and average
// ---------------------------------------------------------------------------

/// Yearly values of one metric for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesView {
    pub country: String,
    pub metric: Metric,
    /// (year, value) pairs, ascending by year.
    pub points: Vec<(i32, f64)>,
}

impl SeriesView {
    pub fn label(&self) -> String {
        self.metric.label()
    }

    /// Chart title, e.g. `Happiness Score of Canada`.
    pub fn title(&self) -> String {
        format!("{} of {}", self.label(), self.country)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Arithmetic mean of the series values.
    pub fn mean(&self) -> Result<f64, SelectionError> {
        if self.points.is_empty() {
            return Err(SelectionError::EmptySelection(self.country.clone()));
        }
        let sum: f64 = self.points.iter().map(|&(_, v)| v).sum();
        Ok(sum / self.points.len() as f64)
    }

    /// `The average <Label> for <country> is <mean>`.
    pub fn average_text(&self) -> Result<String, SelectionError> {
        let mean = self.mean()?;
        Ok(format!(
            "The average {} for {} is {}",
            self.label(),
            self.country,
            format_mean(mean)
        ))
    }
}

/// Shortest round-trip form, keeping a `.0` on whole numbers.
fn format_mean(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Filter to `country`, pair each row's year with the metric value and sort by year.
pub fn series_and_average(dataset: &Dataset, country: &str, metric: Metric) -> SeriesView {
    let mut points: Vec<(i32, f64)> = dataset
        .records
        .iter()
        .filter(|r| r.country == country)
        .map(|r| (r.year, r.metric_value(metric)))
        .collect();
    points.sort_by_key(|&(year, _)| year);

    SeriesView {
        country: country.to_string(),
        metric,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn north_america() -> Dataset {
        Dataset::from_records(vec![
            record("Canada", "North America", 2015, 7.0, 5),
            record("Norway", "Western Europe", 2015, 7.5, 4),
            record("United States", "North America", 2015, 7.1, 15),
            record("Canada", "North America", 2016, 7.2, 6),
            record("Mexico", "North America", 2015, 7.0, 14),
            record("United States", "North America", 2016, 7.0, 13),
            record("Canada", "North America", 2017, 7.4, 7),
        ])
    }

    #[test]
    fn options_preserve_first_seen_order() {
        let ds = north_america();
        let opts = options_for_region(&ds, "North America");
        assert_eq!(opts.countries, vec!["Canada", "United States", "Mexico"]);
        assert_eq!(opts.default.as_deref(), Some("Canada"));
    }

    #[test]
    fn options_only_contain_region_countries() {
        let ds = north_america();
        for region in &ds.regions {
            let opts = options_for_region(&ds, region);
            for country in &opts.countries {
                assert!(ds
                    .records
                    .iter()
                    .any(|r| &r.country == country && &r.region == region));
            }
            let mut dedup = opts.countries.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), opts.countries.len());
            assert_eq!(&opts.countries, &ds.region_index[region]);
        }
    }

    #[test]
    fn unknown_region_yields_no_options() {
        let ds = north_america();
        let opts = options_for_region(&ds, "Atlantis");
        assert!(opts.is_empty());
        assert_eq!(opts.default, None);
    }

    #[test]
    fn canada_score_series_and_average() {
        let ds = north_america();
        let view = series_and_average(&ds, "Canada", Metric::HappinessScore);

        assert_eq!(view.points, vec![(2015, 7.0), (2016, 7.2), (2017, 7.4)]);
        assert!((view.mean().unwrap() - 7.2).abs() < 1e-9);
        assert_eq!(
            view.average_text().unwrap(),
            "The average Happiness Score for Canada is 7.2"
        );
        assert_eq!(view.title(), "Happiness Score of Canada");
    }

    #[test]
    fn rank_average_keeps_decimal_point() {
        let ds = north_america();
        let view = series_and_average(&ds, "Canada", Metric::HappinessRank);
        assert_eq!(view.points, vec![(2015, 5.0), (2016, 6.0), (2017, 7.0)]);
        assert_eq!(
            view.average_text().unwrap(),
            "The average Happiness Rank for Canada is 6.0"
        );
    }

    #[test]
    fn series_sorted_by_year_regardless_of_row_order() {
        let ds = Dataset::from_records(vec![
            record("Chile", "Latin America", 2017, 6.6, 20),
            record("Chile", "Latin America", 2015, 6.7, 27),
            record("Chile", "Latin America", 2016, 6.7, 24),
        ]);
        let view = series_and_average(&ds, "Chile", Metric::HappinessRank);
        let years: Vec<i32> = view.points.iter().map(|&(y, _)| y).collect();
        assert_eq!(years, vec![2015, 2016, 2017]);
        assert!((view.mean().unwrap() - 71.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_reports_missing_data() {
        let ds = north_america();
        let view = series_and_average(&ds, "Atlantis", Metric::HappinessScore);
        assert!(view.is_empty());
        assert_eq!(
            view.mean(),
            Err(SelectionError::EmptySelection("Atlantis".to_string()))
        );
        assert!(view.average_text().is_err());
    }

    #[test]
    fn derivations_are_idempotent() {
        let ds = north_america();
        assert_eq!(
            options_for_region(&ds, "North America"),
            options_for_region(&ds, "North America")
        );
        assert_eq!(
            series_and_average(&ds, "United States", Metric::HappinessScore),
            series_and_average(&ds, "United States", Metric::HappinessScore)
        );
    }
}
