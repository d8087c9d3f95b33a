//! Table-driven compensation estimate.
//!
//! `average = round(BASE_SALARY × role × location)`, with both multipliers
//! looked up by case-insensitive exact match and defaulting to 1.0.
//! `p25`/`p75` are fixed ratios of the average, not measured percentiles.

use async_trait::async_trait;

use crate::models::pack::MarketData;

pub const BASE_SALARY: f64 = 100_000.0;
pub const P25_RATIO: f64 = 0.85;
pub const P75_RATIO: f64 = 1.20;
pub const SOURCE_LABEL: &str = "Market Research API (Mock Data)";

const DEFAULT_MULTIPLIER: f64 = 1.0;

const ROLE_MULTIPLIERS: &[(&str, f64)] = &[
    ("software engineer", 1.0),
    ("senior software engineer", 1.4),
    ("staff engineer", 1.8),
    ("principal engineer", 2.2),
    ("engineering manager", 1.6),
    ("senior engineering manager", 2.0),
    ("director of engineering", 2.5),
    ("product manager", 1.2),
    ("senior product manager", 1.6),
    ("data scientist", 1.1),
    ("senior data scientist", 1.5),
    ("designer", 0.9),
    ("senior designer", 1.3),
    ("marketing manager", 1.0),
    ("sales manager", 1.1),
];

const LOCATION_MULTIPLIERS: &[(&str, f64)] = &[
    ("san francisco", 1.8),
    ("new york", 1.6),
    ("seattle", 1.4),
    ("boston", 1.3),
    ("los angeles", 1.2),
    ("austin", 1.1),
    ("denver", 1.0),
    ("chicago", 1.0),
    ("atlanta", 0.9),
    ("remote", 1.2),
];

/// Source of compensation ranges for pack creation.
///
/// Carried in `AppState` as `Arc<dyn MarketDataSource>`.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn market_data(&self, job_title: &str, location: &str) -> MarketData;
}

/// Default source: the static multiplier tables below.
pub struct TableEstimator;

#[async_trait]
impl MarketDataSource for TableEstimator {
    async fn market_data(&self, job_title: &str, location: &str) -> MarketData {
        estimate(job_title, location)
    }
}

/// Pure, total estimate for a title and location.
pub fn estimate(job_title: &str, location: &str) -> MarketData {
    let role = lookup(ROLE_MULTIPLIERS, job_title);
    let place = lookup(LOCATION_MULTIPLIERS, location);

    let average = (BASE_SALARY * role * place).round() as i64;
    let p25 = (average as f64 * P25_RATIO).round() as i64;
    let p75 = (average as f64 * P75_RATIO).round() as i64;

    MarketData {
        average,
        p25,
        p75,
        source: SOURCE_LABEL.to_string(),
    }
}

fn lookup(table: &[(&str, f64)], key: &str) -> f64 {
    let key = key.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(DEFAULT_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_and_location_use_base_salary() {
        let data = estimate("Juggler", "Atlantis");
        assert_eq!(data.average, 100_000);
        assert_eq!(data.p25, 85_000);
        assert_eq!(data.p75, 120_000);
        assert_eq!(data.source, SOURCE_LABEL);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(
            estimate("Software Engineer", "New York"),
            estimate("software engineer", "new york")
        );
        assert_eq!(
            estimate("SENIOR DATA SCIENTIST", "Seattle"),
            estimate("senior data scientist", "seattle")
        );
    }

    #[test]
    fn test_known_multipliers_combine() {
        let data = estimate("Senior Software Engineer", "San Francisco");
        assert_eq!(data.average, 252_000);
        assert_eq!(data.p25, 214_200);
        assert_eq!(data.p75, 302_400);
    }

    #[test]
    fn test_partial_match_does_not_count() {
        // "engineer" alone is not a key; neither is a misspelled city.
        assert_eq!(estimate("Engineer", "remote").average, 120_000);
        assert_eq!(estimate("Staff Engineer II", "Bostn").average, 100_000);
    }

    #[test]
    fn test_range_ordering_holds_for_every_table_entry() {
        let titles = ROLE_MULTIPLIERS
            .iter()
            .map(|(t, _)| *t)
            .chain(["Juggler", ""]);
        for title in titles {
            let locations = LOCATION_MULTIPLIERS
                .iter()
                .map(|(l, _)| *l)
                .chain(["Atlantis", ""]);
            for location in locations {
                let data = estimate(title, location);
                assert!(data.p25 > 0, "{title}/{location}: p25 must be positive");
                assert!(
                    data.p25 <= data.average && data.average <= data.p75,
                    "{title}/{location}: {} <= {} <= {} violated",
                    data.p25,
                    data.average,
                    data.p75
                );
            }
        }
    }

    #[tokio::test]
    async fn test_table_estimator_matches_pure_estimate() {
        let data = TableEstimator.market_data("designer", "Atlanta").await;
        assert_eq!(data, estimate("designer", "Atlanta"));
        assert_eq!(data.average, 81_000);
    }
}
