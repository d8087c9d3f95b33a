use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Compensation estimate snapshot, embedded in every pack.
///
/// `p25` and `p75` are fixed offsets from `average` rather than percentiles of
/// any distribution. Display text presents them as range bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketData {
    pub average: i64,
    pub p25: i64,
    pub p75: i64,
    pub source: String,
}

/// A saved negotiation scenario. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub city_or_remote: String,
    pub current_salary: i64,
    pub target_salary: Option<i64>,
    pub achievements: Vec<String>,
    pub market_data: MarketData,
    pub negotiation_content: String,
    pub created_at: DateTime<Utc>,
}

/// Validated job facts a pack is generated from.
/// Only `packs::validation::validate_pack_request` builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct PackInputs {
    pub job_title: String,
    pub city_or_remote: String,
    pub current_salary: i64,
    pub target_salary: Option<i64>,
    pub achievements: Vec<String>,
}

impl PackInputs {
    /// Market average minus current salary, floored at zero.
    pub fn raise_gap(&self, market: &MarketData) -> i64 {
        (market.average - self.current_salary).max(0)
    }
}
