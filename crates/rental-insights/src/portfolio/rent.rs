use super::domain::{PortfolioError, RegionTotals};
use std::collections::BTreeMap;

/// Rent totals keyed by normalized (trimmed, uppercased) region name.
#[derive(Debug, Default, Clone)]
pub struct RegionRentIndex {
    totals: BTreeMap<String, RegionTotals>,
}

impl RegionRentIndex {
    pub fn normalize(region: &str) -> String {
        region.trim().to_uppercase()
    }

    pub fn from_totals(totals: BTreeMap<String, RegionTotals>) -> Self {
        Self { totals }
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.totals.keys().map(String::as_str)
    }

    pub fn totals(&self, region: &str) -> Option<RegionTotals> {
        self.totals.get(&Self::normalize(region)).copied()
    }

    /// Average monthly rent in pence for `region`, matched case-insensitively.
    pub fn average(&self, region: &str) -> Result<i64, PortfolioError> {
        self.totals(region)
            .and_then(|totals| totals.average())
            .ok_or_else(|| PortfolioError::RegionNotFound(region.to_string()))
    }
}
