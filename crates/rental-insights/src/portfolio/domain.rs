use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::source::SourceError;

/// Property id to maximum simultaneous tenants.
pub type PropertyCapacities = HashMap<String, u32>;

/// Property id to monthly rent in pence.
pub type PropertyRents = HashMap<String, f64>;

/// Property id to number of recorded tenancies.
pub type TenantCounts = HashMap<String, usize>;

/// A single tenancy row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub property_id: String,
    /// End of the tenancy as a UTC instant; `None` when absent or unparseable.
    pub tenancy_end: Option<NaiveDateTime>,
}

impl Tenant {
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.tenancy_end.is_some_and(|end| end < now)
    }
}

/// Running rent total for one region.
///
/// Rents are summed as `f64`, so very large totals lose precision instead of overflowing.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RegionTotals {
    pub total: f64,
    pub count: u64,
}

impl RegionTotals {
    pub fn add(&mut self, rent: f64) {
        self.total += rent;
        self.count += 1;
    }

    /// Mean rent rounded to the nearest pence, halves away from zero.
    pub fn average(&self) -> Option<i64> {
        if self.count == 0 {
            return None;
        }
        Some((self.total / self.count as f64).round() as i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyStatus {
    #[serde(rename = "PROPERTY_VACANT")]
    Vacant,
    /// Part of the published status set but never produced by the classifier: any property
    /// with tenants is either overdue, vacant (room remains) or active.
    #[serde(rename = "PARTIALLY_VACANT")]
    PartiallyVacant,
    #[serde(rename = "PROPERTY_ACTIVE")]
    Active,
    #[serde(rename = "PROPERTY_OVERDUE")]
    Overdue,
}

impl PropertyStatus {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Vacant => "PROPERTY_VACANT",
            Self::PartiallyVacant => "PARTIALLY_VACANT",
            Self::Active => "PROPERTY_ACTIVE",
            Self::Overdue => "PROPERTY_OVERDUE",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Unit in which a rent share is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    Pounds,
    Pence,
}

impl Currency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pounds => "pounds",
            Self::Pence => "pence",
        }
    }

    /// Converts an amount held in pence into this unit.
    pub fn from_pence(self, pence: f64) -> f64 {
        match self {
            Self::Pounds => pence / 100.0,
            Self::Pence => pence,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("currency must be 'pounds' or 'pence', got '{0}'")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pounds" => Ok(Self::Pounds),
            "pence" => Ok(Self::Pence),
            _ => Err(UnknownCurrency(value.to_string())),
        }
    }
}

/// Failure raised while answering a portfolio query.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("no data available for region: {0}")]
    RegionNotFound(String),
    #[error("property ID '{0}' not found")]
    PropertyNotFound(String),
    #[error("no rent data available for property ID: {0}")]
    NoRentData(String),
    #[error("no tenants found for property ID: {0}")]
    NoTenants(String),
    #[error(transparent)]
    Source(#[from] SourceError),
}
