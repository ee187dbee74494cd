use super::domain::{PropertyCapacities, PropertyRents, RegionTotals, Tenant, TenantCounts};
use super::rent::RegionRentIndex;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum SourceError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            SourceError::Csv(err) => write!(f, "invalid CSV data: {}", err),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
            SourceError::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for SourceError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct PropertyRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    capacity: Option<String>,
    #[serde(
        rename = "monthlyRentPence",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    monthly_rent_pence: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    region: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    postcode: Option<String>,
}

impl PropertyRow {
    fn rent(&self) -> Option<f64> {
        self.monthly_rent_pence.as_deref().and_then(parse_number)
    }

    /// A blank capacity reads as zero. Fractional or negative capacities are unusable.
    fn capacity(&self) -> Option<u32> {
        let Some(raw) = self.capacity.as_deref() else {
            return Some(0);
        };
        parse_number(raw)
            .filter(|value| *value >= 0.0 && value.fract() == 0.0 && *value <= u32::MAX as f64)
            .map(|value| value as u32)
    }
}

/// Finite decimal numbers only; `NaN` and `inf` spellings are rejected.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[derive(Debug, Deserialize)]
struct TenantRow {
    #[serde(
        rename = "propertyId",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    property_id: Option<String>,
    #[serde(
        rename = "tenancyEndDate",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    tenancy_end_date: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parses a tenancy end date into a UTC instant.
///
/// Offset-carrying values (RFC 3339, RFC 2822) are converted to UTC. Naive date-times, with a
/// `T` or space separator, optional seconds and fractional seconds, are read as UTC. Bare
/// dates (`-` or `/` separated) resolve to midnight.
pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(dt);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn open(path: &Path) -> Result<File, SourceError> {
    File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reader over the properties export.
pub struct PropertySource;

impl PropertySource {
    /// Sums rent per normalized region, skipping rows without a region or an integer rent.
    pub fn region_rents<R: Read>(reader: R) -> Result<RegionRentIndex, SourceError> {
        let mut totals: BTreeMap<String, RegionTotals> = BTreeMap::new();
        let mut skipped = 0usize;

        for record in csv_reader(reader).deserialize::<PropertyRow>() {
            let row = record?;
            let (Some(region), Some(rent)) = (row.region.as_deref(), row.rent()) else {
                skipped += 1;
                continue;
            };

            totals
                .entry(RegionRentIndex::normalize(region))
                .or_default()
                .add(rent);
        }

        debug!(regions = totals.len(), skipped, "loaded region rents");
        Ok(RegionRentIndex::from_totals(totals))
    }

    pub fn region_rents_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<RegionRentIndex, SourceError> {
        Self::region_rents(open(path.as_ref())?)
    }

    /// Maps property id to capacity. Rows without an id or a numeric capacity are dropped.
    pub fn capacities<R: Read>(reader: R) -> Result<PropertyCapacities, SourceError> {
        let mut capacities = PropertyCapacities::new();

        for record in csv_reader(reader).deserialize::<PropertyRow>() {
            let row = record?;
            let capacity = row.capacity();
            match (row.id, capacity) {
                (Some(id), Some(capacity)) => {
                    capacities.insert(id, capacity);
                }
                (id, _) => debug!(?id, "skipping property without usable capacity"),
            }
        }

        debug!(properties = capacities.len(), "loaded property capacities");
        Ok(capacities)
    }

    pub fn capacities_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<PropertyCapacities, SourceError> {
        Self::capacities(open(path.as_ref())?)
    }

    /// Maps property id to monthly rent in pence. Rows without an id or an integer rent are dropped.
    pub fn rents<R: Read>(reader: R) -> Result<PropertyRents, SourceError> {
        let mut rents = PropertyRents::new();

        for record in csv_reader(reader).deserialize::<PropertyRow>() {
            let row = record?;
            let rent = row.rent();
            match (row.id, rent) {
                (Some(id), Some(rent)) => {
                    rents.insert(id, rent);
                }
                (id, _) => debug!(?id, "skipping property without usable rent"),
            }
        }

        debug!(properties = rents.len(), "loaded property rents");
        Ok(rents)
    }

    pub fn rents_from_path<P: AsRef<Path>>(path: P) -> Result<PropertyRents, SourceError> {
        Self::rents(open(path.as_ref())?)
    }

    /// Yields `(id, postcode)` pairs in file order. A missing id becomes an empty string.
    pub fn postcodes<R: Read>(reader: R) -> Result<Vec<(String, Option<String>)>, SourceError> {
        let mut entries = Vec::new();

        for record in csv_reader(reader).deserialize::<PropertyRow>() {
            let row = record?;
            entries.push((row.id.unwrap_or_default(), row.postcode));
        }

        debug!(properties = entries.len(), "loaded property postcodes");
        Ok(entries)
    }

    pub fn postcodes_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<(String, Option<String>)>, SourceError> {
        Self::postcodes(open(path.as_ref())?)
    }
}

/// Reader over the tenants export.
pub struct TenantSource;

impl TenantSource {
    /// Loads every tenancy. Unparseable end dates are kept as `None` so the tenant still counts.
    pub fn tenants<R: Read>(reader: R) -> Result<Vec<Tenant>, SourceError> {
        let mut tenants = Vec::new();

        for record in csv_reader(reader).deserialize::<TenantRow>() {
            let row = record?;
            let Some(property_id) = row.property_id else {
                debug!("skipping tenant without property id");
                continue;
            };

            let tenancy_end = match row.tenancy_end_date.as_deref() {
                Some(raw) => {
                    let parsed = parse_datetime(raw);
                    if parsed.is_none() {
                        warn!(%property_id, value = raw, "unrecognised tenancy end date");
                    }
                    parsed
                }
                None => None,
            };

            tenants.push(Tenant {
                property_id,
                tenancy_end,
            });
        }

        debug!(tenants = tenants.len(), "loaded tenants");
        Ok(tenants)
    }

    pub fn tenants_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Tenant>, SourceError> {
        Self::tenants(open(path.as_ref())?)
    }

    /// Counts tenancies per property id.
    pub fn counts<R: Read>(reader: R) -> Result<TenantCounts, SourceError> {
        let mut counts = TenantCounts::new();

        for record in csv_reader(reader).deserialize::<TenantRow>() {
            let row = record?;
            if let Some(property_id) = row.property_id {
                *counts.entry(property_id).or_insert(0) += 1;
            }
        }

        debug!(properties = counts.len(), "counted tenants");
        Ok(counts)
    }

    pub fn counts_from_path<P: AsRef<Path>>(path: P) -> Result<TenantCounts, SourceError> {
        Self::counts(open(path.as_ref())?)
    }
}
