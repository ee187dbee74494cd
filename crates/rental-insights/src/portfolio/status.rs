use super::domain::{PortfolioError, PropertyCapacities, PropertyStatus, Tenant};
use chrono::NaiveDateTime;

/// Classifies a property's occupancy at `now`.
///
/// Zero tenants is always vacant. Otherwise a single tenancy that ended before `now` marks the
/// whole property overdue, ahead of any capacity check. A property with no overdue tenants is
/// active once it reaches capacity and vacant while room remains.
pub fn classify(
    property_id: &str,
    capacities: &PropertyCapacities,
    tenants: &[Tenant],
    now: NaiveDateTime,
) -> Result<PropertyStatus, PortfolioError> {
    let capacity = *capacities
        .get(property_id)
        .ok_or_else(|| PortfolioError::PropertyNotFound(property_id.to_string()))?;

    let occupants: Vec<&Tenant> = tenants
        .iter()
        .filter(|tenant| tenant.property_id == property_id)
        .collect();

    if occupants.is_empty() {
        return Ok(PropertyStatus::Vacant);
    }

    if occupants.iter().any(|tenant| tenant.is_overdue(now)) {
        return Ok(PropertyStatus::Overdue);
    }

    if occupants.len() < capacity as usize {
        Ok(PropertyStatus::Vacant)
    } else {
        Ok(PropertyStatus::Active)
    }
}
