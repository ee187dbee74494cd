use super::domain::{Currency, PortfolioError, PropertyRents, TenantCounts};
use std::fmt;

/// Monthly rent owed by each tenant of a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentShare {
    pub amount: f64,
    pub currency: Currency,
}

impl fmt::Display for RentShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

pub fn rent_per_tenant(
    property_id: &str,
    rents: &PropertyRents,
    tenant_counts: &TenantCounts,
    currency: Currency,
) -> Result<RentShare, PortfolioError> {
    let rent = *rents
        .get(property_id)
        .ok_or_else(|| PortfolioError::NoRentData(property_id.to_string()))?;

    let tenants = tenant_counts
        .get(property_id)
        .copied()
        .filter(|count| *count > 0)
        .ok_or_else(|| PortfolioError::NoTenants(property_id.to_string()))?;

    let pence = rent / tenants as f64;
    Ok(RentShare {
        amount: currency.from_pence(pence),
        currency,
    })
}
