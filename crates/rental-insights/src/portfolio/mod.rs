pub mod domain;
pub mod postcode;
pub mod rent;
pub mod source;
pub mod split;
pub mod status;

pub use domain::{
    Currency, PortfolioError, PropertyCapacities, PropertyRents, PropertyStatus, RegionTotals,
    Tenant, TenantCounts, UnknownCurrency,
};
pub use postcode::{invalid_postcode_ids, is_valid_postcode};
pub use rent::RegionRentIndex;
pub use source::{PropertySource, SourceError, TenantSource};
pub use split::{rent_per_tenant, RentShare};
pub use status::classify;
