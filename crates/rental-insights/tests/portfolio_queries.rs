use chrono::{NaiveDate, NaiveDateTime};
use rental_insights::portfolio::{
    classify, invalid_postcode_ids, rent_per_tenant, Currency, PortfolioError, PropertySource,
    PropertyStatus, TenantSource,
};

const PROPERTIES: &[u8] = include_bytes!("fixtures/properties.csv");
const TENANTS: &[u8] = include_bytes!("fixtures/tenants.csv");

fn evaluation_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 9, 30)
        .expect("valid evaluation date")
        .and_hms_opt(9, 0, 0)
        .expect("valid evaluation time")
}

#[test]
fn region_averages_ignore_rows_without_usable_rent() {
    let index = PropertySource::region_rents(PROPERTIES).expect("properties load");

    assert_eq!(index.average("London").expect("london"), 135000);
    assert_eq!(index.average("wales").expect("wales"), 75000);
    assert_eq!(index.average(" north west ").expect("north west"), 60001);

    let wales = index.totals("WALES").expect("wales totals");
    assert_eq!(wales.count, 1);

    let error = index.average("Scotland").expect_err("unknown region");
    assert_eq!(error.to_string(), "no data available for region: Scotland");
}

#[test]
fn statuses_follow_overdue_then_capacity_order() {
    let capacities = PropertySource::capacities(PROPERTIES).expect("properties load");
    let tenants = TenantSource::tenants(TENANTS).expect("tenants load");
    let now = evaluation_time();

    let expectations = [
        ("p_1001", PropertyStatus::Active),
        ("p_1002", PropertyStatus::Overdue),
        ("p_1003", PropertyStatus::Vacant),
        ("p_1004", PropertyStatus::Vacant),
        ("p_1005", PropertyStatus::Vacant),
    ];

    for (property_id, expected) in expectations {
        let status = classify(property_id, &capacities, &tenants, now).expect("classified");
        assert_eq!(status, expected, "status for {property_id}");
    }

    let error = classify("p_9999", &capacities, &tenants, now).expect_err("unknown property");
    assert!(matches!(error, PortfolioError::PropertyNotFound(_)));
}

#[test]
fn rent_split_uses_tenant_counts() {
    let rents = PropertySource::rents(PROPERTIES).expect("properties load");
    let counts = TenantSource::counts(TENANTS).expect("tenants load");

    let pence = rent_per_tenant("p_1001", &rents, &counts, Currency::Pence).expect("split");
    assert_eq!(pence.to_string(), "60000 pence");

    let pounds = rent_per_tenant("p_1002", &rents, &counts, Currency::Pounds).expect("split");
    assert_eq!(pounds.to_string(), "450 pounds");

    let no_tenants =
        rent_per_tenant("p_1003", &rents, &counts, Currency::Pence).expect_err("no tenants");
    assert!(matches!(no_tenants, PortfolioError::NoTenants(_)));

    let no_rent =
        rent_per_tenant("p_1006", &rents, &counts, Currency::Pence).expect_err("no rent");
    assert!(matches!(no_rent, PortfolioError::NoRentData(_)));
}

#[test]
fn invalid_postcodes_are_listed_in_file_order() {
    let entries = PropertySource::postcodes(PROPERTIES).expect("properties load");
    assert_eq!(invalid_postcode_ids(entries), vec!["p_1003", "p_1004"]);
}

#[test]
fn path_loaders_read_files_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("tenants.csv");
    std::fs::write(&path, "propertyId,tenancyEndDate\np1,2030-01-01\np1,2030-01-01\n")
        .expect("write tenants");

    let counts = TenantSource::counts_from_path(&path).expect("counts load");
    assert_eq!(counts.get("p1"), Some(&2));
}
