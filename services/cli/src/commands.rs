use chrono::Utc;
use clap::Args;
use rental_insights::config::{AppConfig, DataConfig};
use rental_insights::error::AppError;
use rental_insights::portfolio::{
    classify, invalid_postcode_ids, rent_per_tenant, Currency, PropertySource, TenantSource,
};
use rental_insights::telemetry;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct AverageRentArgs {
    /// Region to average (case-insensitive)
    pub region: String,
    /// Override the properties CSV location
    #[arg(long)]
    pub properties: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PropertyStatusArgs {
    /// Property identifier to classify
    pub property_id: String,
    /// Override the properties CSV location
    #[arg(long)]
    pub properties: Option<PathBuf>,
    /// Override the tenants CSV location
    #[arg(long)]
    pub tenants: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TenantRentArgs {
    /// Property identifier whose rent is split
    pub property_id: String,
    /// Unit for the result: pounds or pence
    pub currency: Currency,
    /// Override the properties CSV location
    #[arg(long)]
    pub properties: Option<PathBuf>,
    /// Override the tenants CSV location
    #[arg(long)]
    pub tenants: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct InvalidPostcodesArgs {
    /// Override the properties CSV location
    #[arg(long)]
    pub properties: Option<PathBuf>,
}

fn prepare(
    properties: Option<PathBuf>,
    tenants: Option<PathBuf>,
) -> Result<DataConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config.data.with_overrides(properties, tenants)?)
}

fn emit(value: impl Display) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{value}")?;
    Ok(())
}

pub fn run_average_rent(args: AverageRentArgs) -> Result<(), AppError> {
    let AverageRentArgs { region, properties } = args;
    let data = prepare(properties, None)?;

    info!(%region, source = %data.properties_csv.display(), "averaging region rent");
    let index = PropertySource::region_rents_from_path(&data.properties_csv)?;
    let average = index.average(&region)?;

    emit(average)
}

pub fn run_property_status(args: PropertyStatusArgs) -> Result<(), AppError> {
    let PropertyStatusArgs {
        property_id,
        properties,
        tenants,
    } = args;
    let data = prepare(properties, tenants)?;

    info!(%property_id, "classifying property status");
    let capacities = PropertySource::capacities_from_path(&data.properties_csv)?;
    let tenants = TenantSource::tenants_from_path(&data.tenants_csv)?;
    let status = classify(&property_id, &capacities, &tenants, Utc::now().naive_utc())?;

    emit(status)
}

pub fn run_tenant_rent(args: TenantRentArgs) -> Result<(), AppError> {
    let TenantRentArgs {
        property_id,
        currency,
        properties,
        tenants,
    } = args;
    let data = prepare(properties, tenants)?;

    info!(%property_id, %currency, "splitting rent across tenants");
    let rents = PropertySource::rents_from_path(&data.properties_csv)?;
    let counts = TenantSource::counts_from_path(&data.tenants_csv)?;
    let share = rent_per_tenant(&property_id, &rents, &counts, currency)?;

    emit(share)
}

pub fn run_invalid_postcodes(args: InvalidPostcodesArgs) -> Result<(), AppError> {
    let data = prepare(args.properties, None)?;

    info!(source = %data.properties_csv.display(), "validating postcodes");
    let entries = PropertySource::postcodes_from_path(&data.properties_csv)?;
    let invalid = invalid_postcode_ids(entries);
    info!(invalid = invalid.len(), "postcode validation finished");

    let rendered = serde_json::to_string(&invalid).map_err(io::Error::from)?;
    emit(rendered)
}
