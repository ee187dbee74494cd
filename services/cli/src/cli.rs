use crate::commands::{
    run_average_rent, run_invalid_postcodes, run_property_status, run_tenant_rent,
    AverageRentArgs, InvalidPostcodesArgs, PropertyStatusArgs, TenantRentArgs,
};
use clap::{Parser, Subcommand};
use rental_insights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rental Insights",
    about = "Derive rent, occupancy and postcode insights from property and tenant exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the average monthly rent (pence) for a region
    AverageRent(AverageRentArgs),
    /// Print the occupancy status of a property
    Status(PropertyStatusArgs),
    /// Print each tenant's share of a property's monthly rent
    SplitRent(TenantRentArgs),
    /// Print the ids of properties with a missing or invalid UK postcode
    InvalidPostcodes(InvalidPostcodesArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    match Cli::parse().command {
        Command::AverageRent(args) => run_average_rent(args),
        Command::Status(args) => run_property_status(args),
        Command::SplitRent(args) => run_tenant_rent(args),
        Command::InvalidPostcodes(args) => run_invalid_postcodes(args),
    }
}
