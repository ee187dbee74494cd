mod cli;
mod commands;

pub use commands::{
    run_average_rent, run_invalid_postcodes, run_property_status, run_tenant_rent,
    AverageRentArgs, InvalidPostcodesArgs, PropertyStatusArgs, TenantRentArgs,
};

use rental_insights::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

/// Reports a failed run on stderr and exits with status 1.
pub fn exit_on_error(result: Result<(), AppError>) {
    if let Err(err) = result {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
