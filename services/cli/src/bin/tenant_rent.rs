use clap::Parser;
use rental_insights_cli::{exit_on_error, run_tenant_rent, TenantRentArgs};

#[derive(Parser, Debug)]
#[command(
    name = "tenant-rent",
    about = "Print each tenant's share of a property's monthly rent",
    version
)]
struct Cli {
    #[command(flatten)]
    args: TenantRentArgs,
}

fn main() {
    exit_on_error(run_tenant_rent(Cli::parse().args));
}
