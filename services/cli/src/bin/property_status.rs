use clap::Parser;
use rental_insights_cli::{exit_on_error, run_property_status, PropertyStatusArgs};

#[derive(Parser, Debug)]
#[command(
    name = "property-status",
    about = "Print the occupancy status of a property",
    version
)]
struct Cli {
    #[command(flatten)]
    args: PropertyStatusArgs,
}

fn main() {
    exit_on_error(run_property_status(Cli::parse().args));
}
