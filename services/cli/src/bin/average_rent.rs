use clap::Parser;
use rental_insights_cli::{exit_on_error, run_average_rent, AverageRentArgs};

#[derive(Parser, Debug)]
#[command(
    name = "average-rent",
    about = "Print the average monthly rent (pence) for a region",
    version
)]
struct Cli {
    #[command(flatten)]
    args: AverageRentArgs,
}

fn main() {
    exit_on_error(run_average_rent(Cli::parse().args));
}
