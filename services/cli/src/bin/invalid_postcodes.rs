use clap::Parser;
use rental_insights_cli::{exit_on_error, run_invalid_postcodes, InvalidPostcodesArgs};

#[derive(Parser, Debug)]
#[command(
    name = "invalid-postcodes",
    about = "Print the ids of properties with a missing or invalid UK postcode",
    version
)]
struct Cli {
    #[command(flatten)]
    args: InvalidPostcodesArgs,
}

fn main() {
    exit_on_error(run_invalid_postcodes(Cli::parse().args));
}
