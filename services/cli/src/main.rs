use rental_insights_cli::{exit_on_error, run};

fn main() {
    exit_on_error(run());
}
