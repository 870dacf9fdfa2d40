//! consumption-validate

use clap::Parser;
use consumption_csv::cli::{init_tracing, Runner, Tool, ValidateCli};

fn main() {
    let cli = ValidateCli::parse();
    init_tracing(cli.common.verbose);

    if let Err(e) = Runner::new(Tool::Validate, cli.common).run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
