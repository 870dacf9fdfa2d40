//! consumption-csv
//!
//! Converts every input JSON file into a CSV file

use clap::Parser;
use consumption_csv::cli::{init_tracing, ConvertCli, Runner, Tool};

fn main() {
    let cli = ConvertCli::parse();
    init_tracing(cli.common.verbose);

    let runner = Runner::new(Tool::Convert, cli.common);

    if let Err(e) = runner.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
