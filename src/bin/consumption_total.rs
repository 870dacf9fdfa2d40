//! consumption-total
//!
//! Merges the monthly CSV files into the total file

use clap::Parser;
use consumption_csv::cli::{init_tracing, Runner, Tool, TotalCli};

fn main() {
    let cli = TotalCli::parse();
    init_tracing(cli.common.verbose);

    if let Err(e) = Runner::new(Tool::Total, cli.common).run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
