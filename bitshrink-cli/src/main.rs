// bitshrink-cli/src/main.rs
//
// Entry point for the bitshrink binary. Parses arguments, runs the selected
// command and maps its result to the process exit code. Per-file failures
// and fatal run errors exit 0 unless `--strict` is given.

use bitshrink_cli::{Cli, Commands, run_encode};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Encode(args) => {
            let strict = args.strict;
            match run_encode(args) {
                Ok(status) => status.exit_code(strict),
                Err(e) => {
                    // The logger may not exist yet, so report directly.
                    eprintln!("Error: {:#}", e);
                    i32::from(strict)
                }
            }
        }
    };

    process::exit(code);
}
