//! Braid CLI
//!
//! Parse text with a reference grammar and print the resulting tokens.

use braidc::commands::run;
use braidc::config::parse_args;
use braidc::tracing_setup::init_tracing;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }
    if matches!(args[1].as_str(), "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    let config = match parse_args(&args[1..]) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    init_tracing(config.trace_tree);

    match run(&config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: braid <json|arith|float> [input] [options]");
    eprintln!();
    eprintln!("Reads standard input when neither [input] nor --file is given.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --file=<path>      Read input from a file");
    eprintln!("  --lines            Parse each non-empty line separately");
    eprintln!("  --no-parallel      Parse lines one at a time");
    eprintln!("  --allow-partial    Accept matches that leave input unconsumed");
    eprintln!("  --max-depth=<n>    Nesting limit, or 'none' (default: 100000)");
    eprintln!("  --trace-tree       Nest RUST_LOG output under spans");
}
