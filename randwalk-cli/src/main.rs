//! randwalk - CLI for bounded random-walk series
//!
//! Usage:
//!   randwalk walk [options]          Emit a series
//!   randwalk stats [options]         Summarize a series
//!   randwalk benchmark [options]     Step one walker from many threads

use std::env;
use std::process;

use log::debug;

mod cli;

use cli::{CliError, cmd_benchmark, cmd_stats, cmd_walk};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("randwalk");

    if args.len() < 2 {
        print_usage(prog);
        process::exit(1);
    }

    let result: Result<(), CliError> = match args[1].as_str() {
        "walk" => cmd_walk(&args[2..]),
        "stats" => cmd_stats(&args[2..]),
        "benchmark" => cmd_benchmark(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(prog);
            return;
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_usage(prog);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        debug!("command failed: {:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("randwalk - bounded random-walk series generator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} walk [options]         Generate a series", prog);
    eprintln!("  {} stats [options]        Summarize a series", prog);
    eprintln!("  {} benchmark [options]    Step one walker from many threads", prog);
    eprintln!("  {} help                   Show this message", prog);
    eprintln!();
    eprintln!("Walker options (all commands):");
    eprintln!("  --origin <f>           Starting value (default: 100)");
    eprintln!("  --min <f>              Lower bound (default: 0)");
    eprintln!("  --max <f>              Upper bound (default: 200)");
    eprintln!("  --fraction <f>         Max step as a fraction of the current value (default: 0.01)");
    eprintln!("  -n, --steps <n>        Number of steps");
    eprintln!("  --seed <n>             Replayable seed (default: clock-seeded)");
    eprintln!("  --strict               Reject min > max, negative fraction, NaN/inf");
    eprintln!("  -r, --recipe <file>    Load the walk from a YAML recipe (flags override it)");
    eprintln!();
    eprintln!("Walk options:");
    eprintln!("  -f, --format <fmt>     Output format: text, csv, json (default: text)");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  --start <rfc3339>      Timestamp of the first value");
    eprintln!("  --interval <secs>      Seconds between values (default: 1)");
    eprintln!("  --include-origin       Emit the starting value as step 0");
    eprintln!();
    eprintln!("Stats options:");
    eprintln!("  --json                 Output results as JSON");
    eprintln!();
    eprintln!("Benchmark options:");
    eprintln!("  -t, --threads <n>      Threads (default: 8)");
    eprintln!();
    eprintln!("Logging:");
    eprintln!("  RUST_LOG=debug {} walk ...", prog);
}
