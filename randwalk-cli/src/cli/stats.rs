//! Stats command implementation.
//!
//! Runs a walk without printing it and reports a summary instead: spread,
//! observed range, how often the walk went up versus down and how often it
//! sat on a bound.

use std::time::Instant;

use log::debug;
use serde::Serialize;
use randwalk::{WalkStats, WalkerConfig};

use super::common::{WalkOptions, WalkPlan};
use super::error::CliError;

const DEFAULT_STEPS: usize = 1000;

#[derive(Serialize)]
struct JsonStats<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    config: WalkerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    stats: &'a WalkStats,
}

/// Execute the stats command.
pub fn cmd_stats(args: &[String]) -> Result<(), CliError> {
    let mut options = WalkOptions::default();
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        if options.parse_flag(args, &mut i)? {
            i += 1;
            continue;
        }
        match args[i].as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => return Err(CliError::UnknownOption(other.to_string())),
        }
        i += 1;
    }

    let plan = options.resolve(DEFAULT_STEPS)?;
    let start = Instant::now();
    let stats = collect_stats(&plan)?;
    debug!("{} steps summarized in {:?}", stats.count, start.elapsed());

    if json {
        let out = serde_json::to_string_pretty(&JsonStats {
            name: plan.name.as_deref(),
            config: plan.config,
            seed: plan.seed,
            stats: &stats,
        })?;
        println!("{}", out);
    } else {
        print_summary(&plan, &stats);
    }
    Ok(())
}

/// Run the plan and summarize the values it produced.
pub fn collect_stats(plan: &WalkPlan) -> Result<WalkStats, CliError> {
    let walker = plan.build_walker()?;
    let mut stats = WalkStats::with_bounds(walker.min(), walker.max());
    stats.extend(walker.walk().take(plan.steps));
    Ok(stats)
}

fn print_summary(plan: &WalkPlan, stats: &WalkStats) {
    let c = &plan.config;
    let fmt_opt = |v: Option<f32>| v.map_or_else(|| "-".to_string(), |v| v.to_string());

    if let Some(name) = &plan.name {
        println!("Recipe: {}", name);
    }
    println!("Walker: origin={} bounds=[{}, {}] fraction={}", c.origin, c.min, c.max, c.max_step_fraction);
    if let Some(seed) = plan.seed {
        println!("Seed: {}", seed);
    }
    println!();
    println!("  Steps:      {}", stats.count);
    println!("  Mean:       {:.4}", stats.mean);
    println!("  Std dev:    {:.4}", stats.std_dev);
    println!("  Lowest:     {}", fmt_opt(stats.lowest));
    println!("  Highest:    {}", fmt_opt(stats.highest));
    println!("  Last:       {}", fmt_opt(stats.last));
    println!("  Up/down:    {}/{} ({} flat)", stats.ups, stats.downs, stats.flats);
    if let Some(ratio) = stats.down_ratio() {
        println!("  Down ratio: {:.4}", ratio);
    }
    println!("  At min:     {}", stats.min_hits);
    println!("  At max:     {}", stats.max_hits);
}

fn print_usage() {
    eprintln!("Usage: randwalk stats [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  Walker options as for 'randwalk walk' (default steps: {})", DEFAULT_STEPS);
    eprintln!("  --json                 Output results as JSON");
}
