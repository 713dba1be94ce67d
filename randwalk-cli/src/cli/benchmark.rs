//! Benchmark command implementation.
//!
//! Steps one shared walker from many threads at once and checks every
//! returned value against the bounds.

use std::thread;
use std::time::{Duration, Instant};

use log::warn;

use super::common::{DynWalker, WalkOptions, parse_value};
use super::error::CliError;

const DEFAULT_THREADS: usize = 8;
const DEFAULT_STEPS: usize = 100_000;

/// Outcome of one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub threads: usize,
    pub total_steps: u64,
    pub elapsed: Duration,
    pub violations: u64,
    /// Workers that panicked instead of finishing their steps
    pub failed_workers: usize,
    pub final_value: f32,
}

impl BenchmarkResult {
    pub fn steps_per_sec(&self) -> f64 {
        self.total_steps as f64 / self.elapsed.as_secs_f64().max(f64::EPSILON)
    }
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) -> Result<(), CliError> {
    let mut options = WalkOptions::default();
    let mut threads = DEFAULT_THREADS;

    let mut i = 0;
    while i < args.len() {
        if options.parse_flag(args, &mut i)? {
            i += 1;
            continue;
        }
        let flag = args[i].as_str();
        match flag {
            "-t" | "--threads" => threads = parse_value(args, &mut i, flag)?,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            _ => return Err(CliError::UnknownOption(flag.to_string())),
        }
        i += 1;
    }

    let plan = options.resolve(DEFAULT_STEPS)?;
    let walker = plan.build_walker()?;
    let threads = threads.max(1);

    println!("Stepping one walker from {} threads x {} steps...", threads, plan.steps);
    let result = run_benchmark(&walker, threads, plan.steps);

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  RANDWALK BENCHMARK");
    println!("═══════════════════════════════════════════════");
    println!("  Threads: {}", result.threads);
    println!("  Steps per thread: {}", plan.steps);
    println!("  Total steps: {}", result.total_steps);
    println!("  Time: {:?}", result.elapsed);
    println!("  Time (ms): {:.2}", result.elapsed.as_secs_f64() * 1000.0);
    println!("  Steps/sec: {:.0}", result.steps_per_sec());
    println!("  Final value: {}", result.final_value);
    println!("  Bound violations: {}", result.violations);
    println!("  Failed workers: {}", result.failed_workers);
    println!("═══════════════════════════════════════════════");

    if result.failed_workers > 0 {
        return Err(CliError::WorkerPanicked(result.failed_workers));
    }
    if result.violations > 0 {
        return Err(CliError::BoundsViolated(result.violations));
    }
    Ok(())
}

/// Step `walker` `steps` times from each of `threads` threads.
///
/// Violations are only counted for consistent bounds; with `min > max` the
/// walker is pinned to `max` and there is nothing to check against.
pub fn run_benchmark(walker: &DynWalker, threads: usize, steps: usize) -> BenchmarkResult {
    let (min, max) = (walker.min(), walker.max());
    let check = min <= max;
    if !check {
        warn!("min > max, skipping bound checks");
    }

    let start = Instant::now();
    let outcomes: Vec<Option<u64>> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(move || {
                    let mut violations = 0u64;
                    for _ in 0..steps {
                        let value = walker.step();
                        if check && !(min..=max).contains(&value) {
                            violations += 1;
                        }
                    }
                    violations
                })
            })
            .collect();
        // A worker can only panic if the walker's source does.
        handles.into_iter().map(|h| h.join().ok()).collect()
    });
    let elapsed = start.elapsed();

    let failed_workers = outcomes.iter().filter(|o| o.is_none()).count();
    if failed_workers > 0 {
        warn!("{} of {} workers panicked", failed_workers, threads);
    }
    let violations = outcomes.into_iter().flatten().sum();

    BenchmarkResult {
        threads,
        total_steps: total_steps(threads, steps),
        elapsed,
        violations,
        failed_workers,
        final_value: walker.current(),
    }
}

/// `threads * steps`, saturating instead of overflowing.
fn total_steps(threads: usize, steps: usize) -> u64 {
    (threads as u64).saturating_mul(steps as u64)
}

fn print_usage() {
    eprintln!("Usage: randwalk benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -t, --threads <n>      Threads stepping the shared walker (default: {})", DEFAULT_THREADS);
    eprintln!("  -n, --steps <n>        Steps per thread (default: {})", DEFAULT_STEPS);
    eprintln!("  Walker options as for 'randwalk walk'");
    eprintln!();
    eprintln!("Exits with status 1 if any step leaves the bounds or a worker panics.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use randwalk::{RandomWalker, Rng, UniformSource};

    /// Source whose every draw panics.
    struct Exploding;

    impl UniformSource for Exploding {
        fn next_uniform(&mut self) -> f32 {
            panic!("source exhausted");
        }
    }

    #[test]
    fn counts_every_step() {
        let walker: DynWalker =
            RandomWalker::with_source(10.0, 5.0, 15.0, 0.5, Box::new(Rng::new(4)) as Box<dyn UniformSource>);
        let result = run_benchmark(&walker, 4, 1000);

        assert_eq!(result.threads, 4);
        assert_eq!(result.total_steps, 4000);
        assert_eq!(result.violations, 0);
        assert_eq!(result.failed_workers, 0);
        assert!((5.0..=15.0).contains(&result.final_value));
        assert!(result.steps_per_sec() > 0.0);
    }

    #[test]
    fn panicking_workers_are_counted() {
        let walker: DynWalker =
            RandomWalker::with_source(10.0, 5.0, 15.0, 0.5, Box::new(Exploding) as Box<dyn UniformSource>);
        let result = run_benchmark(&walker, 3, 10);

        assert_eq!(result.failed_workers, 3);
        assert_eq!(result.violations, 0);
        // The walker survives its poisoned lock.
        assert_eq!(result.final_value, 10.0);
    }

    #[test]
    fn huge_totals_saturate() {
        assert_eq!(total_steps(4, 1000), 4000);
        assert_eq!(total_steps(usize::MAX, 0), 0);
        assert_eq!(total_steps(usize::MAX, usize::MAX), u64::MAX);
    }
}
