//! Walk command implementation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use randwalk::WalkerConfig;

use super::common::{OutputFormat, WalkOptions, WalkPlan, take_value, write_output};
use super::error::CliError;

const DEFAULT_STEPS: usize = 100;

/// One emitted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub value: f32,
}

/// JSON output for a whole walk.
#[derive(Serialize)]
struct JsonWalk<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    config: WalkerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    points: &'a [Point],
}

/// Execute the walk command.
pub fn cmd_walk(args: &[String]) -> Result<(), CliError> {
    let mut options = WalkOptions::default();
    let mut format = OutputFormat::Text;
    let mut output: Option<String> = None;
    let mut include_origin = false;

    let mut i = 0;
    while i < args.len() {
        if options.parse_flag(args, &mut i)? {
            i += 1;
            continue;
        }
        let flag = args[i].as_str();
        match flag {
            "-f" | "--format" => {
                let name = take_value(args, &mut i, flag)?;
                format = OutputFormat::from_name(name).ok_or_else(|| CliError::InvalidValue {
                    flag: flag.to_string(),
                    value: name.to_string(),
                })?;
            }
            "--json" => format = OutputFormat::Json,
            "--csv" => format = OutputFormat::Csv,
            "-o" | "--output" => output = Some(take_value(args, &mut i, flag)?.to_string()),
            "--include-origin" => include_origin = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            _ => return Err(CliError::UnknownOption(flag.to_string())),
        }
        i += 1;
    }

    let plan = options.resolve(DEFAULT_STEPS)?;
    let points = run_walk(&plan, include_origin)?;
    let content = render(&plan, &points, format)?;
    write_output(output.as_deref(), &content)
}

/// Run the plan and collect its points.
///
/// With `include_origin` the starting value is emitted as step 0, before
/// the `plan.steps` stepped values.
pub fn run_walk(plan: &WalkPlan, include_origin: bool) -> Result<Vec<Point>, CliError> {
    let walker = plan.build_walker()?;

    let origin = include_origin.then(|| walker.current());
    let first_step = if include_origin { 0 } else { 1 };
    let values = origin.into_iter().chain(walker.walk().take(plan.steps));

    values
        .enumerate()
        .map(|(index, value)| -> Result<Point, CliError> {
            let step = first_step + index;
            let timestamp = match plan.timestamps {
                Some(ts) => Some(ts.at(index).ok_or(CliError::TimestampOutOfRange(step))?),
                None => None,
            };
            Ok(Point { step, timestamp, value })
        })
        .collect()
}

/// Format points for output.
pub fn render(plan: &WalkPlan, points: &[Point], format: OutputFormat) -> Result<String, CliError> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for point in points {
                match point.timestamp {
                    Some(ts) => out.push_str(&format!("{}\t{}\n", rfc3339(ts), point.value)),
                    None => out.push_str(&format!("{}\n", point.value)),
                }
            }
        }
        OutputFormat::Csv => {
            let timestamps = plan.timestamps.is_some();
            out.push_str(if timestamps { "step,timestamp,value\n" } else { "step,value\n" });
            for point in points {
                match point.timestamp {
                    Some(ts) => out.push_str(&format!("{},{},{}\n", point.step, rfc3339(ts), point.value)),
                    None => out.push_str(&format!("{},{}\n", point.step, point.value)),
                }
            }
        }
        OutputFormat::Json => {
            out = serde_json::to_string(&JsonWalk {
                name: plan.name.as_deref(),
                config: plan.config,
                seed: plan.seed,
                points,
            })?;
            out.push('\n');
        }
    }
    Ok(out)
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn print_usage() {
    eprintln!("Usage: randwalk walk [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --origin <f>           Starting value (default: 100)");
    eprintln!("  --min <f>              Lower bound (default: 0)");
    eprintln!("  --max <f>              Upper bound (default: 200)");
    eprintln!("  --fraction <f>         Max step as a fraction of the current value (default: 0.01)");
    eprintln!("  -n, --steps <n>        Number of steps (default: {})", DEFAULT_STEPS);
    eprintln!("  --seed <n>             Replayable seed (default: clock-seeded)");
    eprintln!("  --start <rfc3339>      Timestamp of the first value");
    eprintln!("  --interval <secs>      Seconds between values (default: 1)");
    eprintln!("  --strict               Reject inconsistent configuration");
    eprintln!("  -r, --recipe <file>    Load the walk from a YAML recipe");
    eprintln!("  -f, --format <fmt>     Output format: text, csv, json (default: text)");
    eprintln!("  -o, --output <file>    Output file (- for stdout, default: stdout)");
    eprintln!("  --include-origin       Emit the starting value as step 0");
}
