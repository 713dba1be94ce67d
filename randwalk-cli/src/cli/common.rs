//! Common utilities shared across CLI commands.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::{debug, info};
use randwalk::{ClockSource, RandomWalker, Rng, UniformSource, WalkerConfig};

use super::error::CliError;
use super::recipe::{Recipe, Timestamps};

/// Walker whose source is picked at runtime (seeded or clock-seeded).
pub type DynWalker = RandomWalker<Box<dyn UniformSource>>;

/// Output format for a generated series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" | "txt" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Return the value following the flag at `args[*i]`, advancing `i`.
pub fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, CliError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingValue(flag.to_string()))
}

/// Parse the value following the flag at `args[*i]`.
pub fn parse_value<T: FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T, CliError> {
    let value = take_value(args, i, flag)?;
    value.parse().map_err(|_| CliError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

/// Walker options shared by `walk`, `stats` and `benchmark`.
///
/// Every field overrides the recipe (when one is given), which in turn
/// overrides the defaults.
#[derive(Debug, Default)]
pub struct WalkOptions {
    pub origin: Option<f32>,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub fraction: Option<f32>,
    pub steps: Option<usize>,
    pub seed: Option<u64>,
    pub start: Option<DateTime<Utc>>,
    pub interval: Option<u32>,
    pub strict: bool,
    pub recipe: Option<PathBuf>,
}

impl WalkOptions {
    /// Try to consume the flag at `args[*i]`.
    ///
    /// Returns `Ok(false)` when the flag isn't a walker option, leaving it to
    /// the calling command.
    pub fn parse_flag(&mut self, args: &[String], i: &mut usize) -> Result<bool, CliError> {
        let flag = args[*i].as_str();
        match flag {
            "--origin" => self.origin = Some(parse_value(args, i, flag)?),
            "--min" => self.min = Some(parse_value(args, i, flag)?),
            "--max" => self.max = Some(parse_value(args, i, flag)?),
            "--fraction" => self.fraction = Some(parse_value(args, i, flag)?),
            "-n" | "--steps" => self.steps = Some(parse_value(args, i, flag)?),
            "--seed" => self.seed = Some(parse_value(args, i, flag)?),
            "--interval" => self.interval = Some(parse_value(args, i, flag)?),
            "--start" => {
                let value = take_value(args, i, flag)?;
                let start = DateTime::parse_from_rfc3339(value).map_err(|_| CliError::InvalidValue {
                    flag: flag.to_string(),
                    value: value.to_string(),
                })?;
                self.start = Some(start.with_timezone(&Utc));
            }
            "--strict" => self.strict = true,
            "-r" | "--recipe" => self.recipe = Some(PathBuf::from(take_value(args, i, flag)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Merge recipe, flags and defaults into a plan.
    pub fn resolve(&self, default_steps: usize) -> Result<WalkPlan, CliError> {
        let recipe = self.recipe.as_ref().map(Recipe::load).transpose()?;
        if let Some(recipe) = &recipe {
            info!("loaded recipe '{}'", recipe.name);
        }

        let base = recipe.as_ref().map(|r| r.walker).unwrap_or_default();
        let config = WalkerConfig {
            origin: self.origin.unwrap_or(base.origin),
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
            max_step_fraction: self.fraction.unwrap_or(base.max_step_fraction),
        };

        let recipe_ts = recipe.as_ref().and_then(|r| r.timestamps);
        let timestamps = match (self.start, self.interval, recipe_ts) {
            (None, None, ts) => ts,
            (start, interval, ts) => Some(Timestamps {
                start: start.or(ts.map(|t| t.start)).unwrap_or_else(Utc::now),
                interval_secs: interval.or(ts.map(|t| t.interval_secs)).unwrap_or(1),
            }),
        };

        Ok(WalkPlan {
            name: recipe.as_ref().map(|r| r.name.clone()),
            config,
            steps: self
                .steps
                .or(recipe.as_ref().and_then(|r| r.steps))
                .unwrap_or(default_steps),
            seed: self.seed.or(recipe.as_ref().and_then(|r| r.seed)),
            timestamps,
            strict: self.strict,
        })
    }
}

/// Everything needed to run one walk.
#[derive(Debug, Clone)]
pub struct WalkPlan {
    pub name: Option<String>,
    pub config: WalkerConfig,
    pub steps: usize,
    pub seed: Option<u64>,
    pub timestamps: Option<Timestamps>,
    pub strict: bool,
}

impl WalkPlan {
    /// Build the walker.
    ///
    /// A seed selects the replayable [`Rng`]; without one the walker is
    /// clock-seeded. In strict mode the configuration is validated first.
    pub fn build_walker(&self) -> Result<DynWalker, CliError> {
        let source: Box<dyn UniformSource> = match self.seed {
            Some(seed) => Box::new(Rng::new(seed)),
            None => {
                let clock = ClockSource::new();
                debug!("clock-seeded source, seed {}", clock.seed());
                Box::new(clock)
            }
        };

        let c = &self.config;
        if self.strict {
            Ok(RandomWalker::from_config_with_source(c, source)?)
        } else {
            Ok(RandomWalker::with_source(c.origin, c.min, c.max, c.max_step_fraction, source))
        }
    }
}

/// Write `content` to `path`, or to stdout when `path` is `None` or `-`.
pub fn write_output(path: Option<&str>, content: &str) -> Result<(), CliError> {
    match path {
        None | Some("-") => {
            print!("{}", content);
            Ok(())
        }
        Some(path) => {
            fs::write(path, content).map_err(|source| CliError::Write {
                path: PathBuf::from(path),
                source,
            })?;
            info!("wrote {}", path);
            Ok(())
        }
    }
}
