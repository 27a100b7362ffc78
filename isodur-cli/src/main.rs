use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use isodur_common::{ElapsedTime, ErrorReporting, IsoDuration, IsodurError};
use isodur_config::{Config, OutputFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "isodur")]
#[command(about = "isodur (ISO 8601 duration toolkit)")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file to use instead of ~/.config/isodur/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a duration and print its fields as JSON
    Parse {
        input: String,
    },

    /// Build a duration from individual fields
    Format {
        #[arg(long, default_value_t = 0)]
        weeks: u64,
        #[arg(long, default_value_t = 0)]
        years: u64,
        #[arg(long, default_value_t = 0)]
        days: u64,
        #[arg(long, default_value_t = 0)]
        hours: u64,
        #[arg(long, default_value_t = 0)]
        minutes: u64,
        #[arg(long, default_value_t = 0)]
        seconds: u64,
    },

    /// Print the elapsed time of a duration or configured alias
    Elapsed {
        /// Duration or alias name (defaults to global.default from the config)
        input: Option<String>,

        #[arg(long, value_enum)]
        output: Option<OutputArg>,
    },

    /// Convert a humantime or ISO 8601 expression to canonical ISO 8601
    FromElapsed {
        input: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Iso,
    Human,
    Seconds,
    Nanos,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Iso => OutputFormat::Iso,
            OutputArg::Human => OutputFormat::Human,
            OutputArg::Seconds => OutputFormat::Seconds,
            OutputArg::Nanos => OutputFormat::Nanos,
        }
    }
}

#[derive(Serialize)]
struct DurationFields {
    weeks: u64,
    years: u64,
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
    canonical: String,
    elapsed_secs: u64,
}

impl From<IsoDuration> for DurationFields {
    fn from(d: IsoDuration) -> Self {
        Self {
            weeks: d.weeks,
            years: d.years,
            days: d.days,
            hours: d.hours,
            minutes: d.minutes,
            seconds: d.seconds,
            canonical: d.to_string(),
            elapsed_secs: d.to_elapsed().as_secs(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        match e.downcast_ref::<IsodurError>() {
            Some(err) => {
                err.log_error("isodur");
                eprintln!("Error: {}", err.user_friendly_message());
            }
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_or_default()?,
    };
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Parse { input } => {
            let duration = isodur_common::parse(&input).map_err(IsodurError::from)?;
            log::debug!("Parsed {:?} as {:?}", input, duration);
            println!("{}", serde_json::to_string_pretty(&DurationFields::from(duration))?);
        }

        Commands::Format { weeks, years, days, hours, minutes, seconds } => {
            let duration = IsoDuration { weeks, years, days, hours, minutes, seconds };
            if weeks != 0 && duration != (IsoDuration { weeks, ..IsoDuration::default() }) {
                log::warn!("--weeks is set, other fields are dropped from the output");
            }
            println!("{}", isodur_common::format(&duration));
        }

        Commands::Elapsed { input, output } => {
            let config = load_config(cli.config.as_deref())?;
            let duration = match input {
                Some(input) => config.resolve(&input)?,
                None => config.global.default,
            };
            let format = output.map(OutputFormat::from).unwrap_or(config.global.output);
            println!("{}", render_elapsed(duration.to_elapsed(), format));
        }

        Commands::FromElapsed { input } => {
            let elapsed = isodur_common::parse_duration(&input)?;
            if elapsed.subsec_nanos() != 0 {
                log::warn!("Dropping sub-second part of {:?}", elapsed);
            }
            println!("{}", isodur_common::from_elapsed(elapsed));
        }
    }

    Ok(())
}

fn render_elapsed(elapsed: ElapsedTime, format: OutputFormat) -> String {
    match format {
        OutputFormat::Iso => isodur_common::from_elapsed(elapsed).to_string(),
        OutputFormat::Human => humantime::format_duration(elapsed).to_string(),
        OutputFormat::Seconds => elapsed.as_secs().to_string(),
        OutputFormat::Nanos => elapsed.as_nanos().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_elapsed() {
        let elapsed = Duration::from_secs(8811 * 3600 + 4 * 60 + 5);

        assert_eq!(render_elapsed(elapsed, OutputFormat::Iso), "P367DT3H4M5S");
        assert_eq!(render_elapsed(elapsed, OutputFormat::Seconds), "31719845");
        assert_eq!(render_elapsed(elapsed, OutputFormat::Nanos), "31719845000000000");
        assert_eq!(
            render_elapsed(Duration::from_secs(3723), OutputFormat::Human),
            "1h 2m 3s"
        );
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["isodur", "elapsed", "P1W", "--output", "seconds"]).unwrap();
        match cli.command {
            Commands::Elapsed { input, output } => {
                assert_eq!(input.as_deref(), Some("P1W"));
                assert_eq!(output, Some(OutputArg::Seconds));
            }
            _ => panic!("Expected elapsed subcommand"),
        }

        let cli = Cli::try_parse_from(["isodur", "format", "--years", "1", "--days", "2"]).unwrap();
        match cli.command {
            Commands::Format { years, days, weeks, .. } => {
                assert_eq!((years, days, weeks), (1, 2, 0));
            }
            _ => panic!("Expected format subcommand"),
        }
    }

    #[test]
    fn test_duration_fields_json() {
        let duration = isodur_common::parse("P1Y2D").unwrap();
        let json = serde_json::to_value(DurationFields::from(duration)).unwrap();

        assert_eq!(json["years"], 1);
        assert_eq!(json["days"], 2);
        assert_eq!(json["canonical"], "P1Y2D");
        assert_eq!(json["elapsed_secs"], 8808 * 3600);
    }
}
