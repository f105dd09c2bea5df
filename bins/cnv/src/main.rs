use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use cnv_api::{convert, Converter, Convertible, NamedValues};
use cnv_engine::{EngineError, Registry};

#[derive(Parser)]
#[command(name = "cnv", about = "Convert between text and typed values")]
struct Cli {
    /// Path to a TOML file with named strategy presets.
    #[arg(long, env = "CNV_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse text into a typed value and print it.
    Parse {
        #[command(flatten)]
        strategy: StrategyArgs,
        /// Type to parse into.
        #[arg(long)]
        target: TypeName,
        text: String,
    },
    /// Format a value as text with the chosen strategy.
    Format {
        #[command(flatten)]
        strategy: StrategyArgs,
        /// Type of the value.
        #[arg(long)]
        source: TypeName,
        value: String,
    },
    /// List strategies and the params they recognize.
    List,
}

#[derive(clap::Args)]
struct StrategyArgs {
    /// Strategy name: a backend or a configured preset.
    #[arg(long = "with", default_value = "strtol")]
    name: String,
    /// Extra param applied on top of the strategy, e.g. `base=16`.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeName {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    /// Sample named type with values `no`, `up`, `dn`.
    Change,
}

/// Sample user-defined type.
#[derive(Debug, Clone, Copy, PartialEq, NamedValues)]
enum Change {
    No,
    Up,
    Dn,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("?"))
    }
}

impl FromStr for Change {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Change::from_name(s).ok_or_else(|| format!("expected one of {:?}", Change::NAMES))
    }
}

macro_rules! dispatch {
    ($ty:expr, $run:ident ( $($arg:expr),* )) => {
        match $ty {
            TypeName::I8 => $run::<i8>($($arg),*),
            TypeName::I16 => $run::<i16>($($arg),*),
            TypeName::I32 => $run::<i32>($($arg),*),
            TypeName::I64 => $run::<i64>($($arg),*),
            TypeName::I128 => $run::<i128>($($arg),*),
            TypeName::Isize => $run::<isize>($($arg),*),
            TypeName::U8 => $run::<u8>($($arg),*),
            TypeName::U16 => $run::<u16>($($arg),*),
            TypeName::U32 => $run::<u32>($($arg),*),
            TypeName::U64 => $run::<u64>($($arg),*),
            TypeName::Usize => $run::<usize>($($arg),*),
            TypeName::F32 => $run::<f32>($($arg),*),
            TypeName::F64 => $run::<f64>($($arg),*),
            TypeName::Change => $run::<Change>($($arg),*),
        }
    };
}

fn parse_as<T>(text: &str, cnv: &dyn Converter) -> Result<Option<String>, String>
where
    T: Convertible + fmt::Display,
{
    Ok(convert::<T>(text, cnv).map(|v| v.to_string()).into_option())
}

fn format_as<T>(value: &str, cnv: &dyn Converter) -> Result<Option<String>, String>
where
    T: Convertible + FromStr,
    T::Err: fmt::Display,
{
    let value: T = value
        .parse()
        .map_err(|e| format!("invalid value '{value}': {e}"))?;
    Ok(convert::<String>(value, cnv).into_option())
}

fn load_registry(config: Option<&PathBuf>) -> Result<Registry, EngineError> {
    match config {
        Some(path) => {
            tracing::info!(config = %path.display(), "loading configuration");
            Registry::from_file(path)
        }
        None => Registry::bootstrap(&Default::default()),
    }
}

fn converter(registry: &Registry, args: &StrategyArgs) -> Result<std::sync::Arc<dyn Converter>, EngineError> {
    if args.params.is_empty() {
        return registry.get(&args.name);
    }
    let overrides = cnv_engine::parse_assignments(args.params.iter().map(String::as_str))?;
    registry.configured(&args.name, Some(&overrides))
}

fn list(registry: &Registry) {
    for strategy in registry.strategies() {
        let params: Vec<_> = strategy
            .backend()
            .params()
            .iter()
            .map(|p| p.name())
            .collect();
        println!(
            "{:<12} {:<8} [{}]",
            strategy.name(),
            strategy.backend(),
            params.join(", ")
        );
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = match load_registry(cli.config.as_ref()) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "failed to load strategies");
            return ExitCode::FAILURE;
        }
    };

    let (strategy, outcome) = match &cli.command {
        Command::List => {
            list(&registry);
            return ExitCode::SUCCESS;
        }
        Command::Parse {
            strategy,
            target,
            text,
        } => (strategy, converter(&registry, strategy).map(|cnv| {
            dispatch!(*target, parse_as(text, &*cnv))
        })),
        Command::Format {
            strategy,
            source,
            value,
        } => (strategy, converter(&registry, strategy).map(|cnv| {
            dispatch!(*source, format_as(value, &*cnv))
        })),
    };

    match outcome {
        Err(e) => {
            tracing::error!(strategy = %strategy.name, error = %e, "failed to configure strategy");
            ExitCode::FAILURE
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "bad input value");
            ExitCode::FAILURE
        }
        Ok(Ok(Some(text))) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Ok(Ok(None)) => {
            tracing::warn!(strategy = %strategy.name, "conversion produced no value");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "cnv", "parse", "--with", "stream", "--target", "u8", "--param", "base=16", "ff",
        ])
        .unwrap();
        match cli.command {
            Command::Parse {
                strategy,
                target,
                text,
            } => {
                assert_eq!(strategy.name, "stream");
                assert_eq!(strategy.params, ["base=16"]);
                assert!(matches!(target, TypeName::U8));
                assert_eq!(text, "ff");
            }
            _ => panic!("expected parse"),
        }
        assert!(Cli::try_parse_from(["cnv", "format", "--source", "bool", "1"]).is_err());
    }

    #[test]
    fn parse_and_format_through_registry() {
        let registry = Registry::builtin();
        let args = StrategyArgs {
            name: "strtol".into(),
            params: vec!["base=16".into(), "uppercase=true".into()],
        };
        let cnv = converter(&registry, &args).unwrap();
        assert_eq!(
            dispatch!(TypeName::I32, format_as("255", &*cnv)),
            Ok(Some("FF".to_string()))
        );
        assert_eq!(dispatch!(TypeName::U8, parse_as("FF", &*cnv)), Ok(Some("255".to_string())));
        assert_eq!(dispatch!(TypeName::U8, parse_as("1FF", &*cnv)), Ok(None));
        assert!(dispatch!(TypeName::U8, format_as("x", &*cnv)).is_err());
    }

    #[test]
    fn named_sample_type() {
        let cnv = Registry::builtin().get("stream").unwrap();
        assert_eq!(
            dispatch!(TypeName::Change, parse_as(" dn ", &*cnv)),
            Ok(Some("dn".to_string()))
        );
        assert_eq!(
            dispatch!(TypeName::Change, format_as("up", &*cnv)),
            Ok(Some("up".to_string()))
        );
    }
}
