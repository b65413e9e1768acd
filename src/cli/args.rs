//! CLI argument definitions.

use crate::catalog::Language;
use crate::cli::validators::{parse_confidence, parse_language};
use clap::{Args, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;

/// Identify mushrooms from photos and look up their market prices.
#[derive(Debug, Parser)]
#[command(name = "shroomscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (defaults to `serve`).
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options shared by all commands.
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web application.
    Serve(ServeArgs),
    /// Identify a single photo and print the result.
    Predict(PredictArgs),
    /// Inspect the price table and mushroom info.
    Catalog {
        /// Catalog action to perform.
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Catalog subcommand actions.
#[derive(Debug, Subcommand)]
pub enum CatalogAction {
    /// List species with price ranges for a month.
    List {
        /// Month (Jan-Dec, full name or 1-12; default: current month).
        #[arg(long)]
        month: Option<String>,
    },
    /// Show everything known about one species.
    Show {
        /// Model label or canonical name (e.g. `oyster_mushroom`).
        name: String,
        /// Text language.
        #[arg(long, value_parser = parse_language)]
        lang: Option<Language>,
    },
}

/// Options shared by all commands.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Configuration file (default: platform config dir).
    #[arg(long, global = true, env = "SHROOMSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to ONNX model file (overrides config).
    #[arg(long, global = true, env = "MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Path to labels file (overrides config).
    #[arg(long, global = true, env = "SHROOMSCAN_LABELS_PATH")]
    pub labels_path: Option<PathBuf>,

    /// Square model input size in pixels (overrides config).
    #[arg(long, global = true, env = "SHROOMSCAN_INPUT_SIZE")]
    pub input_size: Option<u32>,

    /// Minimum confidence threshold (0.0-1.0).
    #[arg(short = 'c', long, global = true, value_parser = parse_confidence, env = "SHROOMSCAN_MIN_CONFIDENCE")]
    pub min_confidence: Option<f32>,

    /// Mushroom info JSON (overrides config).
    #[arg(long, global = true, env = "SHROOMSCAN_INFO")]
    pub info: Option<PathBuf>,

    /// Price table CSV (overrides config).
    #[arg(long, global = true, env = "SHROOMSCAN_PRICES")]
    pub prices: Option<PathBuf>,

    /// Only show warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: trace+ORT debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for `serve`.
#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Bind address.
    #[arg(long, env = "SHROOMSCAN_HOST")]
    pub host: Option<String>,

    /// Bind port.
    #[arg(short, long, env = "SHROOMSCAN_PORT")]
    pub port: Option<u16>,

    /// Directory for saved uploads.
    #[arg(long, env = "SHROOMSCAN_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// Serve options for a bare `shroomscan` invocation.
    ///
    /// No serve flags can appear on that command line, so only the
    /// environment bindings apply.
    pub fn from_env() -> Result<Self, clap::Error> {
        let matches =
            Self::augment_args(clap::Command::new("serve")).try_get_matches_from(["serve"])?;
        Self::from_arg_matches(&matches)
    }
}

/// Arguments for `predict`.
#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Photo to identify.
    pub image: PathBuf,

    /// Month for the price (Jan-Dec, full name or 1-12; default: current month).
    #[arg(long)]
    pub month: Option<String>,

    /// Text language.
    #[arg(long, value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_subcommand() {
        let cli = Cli::try_parse_from(["shroomscan"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.common.verbose, 0);
    }

    #[test]
    fn test_cli_parse_serve() {
        let cli =
            Cli::try_parse_from(["shroomscan", "serve", "--port", "8080", "-v"]).unwrap();
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(8080)),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.common.verbose, 1);
    }

    #[test]
    fn test_serve_args_from_env_without_vars() {
        let args = ServeArgs::from_env().unwrap();
        if std::env::var_os("SHROOMSCAN_PORT").is_none() {
            assert_eq!(args.port, None);
        }
        if std::env::var_os("SHROOMSCAN_HOST").is_none() {
            assert_eq!(args.host, None);
        }
    }

    #[test]
    fn test_cli_parse_predict_with_options() {
        let cli = Cli::try_parse_from([
            "shroomscan",
            "predict",
            "cap.jpg",
            "--month",
            "Mar",
            "--lang",
            "hi",
            "--json",
            "-c",
            "0.4",
        ])
        .unwrap();
        assert_eq!(cli.common.min_confidence, Some(0.4));
        match cli.command {
            Some(Command::Predict(args)) => {
                assert_eq!(args.image, PathBuf::from("cap.jpg"));
                assert_eq!(args.month.as_deref(), Some("Mar"));
                assert_eq!(args.lang, Some(Language::Hi));
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_confidence() {
        assert!(Cli::try_parse_from(["shroomscan", "predict", "a.jpg", "-c", "2"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_language() {
        assert!(
            Cli::try_parse_from(["shroomscan", "predict", "a.jpg", "--lang", "fr"]).is_err()
        );
    }

    #[test]
    fn test_cli_parse_catalog_show() {
        let cli =
            Cli::try_parse_from(["shroomscan", "catalog", "show", "oyster_mushroom"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Catalog {
                action: CatalogAction::Show { .. }
            })
        ));
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["shroomscan", "config", "show"]);
        assert!(cli.is_ok());
    }
}
