//! Shroomscan - mushroom identification and price lookup.
//!
//! Upload a mushroom photo, run the trained ONNX model on it, and show the
//! canonical species name, bilingual description and the monthly price range.

#![warn(missing_docs)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod output;
pub mod web;

use catalog::{Catalog, Language, Month};
use clap::Parser;
use cli::{CatalogAction, Cli, Command, CommonArgs, ConfigAction, PredictArgs, ServeArgs};
use config::{Config, config_file_path, load_default_config, save_default_config};
use constants::{PRICE_NOT_AVAILABLE, messages};
use inference::{LabelPredictor, MushroomClassifier};
use output::{PredictionDocument, format_price_list, write_details};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{info, warn};
use web::AppState;

pub use error::{Error, Result};

/// Main entry point for the shroomscan CLI.
#[allow(clippy::print_stdout)]
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.common.verbose, cli.common.quiet);

    let mut config = load_default_config(cli.common.config.as_deref())?;
    apply_overrides(&mut config, &cli.common);
    config::validate_config(&config)?;

    match cli.command {
        None => serve(config, &ServeArgs::from_env().unwrap_or_else(|e| e.exit())),
        Some(Command::Serve(args)) => serve(config, &args),
        Some(Command::Predict(args)) => {
            let output = predict(&config, &args)?;
            print!("{output}");
            Ok(())
        }
        Some(Command::Catalog { action }) => {
            let catalog = Catalog::from_config(&config.catalog)?;
            print!("{}", catalog_command(&catalog, action, config.defaults.language)?);
            Ok(())
        }
        Some(Command::Config { action }) => handle_config_command(action, &config),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT is noisy at info; only surface it when asked for.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Apply command-line and environment overrides on top of the config file.
pub fn apply_overrides(config: &mut Config, args: &CommonArgs) {
    if let Some(path) = &args.model_path {
        config.model.path.clone_from(path);
    }
    if let Some(path) = &args.labels_path {
        config.model.labels = Some(path.clone());
    }
    if let Some(size) = args.input_size {
        config.model.input_size = size;
    }
    if let Some(min_confidence) = args.min_confidence {
        config.model.min_confidence = min_confidence;
    }
    if let Some(path) = &args.info {
        config.catalog.info_path = Some(path.clone());
    }
    if let Some(path) = &args.prices {
        config.catalog.price_table = Some(path.clone());
    }
}

/// Load the model, logging instead of failing when it is unavailable.
fn load_predictor(config: &Config) -> Option<Arc<dyn LabelPredictor>> {
    match MushroomClassifier::from_config(&config.model) {
        Ok(classifier) => Some(Arc::new(classifier)),
        Err(e) => {
            warn!("Model not loaded: {e}");
            None
        }
    }
}

fn serve(mut config: Config, args: &ServeArgs) -> Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = &args.upload_dir {
        config.server.upload_dir.clone_from(dir);
    }
    config::validate_config(&config)?;

    info!("Starting {} v{}", constants::APP_NAME, env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::from_config(&config.catalog)?;
    let predictor = load_predictor(&config);
    let state = AppState::new(predictor, catalog, &config);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;

    runtime.block_on(web::serve(state, &config.server.host, config.server.port))
}

/// Identify one photo and format the outcome for stdout.
fn predict(config: &Config, args: &PredictArgs) -> Result<String> {
    let catalog = Catalog::from_config(&config.catalog)?;
    let classifier = MushroomClassifier::from_config(&config.model)?;
    let language = args.lang.unwrap_or(config.defaults.language);

    let model = config.model.path.display().to_string();
    let document = build_document(&classifier, &catalog, args, language, &model);

    if args.json {
        document.to_json().map(|json| json + "\n")
    } else {
        Ok(document.to_text())
    }
}

/// Run the predictor and assemble the printable document.
///
/// Prediction failures are reported inside the document, like on the page.
pub fn build_document(
    predictor: &dyn LabelPredictor,
    catalog: &Catalog,
    args: &PredictArgs,
    language: Language,
    model: &str,
) -> PredictionDocument {
    let mut document = PredictionDocument {
        source_file: args.image.display().to_string(),
        analysis_date: chrono::Utc::now(),
        model: model.to_string(),
        prediction: None,
        result: None,
        error: None,
    };

    match predictor.predict(&args.image) {
        Ok(Some(prediction)) => {
            document.result = catalog.describe(&prediction.label, args.month.as_deref(), language);
            if document.result.is_none() {
                document.error = Some(messages::NO_MUSHROOM_DETECTED.to_string());
            }
            document.prediction = Some(prediction);
        }
        Ok(None) => document.error = Some(messages::NO_MUSHROOM_DETECTED.to_string()),
        Err(e) => document.error = Some(format!("Prediction error: {e}")),
    }

    document
}

/// Handle `catalog list` / `catalog show`.
pub fn catalog_command(
    catalog: &Catalog,
    action: CatalogAction,
    default_language: Language,
) -> Result<String> {
    match action {
        CatalogAction::List { month } => {
            let month = match month {
                Some(m) => m
                    .parse::<Month>()
                    .map_err(|_| Error::InvalidMonth { value: m.clone() })?,
                None => Month::current(),
            };
            Ok(format_price_list(catalog, month))
        }
        CatalogAction::Show { name, lang } => {
            let language = lang.unwrap_or(default_language);
            if !canonical_known(catalog, &name) {
                return Err(Error::UnknownSpecies { name });
            }

            let mut out = String::new();
            for month in Month::ALL {
                let Some(report) = catalog.describe(&name, Some(month.abbrev()), language)
                else {
                    return Err(Error::UnknownSpecies { name });
                };
                if month == Month::Jan {
                    write_details(&mut out, &report);
                    out.push_str("  Prices by month:\n");
                }
                let price = if report.price == PRICE_NOT_AVAILABLE {
                    "-"
                } else {
                    report.price.as_str()
                };
                let _ = writeln!(out, "    {}: {price}", month.abbrev());
            }
            Ok(out)
        }
    }
}

/// Whether the catalog knows anything about a label or name.
fn canonical_known(catalog: &Catalog, name: &str) -> bool {
    catalog::canonicalize(name).is_some_and(|canonical| {
        catalog.prices().contains(&canonical)
            || catalog.info().get(name).is_some()
            || catalog.info().get(&canonical).is_some()
    })
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  set [model].path to your exported mushroom model (.onnx)");
                println!("  shroomscan serve");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let text = toml::to_string_pretty(config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_file_path()?.display());
            Ok(())
        }
    }
}
