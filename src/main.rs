//! Command-line entry point.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use site_i18n::BuildContext;
use site_i18n::config::ValidationOptions;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "site-i18n", version, about = "Validate i18n configuration and translations")]
struct Cli {
    /// Project root containing `i18n.config.json`
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Require `name` on every locale
    #[arg(long, global = true)]
    require_name: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the configuration and load every translation file
    Check,
    /// Print the script that assigns the runtime globals
    Globals,
    /// Print one resolved translation
    Translate {
        #[arg(long)]
        locale: String,

        key: String,

        /// Placeholder value, as `name=value`
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Build(#[from] site_i18n::BuildError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let options = ValidationOptions { require_name: cli.require_name, ..ValidationOptions::default() };
    let context = BuildContext::from_project(&cli.root, &options)?;
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Command::Check => report(&context),
        Command::Globals => write!(stdout, "{}", context.globals()?.to_script())?,
        Command::Translate { locale, key, vars } => {
            let vars: Vec<(&str, &str)> =
                vars.iter().map(|(name, value)| (name.as_str(), value.as_str())).collect();
            writeln!(stdout, "{}", context.locale(locale).t(key, &vars))?;
        }
    }

    Ok(())
}

fn report(context: &BuildContext) {
    let config = context.config();
    if !config.enabled {
        tracing::info!("i18n is disabled");
        return;
    }

    tracing::info!(default = %config.default, locales = config.locales.len(), "Configuration is valid");
    let translations = context.translations();
    for (code, table) in translations.iter() {
        tracing::info!(locale = code, entries = table.len(), "Translations loaded");
        let missing = translations.missing_keys(code, &config.default);
        if !missing.is_empty() {
            tracing::warn!(locale = code, missing = ?missing, "Keys missing compared to the default locale");
        }
    }
}
