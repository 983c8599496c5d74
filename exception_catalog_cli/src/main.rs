//! # Exception Catalog CLI
//!
//! Loads a catalog from property files and prints resolved entities as JSON.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use exception_catalog::{
    CatalogConfig, DynamicCode, MessageResolver, PatternContext, PatternEntity, Variables,
};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "exception-catalog", version)]
#[command(about = "Resolve error codes against a property-file message catalog")]
#[command(
    after_help = "Environment:\n  EXCEPTION_MESSAGE_FILES_PATH      Base directory of the property files\n  EXCEPTION_MESSAGE_FILE_NAME       Message file name\n  EXCEPTION_DEBUG_FILE_NAME         Debug file name\n  EXCEPTION_SOLUTION_FILE_NAME      Solution file name\n  EXCEPTION_HTTP_STATUS_FILE_NAME   HTTP status file name\n  RUST_LOG                          Log filter override"
)]
struct Cli {
    /// TOML catalog configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the property files
    #[arg(long, global = true)]
    base_path: Option<PathBuf>,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve one error code
    Resolve {
        code: String,
        /// Text used when no pattern is configured
        #[arg(long, default_value = "")]
        default_value: String,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Print the default entity
    Default,
    /// List registered codes with their stored patterns
    List,
    /// Print the per-source load report
    Report,
}

#[derive(Debug, Default, Args)]
#[group(multiple = false)]
struct ContextArgs {
    /// Plain text bound as ${text}
    #[arg(long)]
    text: Option<String>,
    /// Variable binding, repeatable
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    vars: Vec<(String, String)>,
    /// JSON value whose top-level fields become variables
    #[arg(long, value_name = "JSON")]
    json: Option<String>,
}

impl ContextArgs {
    fn into_context(self) -> Result<PatternContext, serde_json::Error> {
        if let Some(text) = self.text {
            return Ok(PatternContext::Text(text));
        }
        if let Some(json) = self.json {
            let value: serde_json::Value = serde_json::from_str(&json)?;
            return Ok(PatternContext::serialized(&value));
        }
        if self.vars.is_empty() {
            return Ok(PatternContext::Absent);
        }
        Ok(PatternContext::Vars(self.vars.into_iter().collect::<Variables>()))
    }
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// One row of `list` output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    code: String,
    configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    http_status: Option<u16>,
}

impl CatalogEntry {
    fn new(code: String, pattern: Option<PatternEntity>) -> Self {
        match pattern {
            Some(pattern) => Self {
                code,
                configured: true,
                message: pattern.message_pattern,
                debug: pattern.debug_pattern,
                solution: pattern.solution_pattern,
                http_status: pattern.http_status.map(|status| status.as_u16()),
            },
            None => Self {
                code,
                configured: false,
                message: None,
                debug: None,
                solution: None,
                http_status: None,
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.base_path)?;
    log::debug!(
        "Loading exception catalog from {}",
        config.message_files_path.display()
    );
    let resolver = MessageResolver::new(&config);

    let output = run(&resolver, cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Config file (or defaults), then environment, then `--base-path`
fn load_config(
    path: Option<&std::path::Path>,
    base_path: Option<PathBuf>,
) -> Result<CatalogConfig, exception_catalog::ConfigError> {
    let config = match path {
        Some(path) => CatalogConfig::from_toml_file(path)?,
        None => CatalogConfig::default(),
    }
    .with_env_overrides();

    Ok(match base_path {
        Some(base_path) => config.with_message_files_path(base_path),
        None => config,
    })
}

fn run(
    resolver: &MessageResolver,
    command: Command,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let value = match command {
        Command::Resolve {
            code,
            default_value,
            context,
        } => {
            let descriptor = DynamicCode::new(code, default_value);
            let resolved = resolver.resolve(&descriptor, context.into_context()?);
            serde_json::to_value(resolved)?
        }
        Command::Default => serde_json::to_value(resolver.default_exception())?,
        Command::List => {
            let entries: Vec<CatalogEntry> = resolver
                .codes()
                .into_iter()
                .map(|code| {
                    let pattern = resolver.pattern(&code);
                    CatalogEntry::new(code, pattern)
                })
                .collect();
            serde_json::to_value(entries)?
        }
        Command::Report => serde_json::to_value(resolver.load_report())?,
    };
    Ok(value)
}
