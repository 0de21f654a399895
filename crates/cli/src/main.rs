use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use boundfield_tui::{BoundInputConfig, Outcome};
use boundfield_types::{FieldDefinition, FieldType, FilterMode, TransformKind};
use clap::{Parser, ValueEnum};

/// Edit a single bound text field in the terminal and print the submitted value.
#[derive(Debug, Parser)]
#[command(name = "boundfield", version, about)]
struct Cli {
    /// YAML or JSON file describing the field; flags override its values
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Field identifier
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    label: Option<String>,
    /// Label style: primary, secondary, muted, accent or error
    #[arg(long)]
    label_style: Option<String>,
    /// Rendering hint such as text or password
    #[arg(long = "type", value_name = "TYPE")]
    field_type: Option<String>,
    /// Initial value
    #[arg(long)]
    value: Option<String>,
    /// Regular expression used to filter input
    #[arg(long)]
    pattern: Option<String>,
    #[arg(long, value_enum)]
    filter_mode: Option<FilterModeArg>,
    #[arg(long, value_enum)]
    transform: Option<TransformArg>,
    #[arg(long)]
    placeholder: Option<String>,
    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterModeArg {
    PerCharacter,
    WholeValue,
}

impl From<FilterModeArg> for FilterMode {
    fn from(value: FilterModeArg) -> Self {
        match value {
            FilterModeArg::PerCharacter => FilterMode::PerCharacter,
            FilterModeArg::WholeValue => FilterMode::WholeValue,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TransformArg {
    Uppercase,
    Lowercase,
    Trim,
    Digits,
}

impl From<TransformArg> for TransformKind {
    fn from(value: TransformArg) -> Self {
        match value {
            TransformArg::Uppercase => TransformKind::Uppercase,
            TransformArg::Lowercase => TransformKind::Lowercase,
            TransformArg::Trim => TransformKind::Trim,
            TransformArg::Digits => TransformKind::Digits,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let base = match cli.config.as_deref() {
        Some(path) => load_definition(path)?,
        None => FieldDefinition::default(),
    };
    let definition = merge_flags(base, &cli);
    let name = definition.name.clone();
    let config = BoundInputConfig::try_from(definition).context("invalid field configuration")?;

    match boundfield_tui::run(config)? {
        Outcome::Submitted(value) => {
            let out = serde_json::json!({ "name": name, "value": value });
            println!("{}", serde_json::to_string(&out)?);
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Cancelled => {
            tracing::info!(field = %name, "input cancelled");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Logs go to a file when requested (default level `info`), otherwise to
/// stderr at `warn` so the full-screen UI is not interleaved with records.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let default_level = if log_file.is_some() { "info" } else { "warn" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;
            let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
    Ok(())
}

fn load_definition(path: &Path) -> Result<FieldDefinition> {
    let contents = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    parse_definition(&contents, extension).with_context(|| format!("failed to parse {}", path.display()))
}

fn parse_definition(contents: &str, extension: &str) -> Result<FieldDefinition> {
    if extension.eq_ignore_ascii_case("json") {
        Ok(serde_json::from_str(contents)?)
    } else {
        Ok(serde_yaml::from_str(contents)?)
    }
}

fn merge_flags(mut definition: FieldDefinition, cli: &Cli) -> FieldDefinition {
    if let Some(name) = &cli.name {
        definition.name = name.clone();
    }
    if cli.label.is_some() {
        definition.label = cli.label.clone();
    }
    if cli.label_style.is_some() {
        definition.label_style = cli.label_style.clone();
    }
    if let Some(hint) = &cli.field_type {
        definition.field_type = FieldType::from_hint(hint);
    }
    if cli.value.is_some() {
        definition.value = cli.value.clone();
    }
    if cli.pattern.is_some() {
        definition.pattern = cli.pattern.clone();
    }
    if let Some(mode) = cli.filter_mode {
        definition.filter_mode = mode.into();
    }
    if let Some(transform) = cli.transform {
        definition.transform = Some(transform.into());
    }
    if cli.placeholder.is_some() {
        definition.placeholder = cli.placeholder.clone();
    }
    definition
}
