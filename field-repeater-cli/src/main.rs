use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use field_repeater::{
    InputKind, JsonFileStore, ListController, RepeaterUI, UiOptions, ValueKind, WidgetOptions,
    WidgetParameters,
};

#[derive(Debug, Parser)]
#[command(
    name = "field-repeater",
    version,
    about = "Edit an ordered list field of a JSON document in the terminal"
)]
struct Cli {
    /// JSON document holding the field (created on first save)
    #[arg(short = 's', long = "store", value_name = "FILE")]
    store: PathBuf,

    /// JSON pointer to the field inside the document; empty means the whole document
    #[arg(short = 'p', long = "pointer", value_name = "POINTER", default_value = "")]
    pointer: String,

    /// Widget parameters: inline JSON object or path to a JSON file
    #[arg(long = "params", value_name = "SPEC")]
    params: Option<String>,

    /// Shape of each entry
    #[arg(short = 'k', long = "kind", value_enum)]
    kind: Option<Kind>,

    /// Input kind of the value column (text, url, email, tel)
    #[arg(long = "input-type", value_name = "KIND")]
    input_type: Option<String>,

    /// Label of the value column
    #[arg(long = "label", value_name = "TEXT")]
    label: Option<String>,

    /// Title shown above the list
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Only allow adding, deleting and reordering entries
    #[arg(long = "no-edit")]
    no_edit: bool,

    /// Quit without asking even when a draft is unsaved
    #[arg(long = "no-confirm-exit")]
    no_confirm_exit: bool,

    /// Write logs to this file (RUST_LOG controls the level, default warn)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the normalized list as JSON and exit without starting the UI
    #[arg(long = "dump")]
    dump: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Scalar,
    Address,
}

impl From<Kind> for ValueKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Scalar => ValueKind::Scalar,
            Kind::Address => ValueKind::Address,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.dump)?;

    let widget = resolve_widget_options(&cli)?;
    let store = JsonFileStore::open(&cli.store, &cli.pointer)
        .wrap_err_with(|| format!("failed to open {}", cli.store.display()))?;
    info!(path = %cli.store.display(), pointer = %store.pointer(), "store opened");

    if cli.dump {
        let controller = ListController::mount(store, widget);
        let rendered = serde_json::to_string_pretty(controller.items())?;
        println!("{rendered}");
        return Ok(());
    }

    let mut options = UiOptions::default().with_confirm_exit(!cli.no_confirm_exit);
    if let Some(title) = cli.title.clone() {
        options = options.with_title(title);
    }
    let items = RepeaterUI::new(store, widget)
        .with_options(options)
        .run()
        .map_err(|err| eyre!("{err:#}"))?;
    info!(count = items.len(), "repeater closed");
    Ok(())
}

fn resolve_widget_options(cli: &Cli) -> Result<WidgetOptions> {
    let mut params = match &cli.params {
        Some(spec) => {
            let value = load_params(spec)?;
            WidgetParameters::from_json(&value).wrap_err("invalid widget parameters")?
        }
        None => WidgetParameters::default(),
    };
    if let Some(kind) = cli.kind {
        params.value_kind = Some(kind.into());
    }
    if let Some(raw) = &cli.input_type {
        params.input_type = InputKind::parse_lenient(raw);
    }
    if let Some(label) = &cli.label {
        params.label = Some(label.clone());
    }
    if cli.no_edit {
        params.allow_inline_edit = Some(false);
    }
    Ok(WidgetOptions::from_parameters(&params))
}

fn load_params(spec: &str) -> Result<Value> {
    let trimmed = spec.trim_start();
    let contents = if trimmed.starts_with('{') {
        spec.to_string()
    } else {
        fs::read_to_string(spec).wrap_err_with(|| format!("failed to read params file {spec}"))?
    };
    serde_json::from_str(&contents).wrap_err("params are not valid JSON")
}

/// Log to a file while the terminal is taken over; `--dump` may also log to
/// stderr since it never enters the alternate screen.
fn init_tracing(log_file: Option<&Path>, console: bool) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            fs::create_dir_all(directory)
                .wrap_err_with(|| format!("failed to create {}", directory.display()))?;
            let file_name = path
                .file_name()
                .ok_or_else(|| eyre!("log file path has no file name"))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            Some(
                fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(filter()),
            )
        }
        None => None,
    };
    let console_layer = console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(filter())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_params() {
        let cli = Cli::parse_from([
            "field-repeater",
            "--store",
            "doc.json",
            "--params",
            r#"{"inputType":"url","label":"Links"}"#,
            "--label",
            "Websites",
            "--no-edit",
        ]);
        let options = resolve_widget_options(&cli).unwrap();
        assert_eq!(options.input_kind, InputKind::Url);
        assert_eq!(options.label, "Websites");
        assert!(!options.allow_inline_edit);
    }

    #[test]
    fn address_kind_brings_address_defaults() {
        let cli = Cli::parse_from(["field-repeater", "-s", "doc.json", "--kind", "address"]);
        let options = resolve_widget_options(&cli).unwrap();
        assert_eq!(options.value_kind, ValueKind::Address);
        assert_eq!(options.item_type.as_deref(), Some("Official"));
        assert_eq!(options.default_country, "Canada");
    }

    #[test]
    fn unknown_input_type_is_text() {
        let cli = Cli::parse_from(["field-repeater", "-s", "d.json", "--input-type", "color"]);
        let options = resolve_widget_options(&cli).unwrap();
        assert_eq!(options.input_kind, InputKind::Text);
    }
}
