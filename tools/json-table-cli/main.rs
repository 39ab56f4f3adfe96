use async_trait::async_trait;
use chrono::Local;
use clap::{Parser, ValueEnum};
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use json_table::dispatch::cell_text;
use json_table::prelude::*;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// CLI-specific mirror of `OutputFormat` for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Grid,
    KeyvalueGrid,
    CsvText,
    ConsoleText,
    RawKeyvalue,
    RawIndexed,
    RawKeyvaluePair,
    RawCsv,
}

impl From<FormatCli> for OutputFormat {
    fn from(value: FormatCli) -> Self {
        match value {
            FormatCli::Grid => OutputFormat::Grid,
            FormatCli::KeyvalueGrid => OutputFormat::KeyvalueGrid,
            FormatCli::CsvText => OutputFormat::CsvText,
            FormatCli::ConsoleText => OutputFormat::ConsoleText,
            FormatCli::RawKeyvalue => OutputFormat::RawKeyvalue,
            FormatCli::RawIndexed => OutputFormat::RawIndexed,
            FormatCli::RawKeyvaluePair => OutputFormat::RawKeyvaluePair,
            FormatCli::RawCsv => OutputFormat::RawCsv,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetCli {
    None,
    Soql,
    Saql,
    Dc,
}

impl From<PresetCli> for FilterPreset {
    fn from(value: PresetCli) -> Self {
        match value {
            PresetCli::None => FilterPreset::None,
            PresetCli::Soql => FilterPreset::Soql,
            PresetCli::Saql => FilterPreset::Saql,
            PresetCli::Dc => FilterPreset::Dc,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaCli {
    Legacy,
    Extended,
}

impl From<SchemaCli> for RequestSchema {
    fn from(value: SchemaCli) -> Self {
        match value {
            SchemaCli::Legacy => RequestSchema::Legacy,
            SchemaCli::Extended => RequestSchema::Extended,
        }
    }
}

/// Convert JSON into ready formatted data tables through a json-table conversion service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the JSON source file; reads stdin when omitted
    input_path: Option<String>,

    /// Path to a settings JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Base URL of the conversion service (overrides the settings file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request schema spoken by the service
    #[arg(long, value_enum)]
    schema: Option<SchemaCli>,

    /// Output format of the result
    #[arg(short, long, value_enum)]
    format: Option<FormatCli>,

    /// Filter preset, applied before the explicit filters below
    #[arg(short, long, value_enum)]
    preset: Option<PresetCli>,

    /// Comma separated attribute names to leave out
    #[arg(long)]
    attribute_filter: Option<String>,

    /// Name of the list to turn into rows
    #[arg(long)]
    list_name_filter: Option<String>,

    /// Add a row number column
    #[arg(short, long)]
    number_column: bool,

    /// Include child lists in the result
    #[arg(long)]
    include_child_lists: bool,

    /// Path inside the source JSON to start from
    #[arg(long, default_value = "")]
    path: String,

    /// Directory to write the result file to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only re-indent the source JSON locally and print it
    #[arg(long)]
    prettify: bool,
}

/// Prints results to stdout and optionally saves them as files.
struct TerminalSurface {
    output_dir: Option<PathBuf>,
}

#[async_trait]
impl PresentationSurface for TerminalSurface {
    async fn show(&self, presentation: Presentation) {
        println!("--- {} ---", presentation.header);
        let (file_name, content) = match &presentation.config {
            PresentationConfig::Grid(grid) => {
                print_grid(grid);
                let stamp = Local::now().naive_local().format("%Y%m%d_%H%M%S");
                match grid.to_csv() {
                    Ok(csv) => (format!("JSONTable_{}.csv", stamp), csv),
                    Err(e) => {
                        eprintln!("\nError: {}", e);
                        return;
                    }
                }
            }
            PresentationConfig::Text(text) => {
                println!("{}", text.content);
                (
                    text.download_file_name(Local::now().naive_local()),
                    text.content.clone(),
                )
            }
        };

        if let Some(dir) = &self.output_dir {
            let target = dir.join(&file_name);
            match fs::write(&target, content) {
                Ok(()) => println!("\nSaved result to '{}'", target.display()),
                Err(e) => eprintln!("\nError: Could not write '{}': {}", target.display(), e),
            }
        }
    }
}

struct StderrSink;

impl ErrorSink for StderrSink {
    fn alert(&self, alert: Alert) {
        eprintln!("\n{}: {}", alert.label, alert.message);
    }
}

/// Prints a grid as a terminal table.
fn print_grid(grid: &GridConfig) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            grid.columns
                .iter()
                .map(|column| Cell::new(&column.label))
                .collect::<Vec<_>>(),
        );

    for row in &grid.rows {
        table.add_row(
            grid.columns
                .iter()
                .map(|column| Cell::new(cell_text(row.get(&column.field_name))))
                .collect::<Vec<_>>(),
        );
    }

    println!("{table}");
    println!("\n{} row(s)", grid.rows.len());
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load settings: {}", e))),
        None => Settings::default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        settings.endpoint = endpoint.clone();
    }
    if let Some(schema) = cli.schema {
        settings.schema = schema.into();
    }
    if let Err(e) = settings.validate() {
        exit_with_error(&e.to_string());
    }

    let source_text = read_source(cli.input_path.as_deref())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read JSON source: {}", e)));

    let gateway = Arc::new(HttpGateway::new(settings.endpoint.clone(), settings.schema));
    let surface = Arc::new(TerminalSurface {
        output_dir: cli.output_dir.clone(),
    });
    let mut session = Session::from_settings(&settings, gateway, surface, Arc::new(StderrSink));
    session.set_source_text(source_text);

    if cli.prettify {
        if session.prettify_source().is_err() {
            std::process::exit(1);
        }
        println!("{}", session.options().source_text);
        return;
    }

    apply_cli_options(&mut session, &cli);

    if session.create_table().await.is_err() {
        std::process::exit(1);
    }
}

fn apply_cli_options(session: &mut Session, cli: &Cli) {
    if let Some(format) = cli.format {
        session.select_output_format(format.into());
    }
    if let Some(preset) = cli.preset {
        session.select_preset(preset.into());
    }
    if let Some(filter) = &cli.attribute_filter {
        session.set_attribute_filter(filter.as_str());
    }
    if let Some(filter) = &cli.list_name_filter {
        session.set_list_name_filter(filter.as_str());
    }
    if cli.number_column {
        session.set_number_column(true);
    }
    session.set_include_child_lists(cli.include_child_lists);
    session.set_path(cli.path.as_str());
}

fn read_source(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
