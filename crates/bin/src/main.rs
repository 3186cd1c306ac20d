//! Tally CLI binary.
//!
//! Extracts canonical financial statements from `.xlsx` filings.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tally::fields::{dictionary_for, get_field_spec, list_field_names};
use tally::output::ExportFormat;
use tally::sheet::{HeaderRows, TableOptions, Workbook, XlsxWorkbook, detect_bounds, extract_table};
use tally::{ExtractionConfig, StatementKind, TableKind, extract_batch_with_progress, extract_table_batch};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Tally: canonical financial statements from spreadsheet filings", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract statements from filings
    Extract {
        /// Filing workbooks or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "output")]
        out: PathBuf,

        /// Output format (csv, json or pretty-json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Statement to extract; repeat for several (default: all)
        #[arg(long = "statement")]
        statements: Vec<String>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Treat amounts as reported in thousands
        #[arg(long)]
        thousands: bool,

        /// Run report style (table, markdown or json)
        #[arg(long, default_value = "table")]
        report: String,

        /// Also write the run report as JSON to this file
        #[arg(long)]
        report_file: Option<PathBuf>,
    },

    /// Export proxy, ownership, insider and other tables with their own headers
    Tables {
        /// Filing workbooks or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "output/tables")]
        out: PathBuf,

        /// Output format (csv, json or pretty-json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Table kind to extract; repeat for several (default: all)
        #[arg(long = "table")]
        tables: Vec<String>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the sheets of a workbook
    Sheets {
        /// Workbook path
        file: PathBuf,
    },

    /// Show the table detected on one sheet
    Inspect {
        /// Workbook path
        file: PathBuf,

        /// Sheet name
        #[arg(long)]
        sheet: String,

        /// Fixed number of header rows (default: detect)
        #[arg(long)]
        header_rows: Option<usize>,

        /// Maximum data rows to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// List canonical fields and their synonyms
    Fields {
        /// Only this statement
        #[arg(long)]
        statement: Option<String>,

        /// Show one field of the statement
        #[arg(long, requires = "statement")]
        field: Option<String>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract { paths, out, format, statements, config, thousands, report, report_file } => {
            let mut config = ExtractionConfig::load(config.as_deref())?;
            if !statements.is_empty() {
                config = config.with_statements(parse_statements(&statements)?);
            }
            if thousands {
                config.reported_in_thousands = true;
            }
            let format: ExportFormat = format.parse()?;
            extract(&paths, &out, format, &config, &report, report_file.as_deref())?;
        }
        Commands::Tables { paths, out, format, tables, config } => {
            let config = ExtractionConfig::load(config.as_deref())?;
            let kinds = if tables.is_empty() {
                TableKind::ALL.to_vec()
            } else {
                tables.iter().map(|t| t.parse::<TableKind>()).collect::<Result<Vec<_>, _>>()?
            };
            let format: ExportFormat = format.parse()?;
            export_tables(&paths, &out, format, &kinds, &config)?;
        }
        Commands::Sheets { file } => {
            list_sheets(&file)?;
        }
        Commands::Inspect { file, sheet, header_rows, limit } => {
            inspect(&file, &sheet, header_rows, limit)?;
        }
        Commands::Fields { statement, field } => {
            let kinds = match statement {
                Some(s) => vec![s.parse::<StatementKind>()?],
                None => StatementKind::ALL.to_vec(),
            };
            match field {
                Some(name) => show_field(kinds[0], &name)?,
                None => list_fields(&kinds),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn parse_statements(names: &[String]) -> Result<Vec<StatementKind>, Box<dyn std::error::Error>> {
    names.iter().map(|n| n.parse::<StatementKind>().map_err(Into::into)).collect()
}

/// Expands directories to the `.xlsx` files directly inside them.
fn collect_filings(paths: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| is_workbook(p))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn is_workbook(path: &Path) -> bool {
    let is_xlsx = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    // Excel lock files
    let is_lock = path.file_name().is_some_and(|n| n.to_string_lossy().starts_with("~$"));
    path.is_file() && is_xlsx && !is_lock
}

fn extract(
    paths: &[PathBuf],
    out: &Path,
    format: ExportFormat,
    config: &ExtractionConfig,
    report_style: &str,
    report_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_filings(paths)?;
    if files.is_empty() {
        return Err("no .xlsx filings found".into());
    }
    info!(files = files.len(), "starting extraction");

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let batch = extract_batch_with_progress(&files, config, |file, _| {
        let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        pb.set_message(name);
        pb.inc(1);
    });
    pb.finish_with_message(format!("Extracted {} of {} filings", batch.filings.len(), files.len()));

    for path in batch.export(out, format)? {
        println!("Wrote {}", path.display());
    }

    let report = batch.report();
    match report_style {
        "json" => println!("{}", report.to_json()?),
        "markdown" | "md" => println!("\n{}", report.to_markdown()),
        _ => println!("\n{}", report),
    }
    if let Some(path) = report_file {
        batch.write_report(path)?;
    }

    if batch.has_failures() {
        return Err(format!("{} of {} filings failed", batch.failures.len(), batch.files_total()).into());
    }
    Ok(())
}

fn export_tables(
    paths: &[PathBuf],
    out: &Path,
    format: ExportFormat,
    kinds: &[TableKind],
    config: &ExtractionConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_filings(paths)?;
    if files.is_empty() {
        return Err("no .xlsx filings found".into());
    }
    info!(files = files.len(), kinds = kinds.len(), "starting table extraction");

    let batch = extract_table_batch(&files, kinds, config);
    let written = batch.export(out, format)?;
    for path in &written {
        println!("Wrote {}", path.display());
    }
    println!("\n{} tables from {} filings", written.len(), files.len() - batch.failures.len());
    for failure in &batch.failures {
        println!("  failed: {}: {}", failure.path.display(), failure.error);
    }

    if !batch.failures.is_empty() {
        return Err(format!("{} of {} filings failed", batch.failures.len(), files.len()).into());
    }
    Ok(())
}

fn list_sheets(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = XlsxWorkbook::open(file)?;
    println!("{}", file.display());
    println!("{}", "=".repeat(80));
    println!("{:<60} {:>8} {:>8}", "Sheet", "Rows", "Columns");
    println!("{}", "-".repeat(80));
    for info in workbook.sheet_info()? {
        println!("{:<60} {:>8} {:>8}", info.name, info.rows, info.columns);
    }
    Ok(())
}

fn inspect(
    file: &Path,
    sheet: &str,
    header_rows: Option<usize>,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = XlsxWorkbook::open(file)?;
    let grid = workbook.read_sheet(sheet)?;

    let mut options = TableOptions::default();
    if let Some(n) = header_rows {
        options = options.with_header_rows(HeaderRows::Fixed(n));
    }

    let Some(bounds) = detect_bounds(&grid, options.min_non_null) else {
        println!("No table found on sheet '{}'", sheet);
        return Ok(());
    };
    let Some(table) = extract_table(&grid, &options) else {
        println!("Sheet '{}' has a table region but no data rows", sheet);
        return Ok(());
    };

    println!("Sheet:       {}", sheet);
    println!("Grid:        {} x {}", grid.height(), grid.width());
    println!(
        "Table:       rows {}..={}, columns {}..={}",
        bounds.first_row, bounds.last_row, bounds.first_col, bounds.last_col
    );
    println!("Header rows: {}", table.header_rows());
    println!("{}", "=".repeat(80));
    println!("{}", table.header().join(" | "));
    println!("{}", "-".repeat(80));
    for row in table.rows().iter().take(limit) {
        let cells: Vec<String> = row.iter().map(|c| c.display_value()).collect();
        println!("{}", cells.join(" | "));
    }
    if table.len() > limit {
        println!("... {} more rows", table.len() - limit);
    }
    Ok(())
}

fn show_field(kind: StatementKind, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let spec = get_field_spec(kind, name)?;
    println!("{} / {}", kind.title(), spec.name);
    println!("  kind:     {:?}", spec.kind);
    println!("  sign:     {:?}", spec.sign);
    println!("  synonyms: {}", spec.synonyms.join(", "));
    Ok(())
}

fn list_fields(kinds: &[StatementKind]) {
    for kind in kinds {
        let dictionary = dictionary_for(*kind);
        println!("{} ({})", kind.title(), kind);
        println!("{}", "=".repeat(80));
        for field in dictionary.fields {
            println!("  {:28} {:?}", field.name, field.kind);
            println!("      {}", field.synonyms.join(", "));
        }
        for derived in dictionary.derived {
            println!("  {:28} derived: {}", derived.name, derived.description);
        }
        println!("  columns: {}\n", list_field_names(*kind).join(", "));
    }
}
