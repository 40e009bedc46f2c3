//! tablegrid CLI - inspect and edit tables stored as JSON

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use tablegrid::{
    apply_operation, columns_count,
    diagnostics::{check_table, format_diagnostics},
    matrix_to_text, table_from_json, table_to_html, table_to_json, ColumnLayout, GridOptions,
    Operation, Table,
};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tgrid")]
#[command(version)]
#[command(about = "tablegrid - span-aware table grid editor", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Input table (JSON); reads from stdin if not provided
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Rendered table width in pixels, used for width computations
    #[arg(long, global = true, default_value_t = 1000.0)]
    width: f64,

    /// Fraction digits in width percentages
    #[arg(long, global = true, default_value_t = 10)]
    precision: usize,

    /// Separator placed between merged contents
    #[arg(long, global = true, default_value = "<br/>")]
    separator: String,

    /// Pretty print JSON output
    #[arg(short, long, global = true)]
    pretty: bool,

    /// Log operations to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check a table for structural issues
    Check {
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the occupancy matrix
    Matrix,

    /// Render the table as HTML
    Html,

    /// Apply a structural operation and print the edited table
    Apply {
        #[command(subcommand)]
        op: OpCommand,

        /// Select cells before the operation, as `row:index` (repeatable)
        #[arg(short, long, value_parser = parse_position)]
        select: Vec<(usize, usize)>,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum OpCommand {
    /// Insert a row of empty cells
    AppendRow {
        /// Anchor row (appends at the bottom if not provided)
        row: Option<usize>,
        /// Insert before the anchor instead of after it
        #[arg(long)]
        before: bool,
    },
    /// Remove a physical row
    RemoveRow { row: usize },
    /// Insert a column of empty cells
    AppendColumn {
        col: usize,
        /// Insert before the column instead of after it
        #[arg(long)]
        before: bool,
    },
    /// Remove a column
    RemoveColumn { col: usize },
    /// Merge the selected cells
    Merge,
    /// Split the selected cells into left and right parts
    SplitVertical,
    /// Split the selected cells into top and bottom parts
    SplitHorizontal,
    /// Remove redundant spans and attributes
    Normalize,
    /// Change the width of a column by a pixel delta
    SetColumnWidth {
        col: usize,
        #[arg(allow_hyphen_values = true)]
        delta: f64,
    },
}

#[cfg(feature = "cli")]
impl From<OpCommand> for Operation {
    fn from(cmd: OpCommand) -> Self {
        match cmd {
            OpCommand::AppendRow { row, before } => Operation::AppendRow {
                row,
                after: !before,
            },
            OpCommand::RemoveRow { row } => Operation::RemoveRow { row },
            OpCommand::AppendColumn { col, before } => Operation::AppendColumn {
                col,
                after: !before,
            },
            OpCommand::RemoveColumn { col } => Operation::RemoveColumn { col },
            OpCommand::Merge => Operation::Merge,
            OpCommand::SplitVertical => Operation::SplitVertical,
            OpCommand::SplitHorizontal => Operation::SplitHorizontal,
            OpCommand::Normalize => Operation::Normalize,
            OpCommand::SetColumnWidth { col, delta } => Operation::SetColumnWidth { col, delta },
        }
    }
}

#[cfg(feature = "cli")]
fn parse_position(value: &str) -> Result<(usize, usize), String> {
    let (row, index) = value
        .split_once(':')
        .ok_or_else(|| format!("expected `row:index`, got `{}`", value))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid number `{}`: {}", s, e))
    };
    Ok((parse(row)?, parse(index)?))
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    let default = if verbose { "tablegrid=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn read_table(input: Option<&str>) -> io::Result<Table> {
    let text = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    table_from_json(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(feature = "cli")]
fn write_output(output: Option<&str>, result: &str) -> io::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, result)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => println!("{}", result),
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Info = cli.command {
        println!("tablegrid - span-aware table grid editor");
        println!("Version: {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Operations:");
        println!("  ✓ append-row, remove-row");
        println!("  ✓ append-column, remove-column");
        println!("  ✓ merge, split-vertical, split-horizontal");
        println!("  ✓ normalize, set-column-width");
        println!();
        println!("Input: JSON table document ({{\"rows\": [{{\"cells\": [...]}}]}})");
        return Ok(());
    }

    let mut table = read_table(cli.input.as_deref())?;

    match cli.command {
        Commands::Check { no_color } => {
            let report = check_table(&table);
            println!("{}", format_diagnostics(&report, !no_color));

            // Exit with error code if there are errors
            if report.has_errors() {
                std::process::exit(1);
            }
        }
        Commands::Matrix => {
            write_output(cli.output.as_deref(), &matrix_to_text(&table))?;
        }
        Commands::Html => {
            write_output(cli.output.as_deref(), &table_to_html(&table))?;
        }
        Commands::Apply { op, select } => {
            if !select.is_empty() {
                tablegrid::clear_selection(&mut table);
                for (row, index) in select {
                    let Some(cell) = table.cell_at(row, index) else {
                        eprintln!("✗ No cell at {}:{}", row, index);
                        std::process::exit(1);
                    };
                    if let Err(e) = tablegrid::add_selected(&mut table, cell) {
                        eprintln!("✗ {}", e);
                        std::process::exit(1);
                    }
                }
            }

            let op = Operation::from(op);
            let options = GridOptions::with_precision(cli.precision).line_separator(cli.separator);
            let layout = ColumnLayout::new(cli.width);

            if let Err(e) = apply_operation(&mut table, &op, &layout, &options) {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
            eprintln!(
                "✓ {} rows, {} columns",
                table.row_count(),
                columns_count(&table)
            );

            let json = table_to_json(&table, cli.pretty)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            write_output(cli.output.as_deref(), &json)?;
        }
        Commands::Info => {}
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install tablegrid --features cli");
    eprintln!("  tgrid [OPTIONS] <COMMAND>");
}
