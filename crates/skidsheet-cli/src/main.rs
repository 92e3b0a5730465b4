mod commands;
mod config;
mod error;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skidsheet",
    version,
    about = "Shipment report builder: skid line items and packaging summary from query rows"
)]
struct Cli {
    /// Configuration file (YAML), applied over the global config
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a shipment report from query rows (JSON, CSV or XLSX)
    Report {
        /// Path to the rows file
        input_file: PathBuf,

        /// Declaration row (JSON) to fill the report header from
        #[arg(short, long, value_name = "FILE")]
        declaration: Option<PathBuf>,

        /// Client name (overrides the declaration)
        #[arg(long)]
        client: Option<String>,

        /// Shipment number (overrides the declaration)
        #[arg(long)]
        shipment: Option<String>,

        /// Export date (overrides the declaration)
        #[arg(long)]
        export_date: Option<String>,

        /// Shipment origin
        #[arg(long)]
        from: Option<String>,

        /// Shipment destination
        #[arg(long)]
        to: Option<String>,

        /// Worksheet to read when the input is XLSX (default: first sheet)
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long)]
        output: Option<String>,

        /// Write the report as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Show which parts are classified as packaging, and why
    Classify {
        /// Path to the rows file
        input_file: PathBuf,

        /// Worksheet to read when the input is XLSX (default: first sheet)
        #[arg(long, value_name = "NAME")]
        sheet: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the request body for the upstream query API
    Query {
        /// Declaration id to build the report query for (omit to list declarations)
        declaration_id: Option<String>,

        /// SQL template containing {ID_FROM_TABLE} (overrides the config)
        #[arg(long)]
        template: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = config::Config::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Report {
            input_file,
            declaration,
            client,
            shipment,
            export_date,
            from,
            to,
            sheet,
            output,
            out,
        } => commands::report::run(
            &config,
            commands::report::ReportArgs {
                input_file,
                declaration,
                client,
                shipment,
                export_date,
                from,
                to,
                sheet,
                output,
                out,
            },
        ),
        Commands::Classify {
            input_file,
            sheet,
            output,
        } => commands::classify::run(&config, input_file, sheet, output),
        Commands::Query {
            declaration_id,
            template,
        } => commands::query::run(&config, declaration_id, template),
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
