mod graph;
mod schema;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sql-erd")]
#[command(version)]
#[command(
    about = "Render SQL schemas as interactive entity-relationship diagrams",
    long_about = None
)]
pub struct Cli {
    /// Verbose diagnostics on stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an ERD with one image node per table and one edge per foreign key
    Graph {
        /// Input SQL DDL file, or JSON table records
        /// Supports .gz, .bz2, .xz, .zst compression
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: html, json (detected from the output extension if not specified)
        #[arg(short, long)]
        format: Option<String>,

        /// Input format: sql, json (detected from the file extension if not specified)
        #[arg(long)]
        input_format: Option<String>,

        /// YAML config file with style, physics and canvas settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only include these tables (comma-separated, supports globs)
        #[arg(short, long)]
        tables: Option<String>,

        /// Exclude these tables (comma-separated, supports globs)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Document title (default: "ERD - <file name>")
        #[arg(long)]
        title: Option<String>,
    },

    /// Print JSON Schemas for the JSON input, output and config formats
    Schema {
        /// Schema name: config, graph, tables (all when omitted)
        name: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Graph {
            file,
            output,
            format,
            input_format,
            config,
            tables,
            exclude,
            title,
        } => graph::run(
            file,
            output,
            format,
            input_format,
            config,
            tables,
            exclude,
            title,
        ),
        Commands::Schema { name } => schema::run(name),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sql-erd", &mut io::stdout());
            Ok(())
        }
    }
}
