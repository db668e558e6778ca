//! Graph command implementation for ERD generation.

use crate::config::DiagramConfig;
use crate::error::DiagramError;
use crate::graph::{
    build, emit, BuildOutcome, DiagramSink, HtmlNetwork, JsonSink, OutputFormat, TableFilter,
};
use crate::parser::{Compression, Parser, SMALL_BUFFER_SIZE};
use crate::schema::{normalize, DdlParser, ParsedTable};
use anyhow::{anyhow, Result};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How the input file is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// SQL DDL statements
    Sql,
    /// Pre-parsed table records (a JSON array)
    Json,
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sql" | "ddl" => Ok(InputFormat::Sql),
            "json" => Ok(InputFormat::Json),
            _ => Err(format!("Unknown input format: {}. Valid options: sql, json", s)),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Sql => write!(f, "sql"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

impl InputFormat {
    /// Detect from the file name, looking through any compression extension
    pub fn from_path(path: &Path) -> Self {
        let name = Compression::from_path(path).strip_extension(path);
        if name.to_lowercase().ends_with(".json") {
            InputFormat::Json
        } else {
            InputFormat::Sql
        }
    }
}

/// Run the graph command
#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    input_format: Option<String>,
    config: Option<PathBuf>,
    tables: Option<String>,
    exclude: Option<String>,
    title: Option<String>,
) -> Result<()> {
    // Parse format
    let format = if let Some(ref f) = format {
        f.parse().map_err(|e| anyhow!("{}", e))?
    } else if let Some(ref out) = output {
        // Detect from output extension
        out.extension()
            .and_then(|e| e.to_str())
            .and_then(OutputFormat::from_extension)
            .unwrap_or_default()
    } else {
        OutputFormat::default()
    };

    let input_format = match input_format {
        Some(f) => f.parse().map_err(|e: String| anyhow!(e))?,
        None => InputFormat::from_path(&file),
    };

    let filter = TableFilter::from_lists(tables.as_deref(), exclude.as_deref())
        .map_err(|e| anyhow!("invalid table pattern: {}", e))?;

    if !file.exists() {
        return Err(DiagramError::InputNotFound(file).into());
    }

    let config = match config {
        Some(path) => DiagramConfig::load(&path)?,
        None => DiagramConfig::default(),
    };

    if format != OutputFormat::Json {
        eprintln!("Generating ERD: {} [input: {}]", file.display(), input_format);
    }

    let parsed = load_tables(&file, input_format)?;
    let tables = filter.apply(normalize(parsed));

    let graph = match build(&tables, &config) {
        BuildOutcome::EmptySchema => {
            eprintln!("No tables found in the DDL.");
            return Ok(());
        }
        BuildOutcome::Built(graph) => graph,
    };

    let title = title.unwrap_or_else(|| {
        file.file_name()
            .and_then(|n| n.to_str())
            .map(|n| format!("ERD - {}", n))
            .unwrap_or_else(|| "Entity Relationship Diagram".to_string())
    });

    let mut sink: Box<dyn DiagramSink> = match format {
        OutputFormat::Html => Box::new(HtmlNetwork::new(title, &config)),
        OutputFormat::Json => Box::new(JsonSink::new()),
    };
    emit(&graph, sink.as_mut());

    // Write output
    if let Some(ref out_path) = output {
        sink.save(out_path)?;
        tracing::info!(path = %out_path.display(), format = %format, "diagram written");
        if format != OutputFormat::Json {
            eprintln!("ERD written to: {}", out_path.display());
        }
    } else {
        println!("{}", sink.render());
    }

    // Print summary if not JSON
    if format != OutputFormat::Json {
        let total_columns: usize = tables.iter().map(|t| t.columns.len()).sum();
        eprintln!(
            "\nERD: {} tables, {} columns, {} relationships",
            graph.node_count(),
            total_columns,
            graph.edge_count()
        );
        let dangling = graph.dangling_edges().count();
        if dangling > 0 {
            eprintln!("  ({} relationships point at tables not in the schema)", dangling);
        }
    }

    Ok(())
}

/// Read table records from a SQL or JSON file, decompressing as needed
pub fn load_tables(
    path: &Path,
    input_format: InputFormat,
) -> Result<Vec<ParsedTable>, DiagramError> {
    let file = File::open(path).map_err(|e| DiagramError::read(path, e))?;
    let compression = Compression::from_path(path);
    let reader = compression
        .wrap_reader(Box::new(file))
        .map_err(|e| DiagramError::read(path, e))?;

    match input_format {
        InputFormat::Sql => parse_ddl(path, reader),
        InputFormat::Json => parse_records(path, reader),
    }
}

fn parse_ddl(path: &Path, reader: Box<dyn Read>) -> Result<Vec<ParsedTable>, DiagramError> {
    let mut parser = Parser::new(reader, SMALL_BUFFER_SIZE);
    let mut ddl = DdlParser::new();

    while let Some(stmt) = parser
        .read_statement()
        .map_err(|e| DiagramError::read(path, e))?
    {
        ddl.parse_statement(&String::from_utf8_lossy(&stmt));
    }

    let tables = ddl.finish();
    tracing::debug!(tables = tables.len(), "parsed DDL");
    Ok(tables)
}

fn parse_records(
    path: &Path,
    mut reader: Box<dyn Read>,
) -> Result<Vec<ParsedTable>, DiagramError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| DiagramError::read(path, e))?;

    serde_json::from_str(&content).map_err(|e| DiagramError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
