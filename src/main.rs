use anyhow::{bail, Result};
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use yamlgrab::config::{Config, OutputFormat, PathStyle};
use yamlgrab::document::node::Value;
use yamlgrab::document::parser::{to_json, to_yaml};
use yamlgrab::file::loader::{load_file, load_stdin};
use yamlgrab::yamlpath::{self, Evaluator, Path};

/// yamlgrab - Look up values in YAML and JSON documents by path
#[derive(Parser)]
#[command(name = "yamlgrab")]
#[command(version)]
#[command(about = "Look up values in YAML and JSON documents by path", long_about = None)]
struct Cli {
    /// YAML or JSON file to read, or - for stdin
    file: String,

    /// Path to grab, e.g. /spec/containers/name=web/image or spec.containers.web.image
    #[arg(required_unless_present = "list")]
    path: Option<String>,

    /// List the paths of all leaves instead of grabbing a value
    #[arg(short, long)]
    list: bool,

    /// Render listed paths and failure positions in dot style
    #[arg(long)]
    dot: bool,

    /// Document of a multi-document stream to use, counted from 0
    #[arg(short, long, value_name = "N")]
    document: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load();
    if cli.dot {
        config.path_style = PathStyle::Dot;
    }
    if cli.json {
        config.output_format = OutputFormat::Json;
    }

    let documents = if cli.file == "-" {
        load_stdin(&config)?
    } else {
        load_file(&cli.file, &config)?
    };

    let mut stdout = io::stdout().lock();

    if cli.list {
        for (idx, document) in documents.iter().enumerate() {
            if cli.document.is_some_and(|selected| selected != idx) {
                continue;
            }
            for path in Evaluator::new(document).leaf_paths(idx, &config.identifiers()) {
                writeln!(stdout, "{}", render_path(&path, config.path_style))?;
            }
        }
        return Ok(());
    }

    let query = cli.path.unwrap_or_default();
    let document_idx = select_document(&query, cli.document)?;
    let Some(document) = documents.get(document_idx) else {
        bail!(
            "document #{} does not exist, {} has {} document(s)",
            document_idx,
            cli.file,
            documents.len()
        );
    };

    let path = yamlpath::Parser::parse_in(&query, document, &config.identifiers())?
        .with_document(document_idx);
    let value = yamlpath::grab(document, &path).map_err(|err| {
        let stopped_at = render_path(err.path(), config.path_style);
        anyhow::Error::new(err).context(format!(
            "Failed to grab {} from {} (stopped at {})",
            query, cli.file, stopped_at
        ))
    })?;

    write_value(&mut stdout, &value, config.output_format)
}

/// Picks the document a query applies to.
///
/// `--document` and a `#N` prefix may both be given only if they agree.
fn select_document(query: &str, flag: Option<usize>) -> Result<usize> {
    let from_query = yamlpath::Parser::parse(query)?.document_idx;
    let prefixed = query.trim_start().starts_with('#');

    match flag {
        None => Ok(from_query),
        Some(idx) if !prefixed || idx == from_query => Ok(idx),
        Some(idx) => bail!(
            "--document {} conflicts with the #{} prefix of {}",
            idx,
            from_query,
            query
        ),
    }
}

fn render_path(path: &Path, style: PathStyle) -> String {
    match style {
        PathStyle::GoPatch => path.to_go_patch_style(),
        PathStyle::Dot => path.to_dot_style(),
    }
}

fn write_value<W: Write>(out: &mut W, value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            let text = serde_yaml::to_string(&to_yaml(value))?;
            write!(out, "{}", text)?;
        }
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&to_json(value))?;
            writeln!(out, "{}", text)?;
        }
    }
    Ok(())
}
