use clap::builder::{RangedI64ValueParser, TypedValueParser};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use symscout::backend::parse_hits;
use symscout::config::Config;
use symscout::console::PreparedSearch;
use symscout::error::SearchError;
use symscout::output::{
    format_outcome, format_tree, json_response, AggregateResponse, ErrorResponse, OutputFormat,
    QueryPreview,
};
use symscout::output_common::{
    format_timings, format_total_header, is_json_format, render_json_response,
};
use symscout::{aggregate_hits, build_tree, correct_search_string, HttpBackend, SearchConsole};
use tracing_subscriber::EnvFilter;

// Custom value parser for ranged usize - needed because clap doesn't provide RangedUsizeValueParser
fn ranged_usize(min: i64, max: i64) -> impl TypedValueParser<Value = usize> {
    let inner = RangedI64ValueParser::new().range(min..=max);
    inner.map(|v: i64| v as usize)
}

#[derive(Parser)]
#[command(
    name = "symscout",
    version = env!("CARGO_PKG_VERSION"),
    about = "Search imported symbols across an indexed code base"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = OutputFormat::Human)]
    output: OutputFormat,

    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend address (overrides config and SYMSCOUT_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Maximum hits per search (overrides config and SYMSCOUT_SIZE)
    #[arg(long, global = true, value_parser = ranged_usize(1, 10000))]
    size: Option<usize>,

    #[arg(long, global = true)]
    show_metrics: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(after_help = SEARCH_EXAMPLES)]
    Search {
        #[arg(long)]
        query: String,

        /// Skip fetching the top-ranked file
        #[arg(long)]
        no_view: bool,
    },

    #[command(after_help = QUERY_EXAMPLES)]
    Query {
        #[arg(long)]
        query: String,
    },

    #[command(after_help = AGGREGATE_EXAMPLES)]
    Aggregate {
        #[arg(long)]
        query: String,

        /// Saved backend response (full _search body or hit array)
        #[arg(long, value_name = "FILE")]
        hits: PathBuf,
    },
}

const SEARCH_EXAMPLES: &str = r#"
EXAMPLES:
  # Files importing anything ending in List
  symscout search --query "List"

  # Several names; every one has to be imported
  symscout search --query "HashMap, List"

  # Explicit wildcards
  symscout search --query "java.util.*, ?ashMap"

  # Literal search, no automatic * prefix
  symscout search --query "'java.util.List"

  # Against another backend, JSON output
  symscout --url es.local:9201 --size 20 search --query "Map" --output json
"#;

const QUERY_EXAMPLES: &str = r#"
EXAMPLES:
  # Show the backend request for a search without sending it
  symscout query --query "HashMap, List" --output pretty
"#;

const AGGREGATE_EXAMPLES: &str = r#"
EXAMPLES:
  # Rank files from a saved backend response
  symscout aggregate --query "List" --hits response.json

  # JSON output for programmatic use
  symscout aggregate --query "Map*" --hits hits.json --output json
"#;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = dispatch(&cli) {
        emit_error(&cli, &err);
        std::process::exit(1);
    }
}

fn dispatch(cli: &Cli) -> Result<(), SearchError> {
    match &cli.command {
        None => Err(SearchError::InvalidQuery {
            query: "No subcommand provided. Use --help for usage information.".to_string(),
        }),
        Some(cmd) => match cmd {
            Command::Search { query, no_view } => run_search(cli, query, !*no_view),
            Command::Query { query } => run_query(cli, query),
            Command::Aggregate { query, hits } => run_aggregate(cli, query, hits),
        },
    }
}

/// Defaults, then the config file, then environment, then flags.
fn resolve_config(cli: &Cli) -> Result<Config, SearchError> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    config.apply_env()?;
    if let Some(url) = &cli.url {
        let size = cli.size.unwrap_or(config.result_size);
        config.update(url, size);
    } else if let Some(size) = cli.size {
        config.result_size = size;
    }
    config.validate()?;
    Ok(config)
}

fn run_search(cli: &Cli, query: &str, with_view: bool) -> Result<(), SearchError> {
    let config = resolve_config(cli)?;
    let backend = HttpBackend::new(&config)?;
    let console = SearchConsole::new(config, backend);

    let outcome = console.search(query, with_view)?;

    if is_json_format(cli.output) {
        let performance = cli.show_metrics.then_some(outcome.timings);
        println!("{}", render_json_response(&outcome, performance, cli.output)?);
    } else {
        print!("{}", format_outcome(&outcome));
        if cli.show_metrics {
            eprintln!("{}", format_timings(&outcome.timings));
        }
    }
    Ok(())
}

fn run_query(cli: &Cli, query: &str) -> Result<(), SearchError> {
    let config = resolve_config(cli)?;
    let prepared = PreparedSearch::new(query, &config);

    if is_json_format(cli.output) {
        let preview = QueryPreview {
            query: prepared.raw,
            corrected: prepared.corrected,
            index: config.source_index,
            size: config.result_size,
            body: prepared.body,
        };
        println!("{}", render_json_response(&preview, None, cli.output)?);
    } else {
        println!("corrected: {}", prepared.corrected);
        for clause in &prepared.query.must {
            let kind = if clause.is_wildcard() { "wildcard" } else { "term" };
            println!("  {} {}", kind, clause.value());
        }
        println!("{}", serde_json::to_string_pretty(&prepared.body)?);
    }
    Ok(())
}

fn run_aggregate(cli: &Cli, query: &str, hits_path: &Path) -> Result<(), SearchError> {
    let text = std::fs::read_to_string(hits_path)?;
    let hits = parse_hits(serde_json::from_str(&text)?)?;
    let corrected = correct_search_string(query);
    let files = aggregate_hits(&corrected, &hits);
    let tree = build_tree(&files);

    if is_json_format(cli.output) {
        let response = AggregateResponse {
            query: query.to_string(),
            corrected,
            total_hits: hits.len() as u64,
            files,
            tree,
        };
        println!("{}", render_json_response(&response, None, cli.output)?);
    } else {
        println!("{}", format_total_header(files.len() as u64));
        print!("{}", format_tree(&tree));
    }
    Ok(())
}

fn emit_error(cli: &Cli, err: &SearchError) {
    match cli.output {
        OutputFormat::Human => {
            eprintln!("ERROR [{}]: {}", err.error_code(), err);
            if let Some(hint) = err.remediation() {
                eprintln!("Hint: {}", hint);
            }
        }
        OutputFormat::Json | OutputFormat::Pretty => {
            let error = ErrorResponse {
                code: err.error_code().to_string(),
                error: err.severity().to_string(),
                message: err.to_string(),
                remediation: err.remediation().map(|s| s.to_string()),
            };
            let response = json_response(error);
            let result = if matches!(cli.output, OutputFormat::Pretty) {
                serde_json::to_string_pretty(&response)
            } else {
                serde_json::to_string(&response)
            };
            match result {
                Ok(payload) => println!("{}", payload),
                Err(ser_err) => eprintln!("ERROR: {}", ser_err),
            }
        }
    }
}
