//! ROBOKOP CLI
//!
//! Command-line access to the query graph core:
//! - Validating and normalizing TRAPI messages and query graphs
//! - Ordering query nodes the way the answer table does
//! - Rendering result tables, optionally styled by a Biolink model
//! - Inspecting the Biolink class hierarchy, concepts and predicates

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use robokop_results::{average_analyses_scores, make_table_headers, make_table_rows, sort_by_score};
use robokop_trapi::validate::{validate_bindings, validate_graph, validate_message, QUERY_GRAPH_LABEL};
use robokop_trapi::strings::{node_from_biolink, BIOLINK_PREFIX};
use robokop_trapi::{
    find_starting_node, sort_nodes, to_list_representation, to_wire, Message, Normalizer,
    TrapiVersion,
};

mod input;
mod render;

use input::{load_biolink, load_style, query_graph_of, read_json};

#[derive(Parser)]
#[command(name = "robokop")]
#[command(author, version, about = "ROBOKOP: TRAPI query graph tools")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Style configuration (JSON)
    #[arg(long, global = true, env = "ROBOKOP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a TRAPI message (or a bare query graph) for structural problems.
    ///
    /// Exits with a non-zero status when any problem is found.
    Validate {
        /// Input JSON (`-` for stdin)
        input: PathBuf,
        /// Treat the input as a query graph instead of a `{"message": ...}` document
        #[arg(long)]
        graph: bool,
    },

    /// Normalize a query graph to current TRAPI and print it.
    Normalize {
        /// Input JSON (`-` for stdin)
        input: PathBuf,
        /// TRAPI version the input was written for (e.g. 0.9, 1.0); detected per field otherwise
        #[arg(long = "trapi-version")]
        trapi_version: Option<TrapiVersion>,
        /// Emit the legacy list representation
        #[arg(long)]
        list: bool,
        /// Leave nodes without a name unnamed instead of synthesizing one
        #[arg(long)]
        no_names: bool,
    },

    /// Print query node ids in answer table order, one per line.
    Order {
        /// Input JSON (`-` for stdin)
        input: PathBuf,
        /// Start the walk here instead of at the chosen root
        #[arg(long)]
        start: Option<String>,
    },

    /// Render the result table of a TRAPI message.
    Table {
        /// Input JSON (`-` for stdin)
        input: PathBuf,
        /// Biolink class document (JSON) used for labels and colors
        #[arg(long)]
        biolink: Option<PathBuf>,
        /// Emit columns and rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the hierarchy of a Biolink class.
    Hierarchy {
        /// Biolink class document (JSON)
        biolink: PathBuf,
        /// Class CURIE or Biolink name (`biolink:Gene`, `gene`)
        class: String,
    },

    /// List the Biolink classes offered as query concepts.
    Concepts {
        /// Biolink class document (JSON)
        biolink: PathBuf,
    },

    /// List the Biolink predicates with their domain and range.
    Predicates {
        /// Biolink class document (JSON)
        biolink: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { input, graph } => cmd_validate(&input, graph),
        Commands::Normalize {
            input,
            trapi_version,
            list,
            no_names,
        } => cmd_normalize(&input, trapi_version, list, !no_names),
        Commands::Order { input, start } => cmd_order(&input, start.as_deref()),
        Commands::Table {
            input,
            biolink,
            json,
        } => cmd_table(&input, cli.config.as_ref(), biolink.as_ref(), json),
        Commands::Hierarchy { biolink, class } => cmd_hierarchy(&biolink, cli.config.as_ref(), &class),
        Commands::Concepts { biolink } => cmd_concepts(&biolink, cli.config.as_ref()),
        Commands::Predicates { biolink, json } => cmd_predicates(&biolink, cli.config.as_ref(), json),
    }
}

fn cmd_validate(input: &Path, graph_only: bool) -> Result<()> {
    let document = read_json(input)?;
    let mut issues = if graph_only {
        validate_graph(&document, QUERY_GRAPH_LABEL)
    } else {
        validate_message(&document)
    };

    // Binding checks need a parsed message, so only run them on a clean one.
    if issues.is_empty() && !graph_only {
        match Message::from_envelope(&document) {
            Ok(message) => issues.extend(
                validate_bindings(&message.query_graph, message.results())
                    .into_iter()
                    .map(|issue| issue.to_string()),
            ),
            Err(err) => issues.push(err.to_string()),
        }
    }

    if issues.is_empty() {
        eprintln!("{} {} is valid", "ok".green().bold(), input.display());
        return Ok(());
    }
    for issue in &issues {
        eprintln!("{} {issue}", "error:".red().bold());
    }
    Err(anyhow!(
        "{} problem(s) found in {}",
        issues.len(),
        input.display()
    ))
}

fn cmd_normalize(
    input: &Path,
    version: Option<TrapiVersion>,
    list: bool,
    names: bool,
) -> Result<()> {
    let document = read_json(input)?;
    let graph = Normalizer::new()
        .with_version(version)
        .with_synthesized_names(names)
        .normalize(query_graph_of(&document))?;
    let wire = if list {
        to_list_representation(&graph)
    } else {
        to_wire(&graph)
    };
    println!("{}", serde_json::to_string_pretty(&wire)?);
    Ok(())
}

fn cmd_order(input: &Path, start: Option<&str>) -> Result<()> {
    let document = read_json(input)?;
    let graph = Normalizer::new().normalize(query_graph_of(&document))?;
    let start = match start {
        Some(start) => Some(start.to_string()),
        None => find_starting_node(&graph),
    };
    let Some(start) = start else {
        eprintln!("{} query graph has no nodes", "info:".yellow().bold());
        return Ok(());
    };
    tracing::debug!(start = %start, "ordering query nodes");
    for node_id in sort_nodes(&graph, &start) {
        println!("{node_id}");
    }
    Ok(())
}

fn cmd_table(
    input: &Path,
    config: Option<&PathBuf>,
    biolink: Option<&PathBuf>,
    as_json: bool,
) -> Result<()> {
    let document = read_json(input)?;
    let mut message = Message::from_envelope(&document)?;
    let model = load_biolink(biolink, load_style(config)?)?;

    if let Some(results) = message.results.as_mut() {
        average_analyses_scores(results);
        sort_by_score(results);
    }
    let columns = make_table_headers(&message, &*model);
    let rows = make_table_rows(&message, &columns);

    if as_json {
        let out = json!({ "columns": columns, "rows": rows });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render::table_text(&columns, &rows));
    }
    Ok(())
}

fn cmd_hierarchy(biolink: &PathBuf, config: Option<&PathBuf>, class: &str) -> Result<()> {
    let model = load_biolink(Some(biolink), load_style(config)?)?;
    let curie = if class.starts_with(BIOLINK_PREFIX) {
        class.to_string()
    } else {
        node_from_biolink(class)
    };
    let hierarchy = model.hierarchy(&curie);
    if hierarchy.is_empty() {
        return Err(anyhow!("unknown Biolink class `{curie}`"));
    }
    for member in hierarchy {
        if member == &curie {
            println!("{}", member.bold());
        } else {
            println!("{member}");
        }
    }
    Ok(())
}

fn cmd_concepts(biolink: &PathBuf, config: Option<&PathBuf>) -> Result<()> {
    let model = load_biolink(Some(biolink), load_style(config)?)?;
    for concept in &model.concepts {
        println!("{concept}");
    }
    Ok(())
}

fn cmd_predicates(biolink: &PathBuf, config: Option<&PathBuf>, as_json: bool) -> Result<()> {
    let model = load_biolink(Some(biolink), load_style(config)?)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&model.predicates)?);
        return Ok(());
    }
    for predicate in &model.predicates {
        println!(
            "{}\t{}\t{}",
            predicate.predicate,
            predicate.domain.as_deref().unwrap_or("-"),
            predicate.range.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
