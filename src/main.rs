use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tf_idf_matrix::{
    config::ReportConfig,
    logging::init_tracing,
    vectorizer::evaluate::boolean::NO_MATCHES,
    workbook::{SheetLayout, Workbook},
    CorpusMatrices, Query, TitledTable,
};
use tracing::{debug, info};

/// Compute frequency, TF, IDF and TF-IDF matrices for a document set and
/// match queries against it with the boolean and vector space models.
#[derive(Debug, Parser)]
#[command(name = "tf-idf-matrix", version, about)]
struct Cli {
    /// TOML file with `documents`, `queries` and `[export]` settings
    #[arg(short, long, env = "TFIDF_MATRIX_CONFIG")]
    config: Option<PathBuf>,

    /// Document text; repeat for more documents (replaces the configured ones)
    #[arg(short, long = "doc", value_name = "TEXT")]
    docs: Vec<String>,

    /// Query text; repeat for more queries (replaces the configured ones)
    #[arg(short, long = "query", value_name = "TEXT")]
    queries: Vec<String>,

    /// Write every table to this workbook (`.json` for JSON, otherwise CBOR)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decimals used when printing
    #[arg(long)]
    precision: Option<usize>,

    /// Empty columns between tables in the workbook
    #[arg(long)]
    gutter: Option<usize>,

    /// Do not print the tables
    #[arg(long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Explicit log filter, e.g. `trace` or `tf_idf_matrix=debug`
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if !cli.docs.is_empty() {
        config.documents = cli.docs.clone();
    }
    if !cli.queries.is_empty() {
        config.queries = cli.queries.clone();
    }
    if let Some(precision) = cli.precision {
        config.export.precision = precision;
    }
    if let Some(gutter) = cli.gutter {
        config.export.gutter = gutter;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_level.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let config = load_config(&cli)?;
    let precision = config.export.precision;
    let start = Instant::now();

    let matrices = CorpusMatrices::from_documents(&config.documents)?;
    let queries = Query::parse_all(&config.queries);
    let boolean = matrices.boolean(&queries);
    let similarity = matrices.similarity(&queries);
    debug!(elapsed = ?start.elapsed(), "pipeline finished");

    let mut tables = matrices.tables();
    tables.push(TitledTable::new("Boolean Model (AND)", matrices.boolean_table(&boolean)));
    tables.push(TitledTable::new("Vector Model (Cosine)", matrices.similarity_table(&similarity)));

    if !cli.quiet {
        for table in &tables {
            println!("{:.*}\n", precision, table);
        }

        println!("Boolean Model (AND):");
        for (idx, row) in boolean.iter().enumerate() {
            println!("Q{} ({}): {}", idx + 1, row.query, row.summary());
        }

        println!("\nVector Model (Cosine):");
        for (idx, row) in similarity.iter().enumerate() {
            for (doc, score) in row.scores.iter().enumerate() {
                println!(
                    "Q{} ({}) vs D{}: {:.*}",
                    idx + 1,
                    row.query,
                    doc + 1,
                    precision,
                    score
                );
            }
            let hits = row.hits();
            match hits.top() {
                Some(best) if best.score > 0.0 => println!(
                    "Q{} best match: {} ({:.*})",
                    idx + 1,
                    best.label,
                    precision,
                    best.score
                ),
                _ => println!("Q{} best match: {}", idx + 1, NO_MATCHES),
            }
        }
    }

    if let Some(path) = &cli.output {
        let layout = SheetLayout::new(config.export.gutter)?;
        let workbook = Workbook::from_tables(&config.export.sheet, layout, &tables);
        workbook
            .save(path)
            .with_context(|| format!("writing workbook {}", path.display()))?;
        info!(path = %path.display(), tables = tables.len(), "workbook written");
    }

    Ok(())
}
