use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use finguide_search::{Conversation, RetrievalConfig, Retriever};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod report;

use report::{rank_entries, CorpusReport};

#[derive(Parser)]
#[command(name = "finguide")]
#[command(about = "Local finance knowledge retrieval for grounding chat replies", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,

    /// Retrieval config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Knowledge directory (overrides corpus.root from the config)
    #[arg(long, global = true)]
    docs_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the context bundle for a query
    Context(ContextArgs),

    /// Show every relevant document with its score
    Rank(RankArgs),

    /// Show the loaded corpus and load statistics
    Corpus(CorpusArgs),

    /// Ground a chat turn: inject fresh context into a conversation
    Ground(GroundArgs),
}

#[derive(Args)]
struct ContextArgs {
    /// Free-text query
    query: String,

    /// Number of documents to include (at least 1)
    #[arg(short, long = "top-k")]
    k: Option<usize>,

    /// Excerpt character budget
    #[arg(long)]
    max_chars: Option<usize>,
}

#[derive(Args)]
struct RankArgs {
    /// Free-text query
    query: String,

    /// Show at most this many documents
    #[arg(long)]
    limit: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct CorpusArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct GroundArgs {
    /// Incoming chat message
    #[arg(long)]
    message: String,

    /// Conversation JSON file ("-" reads stdin); a new conversation when omitted
    #[arg(long)]
    conversation: Option<PathBuf>,

    /// Role of the incoming message
    #[arg(long, default_value = "user")]
    role: String,

    /// Number of documents to include (at least 1)
    #[arg(short, long = "top-k")]
    k: Option<usize>,

    /// Excerpt character budget
    #[arg(long)]
    max_chars: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = load_config(cli.config.as_ref(), cli.docs_dir.as_ref())?;
    let retriever = Retriever::new(&config);

    match cli.command {
        Commands::Context(args) => run_context(&retriever, args),
        Commands::Rank(args) => run_rank(&retriever, args),
        Commands::Corpus(args) => run_corpus(&retriever, args),
        Commands::Ground(args) => run_ground(&retriever, args),
    }
}

fn load_config(path: Option<&PathBuf>, docs_dir: Option<&PathBuf>) -> Result<RetrievalConfig> {
    let mut config = match path {
        Some(path) => RetrievalConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RetrievalConfig::default(),
    };
    if let Some(dir) = docs_dir {
        config = config.with_root(dir);
    }
    log::debug!("Knowledge directory: {}", config.corpus.root.display());
    Ok(config)
}

fn run_context(retriever: &Retriever, args: ContextArgs) -> Result<()> {
    let limits = retriever.limits();
    let context = retriever.retrieve(
        &args.query,
        args.k.unwrap_or(limits.k),
        args.max_chars.unwrap_or(limits.max_chars),
    );
    if context.is_empty() {
        log::info!("No relevant context for query");
    } else {
        println!("{context}");
    }
    Ok(())
}

fn run_rank(retriever: &Retriever, args: RankArgs) -> Result<()> {
    let ranked = retriever.rank(&args.query);
    let entries = rank_entries(&ranked, args.limit);
    print_json(&entries, args.pretty)
}

fn run_corpus(retriever: &Retriever, args: CorpusArgs) -> Result<()> {
    let cache = retriever.cache();
    let boost = retriever.boost();
    let report = CorpusReport::new(cache.get(), cache.stats(), |path| boost.applies_to(path));
    print_json(&report, args.pretty)
}

fn run_ground(retriever: &Retriever, args: GroundArgs) -> Result<()> {
    let mut conversation = match &args.conversation {
        Some(path) => read_conversation(path)?,
        None => Conversation::new(),
    };

    let limits = retriever.limits();
    conversation
        .ground_turn(
            retriever,
            &args.message,
            &args.role,
            args.k.unwrap_or(limits.k),
            args.max_chars.unwrap_or(limits.max_chars),
        )
        .context("Failed to ground chat turn")?;

    print_json(&conversation, args.pretty)
}

fn read_conversation(path: &Path) -> Result<Conversation> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read conversation from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read conversation {}", path.display()))?
    };
    serde_json::from_str(&raw).context("Conversation is not valid JSON")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
