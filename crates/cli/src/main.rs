use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use treeflat_core::{FlattenReport, Flattener, ResolutionState, SortStrategy};
use treeflat_io::{
    load_seed_with_fallback, read_records_from_path, write_seed, write_table_to_path, RunConfig,
    SeedSource,
};

#[derive(Parser)]
#[command(name = "treeflat")]
#[command(about = "Flatten adjacency-list hierarchies into depth-first tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a CSV hierarchy export
    Flatten(FlattenArgs),

    /// Print the default TOML configuration
    #[command(name = "default-config")]
    DefaultConfig,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    /// Plain string order of the joined path
    JoinedPath,
    /// Numeric-aware order of each path segment
    Natural,
}

impl From<SortArg> for SortStrategy {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::JoinedPath => SortStrategy::JoinedPath,
            SortArg::Natural => SortStrategy::Natural,
        }
    }
}

#[derive(Args)]
struct FlattenArgs {
    /// Input CSV (adjacency list with a header row)
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV
    #[arg(short, long)]
    output: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed file (overrides the configured primary seed)
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Seed file used when the primary seed does not exist
    #[arg(long)]
    seed_fallback: Option<PathBuf>,

    /// Start from an empty seed
    #[arg(long, conflicts_with_all = ["seed", "seed_fallback"])]
    no_seed: bool,

    /// Write the final resolution state as a seed file
    #[arg(long)]
    write_seed: Option<PathBuf>,

    /// Deepest level with its own level columns (also bounds resolver passes)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Row ordering
    #[arg(long, value_enum)]
    sort: Option<SortArg>,

    /// Id column name
    #[arg(long)]
    id_col: Option<String>,

    /// Description column name
    #[arg(long)]
    desc_col: Option<String>,

    /// Parent id column name
    #[arg(long)]
    parent_col: Option<String>,

    /// Deletion status column name
    #[arg(long)]
    deletion_col: Option<String>,

    /// Deletion status value marking a deleted node
    #[arg(long)]
    deletion_value: Option<String>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FlattenOutput {
    #[serde(flatten)]
    report: FlattenReport,
    seed_source: &'static str,
    seeded_nodes: usize,
    output: PathBuf,
}

fn seed_source_name(source: SeedSource) -> &'static str {
    match source {
        SeedSource::Primary => "primary",
        SeedSource::Fallback => "fallback",
        SeedSource::Empty => "empty",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Flatten(args) => run_flatten(args)?,
        Commands::DefaultConfig => {
            print!("{}", RunConfig::default().to_toml()?);
        }
    }

    Ok(())
}

/// Merge the config file with command-line overrides
fn resolve_config(args: &FlattenArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => RunConfig::default(),
    };

    let tree = &mut config.tree;
    if let Some(max_depth) = args.max_depth {
        tree.max_depth = max_depth;
    }
    if let Some(sort) = args.sort {
        tree.sort = sort.into();
    }
    if let Some(value) = &args.deletion_value {
        tree.deletion_value = value.clone();
    }

    let columns = &mut tree.columns;
    let overrides = [
        (&mut columns.id, &args.id_col),
        (&mut columns.description, &args.desc_col),
        (&mut columns.parent_id, &args.parent_col),
        (&mut columns.deletion_flag, &args.deletion_col),
    ];
    for (column, value) in overrides {
        if let Some(value) = value {
            *column = value.clone();
        }
    }

    if args.no_seed {
        config.seed.primary = None;
        config.seed.fallback = None;
    } else {
        if args.seed.is_some() {
            config.seed.primary = args.seed.clone();
        }
        if args.seed_fallback.is_some() {
            config.seed.fallback = args.seed_fallback.clone();
        }
    }

    Ok(config)
}

fn run_flatten(args: FlattenArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let flattener = Flattener::new(config.tree.clone()).context("Invalid configuration")?;

    let input = read_records_from_path(&args.input, &config.tree.columns)
        .with_context(|| format!("Failed to read input: {}", args.input.display()))?;

    let (seed, seed_source) = if args.no_seed {
        (ResolutionState::new(), SeedSource::Empty)
    } else {
        load_seed_with_fallback(config.seed.primary.as_deref(), config.seed.fallback.as_deref())
            .context("Failed to load seed")?
    };
    let seeded_nodes = seed.len();

    let flattened = flattener
        .flatten(input.records, seed)
        .context("Failed to flatten hierarchy")?;

    write_table_to_path(&args.output, &input.headers, &flattened.table)
        .with_context(|| format!("Failed to write output: {}", args.output.display()))?;

    if let Some(path) = &args.write_seed {
        write_seed(path, &flattened.state)
            .with_context(|| format!("Failed to write seed: {}", path.display()))?;
    }

    let report = flattened.report;
    if args.json {
        let output = FlattenOutput {
            report,
            seed_source: seed_source_name(seed_source),
            seeded_nodes,
            output: args.output.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        log::info!(
            "Flattened {} rows ({} orphans, {} passes) into {}",
            report.rows,
            report.orphans,
            report.passes,
            args.output.display()
        );
    }

    Ok(())
}
