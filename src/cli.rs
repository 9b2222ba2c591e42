use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Browse the restaurant catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List restaurants, newest first, with search, tag filter and paging
    List(ListArgs),
    /// Show the detail view of a single restaurant
    Show(ShowArgs),
    /// Count hashtags and classify them as metro or cuisine
    Tags(TagsArgs),
    /// Print every restaurant id (one detail route per id)
    Routes(RoutesArgs),
    /// Autocomplete titles for a partial search term
    Suggest(SuggestArgs),
    /// Load the dataset and report dropped rows and coerced values
    Check(CheckArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DatasetArgs {
    /// Dataset CSV file (`-` reads stdin); falls back to `dataset` in the config
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// YAML configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Character encoding of the dataset (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Keep line breaks inside quoted fields instead of splitting on every newline
    #[arg(long = "quote-aware")]
    pub quote_aware: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// Case-insensitive title search
    #[arg(short = 's', long = "search")]
    pub search: Option<String>,
    /// Exact hashtag filter such as `#Кофейня`
    #[arg(short = 't', long = "tag")]
    pub tag: Option<String>,
    /// 1-based page number
    #[arg(short = 'p', long, default_value_t = 1)]
    pub page: usize,
    /// Rows per page (defaults to the configured page size)
    #[arg(long = "page-size")]
    pub page_size: Option<usize>,
    /// Keep only the newest N restaurants before filtering
    #[arg(long)]
    pub limit: Option<usize>,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// Restaurant id
    #[arg(long)]
    pub id: i64,
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TagsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// Maximum distinct hashtags to display (0 = all)
    #[arg(long, default_value_t = 0)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct RoutesArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// Partial title, at least two characters
    pub term: String,
    /// Maximum suggestions (defaults to the configured limit)
    #[arg(long)]
    pub max: Option<usize>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    /// Emit the load report as JSON
    #[arg(long)]
    pub json: bool,
}
