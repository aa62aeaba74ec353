//! CLI command implementations.

pub mod config;
pub mod create;
pub mod delete;
pub mod import;
pub mod recommend;
pub mod related;
pub mod search;

use clap::{Args, Subcommand};

/// Paging flags shared by the search commands. Omitted values fall back to
/// the `[search]` config section.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    /// Page number (1-based).
    #[arg(long)]
    pub page: Option<i64>,

    /// Results per page.
    #[arg(long)]
    pub size: Option<i64>,
}

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {}

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Product id to index.
    pub id: i64,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Product ids to remove from the index.
    #[arg(required = true)]
    pub ids: Vec<i64>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub command: SearchCommand,
}

#[derive(Subcommand)]
pub enum SearchCommand {
    /// Keyword search over name, subtitle and keywords.
    Simple {
        /// Search keyword.
        keyword: String,

        #[command(flatten)]
        page: PageArgs,

        /// Print the compiled query instead of running it.
        #[arg(long)]
        show_query: bool,
    },
    /// Filtered, sorted search.
    Query {
        /// Search keyword (empty matches everything).
        #[arg(short, long, default_value = "")]
        keyword: String,

        /// Only products of this brand.
        #[arg(long)]
        brand_id: Option<i64>,

        /// Only products of this category.
        #[arg(long)]
        category_id: Option<i64>,

        /// Sort code: 0 relevance, 1 newest, 2 sales, 3 price asc, 4 price desc.
        #[arg(short, long)]
        sort: Option<i32>,

        #[command(flatten)]
        page: PageArgs,

        /// Print the compiled query instead of running it.
        #[arg(long)]
        show_query: bool,
    },
}

/// Arguments for the recommend command.
#[derive(Args)]
pub struct RecommendArgs {
    /// Product to find similar products for.
    pub id: i64,

    #[command(flatten)]
    pub page: PageArgs,

    /// Print the compiled query instead of running it.
    #[arg(long)]
    pub show_query: bool,
}

/// Arguments for the related command.
#[derive(Args)]
pub struct RelatedArgs {
    /// Search keyword (empty matches everything).
    #[arg(default_value = "")]
    pub keyword: String,

    /// Print the compiled query instead of running it.
    #[arg(long)]
    pub show_query: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Create a mall.toml in the current directory.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}
