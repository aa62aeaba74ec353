//! Mall CLI - Command line tool for the mall product search index.
//!
//! Commands:
//! - `mall import` - Index every product from the product source
//! - `mall create` - Index one product
//! - `mall delete` - Remove products from the index
//! - `mall search` - Keyword or filtered search
//! - `mall recommend` - Products similar to a given product
//! - `mall related` - Brand, category and attribute suggestions
//! - `mall config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod source;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    ConfigArgs, CreateArgs, DeleteArgs, ImportArgs, RecommendArgs, RelatedArgs, SearchArgs,
};

/// Mall CLI - Index and search the mall product catalogue
#[derive(Parser)]
#[command(name = "mall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every product from the product source
    Import(ImportArgs),

    /// Index a single product by id
    Create(CreateArgs),

    /// Remove products from the index
    Delete(DeleteArgs),

    /// Search products
    Search(SearchArgs),

    /// Recommend products similar to a product
    Recommend(RecommendArgs),

    /// Suggest brands, categories and attributes for a keyword
    Related(RelatedArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(&ctx.config.logging, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Import(args) => commands::import::run(args, &ctx).await,
        Commands::Create(args) => commands::create::run(args, &ctx).await,
        Commands::Delete(args) => commands::delete::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Recommend(args) => commands::recommend::run(args, &ctx).await,
        Commands::Related(args) => commands::related::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
