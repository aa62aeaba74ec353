//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use mall_search::search::SortOption;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, MallConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;
    ctx.output.info("[engine]");
    ctx.output.kv("url", &config.engine.url);
    ctx.output.kv("index", &config.engine.index);
    ctx.output.kv("timeout_ms", &config.engine.timeout_ms.to_string());
    ctx.output.kv("max_retries", &config.engine.max_retries.to_string());
    ctx.output.kv("refresh", &config.engine.refresh.to_string());

    ctx.output.info("[search]");
    ctx.output.kv("default_page_size", &config.search.default_page_size.to_string());
    let sort = SortOption::from_code(config.search.default_sort);
    ctx.output.kv(
        "default_sort",
        &format!("{} ({})", config.search.default_sort, sort.display_name()),
    );

    ctx.output.info("[source]");
    match config.source.products {
        Some(ref path) => ctx.output.kv("products", &ctx.resolve_path(path).display().to_string()),
        None => ctx.output.kv("products", "(not set)"),
    }

    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level);
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("mall.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config, ctx);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect configuration errors and warnings.
fn check(config: &MallConfig, ctx: &Context) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let url = &config.engine.url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(format!("engine.url '{}' must start with http:// or https://", url));
    }
    if config.engine.index.is_empty() {
        errors.push("engine.index is required".to_string());
    }
    if config.engine.timeout_ms == 0 {
        errors.push("engine.timeout_ms must be positive".to_string());
    }

    if config.search.default_page_size <= 0 {
        errors.push("search.default_page_size must be positive".to_string());
    }
    if !(0..=4).contains(&config.search.default_sort) {
        warnings.push(format!(
            "search.default_sort {} is unknown and falls back to relevance",
            config.search.default_sort
        ));
    }

    match config.source.products {
        Some(ref path) => {
            let resolved = ctx.resolve_path(path);
            if !resolved.is_file() {
                errors.push(format!("source.products '{}' does not exist", resolved.display()));
            }
        }
        None => warnings.push(
            "source.products is not set; import, create and recommend need it".to_string(),
        ),
    }

    let level = config.logging.level.to_lowercase();
    if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
        warnings.push(format!("logging.level '{}' is not a standard level", config.logging.level));
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;
    use std::path::PathBuf;

    fn context(config: MallConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: std::env::temp_dir(),
        }
    }

    #[test]
    fn test_defaults_only_warn_about_source() {
        let ctx = context(MallConfig::default());
        let (errors, warnings) = check(&ctx.config, &ctx);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("source.products"));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = MallConfig::default();
        config.engine.url = "localhost:9200".to_string();
        config.search.default_page_size = 0;
        config.search.default_sort = 9;
        config.source.products = Some("/nonexistent/mall/products.json".to_string());
        let ctx = context(config);

        let (errors, warnings) = check(&ctx.config, &ctx);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("engine.url"));
        assert!(errors[1].contains("default_page_size"));
        assert!(errors[2].contains(&PathBuf::from("/nonexistent/mall/products.json").display().to_string()));
        assert!(warnings[0].contains("default_sort"));
    }
}
