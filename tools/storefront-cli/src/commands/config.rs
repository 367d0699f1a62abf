//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
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
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config.catalog.path.as_deref().unwrap_or("(built-in)"),
    );

    let session = &ctx.config.session;
    ctx.output.info("");
    ctx.output.info("[session]");
    ctx.output.kv("toast_ttl_ms", &session.toast_ttl_ms.to_string());
    ctx.output.kv("low_stock_threshold", &session.low_stock_threshold.to_string());
    ctx.output.kv(
        "default_quantity_ceiling",
        &session.default_quantity_ceiling.to_string(),
    );
    ctx.output.kv("default_sort", &session.default_sort);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

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

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let session = &ctx.config.session;

    if session.toast_ttl_ms == 0 {
        warnings.push("session.toast_ttl_ms is 0; toasts expire immediately".to_string());
    }
    if session.low_stock_threshold < 0 {
        errors.push("session.low_stock_threshold must not be negative".to_string());
    }
    if session.default_quantity_ceiling < 1 {
        errors.push("session.default_quantity_ceiling must be at least 1".to_string());
    }
    if !["name", "price", "stock"].contains(&session.default_sort.as_str()) {
        warnings.push(format!(
            "session.default_sort '{}' is unknown; catalog order will be used",
            session.default_sort
        ));
    }

    match ctx.catalog() {
        Ok(catalog) => ctx.output.debug(&format!(
            "Catalog OK: {} products in {} categories",
            catalog.len(),
            catalog.category_count()
        )),
        Err(e) => errors.push(format!("{:#}", e)),
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": errors.is_empty(),
            "errors": errors,
            "warnings": warnings,
        }));
    } else {
        for warning in &warnings {
            ctx.output.warn(warning);
        }
        for error in &errors {
            ctx.output.error(error);
        }
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}
