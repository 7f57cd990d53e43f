use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use tracing::Level;

use pattern_catalog::config::OutputFormat;
use pattern_catalog::{CatalogConfig, Category, ExampleRunner, PatternCatalog};

#[derive(Parser)]
#[command(name = "pattern-catalog")]
#[command(about = "Browse and run classic design-pattern demonstrations", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<Level>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered patterns
    List {
        /// Only show one category (creational, structural, behavioral)
        #[arg(long)]
        category: Option<Category>,
    },
    /// Describe one pattern
    Show { name: String },
    /// Run one pattern's example
    Run {
        name: String,

        /// Example input as JSON, e.g. '{"patties": 2}'
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    };

    let level = if cli.verbose {
        Level::DEBUG
    } else if let Some(level) = cli.log_level {
        level
    } else {
        config
            .logging
            .level
            .parse::<Level>()
            .with_context(|| format!("invalid log level '{}' in config", config.logging.level))?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if !config.output.color {
        colored::control::set_override(false);
    }

    let catalog = PatternCatalog::from_config(&config)?;

    match cli.command {
        Command::List { category } => list(&catalog, category),
        Command::Show { name } => show(&catalog, &name),
        Command::Run { name, input } => {
            run(&catalog, &name, input.as_deref(), config.output.format)
        }
    }
}

fn list(catalog: &PatternCatalog, category: Option<Category>) -> Result<()> {
    for descriptor in catalog.list(category).iter() {
        println!(
            "{:<22} {:<11} {}",
            descriptor.name().bold(),
            descriptor.category().to_string().cyan(),
            descriptor.description()
        );
    }
    Ok(())
}

fn show(catalog: &PatternCatalog, name: &str) -> Result<()> {
    let descriptor = catalog.lookup(name)?;

    println!("{}", descriptor.name().bold().underline());
    println!("Category:    {}", descriptor.category());
    println!("Description: {}", descriptor.description());
    if let Some(sample) = descriptor.sample_input() {
        println!("Sample input: {sample}");
    }
    Ok(())
}

fn run(
    catalog: &PatternCatalog,
    name: &str,
    input: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let input: Option<Value> = input
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--input is not valid JSON")?;

    let output = ExampleRunner::new().run_named(catalog, name, input.as_ref())?;

    match format {
        OutputFormat::Text => {
            println!("{}", format!("=== {name} ===").green().bold());
            println!("{}", output.text);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
    }
    Ok(())
}
