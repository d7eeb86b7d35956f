mod api;

use api::AppState;
use clap::{Parser, Subcommand};
use fitlog_core::*;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Personal workout log and progress tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API (default)
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List the exercise catalog
    Exercises {
        /// Only exercises in this category (strength, cardio, yoga, flexibility)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search over name, description and muscles
        #[arg(long)]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        /// Write it to this file instead of stdout
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    fitlog_core::logging::init_with_level(&config.logging.level);

    match cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(config, host, port),
        Some(Commands::Exercises {
            category,
            search,
            json,
        }) => cmd_exercises(&config, category, search, json),
        Some(Commands::Config { write }) => cmd_config(&config, write),
        None => {
            // Default to "serve" command
            cmd_serve(config, None, None)
        }
    }
}

fn build_store(config: &Config) -> Result<Store> {
    let errors = config.catalog.errors();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation(errors.join("; ")));
    }
    Ok(Store::new(EntityStore::seeded(&config.catalog.seed_entries())))
}

fn cmd_serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    let store = build_store(&config)?;
    config.validate()?;

    tracing::info!("Seeded {} exercises", store.snapshot().exercise_count());

    let state = Arc::new(AppState::new(store));
    let address = config.server.address();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(api::serve(&address, state))?;
    Ok(())
}

fn cmd_exercises(
    config: &Config,
    category: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let repository = Repository::new(build_store(config)?);
    let exercises = api::exercises::select_exercises(
        &repository,
        category.as_deref(),
        search.as_deref(),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&exercises)?);
        return Ok(());
    }

    if exercises.is_empty() {
        println!("No exercises found.");
        return Ok(());
    }

    for exercise in &exercises {
        println!(
            "  {:<20} [{}]  {}",
            exercise.name,
            exercise.category,
            exercise.target_muscles.join(", ")
        );
    }
    println!("\n{} exercises", exercises.len());
    Ok(())
}

fn cmd_config(config: &Config, write: Option<PathBuf>) -> Result<()> {
    match write {
        Some(path) => {
            config.save_to(&path)?;
            println!("✓ Wrote config to {}", path.display());
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}
