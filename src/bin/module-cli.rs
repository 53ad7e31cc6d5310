use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use module_host::config::{load_config, HostConfig};
use module_host::modules::builtin_catalog;
use module_host::module::DependencyResolver;

#[derive(Parser)]
#[command(name = "module-cli")]
#[command(about = "Inspect module wiring of the module host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known modules and their dependencies
    Catalog,
    /// Print the activation order without starting anything
    Plan {
        /// Configuration file whose `modules.enabled` list is planned
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Root modules to plan instead of the configured ones
        #[arg(short, long = "module")]
        modules: Vec<String>,
    },
    /// Show the activation order reported by a running host
    Status {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog => {
            let catalog = builtin_catalog()?;
            for descriptor in catalog.descriptors() {
                let deps: Vec<&str> =
                    descriptor.dependencies().iter().map(|d| d.as_str()).collect();
                if deps.is_empty() {
                    println!("{}", descriptor.key());
                } else {
                    println!("{} -> {}", descriptor.key(), deps.join(", "));
                }
            }
        }
        Commands::Plan { config, modules } => {
            let roots = if modules.is_empty() {
                match config {
                    Some(path) => load_config(&path)?.modules.enabled,
                    None => HostConfig::default().modules.enabled,
                }
            } else {
                modules
            };

            let catalog = builtin_catalog()?;
            let plan = DependencyResolver::new(&catalog).plan(roots.as_slice())?;
            for (i, key) in plan.order().iter().enumerate() {
                println!("{:>2}. {}", i + 1, key);
            }
        }
        Commands::Status { url } => {
            let res = reqwest::get(format!("{}/_modules", url.trim_end_matches('/'))).await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: host returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
