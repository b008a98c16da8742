mod cli;
mod config;
mod create;
mod dryrun;
mod form;
mod imagestream;
mod inspect;
mod k8s;
mod ports;
mod progress;
mod prompt;
mod resources;

use std::io::IsTerminal;
use std::path::Path;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "ocp_s2i=debug" } else { "ocp_s2i=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match config::resolve_config(cli.config.as_deref().map(Path::new)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    };

    match cli.command {
        Commands::Create {
            image,
            namespace,
            tag,
            name,
            repository,
            git_ref,
            context_dir,
            route,
            sample,
            dry_run,
            json,
            no_input,
        } => {
            let opts = create::CreateOptions {
                namespace,
                tag,
                name,
                repository,
                git_ref,
                context_dir,
                route,
                sample,
                dry_run,
                json,
                interactive: !no_input && std::io::stdin().is_terminal(),
            };
            match create::run_create(&image, opts, &config).await {
                Ok(true) => std::process::exit(0),
                Ok(false) => std::process::exit(1),
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    std::process::exit(2);
                }
            }
        }
        Commands::Tags { image } => {
            if let Err(e) = inspect::run_tags(&image, &config).await {
                eprintln!("Error: {e:#}");
                std::process::exit(2);
            }
        }
        Commands::Inspect { image, tag } => {
            if let Err(e) = inspect::run_inspect(&image, tag.as_deref(), &config).await {
                eprintln!("Error: {e:#}");
                std::process::exit(2);
            }
        }
    }
}
