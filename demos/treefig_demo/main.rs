//! # treefig demo application
//!
//! A sample CLI tool showing how an application embeds
//! [treefig](https://docs.rs/treefig). It exists to demonstrate and manually
//! verify the library, not to be useful on its own.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example treefig_demo -- greet
//! cargo run --example treefig_demo -- set --name Ada --port 8080
//! cargo run --example treefig_demo -- --debug where
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                        |
//! |-------------------------|-----------------------------------------------------------|
//! | Defaults when no file   | Run `greet` in a directory tree without `.treefig-demo`   |
//! | Upward discovery        | `set` once, then `cd` into a subdirectory and run `greet` |
//! | Explicit save location  | `set --name Ada --dir some/existing/dir`                  |
//! | Transient fields        | Inspect the file: `last_seen_dir` never appears           |
//! | Injected logger         | `--debug` installs a tracing subscriber at debug level    |

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use treefig::{ConfigManager, Treefig, TreefigError};

use config::{DemoConfig, ServerConfig};

/// treefig demo: a sample CLI app for showcasing treefig integration.
#[derive(Parser, Debug)]
#[command(name = "treefig-demo")]
struct Cli {
    /// Log treefig's load/save events.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Greet using the discovered configuration and count the run.
    Greet,
    /// Update values and save.
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Save into this directory instead of the discovered file.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Print the config file that would be used, if any.
    Where,
}

fn run(cli: Cli) -> Result<(), TreefigError> {
    let mut manager: ConfigManager<DemoConfig> =
        Treefig::builder().file_name(".treefig-demo").build();

    match cli.command {
        Commands::Greet => {
            let cwd = manager.working_dir()?;
            let config = manager.configure_with(|config| {
                config.runs += 1;
                config.last_seen_dir = Some(cwd.display().to_string());
            })?;
            let name = config.name.as_deref().unwrap_or("stranger");
            println!("Hello, {name}! (run #{})", config.runs);
            if let Some(server) = &config.server {
                println!("Server: {}:{}", server.host, server.port);
            }
            let path = manager.save_configuration(None)?;
            println!("Saved to {}", path.display());
        }
        Commands::Set {
            name,
            host,
            port,
            dir,
        } => {
            manager.configure_with(|config| {
                if name.is_some() {
                    config.name = name;
                }
                if host.is_some() || port.is_some() {
                    let current = config.server.clone().unwrap_or(ServerConfig {
                        host: "127.0.0.1".into(),
                        port: 3000,
                    });
                    config.server = Some(ServerConfig {
                        host: host.unwrap_or(current.host),
                        port: port.unwrap_or(current.port),
                    });
                }
            })?;
            let path = manager.save_configuration(dir.as_deref())?;
            println!("Saved to {}", path.display());
        }
        Commands::Where => match manager.find_config_path()? {
            Some(path) => println!("{}", path.display()),
            None => println!("No .treefig-demo found between here and the root"),
        },
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("treefig=debug"))
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Config error:\n{e}");
        std::process::exit(1);
    }
}
