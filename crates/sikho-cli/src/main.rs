//! sikho CLI — serve and inspect the concept datasets.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use sikho_core::Xp;

mod commands;

#[derive(Parser)]
#[command(name = "sikho", version, about = "Analogy-driven concept explanation server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the datasets and serve the JSON API
    Serve {
        /// Directory holding the dataset files (overrides config)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check the datasets for integrity problems
    Validate {
        /// Directory holding the dataset files
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },

    /// List concepts and the personas that have analogies for them
    Concepts {
        /// Directory holding the dataset files
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },

    /// Print the explanation for a concept without starting the server
    Explain {
        /// Concept id
        concept: String,

        /// Persona whose analogy to use
        #[arg(long, default_value = "farmer")]
        persona: String,

        /// Dialect template to phrase it in
        #[arg(long, default_value = "bhojpuri")]
        dialect: String,

        /// Directory holding the dataset files
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },

    /// Compute the level reached after gaining XP
    Level {
        /// XP before the gain
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        current_xp: Xp,

        /// XP to add
        #[arg(long, default_value = "10", allow_hyphen_values = true)]
        add: Xp,

        /// Directory holding the dataset files
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },

    /// Create a starter config and sample datasets
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sikho=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            data_dir,
            host,
            port,
            config,
        } => commands::serve::execute(config, data_dir, host, port).await,
        Commands::Validate { data_dir } => commands::validate::execute(data_dir),
        Commands::Concepts { data_dir } => commands::concepts::execute(data_dir),
        Commands::Explain {
            concept,
            persona,
            dialect,
            data_dir,
        } => commands::explain::execute(concept, persona, dialect, data_dir),
        Commands::Level {
            current_xp,
            add,
            data_dir,
        } => commands::level::execute(current_xp, add, data_dir),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
