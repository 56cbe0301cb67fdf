use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use quizbank_cli::commands;
use quizbank_observability::init_logging;
use tracing::error;

#[derive(Parser)]
#[command(name = "quizbank")]
#[command(about = "Quizbank CLI - client type generation and development tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the TypeScript declaration file once
    Generate {
        /// Output path (defaults to TYPEGEN_OUTPUT or frontend/src/types/generated.d.ts)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Watch backend sources and regenerate client types on change
    Watch,
    /// Run a development session: start the type watcher, stop it on Ctrl-C
    Dev,
    /// List exported enumerations and their values
    ListEnums,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { output } => commands::generate(output),
        Commands::Watch => commands::watch().await,
        Commands::Dev => commands::dev().await,
        Commands::ListEnums => {
            commands::list_enums(&mut std::io::stdout().lock()).map(|()| ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
