use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod build;
mod commands;
mod config;
mod theme;
mod util;

#[derive(Parser)]
#[command(version, about = "A static site generator for Markdown knowledge gardens")]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: NotegardenCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the garden in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "notegarden.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to bind to
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// The port to bind to
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Open the site in the default browser
    #[arg(short, long, default_value = "false")]
    open: bool,

    /// The path to the configuration file
    #[arg(short, long, default_value = "notegarden.yaml")]
    config_file: Option<PathBuf>,

    /// Whether to watch for changes and rebuild automatically
    #[arg(short, long, default_value = "true")]
    watch: bool,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "notegarden.yaml")]
    config_file: Option<PathBuf>,

    /// Show what would be deleted without deleting anything
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

#[derive(Subcommand)]
enum NotegardenCommand {
    /// Initialize a new notegarden project
    Init(InitArgs),

    /// Build the site
    Build(BuildArgs),

    /// Serve the site on a local port
    Serve(ServeArgs),

    /// Delete the generated output directory
    Clean(CleanArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        NotegardenCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        NotegardenCommand::Build(args) => {
            commands::build::run(&args).await?;
        }
        NotegardenCommand::Serve(args) => {
            commands::serve::run(&args).await?;
        }
        NotegardenCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
    }

    Ok(())
}
