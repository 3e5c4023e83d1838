use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "spacetraveling")]
#[command(about = "Builds the spacetraveling blog pages from a Prismic repository")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "spacetraveling.toml")]
    pub config: String,

    /// Override source.endpoint from the config file
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override output.output_path from the config file
    #[arg(long)]
    pub output_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write the listing and the pre-built post pages
    Build,
    /// Print the post listing
    List {
        /// Follow pagination cursors until the last page
        #[arg(long)]
        all: bool,
    },
    /// Print one post with its reading time
    Show {
        /// The post uid
        uid: String,
    },
}
