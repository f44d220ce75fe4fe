use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "blogtags")]
#[command(about = "Renders a Jekyll-style blog with img, plaque and tag tags", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Source directory (defaults to ./)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Destination directory (defaults to ./_site)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub destination: Option<PathBuf>,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false, global = true)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Render every post and the tag index pages
    #[command(alias = "b")]
    Build {
        /// Custom configuration file
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<Vec<PathBuf>>,

        /// Serve the website from the given base URL
        #[arg(short, long, value_name = "URL")]
        baseurl: Option<String>,
    },

    /// Render a single post or page
    #[command(alias = "r")]
    Render {
        /// Post or page to render
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Custom configuration file
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<Vec<PathBuf>>,
    },

    /// List the registered Liquid tags
    Tags {},
}
