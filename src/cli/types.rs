use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser, Debug)]
#[command(name = "sitesmith")]
#[command(about = "Generates a static site from a directory of templates and assets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose debugging
    #[arg(short = 'g', long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Only report errors
    #[arg(short, long, global = true, default_value_t = false, conflicts_with = "debug")]
    pub quiet: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the site
    #[command(alias = "b")]
    Build {
        /// Input directory (defaults to ./)
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        /// Output directory (defaults to _site inside the input directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Delete and recreate the output directory before generating
        #[arg(short = 'd', long, default_value_t = false)]
        delete_output: bool,

        /// Watch the input directory and regenerate on changes
        #[arg(short, long, default_value_t = false)]
        watch: bool,

        /// File name infix that marks templates (defaults to .tmpl.)
        #[arg(long, value_name = "INFIX")]
        marker: Option<String>,

        /// Custom configuration file
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,
    },

    /// Delete and recreate the output directory
    Clean {
        /// Input directory, used to locate the configuration file (defaults to ./)
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Custom configuration file
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,
    },
}
