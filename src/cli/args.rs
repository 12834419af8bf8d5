// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the three positional directories and the optional global flags

use clap::Parser;
use std::path::PathBuf;

use crate::variables::split_directories;

#[derive(Parser, Debug)]
#[command(name = "docrender")]
#[command(about = "Render Markdown templates with variables from YAML files")]
#[command(version)]
pub struct Args {
    #[arg(help = "Directory containing template files")]
    pub template_dir: PathBuf,

    #[arg(help = "Directories containing YAML variable files, separated by ';'")]
    pub variable_dirs: String,

    #[arg(help = "Directory where rendered files will be written")]
    pub output_dir: PathBuf,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long, help = "Fail on placeholders that reference undefined variables")]
    pub strict: bool,

    #[arg(long, help = "Process every file and report all failures at the end")]
    pub keep_going: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Variable directories in command line order
    pub fn variable_directories(&self) -> Vec<PathBuf> {
        split_directories(&self.variable_dirs)
    }
}
