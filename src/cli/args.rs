use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autoparts")]
#[command(about = "Browse an auto-parts catalog and build a shopping cart")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog JSON file (defaults to the embedded seed)
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog parts with optional filtering
    List {
        /// Search by name or article (case-insensitive substring)
        #[arg(short, long)]
        search: Option<String>,
        /// Only this brand ("all" for any)
        #[arg(short, long, default_value = "all")]
        brand: String,
        /// Only this category ("all" for any)
        #[arg(long, default_value = "all")]
        category: String,
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// List brands found in the catalog
    Brands,
    /// List categories found in the catalog
    Categories,
    /// Show detailed information about a part
    Show {
        /// Part ID
        id: u32,
    },
    /// Show catalog statistics
    Stats,
    /// Price a cart built from part IDs (repeat an ID for more units)
    Quote {
        /// Part IDs, added in order
        #[arg(required = true)]
        ids: Vec<u32>,
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// Start an interactive shopping session
    Shell,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
