use clap::{Parser, Subcommand};

/// CLI arguments for certmap
#[derive(Debug, Parser)]
#[command(
    name = "certmap",
    version,
    about = "Inspect and render the certified-company map pipeline from the terminal"
)]
pub struct CliArgs {
    /// Path to the dataset (CSV with City, State, Company Name, Category,
    /// Status, Year of Certification, PoC, GP Team columns)
    #[arg(short = 'd', long = "data", global = true)]
    pub data: Option<String>,

    /// Path to the city-coordinate JSON resource (bare array or {"cities": [...]}).
    /// Omit to use the built-in fallback table.
    #[arg(short = 'c', long = "cities", global = true)]
    pub cities: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded session
    Stats,

    /// Print the filter-control options for one field, or all fields
    Facets {
        /// Field name (status, category, city, state, poc, team, year)
        field: Option<String>,
    },

    /// Filter the dataset and render the markers
    Render {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        poc: Option<String>,
        #[arg(long)]
        team: Option<String>,
        #[arg(long)]
        year: Option<String>,
        /// Case-insensitive substring match on the company name
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Print the status-color legend
    Legend,
}
