use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "enum-filter", version)]
#[command(about = "Inspect enum label tables: option lists, labels and constants", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the option list of a filter definition
    #[command(alias = "ls")]
    List {
        /// Path to the JSON filter definition
        file: PathBuf,

        /// Only include these values (e.g. --only ACTIVE PENDING)
        #[arg(long, num_args = 1..)]
        only: Vec<String>,

        /// Walk the map in reverse order
        #[arg(short, long)]
        reverse: bool,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the display label for a value
    #[command(alias = "l")]
    Label {
        /// Path to the JSON filter definition
        file: PathBuf,

        /// Stored value to look up
        value: String,

        /// Label to print when the value is unknown
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Print the constant (alias) for every key
    #[command(alias = "c")]
    Constants {
        /// Path to the JSON filter definition
        file: PathBuf,

        /// Print the constants as a JSON object
        #[arg(long)]
        json: bool,
    },
}
