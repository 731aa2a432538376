use clap::{Parser, Subcommand};
use scenestashapp::model::{SortField, SortOrder, DEFAULT_LIMIT, DEFAULT_PAGE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scenestash", bin_name = "scenestash", version)]
#[command(about = "Browse, write and stash short dialogue scripts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print raw JSON instead of styled output
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Scripts API base URL (overrides config and environment)
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub api_url: Option<String>,

    /// Directory holding the stash (overrides config and environment)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw random scripts (the default command)
    #[command(alias = "r")]
    Random {
        /// How many scripts to draw
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,

        /// Leave out scripts that are already stashed
        #[arg(short = 'x', long)]
        exclude_stashed: bool,
    },

    /// List scripts page by page
    #[command(alias = "ls")]
    List {
        #[arg(short, long, default_value_t = DEFAULT_PAGE)]
        page: u32,

        /// Scripts per page
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Only scripts matching this term
        #[arg(short, long)]
        search: Option<String>,

        /// title or createdAt
        #[arg(long, value_name = "FIELD")]
        sort_by: Option<SortField>,

        /// asc or desc
        #[arg(long, value_name = "ORDER")]
        sort_order: Option<SortOrder>,
    },

    /// Show one script in full
    #[command(alias = "v")]
    Show { id: String },

    /// Create a script from a JSON file ("-" reads stdin)
    Create {
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },

    /// Replace a script's title, characters and lines from a JSON file
    Update {
        id: String,

        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },

    /// Delete a script (also drops it from the stash)
    #[command(alias = "rm")]
    Delete { id: String },

    /// Work with stashed scripts (lists them by default)
    #[command(alias = "s")]
    Stash {
        #[command(subcommand)]
        action: Option<StashCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum StashCommands {
    /// List stashed scripts
    #[command(alias = "ls")]
    List,

    /// Stash a script
    Add {
        id: String,

        /// Stash without checking that the script exists
        #[arg(long)]
        no_verify: bool,
    },

    /// Remove a script from the stash
    #[command(alias = "rm")]
    Remove { id: String },

    /// Empty the stash
    Clear,

    /// Drop stashed ids the server no longer knows
    Prune,
}
