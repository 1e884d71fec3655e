use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use routebook_core::VisitStatus;

#[derive(Parser)]
#[command(name = "routebook")]
#[command(about = "Track the shops on your sales route and this week's visits")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// CLI profile name for remote mirror configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List customers
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a customer
    #[command(alias = "new")]
    Add {
        #[command(flatten)]
        fields: CustomerFields,
        /// Initial visit status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Edit an existing customer
    Edit {
        /// Customer ID or unique ID prefix
        id: String,
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Set a customer's visit status
    Mark {
        /// Customer ID or unique ID prefix
        id: String,
        /// New visit status
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Delete a customer
    Delete {
        /// Customer ID or unique ID prefix
        id: String,
    },
    /// Manage regions and sub-regions
    Regions {
        #[command(subcommand)]
        command: Option<RegionCommands>,
    },
    /// Show visit progress for the week
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start a new week: mark every customer as not visited
    Reset {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
    /// Import customers from a CSV file
    Import {
        /// CSV file to read
        path: PathBuf,
    },
    /// Export customers
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output path (defaults to customers_export_<date> in the current directory)
        #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
        output: Option<PathBuf>,
        /// Write to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Filters shared by `list` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only customers in this main region
    #[arg(long, value_name = "NAME")]
    pub region: Option<String>,
    /// Only customers in this sub-region
    #[arg(long, value_name = "NAME")]
    pub sub_region: Option<String>,
    /// Only customers with this visit status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Search shop name, manager name or phone
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Editable customer fields
#[derive(Args, Debug, Clone, Default)]
pub struct CustomerFields {
    /// Shop name
    #[arg(long, value_name = "NAME")]
    pub shop: Option<String>,
    /// Manager / contact person
    #[arg(long, value_name = "NAME")]
    pub manager: Option<String>,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Main region name
    #[arg(long, value_name = "NAME")]
    pub region: Option<String>,
    /// Sub-region name
    #[arg(long, value_name = "NAME")]
    pub sub_region: Option<String>,
    /// WhatsApp link (derived from the phone when omitted)
    #[arg(long, value_name = "URL")]
    pub whatsapp_link: Option<String>,
    /// Map location link
    #[arg(long, value_name = "URL")]
    pub map_link: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StatusArg {
    NotDone,
    Done,
    Postponed,
}

impl From<StatusArg> for VisitStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::NotDone => Self::NotDone,
            StatusArg::Done => Self::Done,
            StatusArg::Postponed => Self::Postponed,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl From<ExportFormat> for routebook_core::export::ExportFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Csv => Self::Csv,
            ExportFormat::Json => Self::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum RegionCommands {
    /// List regions and their sub-regions
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a region
    Add {
        /// Region name
        name: String,
    },
    /// Delete a region (customers keep their region text)
    Delete {
        /// Region ID or exact name
        region: String,
    },
    /// Append a sub-region to a region
    AddSub {
        /// Region ID or exact name
        region: String,
        /// Sub-region name
        name: String,
    },
    /// Remove a sub-region by its position
    RemoveSub {
        /// Region ID or exact name
        region: String,
        /// Zero-based position shown by `regions list`
        index: usize,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Supabase project URL
        #[arg(long, value_name = "URL")]
        supabase_url: Option<String>,
        /// Supabase anon/public key
        #[arg(long, value_name = "KEY")]
        supabase_anon_key: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved profile and remote configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
