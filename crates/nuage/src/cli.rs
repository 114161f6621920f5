//! Clap derive structures for the `nuage` CLI.
//!
//! Kept free of crate-internal imports: `build.rs` compiles this file on its
//! own to render man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nuage -- command-line client for Nuage VSD controllers
#[derive(Debug, Parser)]
#[command(
    name = "nuage",
    version,
    about = "Create, inspect and delete Nuage VSD network entities",
    long_about = "Command-line client for the Nuage VSD REST API (v3.2 entity model).\n\n\
        Manages enterprises, domain and zone templates, domains, zones, subnets,\n\
        vports, VM interfaces and VMs, one-shot or from an interactive shell.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "NUAGE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// VSD endpoint: an IP/hostname, or a full API root URL (overrides profile)
    #[arg(long, short = 'e', env = "NUAGE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Enterprise (organization) to log in to
    #[arg(long, visible_alias = "org", env = "NUAGE_ORGANIZATION", global = true)]
    pub organization: Option<String>,

    /// Username to log in with
    #[arg(long, short = 'u', env = "NUAGE_USERNAME", global = true)]
    pub username: Option<String>,

    /// API version tag (e.g. v3_2)
    #[arg(long, env = "NUAGE_API_VERSION", global = true)]
    pub api_version: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NUAGE_OUTPUT",
        default_value = "json",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept any TLS certificate, even with a CA configured
    #[arg(long, short = 'k', env = "NUAGE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "NUAGE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table
    Table,
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one ID per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a collection, show one entity, or list an entity's children
    #[command(
        after_help = "Examples:\n  nuage get enterprises\n  nuage get zones 3f2a...\n  nuage get domains 9c41... zones"
    )]
    Get(GetArgs),

    /// Create an entity under its parent
    #[command(after_help = CREATE_USAGE)]
    Create(CreateArgs),

    /// Delete an entity by ID
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Start the interactive shell
    #[command(alias = "sh")]
    Shell,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Argument forms of `create`, one per entity type.
pub const CREATE_USAGE: &str = "\
Forms:
  create enterprise <name>
  create domaintemplate <name> <enterpriseID>
  create domain <name> <enterpriseID> <domainTemplateID>
  create zonetemplate <name> <domainTemplateID>
  create zone <name> <domainID> [<zoneTemplateID>]
  create subnet <name> <zoneID> <subnetTemplateID>
  create subnet <name> <zoneID> <address> <netmask>
  create vport <name> <subnetID>
  create vminterface <name> <vmID> <MAC> <vportID>
  create vm <name> <UUID> <MAC> <vportID>";

// ── Entity commands ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Collection: enterprises, domaintemplates, domains, zonetemplates,
    /// zones, subnets, vports, vminterfaces, vms
    pub collection: String,

    /// Entity ID
    pub id: Option<String>,

    /// Child collection to list under the entity
    #[arg(requires = "id")]
    pub children: Option<String>,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Entity type (enterprise, domain, zone, subnet, vport, vm, ...)
    pub entity: String,

    /// Name followed by the type-specific arguments
    #[arg(required = true, num_args = 1..)]
    pub args: Vec<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Entity type
    pub entity: String,

    /// Entity ID
    pub id: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile with guided setup
    Init,

    /// Display current configuration (secrets redacted)
    Show,

    /// Print the configuration file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
