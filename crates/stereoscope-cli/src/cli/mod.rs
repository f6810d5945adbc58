//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stereoscope_core::domain::GroupType;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stereoscope",
    bin_name = "stereoscope",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Detect and catalog architectural stereotypes",
    long_about = "Stereoscope detects the architectural stereotypes (aggregate roots, \
                  repositories, layers, ports...) of a codebase and renders them as \
                  a classified package tree.",
    after_help = "EXAMPLES:\n\
        \x20 stereoscope tree   --model model.json com.acme --group architecture\n\
        \x20 stereoscope detect --model model.json com.acme.order.Order --format json\n\
        \x20 stereoscope catalog --type design\n\
        \x20 stereoscope completions bash > /usr/share/bash-completion/completions/stereoscope",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the classified package tree of a codebase model.
    #[command(
        visible_alias = "t",
        about = "Render the stereotype tree",
        after_help = "EXAMPLES:\n\
            \x20 stereoscope tree --model model.json\n\
            \x20 stereoscope tree --model model.json com.acme.shop --group architecture\n\
            \x20 stereoscope tree --model model.toml --catalog ./catalogs --methods"
    )]
    Tree(TreeArgs),

    /// Print the stereotypes detected on a single type.
    #[command(
        about = "Detect the stereotypes of one type",
        after_help = "EXAMPLES:\n\
            \x20 stereoscope detect --model model.json com.acme.shop.order.Order\n\
            \x20 stereoscope detect --model model.json com.acme.shop.order.Order --format json"
    )]
    Detect(DetectArgs),

    /// List the groups of the active catalog.
    #[command(
        visible_alias = "ls",
        about = "List catalog groups",
        after_help = "EXAMPLES:\n\
            \x20 stereoscope catalog\n\
            \x20 stereoscope catalog --type architecture\n\
            \x20 stereoscope catalog --catalog stereotypes.json --format json"
    )]
    Catalog(CatalogArgs),

    /// Initialise a Stereoscope configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stereoscope init           # default location\n\
            \x20 stereoscope init --local   # .stereoscope.toml in CWD\n\
            \x20 stereoscope init --force   # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stereoscope completions bash > ~/.local/share/bash-completion/completions/stereoscope\n\
            \x20 stereoscope completions zsh  > ~/.zfunc/_stereoscope\n\
            \x20 stereoscope completions fish > ~/.config/fish/completions/stereoscope.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stereoscope configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stereoscope config get tree.groupers\n\
            \x20 stereoscope config list\n\
            \x20 stereoscope config path"
    )]
    Config(ConfigCommands),
}

// ── catalog selection (shared) ────────────────────────────────────────────────

/// Which catalogs to load. Shared by every command that classifies.
#[derive(Debug, Clone, Args)]
pub struct CatalogSelection {
    /// Extra catalog file or directory; repeatable, merged in order.
    #[arg(long = "catalog", value_name = "PATH", help = "Additional catalog file or directory")]
    pub catalogs: Vec<PathBuf>,

    /// Do not load the built-in jMolecules catalog.
    #[arg(long = "no-builtin", help = "Skip the built-in catalog")]
    pub no_builtin: bool,
}

// ── tree ──────────────────────────────────────────────────────────────────────

/// Arguments for `stereoscope tree`.
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Codebase model file (JSON or TOML).
    #[arg(short = 'm', long = "model", value_name = "FILE", help = "Codebase model file")]
    pub model: PathBuf,

    /// Package to start from. Defaults to every root package.
    #[arg(value_name = "ROOT", help = "Root package (default: all roots)")]
    pub root: Option<String>,

    #[command(flatten)]
    pub catalog: CatalogSelection,

    /// Group namespace to coalesce under; repeatable.
    #[arg(
        short = 'g',
        long = "group",
        value_name = "PREFIX",
        help = "Coalesce groups under this namespace prefix"
    )]
    pub groupers: Vec<String>,

    /// Ignore non-inherited stereotypes of supertypes.
    #[arg(long = "local-only", help = "Only keep inherited stereotypes of capabilities")]
    pub local_only: bool,

    /// Abort on the first detection failure instead of annotating the node.
    #[arg(long = "fail-fast", help = "Abort on the first detection failure")]
    pub fail_fast: bool,

    /// Render stereotyped methods below their types.
    #[arg(long = "methods", help = "Show stereotyped methods")]
    pub methods: bool,

    /// Print fully qualified type names.
    #[arg(long = "qualified", help = "Print fully qualified type names")]
    pub qualified: bool,
}

// ── detect ────────────────────────────────────────────────────────────────────

/// Arguments for `stereoscope detect`.
#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Codebase model file (JSON or TOML).
    #[arg(short = 'm', long = "model", value_name = "FILE", help = "Codebase model file")]
    pub model: PathBuf,

    /// Fully qualified type name.
    #[arg(value_name = "TYPE", help = "Fully qualified type name")]
    pub type_name: String,

    #[command(flatten)]
    pub catalog: CatalogSelection,

    /// Ignore non-inherited stereotypes of supertypes.
    #[arg(long = "local-only", help = "Only keep inherited stereotypes of capabilities")]
    pub local_only: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text", help = "Output format")]
    pub format: DetectFormat,
}

/// Output format for the `detect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DetectFormat {
    /// One stereotype per line.
    Text,
    /// JSON array.
    Json,
}

// ── catalog ───────────────────────────────────────────────────────────────────

/// Arguments for `stereoscope catalog`.
#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub catalog: CatalogSelection,

    /// Only list groups of this type.
    #[arg(short = 't', long = "type", value_enum, help = "Filter by group type")]
    pub group_type: Option<GroupTypeArg>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table", help = "Output format")]
    pub format: CatalogFormat,
}

/// Output format for the `catalog` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogFormat {
    /// Human-readable table.
    Table,
    /// One group id per line.
    List,
    /// JSON array.
    Json,
}

/// Group types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum GroupTypeArg {
    #[value(alias = "arch")]
    Architecture,
    Design,
    #[value(alias = "tech")]
    Technology,
}

impl From<GroupTypeArg> for GroupType {
    fn from(arg: GroupTypeArg) -> Self {
        match arg {
            GroupTypeArg::Architecture => GroupType::Architecture,
            GroupTypeArg::Design => GroupType::Design,
            GroupTypeArg::Technology => GroupType::Technology,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stereoscope init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.stereoscope.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stereoscope completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stereoscope config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `tree.groupers`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
