use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.vurze.toml, or [tool.vurze] in pyproject.toml):

  [vurze]
  namespace = \"vurze\"           # Decorator namespace to strip
  exclude_folders = [\"build\"]   # Extra folders to skip
  env_file = \".env\"             # Key store location
";

/// Options for stripping decorators.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct StripArgs {
    /// Files or directories to process.
    /// When no paths are provided, defaults to the current directory.
    pub paths: Vec<PathBuf>,

    /// Decorator namespace to strip (overrides config, default "vurze").
    #[arg(long, short = 'N')]
    pub namespace: Option<String>,

    /// Rewrite files in place.
    /// Without this flag, only shows what would be removed.
    #[arg(long, short = 'w', conflicts_with = "check")]
    pub write: bool,

    /// Exit with code 1 if any file still carries namespace decorators.
    #[arg(long)]
    pub check: bool,

    /// Output a JSON report.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output (shows every file processed).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary line.
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Folders to exclude when walking directories.
    #[arg(long, short = 'e', alias = "exclude-folder")]
    pub exclude: Vec<String>,
}

/// Key store location option shared by the key subcommands.
#[derive(Args, Debug, Default, Clone)]
pub struct EnvFileArgs {
    /// Path of the `.env` key store (overrides config, default "./.env").
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "vurze - strip vurze signing decorators from Python code and manage the signing key pair",
    long_about = None,
    after_help = CONFIG_HELP,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute. Defaults to stripping.
    pub command: Option<Commands>,

    /// Stripping options used when no subcommand is given.
    #[command(flatten)]
    pub strip: StripArgs,
}

#[derive(Subcommand, Debug)]
/// Available subcommands.
pub enum Commands {
    /// Remove namespace decorators from Python files
    Strip {
        /// Stripping options.
        #[command(flatten)]
        args: StripArgs,
    },
    /// Manage the key pair stored in the `.env` file
    Keys {
        /// Key store action.
        #[command(subcommand)]
        action: KeysCommand,
    },
}

#[derive(Subcommand, Debug)]
/// Key store actions.
pub enum KeysCommand {
    /// Print the stored key(s)
    Show {
        /// Print only the public key.
        #[arg(long, conflicts_with = "private")]
        public: bool,

        /// Print only the private key.
        #[arg(long)]
        private: bool,

        /// Key store location.
        #[command(flatten)]
        env: EnvFileArgs,
    },
    /// Store an externally generated key pair
    Import {
        /// Hex-encoded private key.
        #[arg(long)]
        private_key: String,

        /// Hex-encoded public key.
        #[arg(long)]
        public_key: String,

        /// Key store location.
        #[command(flatten)]
        env: EnvFileArgs,
    },
}
