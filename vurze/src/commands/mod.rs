//! Commands module - CLI subcommand implementations.

mod keys;
mod strip;
mod utils;

pub use keys::{run_import, run_show, KeySelection};
pub use strip::{
    run_strip, strip_file, strip_files, FileChange, FileFailure, StripOptions, StripReport,
};
pub use utils::{find_python_files, resolve_env_path};
