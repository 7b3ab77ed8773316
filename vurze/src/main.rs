//! Main binary entry point for `vurze`.
//!
//! Delegates to the shared `entry_point::run_with_args()` so the binary, the
//! `vurze-cli` crate and the Python bindings behave identically.

use anyhow::Result;

fn main() -> Result<()> {
    let code = vurze::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
