use crate::cli::{Cli, Commands, KeysCommand, StripArgs};
use crate::commands::{self, KeySelection, StripOptions};
use crate::config::Config;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Runs vurze with the given arguments.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run vurze with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["vurze".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    match cli_var.command {
        Some(Commands::Strip { args }) => run_strip(&args, writer),
        Some(Commands::Keys { action }) => run_keys(action, writer),
        None => run_strip(&cli_var.strip, writer),
    }
}

fn run_strip<W: std::io::Write>(args: &StripArgs, writer: &mut W) -> Result<i32> {
    let roots = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };

    for root in &roots {
        if !root.exists() {
            eprintln!("Error: path does not exist: {}", root.display());
            return Ok(1);
        }
    }

    let config = Config::load_from_path(&roots[0]);
    if args.verbose {
        if let Some(path) = &config.config_file_path {
            eprintln!("[VERBOSE] Using config file: {}", path.display());
        }
    }

    let mut exclude = config.vurze.exclude_folders.clone().unwrap_or_default();
    exclude.extend(args.exclude.iter().cloned());

    let options = StripOptions {
        namespace: args
            .namespace
            .clone()
            .unwrap_or_else(|| config.vurze.namespace().to_owned()),
        write: args.write,
        check: args.check,
        json: args.json,
        verbose: args.verbose,
        quiet: args.quiet,
        exclude,
    };

    let files = commands::find_python_files(&roots, &options.exclude, options.verbose);
    if options.verbose {
        eprintln!("[VERBOSE] {} Python file(s) found", files.len());
    }
    commands::run_strip(&files, &options, writer)
}

fn run_keys<W: std::io::Write>(action: KeysCommand, writer: &mut W) -> Result<i32> {
    let config = Config::load();
    match action {
        KeysCommand::Show {
            public,
            private,
            env,
        } => {
            let selection = match (public, private) {
                (true, _) => KeySelection::Public,
                (_, true) => KeySelection::Private,
                _ => KeySelection::Both,
            };
            let env_path = commands::resolve_env_path(env.env_file.as_deref(), &config);
            commands::run_show(env_path.as_deref(), selection, writer)
        }
        KeysCommand::Import {
            private_key,
            public_key,
            env,
        } => {
            let env_path = commands::resolve_env_path(env.env_file.as_deref(), &config);
            commands::run_import(env_path.as_deref(), &private_key, &public_key, writer)
        }
    }
}
