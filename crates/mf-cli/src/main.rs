//! mf - Manage the remotes registry (`mf.config.json`) of a scaffolded project

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use mf_core::mf_config::{self, RegistryFile, DEFAULT_REMOTE_URL};
use mf_core::runtime::npm;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mf")]
#[command(about = "Manage the Module Federation remotes registry (mf.config.json)")]
#[command(version)]
pub struct Args {
    /// Registry file to operate on (default: $MF_CONFIG or ./mf.config.json)
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Run `npm run dev` after a successful command
    #[arg(short, long, global = true)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all remotes
    List,
    /// Add a remote
    Add {
        name: String,
        #[arg(default_value = DEFAULT_REMOTE_URL)]
        url: String,
    },
    /// Remove a remote
    Remove { name: String },
    /// Rename a remote, keeping its URL
    Rename { old: String, new: String },
    /// Point a remote at a new URL
    #[command(alias = "set")]
    Move { name: String, url: String },
}

/// Apply `command` to the registry at `path`, returning the confirmation text
pub fn execute(path: &Path, command: &Command) -> Result<String> {
    match command {
        Command::List => {
            let registry = RegistryFile::load(path)?;
            let entries = registry.entries();
            if entries.is_empty() {
                return Ok("No remotes configured".to_string());
            }
            let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
            Ok(entries
                .iter()
                .map(|(name, url)| format!("{:<width$}  {}", name, url, width = width))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Add { name, url } => {
            mf_config::update(path, |r| r.add(name, url))?;
            Ok(format!("Added remote {} → {}", name, url))
        }
        Command::Remove { name } => {
            mf_config::update(path, |r| r.remove(name))?;
            Ok(format!("Removed remote {}", name))
        }
        Command::Rename { old, new } => {
            mf_config::update(path, |r| r.rename(old, new))?;
            Ok(format!("Renamed remote {} → {}", old, new))
        }
        Command::Move { name, url } => {
            mf_config::update(path, |r| r.set_url(name, url))?;
            Ok(format!("Moved remote {} → {}", name, url))
        }
    }
}

#[tokio::main]
async fn main() {
    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help / --version / `mf help` are not failures
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    let Some(command) = args.command else {
        let _ = Args::command().print_help();
        std::process::exit(0);
    };

    let path = args.config.unwrap_or_else(RegistryFile::default_path);
    match execute(&path, &command) {
        Ok(message) if command == Command::List => println!("{}", message),
        Ok(message) => println!("{} {}", "✔".green(), message),
        Err(e) => {
            eprintln!("{} {:#}", "✖".red(), e);
            std::process::exit(1);
        }
    }

    if args.dev {
        let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match npm::run_dev(&dir).await {
            Ok(code) => std::process::exit(code),
            Err(e) => {
                eprintln!("{} {:#}", "✖".red(), e);
                std::process::exit(1);
            }
        }
    }
}
