//! create-mf-app - Scaffold a React Module Federation host + remotes project

use anyhow::Result;
use clap::Parser;
use mf_core::model::{Bundler, DEFAULT_HOST_PORT};
use mf_core::tui::CreateArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "create-mf-app")]
#[command(about = "Scaffold a React Module Federation host + remotes project")]
#[command(version)]
pub struct Args {
    /// Project directory name (prompted if omitted)
    #[arg(value_name = "project-name")]
    pub project_name: Option<String>,

    /// Host dev server port
    #[arg(long = "host-port", default_value_t = DEFAULT_HOST_PORT, value_parser = parse_host_port)]
    pub host_port: u16,

    /// Bundler the apps are wired for (prompted if omitted)
    #[arg(short, long, value_enum)]
    pub bundler: Option<Bundler>,

    /// Load the topology from a YAML or JSON file instead of prompting
    #[arg(long, value_name = "file")]
    pub from: Option<PathBuf>,

    /// Directory to create the project in
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Auto-confirm the final prompt (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Run `npm install` after scaffolding
    #[arg(long)]
    pub install: bool,
}

fn parse_host_port(value: &str) -> Result<u16, String> {
    mf_core::validate::parse_port(value)
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            project_name: args.project_name,
            host_port: args.host_port,
            bundler: args.bundler,
            from: args.from,
            directory: args.directory,
            yes: args.yes,
            install: args.install,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = mf_core::run(args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
