//! Charm-style CLI prompts using cliclack

use crate::batch;
use crate::model::{Bundler, ProjectConfig, DEFAULT_HOST_PORT};
use crate::prompt::{Choice, Prompter, Validator};
use crate::runtime::{check, npm};
use crate::session::{self, SessionArgs, SessionOutcome};
use crate::writer::{self, ScaffoldReport};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Project name; prompted for when absent
    pub project_name: Option<String>,

    /// Default host dev-server port
    pub host_port: u16,

    /// Bundler; prompted for when absent
    pub bundler: Option<Bundler>,

    /// Topology file replacing the interactive prompts
    pub from: Option<PathBuf>,

    /// Directory the project is created in (defaults to the current one)
    pub directory: Option<PathBuf>,

    /// Auto-confirm the final prompt (non-interactive mode)
    pub yes: bool,

    /// Run `npm install` once the project is written
    pub install: bool,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            project_name: None,
            host_port: DEFAULT_HOST_PORT,
            bundler: None,
            from: None,
            directory: None,
            yes: false,
            install: false,
        }
    }
}

/// [`Prompter`] backed by cliclack
#[derive(Debug, Default)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn input(&mut self, prompt: &str, default: &str, validate: Validator) -> Result<String> {
        let fallback = default.to_string();
        let value: String = cliclack::input(prompt)
            .default_input(default)
            .validate(move |input: &String| {
                if input.is_empty() {
                    validate(fallback.as_str())
                } else {
                    validate(input.as_str())
                }
            })
            .interact()?;
        Ok(if value.is_empty() {
            default.to_string()
        } else {
            value
        })
    }

    fn select(&mut self, prompt: &str, choices: &[Choice]) -> Result<usize> {
        let mut select = cliclack::select(prompt);
        for (idx, choice) in choices.iter().enumerate() {
            select = select.item(idx, &choice.label, &choice.hint);
        }
        Ok(select.interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(cliclack::confirm(prompt).initial_value(default).interact()?)
    }

    fn info(&mut self, message: &str) -> Result<()> {
        Ok(cliclack::log::info(message)?)
    }

    fn success(&mut self, message: &str) -> Result<()> {
        Ok(cliclack::log::success(message)?)
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        Ok(cliclack::log::warning(message)?)
    }

    fn note(&mut self, title: &str, body: &str) -> Result<()> {
        Ok(cliclack::note(title, body)?)
    }
}

/// Run the scaffolder with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("create-mf-app")?;
    let mut prompter = CliclackPrompter;

    let outcome = match &args.from {
        Some(path) => {
            let config = load_from_file(path, &args).await?;
            session::confirm_config(&mut prompter, config, args.yes)?
        }
        None => session::run_session(
            &mut prompter,
            &SessionArgs {
                project_name: args.project_name.clone(),
                host_port: args.host_port,
                bundler: args.bundler,
                yes: args.yes,
            },
        )?,
    };

    let config = match outcome {
        SessionOutcome::Confirmed(config) => config,
        SessionOutcome::Cancelled => {
            cliclack::outro_cancel("No files were written.")?;
            return Ok(());
        }
    };

    let parent = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let report = create_project(&parent, &config).await?;

    let runtimes = check_runtimes()?;
    let installed = if args.install {
        install_dependencies(&report.root, &runtimes).await?
    } else {
        false
    };

    print_next_steps(&config, &report.root, installed)?;
    Ok(())
}

/// Load a topology file; a name or bundler given on the command line wins
async fn load_from_file(path: &Path, args: &CreateArgs) -> Result<ProjectConfig> {
    cliclack::log::info(format!("Loading topology from {}", path.display()))?;
    let mut config = batch::load_topology(path).await?;
    if let Some(name) = &args.project_name {
        config.project_name = name.clone();
    }
    if let Some(bundler) = args.bundler {
        config.bundler = bundler;
    }
    config.validate()?;
    Ok(config)
}

async fn create_project(parent: &Path, config: &ProjectConfig) -> Result<ScaffoldReport> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    match writer::scaffold(parent, config).await {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.files.len(),
                report.root.display()
            ));
            cliclack::note("Generated files", file_summary(config, &report))?;
            Ok(report)
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            Err(e)
        }
    }
}

/// File count per app plus the root files
fn file_summary(config: &ProjectConfig, report: &ScaffoldReport) -> String {
    let count = |prefix: &str| {
        report
            .files
            .iter()
            .filter(|f| f.starts_with(prefix))
            .count()
    };

    let mut lines = vec![
        format!(
            "{}/  {} root files",
            config.project_name,
            count("") - count("apps/")
        ),
        format!("  apps/host/  {} files", count("apps/host/")),
    ];
    for remote in &config.remotes {
        lines.push(format!(
            "  {}/  {} files",
            remote.app_dir(),
            count(&format!("{}/", remote.app_dir()))
        ));
    }
    lines.join("\n")
}

/// Advisory Node.js / npm check; never fails the run
fn check_runtimes() -> Result<Vec<check::RuntimeInfo>> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let runtimes = check::check_runtimes();
    let info: Vec<String> = runtimes.iter().map(|r| r.describe()).collect();
    spinner.stop(format!("Detected runtimes: {}", info.join(", ")));

    for hint in check::missing_hints(&runtimes) {
        cliclack::log::warning(format!("Missing {}", hint))?;
    }
    Ok(runtimes)
}

async fn install_dependencies(root: &Path, runtimes: &[check::RuntimeInfo]) -> Result<bool> {
    if runtimes.iter().any(|r| !r.available) {
        cliclack::log::warning("Skipping npm install: Node.js toolchain not available")?;
        return Ok(false);
    }

    match npm::install(root).await {
        Ok(()) => {
            cliclack::log::success("Dependencies installed")?;
            Ok(true)
        }
        Err(e) => {
            cliclack::log::error(format!("{}", e))?;
            Ok(false)
        }
    }
}

fn print_next_steps(config: &ProjectConfig, root: &Path, installed: bool) -> Result<()> {
    let mut steps = Vec::new();
    if std::env::current_dir().ok().as_deref() != Some(root) {
        steps.push(format!("cd {}", root.display()));
    }
    if !installed {
        steps.push("npm install".to_string());
    }
    steps.push("npm run dev".to_string());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  Dev servers");
    println!();
    println!("  host      {}", config.host_url());
    for remote in &config.remotes {
        println!("  {:<9} {}", remote.name, remote.dev_url());
    }
    println!();

    cliclack::outro("Happy coding!")?;

    Ok(())
}
