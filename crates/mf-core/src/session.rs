//! The interactive scaffolding session: name, host port, bundler, remotes,
//! summary and confirmation

use crate::model::{Bundler, ConfigError, ProjectConfig, DEFAULT_HOST_PORT};
use crate::prompt::{Choice, Prompter};
use crate::registry::{manage_remotes, RemoteRegistry};
use crate::validate;
use anyhow::Result;

/// Default offered by the project name prompt
pub const DEFAULT_PROJECT_NAME: &str = "my-mf-app";

/// Command-line input to a session
#[derive(Debug, Clone)]
pub struct SessionArgs {
    /// Supplied positionally; prompted for when absent
    pub project_name: Option<String>,
    /// Default offered by the host port prompt
    pub host_port: u16,
    /// Skips the bundler prompt when set
    pub bundler: Option<Bundler>,
    /// Skip the final confirmation
    pub yes: bool,
}

impl Default for SessionArgs {
    fn default() -> Self {
        Self {
            project_name: None,
            host_port: DEFAULT_HOST_PORT,
            bundler: None,
            yes: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Confirmed(ProjectConfig),
    Cancelled,
}

/// Collect a full [`ProjectConfig`] and ask for confirmation.
///
/// Nothing here touches the filesystem. An invalid project name given on the
/// command line is an error; everything typed interactively is re-prompted
/// until it validates.
pub fn run_session<P: Prompter>(prompter: &mut P, args: &SessionArgs) -> Result<SessionOutcome> {
    let project_name = match &args.project_name {
        Some(name) => {
            validate::validate_project_name(name).map_err(|reason| {
                ConfigError::InvalidProjectName {
                    name: name.clone(),
                    reason,
                }
            })?;
            prompter.info(&format!("Project name: {}", name))?;
            name.clone()
        }
        None => prompter.input(
            "Project name",
            DEFAULT_PROJECT_NAME,
            Box::new(validate::validate_project_name),
        )?,
    };

    let host_port = prompter.input(
        "Host app dev server port",
        &args.host_port.to_string(),
        Box::new(validate::validate_port),
    )?;
    let host_port = validate::parse_port(&host_port).map_err(anyhow::Error::msg)?;

    let bundler = match args.bundler {
        Some(bundler) => bundler,
        None => select_bundler(prompter)?,
    };

    let registry = manage_remotes(prompter, RemoteRegistry::new())?;
    let config =
        ProjectConfig::new(project_name, host_port, registry.into_records()).with_bundler(bundler);

    confirm_config(prompter, config, args.yes)
}

fn select_bundler<P: Prompter>(prompter: &mut P) -> Result<Bundler> {
    let bundlers = [Bundler::Webpack, Bundler::Vite];
    let choices: Vec<Choice> = bundlers
        .iter()
        .map(|b| {
            let (key, hint) = match b {
                Bundler::Webpack => ("webpack", "ModuleFederationPlugin"),
                Bundler::Vite => ("vite", "@module-federation/vite"),
            };
            Choice::new(key, b.display_name()).hint(hint)
        })
        .collect();
    Ok(bundlers[prompter.select("Which bundler?", &choices)?])
}

/// Show the summary, warn about shared ports, then confirm unless `yes`
pub fn confirm_config<P: Prompter>(
    prompter: &mut P,
    config: ProjectConfig,
    yes: bool,
) -> Result<SessionOutcome> {
    prompter.note("Project summary", &summary(&config))?;

    for (port, apps) in config.port_conflicts() {
        prompter.warning(&format!(
            "Port {} is used by more than one app: {}",
            port,
            apps.join(", ")
        ))?;
    }

    if yes || prompter.confirm("Create project with this configuration?", true)? {
        Ok(SessionOutcome::Confirmed(config))
    } else {
        prompter.warning("Scaffolding cancelled")?;
        Ok(SessionOutcome::Cancelled)
    }
}

/// Multi-line description of what will be generated
pub fn summary(config: &ProjectConfig) -> String {
    let mut lines = vec![
        format!("Project:  {}", config.project_name),
        format!("Bundler:  {}", config.bundler.display_name()),
        format!("Host:     {} (port {})", config.host_url(), config.host_port),
    ];
    if config.remotes.is_empty() {
        lines.push("Remotes:  none".to_string());
    } else {
        lines.push(format!("Remotes:  {}", config.remotes.len()));
        for remote in &config.remotes {
            lines.push(format!(
                "  - {} exposes {} from {} (port {})",
                remote.name,
                remote.exposes,
                remote.remote_entry_url(),
                remote.port
            ));
        }
    }
    lines.join("\n")
}
