//! Add / edit / remove / view menu over the remote registry

use super::{capture_remote, RemoteRegistry};
use crate::prompt::{Choice, Prompter};
use anyhow::Result;

/// Actions offered from the idle menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    Edit,
    Remove,
    View,
    Done,
}

impl MenuAction {
    pub fn key(&self) -> &'static str {
        match self {
            MenuAction::Add => "add",
            MenuAction::Edit => "edit",
            MenuAction::Remove => "remove",
            MenuAction::View => "view",
            MenuAction::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Add => "Add a remote",
            MenuAction::Edit => "Edit a remote",
            MenuAction::Remove => "Remove a remote",
            MenuAction::View => "View current remotes",
            MenuAction::Done => "Done configuring remotes",
        }
    }

    /// Actions available for a registry; edit/remove/view need at least one remote
    pub fn available(registry: &RemoteRegistry) -> Vec<MenuAction> {
        if registry.is_empty() {
            vec![MenuAction::Add, MenuAction::Done]
        } else {
            vec![
                MenuAction::Add,
                MenuAction::Edit,
                MenuAction::Remove,
                MenuAction::View,
                MenuAction::Done,
            ]
        }
    }
}

fn select_remote<P: Prompter>(
    prompter: &mut P,
    registry: &RemoteRegistry,
    prompt: &str,
) -> Result<usize> {
    let choices: Vec<Choice> = registry
        .remotes()
        .iter()
        .map(|r| Choice::new(r.name.clone(), r.name.clone()).hint(r.url.clone()))
        .collect();
    prompter.select(prompt, &choices)
}

/// Run the menu loop until the user picks "done", returning the final registry
pub fn manage_remotes<P: Prompter>(
    prompter: &mut P,
    mut registry: RemoteRegistry,
) -> Result<RemoteRegistry> {
    prompter.info("Configure remote apps: micro-frontends exposed to the host")?;

    loop {
        let actions = MenuAction::available(&registry);
        let choices: Vec<Choice> = actions
            .iter()
            .map(|a| Choice::new(a.key(), a.label()))
            .collect();
        let prompt = if registry.is_empty() {
            "Would you like to add a remote app?".to_string()
        } else {
            format!(
                "You have {} remote(s). What would you like to do?",
                registry.len()
            )
        };

        match actions[prompter.select(&prompt, &choices)?] {
            MenuAction::Add => {
                let remote = capture_remote(prompter, &registry, None)?;
                let name = remote.name.clone();
                registry.add(remote)?;
                prompter.success(&format!("Remote \"{}\" added", name))?;
            }
            MenuAction::Edit => {
                let index = select_remote(prompter, &registry, "Which remote do you want to edit?")?;
                let remote = capture_remote(prompter, &registry, Some(index))?;
                let name = remote.name.clone();
                registry.replace(index, remote)?;
                prompter.success(&format!("Remote \"{}\" updated", name))?;
            }
            MenuAction::Remove => {
                let index =
                    select_remote(prompter, &registry, "Which remote do you want to remove?")?;
                let removed = registry.remove(index);
                prompter.warning(&format!("Remote \"{}\" removed", removed.name))?;
            }
            MenuAction::View => {
                prompter.note("Current remotes", &registry.describe().join("\n"))?;
            }
            MenuAction::Done => return Ok(registry),
        }
    }
}
