//! Single-remote capture flow: name → port → url → exposes

use super::RemoteRegistry;
use crate::model::{default_remote_url, RemoteRecord, DEFAULT_EXPOSES, DEFAULT_REMOTE_PORT};
use crate::prompt::Prompter;
use crate::validate;
use anyhow::Result;

/// Values pre-filled in the capture prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDefaults {
    pub name: String,
    pub port: u16,
    /// Prior URL when editing; `None` derives the default from the entered port
    pub url: Option<String>,
    pub exposes: String,
}

impl Default for RemoteDefaults {
    fn default() -> Self {
        Self {
            name: String::new(),
            port: DEFAULT_REMOTE_PORT,
            url: None,
            exposes: DEFAULT_EXPOSES.to_string(),
        }
    }
}

impl From<&RemoteRecord> for RemoteDefaults {
    fn from(record: &RemoteRecord) -> Self {
        Self {
            name: record.name.clone(),
            port: record.port,
            url: Some(record.url.clone()),
            exposes: record.exposes.clone(),
        }
    }
}

/// Default offered by the URL prompt.
///
/// A prior URL wins and is not recomputed from `port`, so editing a remote's
/// port leaves an explicit URL untouched.
pub fn url_default(prior: Option<&str>, port: u16) -> String {
    match prior {
        Some(url) => url.to_string(),
        None => default_remote_url(port),
    }
}

/// Capture one remote, re-prompting each field until it validates.
///
/// `editing` is the index of the record being edited; it is excluded from the
/// uniqueness check so an unchanged name is accepted.
pub fn capture_remote<P: Prompter>(
    prompter: &mut P,
    registry: &RemoteRegistry,
    editing: Option<usize>,
) -> Result<RemoteRecord> {
    let defaults = editing
        .and_then(|i| registry.get(i))
        .map(RemoteDefaults::from)
        .unwrap_or_default();

    let used_names = registry.used_names(editing);
    let name = prompter.input(
        "Remote app name (used as MF scope)",
        &defaults.name,
        Box::new(move |value: &str| {
            validate::validate_remote_name(value)?;
            if used_names.contains(&value.to_lowercase()) {
                return Err(format!("A remote named \"{}\" already exists", value));
            }
            Ok(())
        }),
    )?;

    let port = prompter.input(
        "Dev server port for this remote",
        &defaults.port.to_string(),
        Box::new(validate::validate_port),
    )?;
    let port = validate::parse_port(&port).map_err(anyhow::Error::msg)?;

    let url = prompter.input(
        "Production/remote URL (used in host bundler config)",
        &url_default(defaults.url.as_deref(), port),
        Box::new(validate::validate_url),
    )?;

    let exposes = prompter.input(
        "Component to expose (e.g. App)",
        &defaults.exposes,
        Box::new(|value: &str| validate::validate_exposes(value.trim())),
    )?;

    Ok(RemoteRecord {
        name,
        port,
        url,
        exposes: exposes.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{default, text, ScriptedPrompter};

    #[test]
    fn test_fresh_remote_defaults() {
        let registry = RemoteRegistry::new();
        let mut prompter = ScriptedPrompter::new([text("checkout"), default(), default(), default()]);

        let remote = capture_remote(&mut prompter, &registry, None).unwrap();
        assert_eq!(remote, RemoteRecord::new("checkout", 3001, "App"));
    }

    #[test]
    fn test_url_default_follows_freshly_entered_port() {
        let registry = RemoteRegistry::new();
        for port in [1024u16, 3005, 8080, 65535] {
            let mut prompter =
                ScriptedPrompter::new([text("cart"), text(&port.to_string()), default(), default()]);
            let remote = capture_remote(&mut prompter, &registry, None).unwrap();

            assert_eq!(remote.url, format!("http://localhost:{}", port));
            let (_, offered) = &prompter.offered_defaults[2];
            assert_eq!(offered, &format!("http://localhost:{}", port));
        }
    }

    #[test]
    fn test_duplicate_name_is_reprompted() {
        let registry =
            RemoteRegistry::from_records(vec![RemoteRecord::new("checkout", 3001, "App")]).unwrap();
        let mut prompter = ScriptedPrompter::new([
            text("CHECKOUT"),
            text("1bad"),
            text("cart"),
            text("3002"),
            default(),
            text("  Cart  "),
        ]);

        let remote = capture_remote(&mut prompter, &registry, None).unwrap();
        assert_eq!(remote.name, "cart");
        assert_eq!(remote.exposes, "Cart");
        assert_eq!(
            prompter.rejections[0],
            "A remote named \"CHECKOUT\" already exists"
        );
        assert_eq!(prompter.rejections.len(), 2);
    }

    #[test]
    fn test_host_name_and_path_like_exposes_are_reprompted() {
        let registry = RemoteRegistry::new();
        let mut prompter = ScriptedPrompter::new([
            text("host"),
            text("Host"),
            text("checkout"),
            default(),
            default(),
            text("../../escaped"),
            text("My Comp"),
            text("Checkout"),
        ]);

        let remote = capture_remote(&mut prompter, &registry, None).unwrap();
        assert_eq!(remote, RemoteRecord::new("checkout", 3001, "Checkout"));
        assert_eq!(prompter.rejections.len(), 4);
        assert!(prompter.rejections[0].contains("reserved"));
    }

    #[test]
    fn test_edit_keeps_own_name_and_stale_url() {
        let registry = RemoteRegistry::from_records(vec![
            RemoteRecord::new("checkout", 3001, "App"),
            RemoteRecord::new("cart", 3002, "Cart"),
        ])
        .unwrap();
        // Keep the name, change the port, accept the URL default
        let mut prompter = ScriptedPrompter::new([default(), text("4001"), default(), default()]);

        let remote = capture_remote(&mut prompter, &registry, Some(0)).unwrap();
        assert_eq!(remote.name, "checkout");
        assert_eq!(remote.port, 4001);
        // The prior URL is the default and is not recomputed from the new port
        assert_eq!(remote.url, "http://localhost:3001");
        assert!(prompter.rejections.is_empty());
    }

    #[test]
    fn test_url_default_helper() {
        assert_eq!(url_default(None, 3007), "http://localhost:3007");
        assert_eq!(
            url_default(Some("https://cdn.example.com"), 3007),
            "https://cdn.example.com"
        );
    }
}
