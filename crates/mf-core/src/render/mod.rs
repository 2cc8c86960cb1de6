//! Pure projection of a [`ProjectConfig`] into generated project files
//!
//! Nothing in this module touches the filesystem. Every function is
//! deterministic: rendering the same config twice yields byte-identical
//! output, so generated trees can be compared directly in tests. The
//! [`crate::writer`] module is the only place that materializes the result.
//!
//! Static boilerplate lives in `templates/` and is filled with
//! `{{placeholder}}` substitutions; the cross-referencing parts (remote maps,
//! imports, scripts) are computed here.

pub mod app;
pub mod assets;
pub mod vite;
pub mod webpack;

use crate::model::{Bundler, ProjectConfig, RemoteRecord};

/// One generated file, with a `/`-separated path relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: String,
    pub contents: String,
}

impl RenderedFile {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Host workspace directory relative to the project root
pub const HOST_DIR: &str = "apps/host";

/// Replace every `{{key}}` in `template` with its value in a single pass.
///
/// Unknown keys are left verbatim and substituted values are never rescanned,
/// so user input containing braces cannot trigger further substitution.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Single-quoted JavaScript string literal
pub fn js_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Bundler configuration of the host app
pub fn host_bundler_config(config: &ProjectConfig) -> String {
    match config.bundler {
        Bundler::Webpack => webpack::host_config(config),
        Bundler::Vite => vite::host_config(config),
    }
}

/// Bundler configuration of one remote app
pub fn remote_bundler_config(config: &ProjectConfig, remote: &RemoteRecord) -> String {
    match config.bundler {
        Bundler::Webpack => webpack::remote_config(remote),
        Bundler::Vite => vite::remote_config(remote),
    }
}

/// Every file of the host app, paths relative to the project root
pub fn render_host(config: &ProjectConfig) -> Vec<RenderedFile> {
    let at = |file: &str| format!("{}/{}", HOST_DIR, file);
    let mut files = vec![
        RenderedFile::new(
            at("package.json"),
            assets::app_package_json("host", config.host_port, config.bundler),
        ),
        RenderedFile::new(at(config.bundler.config_file()), host_bundler_config(config)),
    ];
    files.extend(
        entry_files(config.bundler, &app::host_bootstrap())
            .into_iter()
            .map(|(path, contents)| RenderedFile::new(at(path.as_str()), contents)),
    );
    files.push(RenderedFile::new(at("src/App.jsx"), app::host_app(config)));
    files.push(RenderedFile::new(at("src/index.css"), assets::host_css()));
    files.push(RenderedFile::new(
        at(html_path(config.bundler)),
        assets::html_shell(&format!("{} host", config.project_name), config.bundler),
    ));
    files
}

/// Every file of one remote app, paths relative to the project root
pub fn render_remote(config: &ProjectConfig, remote: &RemoteRecord) -> Vec<RenderedFile> {
    let dir = remote.app_dir();
    let at = |file: &str| format!("{}/{}", dir, file);
    let mut files = vec![
        RenderedFile::new(
            at("package.json"),
            assets::app_package_json(&remote.name, remote.port, config.bundler),
        ),
        RenderedFile::new(
            at(config.bundler.config_file()),
            remote_bundler_config(config, remote),
        ),
    ];
    files.extend(
        entry_files(config.bundler, &app::remote_bootstrap(remote))
            .into_iter()
            .map(|(path, contents)| RenderedFile::new(at(path.as_str()), contents)),
    );
    files.push(RenderedFile::new(
        at(format!("src/{}.jsx", remote.exposes).as_str()),
        app::remote_component(remote),
    ));
    files.push(RenderedFile::new(at("src/index.css"), assets::remote_css()));
    files.push(RenderedFile::new(
        at(html_path(config.bundler)),
        assets::html_shell(&format!("{} remote", remote.name), config.bundler),
    ));
    files
}

/// Entry point files for an app whose mount code is `bootstrap`
fn entry_files(bundler: Bundler, bootstrap: &str) -> Vec<(String, String)> {
    match bundler {
        // Webpack needs an async boundary before the shared scope is ready
        Bundler::Webpack => vec![
            ("src/index.js".to_string(), webpack::async_entry("bootstrap")),
            ("src/bootstrap.jsx".to_string(), bootstrap.to_string()),
        ],
        Bundler::Vite => vec![("src/main.jsx".to_string(), bootstrap.to_string())],
    }
}

fn html_path(bundler: Bundler) -> &'static str {
    match bundler {
        Bundler::Webpack => "public/index.html",
        Bundler::Vite => "index.html",
    }
}

/// Render the whole project in write order: root files, host, then each
/// remote in registry order
pub fn render_project(config: &ProjectConfig) -> Vec<RenderedFile> {
    let mut files = vec![
        RenderedFile::new("package.json", assets::root_package_json(config)),
        RenderedFile::new(".gitignore", assets::gitignore()),
        RenderedFile::new("README.md", assets::readme(config)),
        RenderedFile::new(crate::mf_config::CONFIG_FILE, assets::registry_file(config)),
    ];
    files.extend(render_host(config));
    for remote in &config.remotes {
        files.extend(render_remote(config, remote));
    }
    files
}
