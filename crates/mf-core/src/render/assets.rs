//! Static assets, manifests and documentation

use super::{fill, vite, webpack, HOST_DIR};
use crate::mf_config::RegistryFile;
use crate::model::{Bundler, ProjectConfig};
use serde_json::{json, Map, Value};

const HOST_CSS: &str = include_str!("../../templates/shared/host.css");
const REMOTE_CSS: &str = include_str!("../../templates/shared/remote.css");
const HTML_SHELL: &str = include_str!("../../templates/shared/index.html");
const README: &str = include_str!("../../templates/shared/README.md");
const GITIGNORE: &str = include_str!("../../templates/shared/gitignore");

/// Version range of react / react-dom pinned in every app (and read back by
/// the bundler configs as the singleton `requiredVersion`)
pub const REACT_VERSION: &str = "^18.2.0";

pub fn host_css() -> String {
    HOST_CSS.to_string()
}

pub fn remote_css() -> String {
    REMOTE_CSS.to_string()
}

pub fn gitignore() -> String {
    GITIGNORE.to_string()
}

/// HTML shell with a `#root` mount point; vite loads its entry from it
pub fn html_shell(title: &str, bundler: Bundler) -> String {
    let script = match bundler {
        Bundler::Webpack => "",
        Bundler::Vite => "\n    <script type=\"module\" src=\"/src/main.jsx\"></script>",
    };
    fill(HTML_SHELL, &[("title", title), ("script", script)])
}

fn to_json(value: &Value) -> String {
    // Serializing a `Value` cannot fail
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}

fn string_map<'a>(entries: impl IntoIterator<Item = (&'a str, String)>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v)))
            .collect::<Map<String, Value>>(),
    )
}

/// `package.json` of one app
pub fn app_package_json(name: &str, port: u16, bundler: Bundler) -> String {
    let (scripts, dev_dependencies) = match bundler {
        Bundler::Webpack => (webpack::scripts(), webpack::DEV_DEPENDENCIES),
        Bundler::Vite => (vite::scripts(port), vite::DEV_DEPENDENCIES),
    };

    let mut manifest = Map::new();
    manifest.insert("name".into(), json!(name));
    manifest.insert("version".into(), json!("1.0.0"));
    manifest.insert("private".into(), json!(true));
    if bundler == Bundler::Vite {
        manifest.insert("type".into(), json!("module"));
    }
    manifest.insert("scripts".into(), string_map(scripts));
    manifest.insert(
        "dependencies".into(),
        json!({ "react": REACT_VERSION, "react-dom": REACT_VERSION }),
    );
    manifest.insert(
        "devDependencies".into(),
        string_map(dev_dependencies.iter().map(|(k, v)| (*k, v.to_string()))),
    );
    to_json(&Value::Object(manifest))
}

/// Root workspace `package.json` with per-app and combined dev scripts
pub fn root_package_json(config: &ProjectConfig) -> String {
    let workspaces: Vec<String> = std::iter::once(HOST_DIR.to_string())
        .chain(config.remotes.iter().map(|r| r.app_dir()))
        .collect();

    let run = |dir: &str| format!("npm run dev --workspace={}", dir);
    let mut scripts: Vec<(String, String)> = vec![("dev:host".to_string(), run(HOST_DIR))];
    for remote in &config.remotes {
        scripts.push((format!("dev:{}", remote.name), run(&remote.app_dir())));
    }
    let all = workspaces
        .iter()
        .map(|w| format!("\"{}\"", run(w)))
        .collect::<Vec<_>>()
        .join(" ");
    scripts.push(("dev".to_string(), format!("concurrently {}", all)));
    scripts.push(("build".to_string(), "npm run build --workspaces".to_string()));

    let scripts: Map<String, Value> = scripts
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();

    to_json(&json!({
        "name": config.project_name,
        "version": "1.0.0",
        "private": true,
        "workspaces": workspaces,
        "scripts": scripts,
        "devDependencies": { "concurrently": "^8.2.2" },
    }))
}

/// Initial `mf.config.json` with one remote-entry URL per remote
pub fn registry_file(config: &ProjectConfig) -> String {
    RegistryFile::from_remotes(&config.remotes).to_json_string()
}

/// Top-level README listing every app, its role and dev URL
pub fn readme(config: &ProjectConfig) -> String {
    let tree: String = config
        .remotes
        .iter()
        .map(|r| format!("│   ├── {}/{}# Remote micro-frontend\n", r.name, pad(&r.name)))
        .collect();

    let rows: String = config
        .remotes
        .iter()
        .map(|r| {
            format!(
                "| `{}` | Remote | {} | Exposes `{}` from {} |\n",
                r.app_dir(),
                r.dev_url(),
                r.exposes,
                r.remote_entry_url()
            )
        })
        .collect();

    let dev_scripts: String = config
        .remotes
        .iter()
        .map(|r| format!("npm run dev:{}\n", r.name))
        .collect();

    let host_notes = match config.remotes.len() {
        0 => "No remotes yet".to_string(),
        1 => "Loads 1 remote".to_string(),
        n => format!("Loads all {} remotes", n),
    };

    fill(
        README,
        &[
            ("project", &config.project_name),
            ("bundler", config.bundler.display_name()),
            ("tree", &tree),
            ("host_url", &config.host_url()),
            ("host_notes", &host_notes),
            ("rows", &rows),
            ("dev_scripts", &dev_scripts),
            ("config_file", config.bundler.config_file()),
        ],
    )
}

/// Align tree comments with the `host/` line
fn pad(name: &str) -> String {
    " ".repeat(14usize.saturating_sub(name.len() + 1).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RemoteRecord;

    fn shop() -> ProjectConfig {
        ProjectConfig::new(
            "shop",
            3000,
            vec![
                RemoteRecord::new("checkout", 3001, "App"),
                RemoteRecord::new("cart", 3002, "Cart"),
            ],
        )
    }

    #[test]
    fn test_root_package_json_scripts() {
        let manifest: Value = serde_json::from_str(&root_package_json(&shop())).unwrap();

        assert_eq!(manifest["name"], "shop");
        assert_eq!(
            manifest["workspaces"],
            json!(["apps/host", "apps/checkout", "apps/cart"])
        );
        assert_eq!(
            manifest["scripts"]["dev:cart"],
            "npm run dev --workspace=apps/cart"
        );
        assert_eq!(
            manifest["scripts"]["dev"],
            "concurrently \"npm run dev --workspace=apps/host\" \
             \"npm run dev --workspace=apps/checkout\" \"npm run dev --workspace=apps/cart\""
        );
        let keys: Vec<&String> = manifest["scripts"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["dev:host", "dev:checkout", "dev:cart", "dev", "build"]);
    }

    #[test]
    fn test_app_package_json_pins_react() {
        for bundler in [Bundler::Webpack, Bundler::Vite] {
            let manifest: Value =
                serde_json::from_str(&app_package_json("cart", 3002, bundler)).unwrap();
            assert_eq!(manifest["dependencies"]["react"], REACT_VERSION);
            assert_eq!(manifest["dependencies"]["react-dom"], REACT_VERSION);
        }

        let vite: Value = serde_json::from_str(&app_package_json("cart", 3002, Bundler::Vite)).unwrap();
        assert_eq!(vite["type"], "module");
        assert_eq!(vite["scripts"]["preview"], "vite preview --port 3002");
    }

    #[test]
    fn test_html_shell() {
        let webpack = html_shell("shop host", Bundler::Webpack);
        assert!(webpack.contains("<title>shop host</title>"));
        assert!(!webpack.contains("<script"));

        let vite = html_shell("cart remote", Bundler::Vite);
        assert!(vite.contains("<script type=\"module\" src=\"/src/main.jsx\"></script>"));
    }

    #[test]
    fn test_readme_lists_every_app() {
        let readme = readme(&shop());
        assert!(readme.starts_with("# shop\n"));
        assert!(readme.contains("| `apps/host` | Host | http://localhost:3000 | Loads all 2 remotes |"));
        assert!(readme.contains("| `apps/checkout` | Remote | http://localhost:3001 | Exposes `App`"));
        assert!(readme.contains("| `apps/cart` | Remote | http://localhost:3002 | Exposes `Cart`"));
        assert!(readme.contains("npm run dev:cart\n"));
        assert!(readme.contains("│   ├── cart/         # Remote micro-frontend"));
    }

    #[test]
    fn test_readme_without_remotes() {
        let readme = readme(&ProjectConfig::new("shop", 3000, vec![]));
        assert!(readme.contains("No remotes yet"));
        assert!(!readme.contains("| Remote |"));
    }
}
