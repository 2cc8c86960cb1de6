//! React sources for the host shell and the remote stubs

use super::{fill, js_str};
use crate::model::{ProjectConfig, RemoteRecord};
use std::collections::HashSet;

const HOST_APP: &str = include_str!("../../templates/shared/host.App.jsx");
const HOST_BOOTSTRAP: &str = include_str!("../../templates/shared/host.bootstrap.jsx");
const REMOTE_COMPONENT: &str = include_str!("../../templates/shared/remote.Component.jsx");
const REMOTE_BOOTSTRAP: &str = include_str!("../../templates/shared/remote.bootstrap.jsx");

/// Prefix of the lazily imported component bound in the host
pub const COMPONENT_PREFIX: &str = "Remote";

/// Local component names the host binds each remote to, in registry order.
///
/// The name is `Remote{exposes}`. When several remotes expose the same
/// symbol, each of them gets its 1-based position appended, repeated until
/// the binding is free, so no two bindings clash.
pub fn host_component_names(remotes: &[RemoteRecord]) -> Vec<String> {
    let base = |r: &RemoteRecord| format!("{}{}", COMPONENT_PREFIX, r.exposes);
    let is_shared =
        |r: &RemoteRecord| remotes.iter().filter(|o| o.exposes == r.exposes).count() > 1;

    let mut taken: HashSet<String> = remotes
        .iter()
        .filter(|r| !is_shared(*r))
        .map(base)
        .collect();
    remotes
        .iter()
        .enumerate()
        .map(|(i, r)| {
            if !is_shared(r) {
                return base(r);
            }
            let mut name = base(r);
            loop {
                name = format!("{}_{}", name, i + 1);
                if taken.insert(name.clone()) {
                    return name;
                }
            }
        })
        .collect()
}

/// Host `src/App.jsx`: one lazy import per remote, each rendered inside its
/// own Suspense fallback and ErrorBoundary so a failing remote cannot take
/// down the others
pub fn host_app(config: &ProjectConfig) -> String {
    let names = host_component_names(&config.remotes);

    let imports = if config.remotes.is_empty() {
        "// No remotes configured. Add them with the `mf` CLI or re-run the scaffolder.".to_string()
    } else {
        config
            .remotes
            .iter()
            .zip(&names)
            .map(|(r, component)| {
                format!(
                    "const {} = React.lazy(() => import({}));",
                    component,
                    js_str(&format!("{}/{}", r.name, r.exposes))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let sections = if config.remotes.is_empty() {
        "        <p>No remote apps configured. Run the CLI again to add remotes.</p>".to_string()
    } else {
        config
            .remotes
            .iter()
            .zip(&names)
            .map(|(r, component)| {
                format!(
                    "        <section>\n\
                     \x20         <h2>{name}</h2>\n\
                     \x20         <React.Suspense fallback={{<div className=\"loading\">Loading {name}…</div>}}>\n\
                     \x20           <ErrorBoundary remoteName=\"{name}\">\n\
                     \x20             <{component} />\n\
                     \x20           </ErrorBoundary>\n\
                     \x20         </React.Suspense>\n\
                     \x20       </section>",
                    name = r.name,
                    component = component
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    fill(
        HOST_APP,
        &[
            ("imports", &imports),
            ("title", &config.project_name),
            ("sections", &sections),
        ],
    )
}

/// Mount code of the host
pub fn host_bootstrap() -> String {
    HOST_BOOTSTRAP.to_string()
}

/// The component a remote exposes, named after `exposes`
pub fn remote_component(remote: &RemoteRecord) -> String {
    fill(
        REMOTE_COMPONENT,
        &[("exposes", &remote.exposes), ("name", &remote.name)],
    )
}

/// Standalone mount of a remote's exposed component
pub fn remote_bootstrap(remote: &RemoteRecord) -> String {
    fill(REMOTE_BOOTSTRAP, &[("exposes", &remote.exposes)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_app_wraps_each_remote() {
        let config = ProjectConfig::new(
            "shop",
            3000,
            vec![
                RemoteRecord::new("checkout", 3001, "App"),
                RemoteRecord::new("cart", 3002, "Cart"),
            ],
        );
        let app = host_app(&config);

        assert!(app.contains("const RemoteApp = React.lazy(() => import('checkout/App'));"));
        assert!(app.contains("const RemoteCart = React.lazy(() => import('cart/Cart'));"));
        assert!(app.contains("<ErrorBoundary remoteName=\"checkout\">"));
        assert!(app.contains("<ErrorBoundary remoteName=\"cart\">"));
        assert!(app.contains(
            "<React.Suspense fallback={<div className=\"loading\">Loading cart…</div>}>"
        ));
        assert!(app.contains("            <RemoteCart />"));
        assert!(app.find("checkout/App").unwrap() < app.find("cart/Cart").unwrap());
    }

    #[test]
    fn test_host_app_without_remotes() {
        let app = host_app(&ProjectConfig::new("shop", 3000, vec![]));
        assert!(app.contains("No remotes configured"));
        assert!(app.contains("No remote apps configured"));
        assert!(!app.contains("React.lazy"));
    }

    #[test]
    fn test_shared_exposes_get_distinct_bindings() {
        let names = host_component_names(&[
            RemoteRecord::new("checkout", 3001, "App"),
            RemoteRecord::new("cart", 3002, "App"),
            RemoteRecord::new("admin", 3003, "Admin"),
        ]);
        assert_eq!(names, vec!["RemoteApp_1", "RemoteApp_2", "RemoteAdmin"]);
    }

    #[test]
    fn test_suffixed_bindings_never_clash_with_plain_ones() {
        let names = host_component_names(&[
            RemoteRecord::new("checkout", 3001, "App"),
            RemoteRecord::new("cart", 3002, "App"),
            RemoteRecord::new("x", 3003, "App_checkout"),
            RemoteRecord::new("y", 3004, "App_1"),
        ]);
        assert_eq!(
            names,
            vec!["RemoteApp_1_1", "RemoteApp_2", "RemoteApp_checkout", "RemoteApp_1"]
        );

        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_remote_component() {
        let component = remote_component(&RemoteRecord::new("checkout", 3001, "Checkout"));
        assert!(component.contains("export default function Checkout() {"));
        assert!(component.contains("<div className=\"remote-badge\">checkout</div>"));
        assert!(component.contains("<code>src/Checkout.jsx</code>"));
    }

    #[test]
    fn test_remote_bootstrap_mounts_component() {
        let bootstrap = remote_bootstrap(&RemoteRecord::new("checkout", 3001, "Checkout"));
        assert!(bootstrap.contains("import Checkout from './Checkout';"));
        assert!(bootstrap.contains(".render(<Checkout />);"));
    }
}
