//! Vite configs using @module-federation/vite

use super::{fill, js_str};
use crate::model::{ProjectConfig, RemoteRecord};

const HOST_CONFIG: &str = include_str!("../../templates/vite/host.config.js");
const REMOTE_CONFIG: &str = include_str!("../../templates/vite/remote.config.js");

/// `name: { type: 'module', name: 'name', entry: 'url/remoteEntry.js' },` lines
pub fn remotes_block(remotes: &[RemoteRecord]) -> String {
    remotes
        .iter()
        .map(|r| {
            format!(
                "        {}: {{ type: 'module', name: {}, entry: {} }},\n",
                r.name,
                js_str(&r.name),
                js_str(&r.remote_entry_url())
            )
        })
        .collect()
}

pub fn host_config(config: &ProjectConfig) -> String {
    fill(
        HOST_CONFIG,
        &[
            ("port", &config.host_port.to_string()),
            ("remotes", &remotes_block(&config.remotes)),
        ],
    )
}

pub fn remote_config(remote: &RemoteRecord) -> String {
    let public_path = format!("{}/", remote.url.trim_end_matches('/'));
    fill(
        REMOTE_CONFIG,
        &[
            ("public_path", &js_str(&public_path)),
            ("port", &remote.port.to_string()),
            ("origin", &js_str(&remote.dev_url())),
            ("name", &js_str(&remote.name)),
            ("expose_key", &js_str(&format!("./{}", remote.exposes))),
            ("expose_path", &js_str(&format!("./src/{}.jsx", remote.exposes))),
        ],
    )
}

/// devDependencies of every vite app
pub const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@module-federation/vite", "^1.1.0"),
    ("@vitejs/plugin-react", "^4.2.1"),
    ("vite", "^5.0.0"),
];

/// npm scripts of a vite app served on `port`
pub fn scripts(port: u16) -> Vec<(&'static str, String)> {
    vec![
        ("dev", "vite".to_string()),
        ("build", "vite build".to_string()),
        ("preview", format!("vite preview --port {}", port)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_remotes_entry() {
        let config = ProjectConfig::new(
            "shop",
            3100,
            vec![RemoteRecord::new("checkout", 3001, "App")],
        );
        let host = host_config(&config);

        assert!(host.contains(
            "        checkout: { type: 'module', name: 'checkout', entry: 'http://localhost:3001/remoteEntry.js' },\n"
        ));
        assert!(host.contains("port: 3100,"));
        assert!(host.contains("import mfConfig from '../../mf.config.json';"));
    }

    #[test]
    fn test_remote_config_uses_own_url() {
        let mut remote = RemoteRecord::new("cart", 3002, "Cart");
        remote.url = "https://cdn.example.com/cart/".to_string();
        let config = remote_config(&remote);

        assert!(config.contains("base: 'https://cdn.example.com/cart/',"));
        assert!(config.contains("origin: 'http://localhost:3002',"));
        assert!(config.contains("name: 'cart',"));
        assert!(config.contains("'./Cart': './src/Cart.jsx',"));
    }
}
