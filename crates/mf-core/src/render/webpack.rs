//! Webpack 5 ModuleFederationPlugin configs

use super::{fill, js_str};
use crate::model::{ProjectConfig, RemoteRecord};

const HOST_CONFIG: &str = include_str!("../../templates/webpack/host.config.js");
const REMOTE_CONFIG: &str = include_str!("../../templates/webpack/remote.config.js");
const ASYNC_ENTRY: &str = include_str!("../../templates/webpack/index.js");

/// `name: 'name@url/remoteEntry.js',` lines for the host's `remotes` map
pub fn remotes_block(remotes: &[RemoteRecord]) -> String {
    remotes
        .iter()
        .map(|r| {
            format!(
                "        {}: {},\n",
                r.name,
                js_str(&format!("{}@{}", r.name, r.remote_entry_url()))
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
            ("name", &js_str(&remote.name)),
            ("expose_key", &js_str(&format!("./{}", remote.exposes))),
            ("expose_path", &js_str(&format!("./src/{}.jsx", remote.exposes))),
        ],
    )
}

/// `src/index.js` deferring to `module` behind a dynamic import
pub fn async_entry(module: &str) -> String {
    fill(ASYNC_ENTRY, &[("bootstrap", module)])
}

/// devDependencies of every webpack app
pub const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@babel/core", "^7.23.0"),
    ("@babel/preset-react", "^7.23.0"),
    ("babel-loader", "^9.1.3"),
    ("css-loader", "^6.8.1"),
    ("html-webpack-plugin", "^5.5.3"),
    ("style-loader", "^3.3.3"),
    ("webpack", "^5.89.0"),
    ("webpack-cli", "^5.1.4"),
    ("webpack-dev-server", "^4.15.1"),
];

/// npm scripts of every webpack app
pub fn scripts() -> Vec<(&'static str, String)> {
    vec![
        ("dev", "webpack serve --mode development".to_string()),
        ("build", "webpack --mode production".to_string()),
        ("start", "webpack serve --mode production".to_string()),
    ]
}
