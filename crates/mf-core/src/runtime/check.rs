//! Node.js toolchain detection

use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// One-line status suitable for a log message
    pub fn describe(&self) -> String {
        match (&self.version, self.available) {
            (Some(version), true) => format!("{} {}", self.name, version),
            (None, true) => format!("{} (version unknown)", self.name),
            (_, false) => format!("{} not found", self.name),
        }
    }
}

/// Run `<binary> --version` and capture its trimmed stdout
fn probe(name: &'static str, binary: &str) -> RuntimeInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: (!version.is_empty()).then_some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", npm_binary())
}

/// npm's executable name on this platform
pub fn npm_binary() -> &'static str {
    if cfg!(windows) {
        "npm.cmd"
    } else {
        "npm"
    }
}

/// Advisory check of the toolchain a generated project needs.
///
/// Never fails; missing tools come back with `available == false` so callers
/// can warn and carry on.
pub fn check_runtimes() -> Vec<RuntimeInfo> {
    vec![check_node(), check_npm()]
}

/// Install hints for every unavailable runtime in `results`
pub fn missing_hints(results: &[RuntimeInfo]) -> Vec<String> {
    results
        .iter()
        .filter(|r| !r.available)
        .map(|r| format!("{} (install from https://nodejs.org)", r.name))
        .collect()
}
