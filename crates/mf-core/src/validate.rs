//! Input validators shared by interactive capture and batch loading
//!
//! Every validator is total: it returns `Ok(())` when the input is accepted and
//! `Err(reason)` with a human-readable message otherwise. None of them panic,
//! whatever the input (empty strings, control characters, non-ASCII).

use url::Url;

/// Lowest port a dev server may bind to (below are privileged ports)
pub const MIN_PORT: u16 = 1024;

/// Highest valid TCP port
pub const MAX_PORT: u16 = 65535;

/// Remote names taken by the generated host app (compared case-insensitively)
pub const RESERVED_REMOTE_NAMES: &[&str] = &["host"];

/// Whether `name` collides with the host app's scope and directory
pub fn is_reserved_remote_name(name: &str) -> bool {
    RESERVED_REMOTE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// Validate a project (directory / package) name
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_';
    if !name.chars().all(allowed) {
        return Err("Use only lowercase letters, numbers, hyphens or underscores".to_string());
    }
    Ok(())
}

/// Validate a remote name (Module Federation scope, workspace dir, import prefix)
pub fn validate_remote_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Remote name cannot be empty".to_string());
    }
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(
            "Must start with a letter and contain only letters, numbers or underscores"
                .to_string(),
        );
    }
    if is_reserved_remote_name(name) {
        return Err(format!("\"{}\" is reserved for the host app", name));
    }
    Ok(())
}

/// Validate an absolute URL
pub fn validate_url(url: &str) -> Result<(), String> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|_| "Please enter a valid URL (e.g. http://localhost:3001)".to_string())
}

/// Parse a dev-server port, rejecting anything outside [1024, 65535]
pub fn parse_port(port: &str) -> Result<u16, String> {
    const REASON: &str = "Port must be a number between 1024 and 65535";
    let value: u32 = port.trim().parse().map_err(|_| REASON.to_string())?;
    if value < MIN_PORT as u32 || value > MAX_PORT as u32 {
        return Err(REASON.to_string());
    }
    Ok(value as u16)
}

/// Validate a dev-server port given as text
pub fn validate_port(port: &str) -> Result<(), String> {
    parse_port(port).map(|_| ())
}

/// Validate the name of the component a remote exposes.
///
/// The value becomes a file name (`src/{exposes}.jsx`) and a JS binding, so
/// it must be a plain identifier.
pub fn validate_exposes(exposes: &str) -> Result<(), String> {
    if exposes.trim().is_empty() {
        return Err("Exposed component name is required".to_string());
    }
    let mut chars = exposes.chars();
    let ident_start = |c: char| c.is_ascii_alphabetic() || c == '_' || c == '$';
    let valid = chars.next().is_some_and(ident_start)
        && chars.all(|c| ident_start(c) || c.is_ascii_digit());
    if !valid {
        return Err(
            "Must be a component identifier: letters, numbers, _ or $, not starting with a number"
                .to_string(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOSTILE_INPUTS: &[&str] = &[
        "",
        " ",
        "\t\n",
        "\0",
        "\u{7f}abc",
        "a\u{1b}[31mred",
        "ñandú",
        "🚀",
        "99999999999999999999999999",
        "-1",
        "http://",
    ];

    #[test]
    fn test_validators_are_total() {
        for input in HOSTILE_INPUTS {
            // Each call must return a verdict without panicking
            let _ = validate_project_name(input);
            let _ = validate_remote_name(input);
            let _ = validate_url(input);
            let _ = validate_port(input);
            let _ = validate_exposes(input);
        }
    }

    #[test]
    fn test_project_name() {
        assert!(validate_project_name("shop").is_ok());
        assert!(validate_project_name("my-mf_app2").is_ok());
        assert!(validate_project_name("").is_err());
        assert!(validate_project_name("   ").is_err());
        assert!(validate_project_name("Shop").is_err());
        assert!(validate_project_name("my app").is_err());
        assert!(validate_project_name("shop/../x").is_err());
    }

    #[test]
    fn test_remote_name() {
        assert!(validate_remote_name("checkout").is_ok());
        assert!(validate_remote_name("Cart_2").is_ok());
        assert!(validate_remote_name("").is_err());
        assert!(validate_remote_name("2cart").is_err());
        assert!(validate_remote_name("_cart").is_err());
        assert!(validate_remote_name("my-cart").is_err());
        assert!(validate_remote_name("cart ").is_err());
    }

    #[test]
    fn test_url() {
        assert!(validate_url("http://localhost:3001").is_ok());
        assert!(validate_url("https://cdn.example.com/checkout").is_ok());
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("/relative/path").is_err());
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_port_bounds() {
        assert_eq!(parse_port("1024"), Ok(1024));
        assert_eq!(parse_port("65535"), Ok(65535));
        assert_eq!(parse_port(" 3001 "), Ok(3001));
        assert!(parse_port("1023").is_err());
        assert!(parse_port("65536").is_err());
        assert!(parse_port("abc").is_err());
        assert!(parse_port("").is_err());
        assert!(validate_port("80").is_err());
    }

    #[test]
    fn test_exposes() {
        assert!(validate_exposes("App").is_ok());
        assert!(validate_exposes("  ").is_err());
        assert!(validate_exposes("").is_err());
        assert!(validate_exposes("$Widget_2").is_ok());
        assert!(validate_exposes("../../../../escaped").is_err());
        assert!(validate_exposes("components/App").is_err());
        assert!(validate_exposes("My Comp").is_err());
        assert!(validate_exposes("2App").is_err());
    }

    #[test]
    fn test_host_is_reserved() {
        for name in ["host", "HOST", "Host"] {
            let reason = validate_remote_name(name).unwrap_err();
            assert!(reason.contains("reserved"), "{}", reason);
        }
        assert!(validate_remote_name("hostess").is_ok());
        assert!(validate_remote_name("host_2").is_ok());
    }
}
