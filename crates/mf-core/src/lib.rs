//! MF Core - Shared library for the Module Federation scaffolding CLIs
//!
//! This library turns a host + remotes topology into a ready-to-run
//! Module Federation workspace, and maintains the generated `mf.config.json`
//! registry afterwards. It backs two binaries: `create-mf-app` (interactive
//! scaffolder) and `mf` (registry mutation).
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Validators, the data model, pure rendering
//!   of the project tree, and the file-backed registry
//! - **Layer 2: Workflow Orchestration** - The [`prompt::Prompter`] seam, the
//!   remote CRUD loop and the scaffolding session, plus the writer
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use mf_core::{render, writer, ProjectConfig, RemoteRecord};
//!
//! let config = ProjectConfig::new(
//!     "shop",
//!     3000,
//!     vec![RemoteRecord::new("checkout", 3001, "App")],
//! );
//! let files = render::render_project(&config);
//! let report = writer::scaffold(&std::env::current_dir()?, &config).await?;
//! ```

pub mod batch;
pub mod mf_config;
pub mod model;
pub mod prompt;
pub mod registry;
pub mod render;
pub mod runtime;
pub mod session;
pub mod validate;
pub mod writer;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use mf_config::{RegistryFile, RegistryFileError};
pub use model::{Bundler, ConfigError, ProjectConfig, RemoteRecord};
pub use prompt::{Prompter, ScriptedPrompter};
pub use registry::RemoteRegistry;
pub use session::{run_session, SessionArgs, SessionOutcome};
pub use writer::{scaffold, ScaffoldError, ScaffoldReport};

#[cfg(feature = "tui")]
pub use tui::run;
