//! Generator configuration.
//!
//! Every option has a default so the generator can run with no arguments
//! from its own directory (`<repo-root>/scripts/<generator>/`).
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SNOWGRANT_REPO_ROOT` | `../..` | Directory module directories are written under |
//! | `SNOWGRANT_REGISTRY` | (embedded) | Registry snapshot to read instead of the built-in catalogue |
//! | `SNOWGRANT_CI_MANIFEST` | `.github/grant-all-modules.txt` | CI manifest, relative to the repo root |
//! | `SNOWGRANT_LOG_LEVEL` | `info` | Log level |
//! | `SNOWGRANT_DRY_RUN` | `false` | Render modules without writing them |

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "snowgrant-gen")]
#[command(about = "Generate Snowflake grant-all Terraform modules")]
pub struct GenConfig {
    /// Repository root; each module is written to `<repo-root>/<module-name>/`.
    #[arg(long, env = "SNOWGRANT_REPO_ROOT", default_value = "../..")]
    pub repo_root: PathBuf,

    /// JSON registry snapshot. Uses the embedded Snowflake catalogue when unset.
    #[arg(long, env = "SNOWGRANT_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// CI manifest path. Relative paths are resolved against the repo root.
    #[arg(
        long,
        env = "SNOWGRANT_CI_MANIFEST",
        default_value = ".github/grant-all-modules.txt"
    )]
    pub ci_manifest: PathBuf,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "SNOWGRANT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Assemble and render every module without writing anything.
    #[arg(long, env = "SNOWGRANT_DRY_RUN", default_value = "false")]
    pub dry_run: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("../.."),
            registry: None,
            ci_manifest: PathBuf::from(".github/grant-all-modules.txt"),
            log_level: "info".to_string(),
            dry_run: false,
        }
    }
}

impl GenConfig {
    /// The CI manifest path with relative paths resolved against the repo root.
    pub fn ci_manifest_path(&self) -> PathBuf {
        if self.ci_manifest.is_absolute() {
            self.ci_manifest.clone()
        } else {
            self.repo_root.join(&self.ci_manifest)
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.repo_root.as_os_str().is_empty() {
            errors.push("Repo root cannot be empty".to_string());
        }

        if self.ci_manifest.as_os_str().is_empty() {
            errors.push("CI manifest path cannot be empty".to_string());
        }

        if let Some(registry) = &self.registry {
            if !registry.is_file() {
                errors.push(format!("Registry {} is not a file", registry.display()));
            }
        }

        if !matches!(
            self.log_level.to_ascii_lowercase().as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            errors.push(format!("Unknown log level: {}", self.log_level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("snowgrant_gen={level},snowgrant_schema={level}"))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
