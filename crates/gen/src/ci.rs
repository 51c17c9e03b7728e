//! Keeps the CI manifest in step with the generated modules.
//!
//! The manifest lists every module CI should test. Names are only ever added;
//! a module that stops being generated has to be removed by hand together
//! with its directory.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{GenerateError, Result};

/// What a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Module names that were not listed before, sorted.
    pub added: Vec<String>,
    /// Whether the manifest had to be rewritten.
    pub changed: bool,
}

/// A CI manifest that generated module names are merged into.
pub trait CiManifest {
    fn reconcile(&mut self, modules: &[String]) -> Result<ReconcileOutcome>;
}

/// A manifest stored as a text file with one module name per line.
///
/// Existing lines, comments and blank lines included, are never touched;
/// missing module names are appended at the end in sorted order.
#[derive(Debug, Clone)]
pub struct LineListManifest {
    path: PathBuf,
}

impl LineListManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(GenerateError::io(&self.path, e)),
        }
    }
}

impl CiManifest for LineListManifest {
    fn reconcile(&mut self, modules: &[String]) -> Result<ReconcileOutcome> {
        let existing = self.read()?;

        let listed: BTreeSet<&str> = existing
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();

        let added: BTreeSet<&str> = modules
            .iter()
            .map(String::as_str)
            .filter(|m| !listed.contains(m))
            .collect();

        if added.is_empty() {
            return Ok(ReconcileOutcome::default());
        }

        let mut rendered = existing.clone();
        if !rendered.is_empty() && !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        for name in &added {
            rendered.push_str(name);
            rendered.push('\n');
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
        }
        fs::write(&self.path, &rendered).map_err(|e| GenerateError::io(&self.path, e))?;
        info!(path = %self.path.display(), added = added.len(), "Updated CI manifest");

        Ok(ReconcileOutcome {
            added: added.into_iter().map(str::to_string).collect(),
            changed: true,
        })
    }
}
