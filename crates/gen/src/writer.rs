//! Renders module documents and writes them to disk.
//!
//! Each module lives in `<root>/<module-name>/` and holds two files:
//! `main.tf.json` and the test stub. Files are overwritten on every run. If
//! the stub write fails after the configuration was written, the
//! configuration is left in place; rerunning the generator is the recovery
//! path.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{GenerateError, Result};
use crate::module::ModuleDocument;
use crate::stub::TEST_STUB_FILE;

/// File name of the rendered configuration inside a module directory.
pub const MODULE_FILE: &str = "main.tf.json";

/// Renders a module as pretty-printed JSON with a trailing newline.
pub fn render_module(module_name: &str, doc: &ModuleDocument) -> Result<String> {
    let mut rendered =
        serde_json::to_string_pretty(doc).map_err(|source| GenerateError::Serialize {
            module: module_name.to_string(),
            source,
        })?;
    rendered.push('\n');
    Ok(rendered)
}

/// Writes module directories under a root directory.
#[derive(Debug, Clone)]
pub struct ModuleWriter {
    root: PathBuf,
}

impl ModuleWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn module_dir(&self, module_name: &str) -> PathBuf {
        self.root.join(module_name)
    }

    /// Writes one module and returns its directory.
    pub fn write(&self, module_name: &str, doc: &ModuleDocument, test_stub: &[u8]) -> Result<PathBuf> {
        // A serialization failure must not leave an empty module directory.
        let rendered = render_module(module_name, doc)?;

        let dir = self.module_dir(module_name);
        fs::create_dir_all(&dir).map_err(|e| GenerateError::io(&dir, e))?;

        write_file(&dir.join(MODULE_FILE), rendered.as_bytes())?;
        write_file(&dir.join(TEST_STUB_FILE), test_stub)?;

        Ok(dir)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|e| GenerateError::io(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
    Ok(())
}
