//! The generation driver.
//!
//! Walks every grant resource in the registry (sorted by resource name),
//! assembles and writes its module, then reconciles the CI manifest. The
//! first failure aborts the run.

use snowgrant_schema::GrantRegistry;
use tracing::info;

use crate::assemble::assemble;
use crate::ci::{CiManifest, ReconcileOutcome};
use crate::error::Result;
use crate::stub::render_test_stub;
use crate::writer::{ModuleWriter, render_module};

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generated module names, in generation order.
    pub modules: Vec<String>,
    /// `None` on a dry run.
    pub manifest: Option<ReconcileOutcome>,
}

#[derive(Debug, Clone)]
pub struct Generator {
    writer: ModuleWriter,
    dry_run: bool,
}

impl Generator {
    pub fn new(writer: ModuleWriter) -> Self {
        Self {
            writer,
            dry_run: false,
        }
    }

    /// Assemble and render every module but write nothing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run<R, M>(&self, registry: &R, manifest: &mut M) -> Result<GenerationReport>
    where
        R: GrantRegistry + ?Sized,
        M: CiManifest + ?Sized,
    {
        let mut grants = registry.grant_resources()?;
        grants.sort_by(|a, b| a.resource_name.cmp(&b.resource_name));
        info!(
            resources = grants.len(),
            root = %self.writer.root().display(),
            dry_run = self.dry_run,
            "Generating grant-all modules"
        );

        let mut modules = Vec::with_capacity(grants.len());
        for grant in &grants {
            let module_name = grant.module_name();
            let doc = assemble(grant)?;

            if self.dry_run {
                let rendered = render_module(&module_name, &doc)?;
                info!(module = %module_name, bytes = rendered.len(), "Rendered module (dry run)");
            } else {
                let stub = render_test_stub(&grant.resource_name);
                let dir = self.writer.write(&module_name, &doc, stub.as_bytes())?;
                info!(module = %module_name, path = %dir.display(), "Wrote module");
            }

            modules.push(module_name);
        }

        let manifest = if self.dry_run {
            None
        } else {
            Some(manifest.reconcile(&modules)?)
        };

        Ok(GenerationReport { modules, manifest })
    }
}
