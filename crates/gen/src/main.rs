//! Grant-all module generator.

use anyhow::Context;
use clap::Parser;
use snowgrant_gen::ci::LineListManifest;
use snowgrant_gen::writer::ModuleWriter;
use snowgrant_gen::{GenConfig, Generator, init_logging};
use snowgrant_schema::JsonRegistry;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = GenConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let registry = match &config.registry {
        Some(path) => JsonRegistry::from_path(path)?,
        None => JsonRegistry::builtin()?,
    };

    let generator = Generator::new(ModuleWriter::new(&config.repo_root)).dry_run(config.dry_run);
    let mut manifest = LineListManifest::new(config.ci_manifest_path());

    let report = generator
        .run(&registry, &mut manifest)
        .context("grant module generation failed")?;

    info!(
        modules = report.modules.len(),
        manifest_added = report.manifest.as_ref().map_or(0, |m| m.added.len()),
        "Generation complete"
    );
    Ok(())
}
