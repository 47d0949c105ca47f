//! Assembles generated actors into a base world and writes the result.
//!
//! [`PedestrianGenerator::generate`] is all-or-nothing: the complete output is
//! rendered in memory before the destination file is created, so a failure
//! anywhere earlier leaves no file behind.

use crate::actor::{ActorBuilder, ActorConfig};
use crate::config::GeneratorConfig;
use crate::document::WorldDocument;
use crate::error::{DocumentError, GenerateError};
use crate::format::Formatter;
use crate::layout::PackageLayout;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Populates world documents with pedestrian actors.
#[derive(Clone, Debug, Default)]
pub struct PedestrianGenerator {
    builder: ActorBuilder,
    formatter: Formatter,
}

impl PedestrianGenerator {
    pub fn new(actor_config: ActorConfig, formatter: Formatter) -> Self {
        Self {
            builder: ActorBuilder::new(actor_config),
            formatter,
        }
    }

    /// Appends one actor per pedestrian, in configuration order, after the
    /// existing content of the scene root.
    pub fn assemble(
        &self,
        config: &GeneratorConfig,
        mut document: WorldDocument,
    ) -> Result<WorldDocument, DocumentError> {
        let scene = document.scene_root_mut()?;
        if config.pedestrians.is_empty() {
            warn!(world = %config.world, "configuration lists no pedestrians");
        }
        for index in 0..config.pedestrians.len() {
            let Some(actor) = self.builder.build(config, index) else {
                break;
            };
            debug!(index, name = %config.pedestrians[index].name, "built actor");
            scene.push(actor);
        }
        Ok(document)
    }

    /// Serializes `document` with this generator's formatter.
    pub fn render(&self, document: &WorldDocument) -> Result<Vec<u8>, DocumentError> {
        self.formatter.write_document(document)
    }

    /// Loads `base`, adds the configured pedestrians and writes the result to `output`.
    pub fn generate(
        &self,
        config: &GeneratorConfig,
        base: &Path,
        output: &Path,
    ) -> Result<(), GenerateError> {
        info!(base = %base.display(), pedestrians = config.pedestrians.len(), "loading base world");
        let document = WorldDocument::load(base)?;
        let document = self.assemble(config, document)?;
        let bytes = self.render(&document)?;

        std::fs::write(output, bytes).map_err(|source| GenerateError::Write {
            path: output.to_path_buf(),
            source,
        })?;
        info!(output = %output.display(), "wrote world");
        Ok(())
    }

    /// Runs a whole generation for the configuration file `config_file` of a package.
    ///
    /// Returns the path of the written world.
    pub fn run(
        &self,
        layout: &PackageLayout,
        config_file: impl AsRef<Path>,
    ) -> Result<PathBuf, GenerateError> {
        let config_path = layout.config_path(config_file);
        info!(config = %config_path.display(), "loading configuration");
        let config = GeneratorConfig::load(&config_path)?;

        let output = layout.output_path(&config.world);
        self.generate(&config, &layout.world_path(&config.world), &output)?;
        Ok(output)
    }
}
