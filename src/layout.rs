//! Path conventions of a simulation package.

use std::path::{Path, PathBuf};

/// Locates configs, base worlds and generated worlds under a package root.
///
/// ```text
/// <root>/config/<file>                       user configuration
/// <root>/worlds/<world>.world                base world
/// <root>/worlds/<world>_with_pedestrians.world   generated output
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageLayout {
    root: PathBuf,
}

impl PackageLayout {
    pub const CONFIG_DIR: &'static str = "config";
    pub const WORLDS_DIR: &'static str = "worlds";
    pub const OUTPUT_SUFFIX: &'static str = "_with_pedestrians";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.root.join(Self::CONFIG_DIR).join(file)
    }

    pub fn world_path(&self, world: &str) -> PathBuf {
        self.root
            .join(Self::WORLDS_DIR)
            .join(format!("{world}.world"))
    }

    pub fn output_path(&self, world: &str) -> PathBuf {
        self.root
            .join(Self::WORLDS_DIR)
            .join(format!("{world}{}.world", Self::OUTPUT_SUFFIX))
    }
}
