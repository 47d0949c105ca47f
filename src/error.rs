//! Error types for configuration loading, world documents and generation runs.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or interpreting the YAML configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A required key is absent (or null). Carries the dotted path, e.g. `pedestrians[1].radius`.
    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("duplicate pedestrian name `{0}`")]
    DuplicatePedestrian(String),
}

/// Failures while reading, locating or serializing a world document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read world {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("document has no `{0}` element")]
    MissingSceneRoot(&'static str),

    #[error("cannot serialize document: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
