//! # pedestrian-world
//!
//! Populates Gazebo world files with social-force pedestrians.
//!
//! A YAML [`GeneratorConfig`] describes the pedestrians: their pose, walking
//! parameters, obstacles to ignore and goal points. For each one an `<actor>`
//! is built by [`ActorBuilder`] and appended to the `<world>` element of a base
//! [`WorldDocument`]. The result is written back by [`Formatter`] as indented,
//! human-readable SDF with the rest of the base world left untouched.

pub mod actor;
pub mod catalogue;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod format;
pub mod generator;
pub mod layout;

pub use actor::*;
pub use catalogue::*;
pub use config::*;
pub use document::*;
pub use element::*;
pub use error::*;
pub use format::*;
pub use generator::*;
pub use layout::*;
