//! YAML configuration describing the pedestrians to generate.
//!
//! Loading happens in two steps. `serde_yaml` deserializes the file into raw
//! structs where every key is optional, so shape errors (a mapping where a
//! scalar belongs, broken YAML) surface as [`ConfigError::Parse`]. The raw
//! record is then converted into [`GeneratorConfig`], reporting the first
//! absent key by its full path as [`ConfigError::MissingField`].
//!
//! ```yaml
//! world: "empty"
//! update_rate: 30
//! social_force:
//!   animation_factor: 5.1
//!   people_distance: 6.0
//!   goal_weight: 2.0
//!   obstacle_weight: 80.0
//!   social_weight: 15
//!   group_gaze_weight: 3.0
//!   group_coh_weight: 2.0
//!   group_rep_weight: 1.0
//! pedestrians:
//!   - name: human_0
//!     pose: "5 -2 1 0 0 1.57"
//!     velocity: 0.9
//!     radius: 0.4
//!     cycle: true
//!     ignore:
//!       model_1: "ground_plane"
//!     trajectory:
//!       goal_point_1: "5 -2 1 0 0 0"
//!       goal_point_2: "5 2 1 0 0 0"
//! ```

use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::{Number, Value};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// A scalar parameter copied verbatim into the generated world.
///
/// Numbers keep the flavour YAML gave them: `30` stays `30`, `1.0` stays `1.0`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(Number),
    Bool(bool),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(Number::from(v))
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Number(Number::from(v))
    }
}

/// Social-force weights shared by every pedestrian in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct SocialForce {
    pub animation_factor: ParamValue,
    pub people_distance: ParamValue,
    pub goal_weight: ParamValue,
    pub obstacle_weight: ParamValue,
    pub social_weight: ParamValue,
    pub group_gaze_weight: ParamValue,
    pub group_coh_weight: ParamValue,
    pub group_rep_weight: ParamValue,
}

impl SocialForce {
    /// All weights with their element names, in the order the plugin reads them.
    pub fn weights(&self) -> [(&'static str, &ParamValue); 8] {
        [
            ("animation_factor", &self.animation_factor),
            ("people_distance", &self.people_distance),
            ("goal_weight", &self.goal_weight),
            ("obstacle_weight", &self.obstacle_weight),
            ("social_weight", &self.social_weight),
            ("group_gaze_weight", &self.group_gaze_weight),
            ("group_coh_weight", &self.group_coh_weight),
            ("group_rep_weight", &self.group_rep_weight),
        ]
    }

    /// Every weight set to the same value.
    pub fn uniform(value: impl Into<ParamValue>) -> Self {
        let v = value.into();
        Self {
            animation_factor: v.clone(),
            people_distance: v.clone(),
            goal_weight: v.clone(),
            obstacle_weight: v.clone(),
            social_weight: v.clone(),
            group_gaze_weight: v.clone(),
            group_coh_weight: v.clone(),
            group_rep_weight: v,
        }
    }
}

/// One pedestrian: initial pose, motion parameters, obstacles to ignore and goal points.
#[derive(Clone, Debug, PartialEq)]
pub struct PedestrianSpec {
    pub name: String,

    /// Six space-separated components: `x y z roll pitch yaw`.
    pub pose: String,

    pub velocity: ParamValue,
    pub radius: ParamValue,
    pub cycle: ParamValue,

    /// Models the social force ignores, in configuration order. The YAML
    /// labels are arbitrary and dropped.
    pub ignore: Vec<String>,

    /// Goal points in visiting order.
    pub trajectory: Vec<String>,
}

/// The complete generator input.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Base world name; resolves to `worlds/<world>.world`.
    pub world: String,
    pub update_rate: ParamValue,
    pub social_force: SocialForce,
    pub pedestrians: Vec<PedestrianSpec>,
}

impl GeneratorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(content)?;
        raw.try_into()
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    world: Option<String>,
    update_rate: Option<ParamValue>,
    social_force: Option<RawSocialForce>,
    pedestrians: Option<Vec<RawPedestrian>>,
}

#[derive(Debug, Deserialize)]
struct RawSocialForce {
    animation_factor: Option<ParamValue>,
    people_distance: Option<ParamValue>,
    goal_weight: Option<ParamValue>,
    obstacle_weight: Option<ParamValue>,
    social_weight: Option<ParamValue>,
    group_gaze_weight: Option<ParamValue>,
    group_coh_weight: Option<ParamValue>,
    group_rep_weight: Option<ParamValue>,
}

#[derive(Debug, Deserialize)]
struct RawPedestrian {
    name: Option<String>,
    pose: Option<String>,
    velocity: Option<ParamValue>,
    radius: Option<ParamValue>,
    cycle: Option<ParamValue>,
    ignore: Option<IndexMap<Value, ParamValue>>,
    trajectory: Option<IndexMap<Value, ParamValue>>,
}

fn require<T>(value: Option<T>, path: impl FnOnce() -> String) -> Result<T, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingField(path()))
}

/// Values of a labelled mapping in document order. Keys stay typed YAML
/// values while parsing, so `2` and `"2"` are two entries.
fn in_order(map: IndexMap<Value, ParamValue>) -> Vec<String> {
    map.into_values().map(|v| v.to_string()).collect()
}

impl TryFrom<RawSocialForce> for SocialForce {
    type Error = ConfigError;

    fn try_from(raw: RawSocialForce) -> Result<Self, Self::Error> {
        let field = |name: &str| format!("social_force.{name}");
        Ok(Self {
            animation_factor: require(raw.animation_factor, || field("animation_factor"))?,
            people_distance: require(raw.people_distance, || field("people_distance"))?,
            goal_weight: require(raw.goal_weight, || field("goal_weight"))?,
            obstacle_weight: require(raw.obstacle_weight, || field("obstacle_weight"))?,
            social_weight: require(raw.social_weight, || field("social_weight"))?,
            group_gaze_weight: require(raw.group_gaze_weight, || field("group_gaze_weight"))?,
            group_coh_weight: require(raw.group_coh_weight, || field("group_coh_weight"))?,
            group_rep_weight: require(raw.group_rep_weight, || field("group_rep_weight"))?,
        })
    }
}

impl RawPedestrian {
    fn into_spec(self, index: usize) -> Result<PedestrianSpec, ConfigError> {
        let field = |name: &str| format!("pedestrians[{index}].{name}");
        Ok(PedestrianSpec {
            name: require(self.name, || field("name"))?,
            pose: require(self.pose, || field("pose"))?,
            velocity: require(self.velocity, || field("velocity"))?,
            radius: require(self.radius, || field("radius"))?,
            cycle: require(self.cycle, || field("cycle"))?,
            ignore: in_order(require(self.ignore, || field("ignore"))?),
            trajectory: in_order(require(self.trajectory, || field("trajectory"))?),
        })
    }
}

impl TryFrom<RawConfig> for GeneratorConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let world = require(raw.world, || "world".into())?;
        let update_rate = require(raw.update_rate, || "update_rate".into())?;
        let social_force: SocialForce =
            require(raw.social_force, || "social_force".into())?.try_into()?;

        let pedestrians = require(raw.pedestrians, || "pedestrians".into())?
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.into_spec(i))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for p in &pedestrians {
            if !seen.insert(p.name.as_str()) {
                return Err(ConfigError::DuplicatePedestrian(p.name.clone()));
            }
        }

        Ok(Self {
            world,
            update_rate,
            social_force,
            pedestrians,
        })
    }
}
