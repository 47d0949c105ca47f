//! Builds the `<actor>` sub-tree for one configured pedestrian.
//!
//! The entry point is [`ActorBuilder`]. Configure it with an [`ActorConfig`]
//! (asset and plugin names; the defaults match the social-force plugin
//! package) and call [`ActorBuilder::build`] once per pedestrian index.

use crate::catalogue::collision_elements;
use crate::config::{GeneratorConfig, PedestrianSpec};
use crate::element::{Element, element};

/// Asset and plugin names written into every actor.
#[derive(Clone, Debug)]
pub struct ActorConfig {
    /// Mesh used for both the skin and the walking animation.
    pub skin_filename: String,
    /// Scale applied to skin and animation.
    pub skin_scale: String,
    pub animation_name: String,
    pub interpolate_x: bool,
    /// Shared object implementing the per-pedestrian social-force behavior.
    pub behavior_plugin: String,
    /// Appended to the pedestrian name to name its behavior plugin.
    pub behavior_plugin_suffix: String,
    pub visual_plugin_name: String,
    /// Shared object that renders all pedestrians; attached to the first actor only.
    pub visual_plugin: String,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            skin_filename: "walk.dae".to_string(),
            skin_scale: "1.0".to_string(),
            animation_name: "walking".to_string(),
            interpolate_x: true,
            behavior_plugin: "libPedestrianSFMPlugin.so".to_string(),
            behavior_plugin_suffix: "_plugin".to_string(),
            visual_plugin_name: "pedestrian_visual".to_string(),
            visual_plugin: "libPedestrianVisualPlugin.so".to_string(),
        }
    }
}

/// Turns pedestrian records into `<actor>` elements.
#[derive(Clone, Debug, Default)]
pub struct ActorBuilder {
    config: ActorConfig,
}

impl ActorBuilder {
    pub fn new(config: ActorConfig) -> Self {
        Self { config }
    }

    /// Builds the actor for `config.pedestrians[index]`, or `None` if `index` is out of range.
    ///
    /// Children, in order: `pose`, `skin`, `animation`, the behavior `plugin`
    /// and, for index 0 only, the shared visual `plugin`. The tree carries no
    /// layout whitespace; [`crate::Formatter`] indents it on output.
    pub fn build(&self, config: &GeneratorConfig, index: usize) -> Option<Element> {
        let pedestrian = config.pedestrians.get(index)?;

        let mut actor = element("actor", None, &[("name", pedestrian.name.as_str())])
            .with_child(element("pose", Some(pedestrian.pose.as_str()), &[]))
            .with_child(self.skin())
            .with_child(self.animation())
            .with_child(self.behavior_plugin(config, pedestrian));

        if index == 0 {
            actor.push(self.visual_plugin(config));
        }
        Some(actor)
    }

    fn skin(&self) -> Element {
        Element::new("skin")
            .with_child(element("filename", Some(self.config.skin_filename.as_str()), &[]))
            .with_child(element("scale", Some(self.config.skin_scale.as_str()), &[]))
    }

    fn animation(&self) -> Element {
        let interpolate = if self.config.interpolate_x { "true" } else { "false" };
        element("animation", None, &[("name", self.config.animation_name.as_str())])
            .with_child(element("filename", Some(self.config.skin_filename.as_str()), &[]))
            .with_child(element("scale", Some(self.config.skin_scale.as_str()), &[]))
            .with_child(element("interpolate_x", Some(interpolate), &[]))
    }

    fn behavior_plugin(&self, config: &GeneratorConfig, pedestrian: &PedestrianSpec) -> Element {
        let name = format!("{}{}", pedestrian.name, self.config.behavior_plugin_suffix);
        let mut plugin = element(
            "plugin",
            None,
            &[("name", name.as_str()), ("filename", self.config.behavior_plugin.as_str())],
        );

        for collision in collision_elements() {
            plugin.push(collision);
        }

        let params = [
            ("velocity", &pedestrian.velocity),
            ("radius", &pedestrian.radius),
            ("cycle", &pedestrian.cycle),
        ];
        for (key, value) in params.into_iter().chain(config.social_force.weights()) {
            plugin.push(element(key, Some(value.to_string().as_str()), &[]));
        }

        let mut ignore = Element::new("ignore_obstacles");
        for model in &pedestrian.ignore {
            ignore.push(element("model", Some(model.as_str()), &[]));
        }
        plugin.push(ignore);

        let mut trajectory = Element::new("trajectory");
        for goal in &pedestrian.trajectory {
            trajectory.push(element("goalpoint", Some(goal.as_str()), &[]));
        }
        plugin.push(trajectory);

        plugin
    }

    fn visual_plugin(&self, config: &GeneratorConfig) -> Element {
        element(
            "plugin",
            None,
            &[
                ("name", self.config.visual_plugin_name.as_str()),
                ("filename", self.config.visual_plugin.as_str()),
            ],
        )
        .with_child(element(
            "update_rate",
            Some(config.update_rate.to_string().as_str()),
            &[],
        ))
    }
}
