// tests/actor_tree.rs
use pedestrian_world::{
    ActorBuilder, COLLISION_CATALOGUE, Element, GeneratorConfig, ParamValue, PedestrianSpec,
    SocialForce,
};

fn pedestrian(name: &str, pose: &str, goals: &[&str]) -> PedestrianSpec {
    PedestrianSpec {
        name: name.to_string(),
        pose: pose.to_string(),
        velocity: ParamValue::from(0.9),
        radius: ParamValue::from(0.4),
        cycle: ParamValue::Bool(true),
        ignore: vec!["ground_plane".to_string(), "sun".to_string()],
        trajectory: goals.iter().map(|g| g.to_string()).collect(),
    }
}

fn setup() -> (ActorBuilder, GeneratorConfig) {
    let config = GeneratorConfig {
        world: "empty".to_string(),
        update_rate: ParamValue::from(30),
        social_force: SocialForce::uniform(1.0),
        pedestrians: vec![
            pedestrian("human_0", "5 -2 1 0 0 1.57", &["5 -2 1 0 0 0", "5 2 1 0 0 0"]),
            pedestrian(
                "human_1",
                "-5 2 1 0 0 0",
                &["1 1 1 0 0 0", "2 2 1 0 0 0", "3 3 1 0 0 0"],
            ),
        ],
    };
    (ActorBuilder::default(), config)
}

fn child_names(e: &Element) -> Vec<&str> {
    e.elements().map(|c| c.name.as_str()).collect()
}

fn behavior_plugin(actor: &Element) -> &Element {
    actor
        .children_named("plugin")
        .find(|p| p.attribute("name") != Some("pedestrian_visual"))
        .expect("behavior plugin")
}

#[test]
fn test_first_actor_carries_visual_plugin() {
    let (builder, config) = setup();
    let actor = builder.build(&config, 0).expect("actor 0");

    assert_eq!(actor.name, "actor");
    assert_eq!(actor.attribute("name"), Some("human_0"));
    assert_eq!(
        child_names(&actor),
        ["pose", "skin", "animation", "plugin", "plugin"]
    );

    let visual = actor.elements().last().expect("visual plugin");
    assert_eq!(visual.attribute("name"), Some("pedestrian_visual"));
    assert_eq!(visual.attribute("filename"), Some("libPedestrianVisualPlugin.so"));
    assert_eq!(child_names(visual), ["update_rate"]);
    assert_eq!(
        visual.child("update_rate").and_then(Element::text).as_deref(),
        Some("30")
    );
}

#[test]
fn test_other_actors_have_a_single_plugin() {
    let (builder, config) = setup();
    let actor = builder.build(&config, 1).expect("actor 1");

    assert_eq!(child_names(&actor), ["pose", "skin", "animation", "plugin"]);
    let plugin = actor.child("plugin").expect("plugin");
    assert_eq!(plugin.attribute("name"), Some("human_1_plugin"));
    assert_eq!(plugin.attribute("filename"), Some("libPedestrianSFMPlugin.so"));
    assert_eq!(
        actor.child("pose").and_then(Element::text).as_deref(),
        Some("-5 2 1 0 0 0")
    );
}

#[test]
fn test_skin_and_animation() {
    let (builder, config) = setup();
    let actor = builder.build(&config, 1).expect("actor 1");

    let skin = actor.child("skin").expect("skin");
    assert_eq!(child_names(skin), ["filename", "scale"]);
    assert_eq!(skin.child("filename").and_then(Element::text).as_deref(), Some("walk.dae"));

    let animation = actor.child("animation").expect("animation");
    assert_eq!(animation.attribute("name"), Some("walking"));
    assert_eq!(child_names(animation), ["filename", "scale", "interpolate_x"]);
    assert_eq!(
        animation.child("interpolate_x").and_then(Element::text).as_deref(),
        Some("true")
    );
}

#[test]
fn test_collision_catalogue_in_order() {
    let (builder, config) = setup();
    for index in 0..2 {
        let actor = builder.build(&config, index).expect("actor");
        let collisions: Vec<_> = behavior_plugin(&actor).children_named("collision").collect();

        assert_eq!(collisions.len(), COLLISION_CATALOGUE.len());
        for (element, descriptor) in collisions.iter().zip(COLLISION_CATALOGUE.iter()) {
            assert_eq!(element.text().as_deref(), Some(descriptor.name));
            assert!(element.attribute("scale").is_some());
        }

        let with_pose: Vec<_> = collisions
            .iter()
            .filter(|c| c.attribute("pose").is_some())
            .collect();
        assert_eq!(with_pose.len(), 1, "exactly one segment is offset");
        assert_eq!(with_pose[0].text().as_deref(), Some("LowerBack_Spine_collision"));
        assert_eq!(with_pose[0].attribute("pose"), Some("0.05 0 0 0 -0.2 0"));
        assert_eq!(with_pose[0].attribute("scale"), Some("12.0 20.0 5.0"));
        assert_eq!(collisions.last().and_then(|c| c.attribute("pose")), Some("0.05 0 0 0 -0.2 0"));
    }
}

#[test]
fn test_parameter_block_order() {
    let (builder, config) = setup();
    let actor = builder.build(&config, 0).expect("actor 0");
    let plugin = behavior_plugin(&actor);

    let tail: Vec<_> = child_names(plugin)
        .into_iter()
        .skip(COLLISION_CATALOGUE.len())
        .collect();
    assert_eq!(
        tail,
        [
            "velocity",
            "radius",
            "cycle",
            "animation_factor",
            "people_distance",
            "goal_weight",
            "obstacle_weight",
            "social_weight",
            "group_gaze_weight",
            "group_coh_weight",
            "group_rep_weight",
            "ignore_obstacles",
            "trajectory",
        ]
    );
    assert_eq!(plugin.child("velocity").and_then(Element::text).as_deref(), Some("0.9"));
    assert_eq!(plugin.child("cycle").and_then(Element::text).as_deref(), Some("true"));
    assert_eq!(plugin.child("goal_weight").and_then(Element::text).as_deref(), Some("1.0"));

    let ignored: Vec<_> = plugin
        .child("ignore_obstacles")
        .expect("ignore list")
        .children_named("model")
        .filter_map(Element::text)
        .collect();
    assert_eq!(ignored, ["ground_plane", "sun"]);
}

#[test]
fn test_trajectory_follows_configuration_order() {
    let (builder, config) = setup();
    let actor = builder.build(&config, 1).expect("actor 1");
    let goals: Vec<_> = behavior_plugin(&actor)
        .child("trajectory")
        .expect("trajectory")
        .children_named("goalpoint")
        .filter_map(Element::text)
        .collect();

    assert_eq!(goals, ["1 1 1 0 0 0", "2 2 1 0 0 0", "3 3 1 0 0 0"]);
}

#[test]
fn test_out_of_range_index() {
    let (builder, config) = setup();
    assert!(builder.build(&config, 2).is_none());
}
