//! The fixed collision catalogue attached to every pedestrian's behavior plugin.
//!
//! Each entry names a skeleton segment of the `walk.dae` skin and scales the
//! collision box the plugin wraps around it. The table is the same for every
//! actor and is not configurable.

use crate::element::{Element, element};
use glam::Vec3;

/// Offset of a collision box relative to its segment: translation plus roll/pitch/yaw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentPose {
    pub translation: Vec3,
    pub rotation: Vec3,
}

impl SegmentPose {
    /// Six space-separated components, integral values without a decimal point.
    pub fn to_attribute(&self) -> String {
        let t = self.translation;
        let r = self.rotation;
        format!("{} {} {} {} {} {}", t.x, t.y, t.z, r.x, r.y, r.z)
    }
}

/// One named body-segment collision shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionDescriptor {
    /// Segment name, `<From>_<To>_collision`.
    pub name: &'static str,
    pub scale: Vec3,
    pub pose: Option<SegmentPose>,
}

impl CollisionDescriptor {
    const fn new(name: &'static str, x: f32, y: f32, z: f32) -> Self {
        Self {
            name,
            scale: Vec3::new(x, y, z),
            pose: None,
        }
    }

    const fn with_pose(mut self, translation: Vec3, rotation: Vec3) -> Self {
        self.pose = Some(SegmentPose {
            translation,
            rotation,
        });
        self
    }

    /// Three space-separated reals, always with a decimal point (`8.0 8.0 1.0`).
    pub fn scale_attribute(&self) -> String {
        let s = self.scale;
        format!("{} {} {}", real(s.x), real(s.y), real(s.z))
    }

    /// Renders this descriptor as a `<collision>` element.
    pub fn to_element(&self) -> Element {
        let scale = self.scale_attribute();
        match self.pose {
            Some(pose) => {
                let pose = pose.to_attribute();
                element(
                    "collision",
                    Some(self.name),
                    &[("scale", scale.as_str()), ("pose", pose.as_str())],
                )
            }
            None => element("collision", Some(self.name), &[("scale", scale.as_str())]),
        }
    }
}

fn real(v: f32) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

/// Every collision segment, in the order the plugin expects them.
///
/// Only the lower back carries a pose offset; the box is pushed forward and
/// pitched to follow the spine.
pub static COLLISION_CATALOGUE: [CollisionDescriptor; 20] = [
    CollisionDescriptor::new("LHipJoint_LeftUpLeg_collision", 0.01, 0.001, 0.001),
    CollisionDescriptor::new("LeftUpLeg_LeftLeg_collision", 8.0, 8.0, 1.0),
    CollisionDescriptor::new("LeftLeg_LeftFoot_collision", 10.0, 10.0, 1.5),
    CollisionDescriptor::new("LeftFoot_LeftToeBase_collision", 4.0, 4.0, 1.5),
    CollisionDescriptor::new("RHipJoint_RightUpLeg_collision", 0.01, 0.001, 0.001),
    CollisionDescriptor::new("RightUpLeg_RightLeg_collision", 8.0, 8.0, 1.0),
    CollisionDescriptor::new("RightLeg_RightFoot_collision", 10.0, 10.0, 1.5),
    CollisionDescriptor::new("RightFoot_RightToeBase_collision", 4.0, 4.0, 1.5),
    CollisionDescriptor::new("Spine_Spine1_collision", 0.01, 0.001, 0.001),
    CollisionDescriptor::new("Neck_Neck1_collision", 0.01, 0.001, 0.001),
    CollisionDescriptor::new("Neck1_Head_collision", 5.0, 5.0, 3.0),
    CollisionDescriptor::new("LeftShoulder_LeftArm_collision", 0.01, 0.001, 0.001),
    CollisionDescriptor::new("LeftArm_LeftForeArm_collision", 5.0, 5.0, 1.0),
    CollisionDescriptor::new("LeftForeArm_LeftHand_collision", 5.0, 5.0, 1.0),
    CollisionDescriptor::new("LeftFingerBase_LeftHandIndex1_collision", 4.0, 4.0, 3.0),
    CollisionDescriptor::new("RightShoulder_RightArm_collision", 0.01, 0.001, 0.001),
    CollisionDescriptor::new("RightArm_RightForeArm_collision", 5.0, 5.0, 1.0),
    CollisionDescriptor::new("RightForeArm_RightHand_collision", 5.0, 5.0, 1.0),
    CollisionDescriptor::new("RightFingerBase_RightHandIndex1_collision", 4.0, 4.0, 3.0),
    CollisionDescriptor::new("LowerBack_Spine_collision", 12.0, 20.0, 5.0).with_pose(
        Vec3::new(0.05, 0.0, 0.0),
        Vec3::new(0.0, -0.2, 0.0),
    ),
];

/// The catalogue rendered as `<collision>` elements, in catalogue order.
///
/// Every behavior plugin receives this same sequence.
pub fn collision_elements() -> impl Iterator<Item = Element> {
    COLLISION_CATALOGUE.iter().map(CollisionDescriptor::to_element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_keeps_decimal_point() {
        assert_eq!(COLLISION_CATALOGUE[1].scale_attribute(), "8.0 8.0 1.0");
        assert_eq!(COLLISION_CATALOGUE[0].scale_attribute(), "0.01 0.001 0.001");
        assert_eq!(COLLISION_CATALOGUE[2].scale_attribute(), "10.0 10.0 1.5");
    }

    #[test]
    fn lower_back_pose_is_compact() {
        let last = COLLISION_CATALOGUE.last().expect("non-empty catalogue");
        let pose = last.pose.expect("lower back has a pose offset");
        assert_eq!(pose.to_attribute(), "0.05 0 0 0 -0.2 0");
    }

    #[test]
    fn pose_attribute_follows_scale() {
        let e = COLLISION_CATALOGUE[19].to_element();
        let keys: Vec<_> = e.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["scale", "pose"]);
        assert_eq!(e.text().as_deref(), Some("LowerBack_Spine_collision"));
    }
}
