//! Declarative demo definitions.
//!
//! Each demo is a list of body and joint specifications consumed by one
//! shared setup path in `app::Session`, instead of a hand-written scene per
//! variant.

/// How a body participates in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Immovable.
    Fixed,
    /// Fully simulated.
    Dynamic { can_sleep: bool },
    /// Pose driven externally, affects others.
    Kinematic { can_sleep: bool },
}

/// One box-shaped body.
#[derive(Debug, Clone)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub half_extents: [f32; 3],
    /// Build the collider as a convex hull of the render mesh's vertices
    /// instead of the analytic cuboid.
    pub hull_from_mesh: bool,
    pub position: [f32; 3],
    /// RGBA; `None` picks a random color at setup time.
    pub color: Option<[f32; 4]>,
}

#[derive(Debug, Clone, Copy)]
pub struct MotorSpec {
    /// Target angular velocity in rad/s.
    pub target_velocity: f32,
    /// Force bound for the motor.
    pub max_force: f32,
}

/// A revolute joint between two bodies of the demo, by body index.
#[derive(Debug, Clone)]
pub struct JointSpec {
    pub body_a: usize,
    pub body_b: usize,
    /// Anchor in body A's local frame.
    pub anchor_a: [f32; 3],
    /// Anchor in body B's local frame.
    pub anchor_b: [f32; 3],
    pub axis: [f32; 3],
    pub motor: Option<MotorSpec>,
    pub contacts_enabled: bool,
    pub wake_up: bool,
}

/// A complete demo description.
#[derive(Debug, Clone)]
pub struct DemoSpec {
    pub name: &'static str,
    pub bodies: Vec<BodySpec>,
    pub joints: Vec<JointSpec>,
    /// Index of the body driven by the pointer target each tick.
    pub kinematic_driver: Option<usize>,
}

/// A fixed pillar carrying a motor-driven swinging blade.
fn motor_hinge() -> DemoSpec {
    DemoSpec {
        name: "motor-hinge",
        bodies: vec![
            BodySpec {
                kind: BodyKind::Fixed,
                half_extents: [2.0, 6.0, 0.5],
                hull_from_mesh: false,
                position: [0.0, 10.0, 0.0],
                color: None,
            },
            BodySpec {
                kind: BodyKind::Dynamic { can_sleep: true },
                half_extents: [2.0, 6.0, 0.5],
                hull_from_mesh: false,
                position: [0.0, 10.0, 0.0],
                color: None,
            },
        ],
        joints: vec![JointSpec {
            body_a: 0,
            body_b: 1,
            anchor_a: [0.0, 0.0, 0.0],
            anchor_b: [0.0, 2.0, -3.0],
            axis: [0.0, 0.0, 1.0],
            motor: Some(MotorSpec {
                target_velocity: std::f32::consts::TAU,
                max_force: 1000.0,
            }),
            contacts_enabled: true,
            wake_up: true,
        }],
        kinematic_driver: None,
    }
}

/// A kinematic paddle moved with the gizmo, with a dynamic follower hinged
/// to it. Contacts between the pair are off so the follower swings through
/// the paddle freely.
fn kinematic_hinge() -> DemoSpec {
    DemoSpec {
        name: "kinematic-hinge",
        bodies: vec![
            BodySpec {
                kind: BodyKind::Kinematic { can_sleep: false },
                half_extents: [1.0, 1.0, 1.0],
                hull_from_mesh: false,
                position: [0.0, 8.0, 0.0],
                color: None,
            },
            BodySpec {
                kind: BodyKind::Dynamic { can_sleep: false },
                half_extents: [0.5, 3.0, 0.5],
                hull_from_mesh: false,
                position: [0.0, 4.0, 0.0],
                color: None,
            },
        ],
        joints: vec![JointSpec {
            body_a: 0,
            body_b: 1,
            anchor_a: [0.0, -1.0, 0.0],
            anchor_b: [0.0, 3.0, 0.0],
            axis: [0.0, 0.0, 1.0],
            motor: None,
            contacts_enabled: false,
            wake_up: true,
        }],
        kinematic_driver: Some(0),
    }
}

/// Boxes dropped onto the ground plane; one collides via a convex hull of
/// its mesh geometry.
fn box_drop() -> DemoSpec {
    DemoSpec {
        name: "box-drop",
        bodies: vec![
            BodySpec {
                kind: BodyKind::Dynamic { can_sleep: true },
                half_extents: [1.0, 1.0, 1.0],
                hull_from_mesh: false,
                position: [0.0, 10.0, 0.0],
                color: None,
            },
            BodySpec {
                kind: BodyKind::Dynamic { can_sleep: true },
                half_extents: [1.5, 0.75, 1.0],
                hull_from_mesh: true,
                position: [0.5, 14.0, 0.25],
                color: None,
            },
        ],
        joints: vec![],
        kinematic_driver: None,
    }
}

/// All demos shipped with the viewer.
pub fn builtin() -> Vec<DemoSpec> {
    vec![motor_hinge(), kinematic_hinge(), box_drop()]
}

/// Look up a demo by name.
pub fn find(name: &str) -> Option<DemoSpec> {
    builtin().into_iter().find(|demo| demo.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_demos_are_well_formed() {
        for demo in builtin() {
            for joint in &demo.joints {
                assert!(joint.body_a < demo.bodies.len(), "{}", demo.name);
                assert!(joint.body_b < demo.bodies.len(), "{}", demo.name);
            }
            if let Some(driver) = demo.kinematic_driver {
                assert!(driver < demo.bodies.len(), "{}", demo.name);
                assert!(
                    matches!(demo.bodies[driver].kind, BodyKind::Kinematic { .. }),
                    "{}: driver must be kinematic",
                    demo.name
                );
            }
        }
    }

    #[test]
    fn test_find_by_name() {
        assert!(find("motor-hinge").is_some());
        assert!(find("kinematic-hinge").is_some());
        assert!(find("box-drop").is_some());
        assert!(find("no-such-demo").is_none());
    }
}
