use cgmath::Vector3;
use rdv_rust::app::Session;
use rdv_rust::config::PhysicsSettings;
use rdv_rust::demos::{self, BodyKind, BodySpec, DemoSpec};

fn single_box_demo() -> DemoSpec {
    DemoSpec {
        name: "test-single-box",
        bodies: vec![BodySpec {
            kind: BodyKind::Dynamic { can_sleep: true },
            half_extents: [0.5, 0.5, 0.5],
            hull_from_mesh: false,
            position: [0.0, 10.0, 0.0],
            color: Some([1.0, 0.0, 0.0, 1.0]),
        }],
        joints: vec![],
        kinematic_driver: None,
    }
}

#[test]
fn test_every_builtin_demo_builds() {
    let physics = PhysicsSettings::default();
    for demo in demos::builtin() {
        let session = Session::build(&demo, &physics)
            .unwrap_or_else(|e| panic!("demo '{}' failed to build: {}", demo.name, e));

        assert_eq!(session.entities.len(), demo.bodies.len(), "{}", demo.name);
        // Grid + axes + pointer target, then one node per body.
        assert_eq!(
            session.scene.nodes.len(),
            3 + demo.bodies.len(),
            "{}",
            demo.name
        );
        assert_eq!(
            session.kinematic_driver.is_some(),
            demo.kinematic_driver.is_some(),
            "{}",
            demo.name
        );
    }
}

#[test]
fn test_mesh_transforms_lag_one_step() {
    let mut session = Session::build(&single_box_demo(), &PhysicsSettings::default()).unwrap();
    let record = *session.entities.get(0).unwrap();

    // Before the first tick the node shows its construction-time transform.
    assert_eq!(
        session.scene.node(record.node).transform.translation.y,
        10.0
    );

    // Tick N renders the pose computed by tick N-1's step: the node is
    // synced before the step fires.
    let (pre_step, _) = session.world.body_transform(record.body);
    session.tick();

    let node_y = session.scene.node(record.node).transform.translation.y;
    assert!((node_y - pre_step.y).abs() < 1e-6);

    let (post_step, _) = session.world.body_transform(record.body);
    assert!(post_step.y < pre_step.y, "gravity should pull the body down");

    // The next tick surfaces that stepped pose in the node.
    session.tick();
    let node_y = session.scene.node(record.node).transform.translation.y;
    assert!((node_y - post_step.y).abs() < 1e-6);
}

#[test]
fn test_tick_keeps_scene_append_only() {
    let mut session = Session::build(&single_box_demo(), &PhysicsSettings::default()).unwrap();
    let nodes_before = session.scene.nodes.len();
    for _ in 0..10 {
        session.tick();
    }
    assert_eq!(session.scene.nodes.len(), nodes_before);
    assert_eq!(session.entities.len(), 1);
}

#[test]
fn test_kinematic_driver_follows_pointer_target() {
    let demo = demos::find("kinematic-hinge").unwrap();
    let mut session = Session::build(&demo, &PhysicsSettings::default()).unwrap();
    let driver = session.kinematic_driver.unwrap();

    // The pointer target starts on the driven body.
    let target_node = session.scene.pointer_target;
    assert_eq!(
        session.scene.node(target_node).transform.translation,
        Vector3::new(0.0, 8.0, 0.0)
    );

    // Move the target; after the next tick the body has rigidly assumed the
    // pose, no interpolation.
    let wanted = Vector3::new(3.0, 9.0, 1.0);
    session.scene.node_mut(target_node).transform.translation = wanted;
    session.tick();

    let (pose, _) = session.world.body_transform(driver);
    assert!((pose.x - wanted.x).abs() < 1e-4);
    assert!((pose.y - wanted.y).abs() < 1e-4);
    assert!((pose.z - wanted.z).abs() < 1e-4);
}

#[test]
fn test_box_drop_settles_on_ground() {
    let demo = demos::find("box-drop").unwrap();
    let mut session = Session::build(&demo, &PhysicsSettings::default()).unwrap();
    let first = *session.entities.get(0).unwrap();

    let (start, _) = session.world.body_transform(first.body);

    for _ in 0..600 {
        session.tick();
    }

    let (end, _) = session.world.body_transform(first.body);
    assert!(end.y < start.y, "box should fall");
    // Resting on the ground plane: top of ground at y = 0, half-extent 1.
    assert!((end.y - 1.0).abs() < 0.2, "resting y was {}", end.y);

    // Ground contact produced collision events.
    let collisions = session.events.drain_collisions();
    assert!(!collisions.is_empty());
}

#[test]
fn test_motor_hinge_spins_the_blade() {
    let demo = demos::find("motor-hinge").unwrap();
    let mut session = Session::build(&demo, &PhysicsSettings::default()).unwrap();
    let blade = *session.entities.get(1).unwrap();

    for _ in 0..300 {
        session.tick();
    }

    let angvel = session.world.body_angular_velocity(blade.body);
    assert!(
        angvel.norm() > 0.5,
        "motorized blade should be rotating, angvel {:?}",
        angvel
    );
}
