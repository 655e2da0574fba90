//! The session: one demo's world, scene, and entity registry, plus the
//! per-tick update that links them.
//!
//! All of this is window-independent, so a session can be built and ticked
//! headless.

use nalgebra::{Point3, UnitVector3, Vector3};
use rand::Rng;
use rapier3d::dynamics::RigidBodyHandle;
use rapier3d::geometry::ColliderHandle;
use tracing::info;

use crate::config::PhysicsSettings;
use crate::demos::{BodyKind, DemoSpec};
use crate::scene::{geometry, Scene, Transform};
use crate::utils::math::{
    isometry_from_translation, to_physics_quat, to_physics_vec, to_render_quat, to_render_vec,
};
use crate::world::{EntityRecord, EntityRegistry, EventQueue, PhysicsWorld, ShapeDesc, WorldError};

/// Ground plane dimensions, shared by every demo.
pub const GROUND_SIZE: f32 = 200.1;
pub const GROUND_HEIGHT: f32 = 0.1;

/// Explicit context object owning everything a running demo needs.
pub struct Session {
    pub scene: Scene,
    pub world: PhysicsWorld,
    pub events: EventQueue,
    pub entities: EntityRegistry,
    /// Body whose next kinematic pose is taken from the pointer target.
    pub kinematic_driver: Option<RigidBodyHandle>,
    ground_collider: ColliderHandle,
}

impl Session {
    /// Build the world, scene, and registry from a demo spec.
    pub fn build(demo: &DemoSpec, physics: &PhysicsSettings) -> Result<Self, WorldError> {
        let mut scene = Scene::new();
        let mut world = PhysicsWorld::new(physics);
        let mut entities = EntityRegistry::new();
        let mut rng = rand::rng();

        let ground_body =
            world.create_static_body(isometry_from_translation([0.0, -GROUND_HEIGHT, 0.0]));
        let ground_collider = world.attach_collider(
            ground_body,
            ShapeDesc::Cuboid {
                half_extents: [GROUND_SIZE, GROUND_HEIGHT, GROUND_SIZE],
            },
        )?;

        let mut handles = Vec::with_capacity(demo.bodies.len());
        for spec in &demo.bodies {
            let pose = isometry_from_translation(spec.position);
            let body = match spec.kind {
                BodyKind::Fixed => world.create_static_body(pose),
                BodyKind::Dynamic { can_sleep } => world.create_dynamic_body(pose, can_sleep),
                BodyKind::Kinematic { can_sleep } => world.create_kinematic_body(pose, can_sleep),
            };

            let shape = if spec.hull_from_mesh {
                let (vertices, _) = geometry::box_mesh(spec.half_extents);
                ShapeDesc::ConvexHull {
                    points: vertices
                        .iter()
                        .map(|v| Point3::new(v.position[0], v.position[1], v.position[2]))
                        .collect(),
                }
            } else {
                ShapeDesc::Cuboid {
                    half_extents: spec.half_extents,
                }
            };
            let collider = world.attach_collider(body, shape)?;

            let color = spec
                .color
                .unwrap_or_else(|| [rng.random(), rng.random(), rng.random(), 1.0]);
            let node = scene.add_box(
                spec.half_extents,
                Transform::from_translation(spec.position.into()),
                color,
            );

            entities.push(EntityRecord {
                body,
                collider,
                node,
            });
            handles.push(body);
        }

        for joint in &demo.joints {
            let body_a = *handles
                .get(joint.body_a)
                .ok_or(WorldError::UnknownBody(joint.body_a))?;
            let body_b = *handles
                .get(joint.body_b)
                .ok_or(WorldError::UnknownBody(joint.body_b))?;

            let handle = world.create_revolute_joint(
                Point3::new(joint.anchor_a[0], joint.anchor_a[1], joint.anchor_a[2]),
                Point3::new(joint.anchor_b[0], joint.anchor_b[1], joint.anchor_b[2]),
                UnitVector3::new_normalize(Vector3::new(
                    joint.axis[0],
                    joint.axis[1],
                    joint.axis[2],
                )),
                body_a,
                body_b,
                joint.wake_up,
            );
            if let Some(motor) = joint.motor {
                world.configure_motor_velocity(handle, motor.target_velocity, motor.max_force);
            }
            if !joint.contacts_enabled {
                world.set_joint_contacts_enabled(handle, false);
            }
        }

        let kinematic_driver = match demo.kinematic_driver {
            Some(index) => {
                let spec = demo
                    .bodies
                    .get(index)
                    .ok_or(WorldError::UnknownBody(index))?;
                if !matches!(spec.kind, BodyKind::Kinematic { .. }) {
                    return Err(WorldError::NotKinematic(index));
                }
                // Start the gizmo on the driven body.
                let target = scene.pointer_target;
                scene.node_mut(target).transform.translation = spec.position.into();
                Some(handles[index])
            }
            None => None,
        };

        info!(
            "Session built: {} bodies, {} joints, kinematic driver: {}",
            entities.len(),
            demo.joints.len(),
            kinematic_driver.is_some()
        );

        Ok(Self {
            scene,
            world,
            events: EventQueue::new(),
            entities,
            kinematic_driver,
            ground_collider,
        })
    }

    /// One frame-loop tick. Order matters and is deliberate:
    /// 1. queue the pointer target as the driven body's next kinematic pose,
    /// 2. copy body poses into scene nodes,
    /// 3. step the world.
    /// Nodes rendered after a tick therefore show the poses computed by the
    /// previous tick's step, while a driven kinematic body picks up its
    /// queued pose within the step that follows.
    pub fn tick(&mut self) {
        if let Some(body) = self.kinematic_driver {
            let target = self.scene.node(self.scene.pointer_target).transform;
            self.world.set_next_kinematic_transform(
                body,
                to_physics_vec(&target.translation),
                to_physics_quat(&target.rotation),
            );
        }

        for record in self.entities.iter() {
            let (translation, rotation) = self.world.body_transform(record.body);
            let node = self.scene.node_mut(record.node);
            node.transform.translation = to_render_vec(&translation);
            node.transform.rotation = to_render_quat(&rotation);
        }

        self.world.step(&mut self.events);
    }

    /// Debug action: advance the physics world one step without touching the
    /// scene.
    pub fn single_step(&mut self) {
        self.world.step(&mut self.events);
    }

    pub fn ground_collider(&self) -> ColliderHandle {
        self.ground_collider
    }
}
