//! Physics world management using Rapier3d.

use nalgebra::{Isometry3, Point3, UnitQuaternion, UnitVector3, Vector3};
use rapier3d::dynamics::{
    CCDSolver, GenericJointBuilder, ImpulseJointHandle, ImpulseJointSet, IntegrationParameters,
    IslandManager, JointAxesMask, JointAxis, MotorModel, MultibodyJointSet, RigidBodyBuilder,
    RigidBodyHandle, RigidBodySet,
};
use rapier3d::geometry::{BroadPhaseMultiSap, ColliderBuilder, ColliderHandle, ColliderSet, NarrowPhase};
use rapier3d::pipeline::{PhysicsPipeline, QueryPipeline};
use rapier3d::prelude::ActiveEvents;
use tracing::debug;

use crate::config::PhysicsSettings;
use crate::world::error::WorldError;
use crate::world::events::EventQueue;

/// Default damping factor applied to joint motors.
pub const DEFAULT_MOTOR_DAMPING: f32 = 100.0;
/// Default force bound for joint motors.
pub const DEFAULT_MAX_FORCE: f32 = 1000.0;

/// Collision shape descriptor accepted by [`PhysicsWorld::attach_collider`].
#[derive(Debug, Clone)]
pub enum ShapeDesc {
    /// Axis-aligned box, given as half-extents.
    Cuboid { half_extents: [f32; 3] },
    /// Convex hull computed from mesh geometry points.
    ConvexHull { points: Vec<Point3<f32>> },
}

/// Physics simulation world.
///
/// Owns every body, collider and joint for the lifetime of the session.
/// All operations assume handles minted by this world; handles from another
/// world are undefined behavior, matching Rapier's own contract.
pub struct PhysicsWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector3<f32>,
    integration_params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: BroadPhaseMultiSap,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a world with the given gravity and integration parameters.
    pub fn new(settings: &PhysicsSettings) -> Self {
        let mut integration_params = IntegrationParameters::default();
        integration_params.dt = settings.timestep;
        integration_params.contact_natural_frequency = settings.contact_natural_frequency;

        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: Vector3::new(settings.gravity[0], settings.gravity[1], settings.gravity[2]),
            integration_params,
            islands: IslandManager::new(),
            broad_phase: BroadPhaseMultiSap::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Create an immovable body at the given pose.
    pub fn create_static_body(&mut self, pose: Isometry3<f32>) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed().position(pose).build();
        self.bodies.insert(body)
    }

    /// Create a fully simulated body at the given pose.
    pub fn create_dynamic_body(&mut self, pose: Isometry3<f32>, can_sleep: bool) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .position(pose)
            .can_sleep(can_sleep)
            .build();
        self.bodies.insert(body)
    }

    /// Create a body whose pose is driven externally but which still affects
    /// other bodies.
    pub fn create_kinematic_body(
        &mut self,
        pose: Isometry3<f32>,
        can_sleep: bool,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::kinematic_position_based()
            .position(pose)
            .can_sleep(can_sleep)
            .build();
        self.bodies.insert(body)
    }

    /// Attach a collision shape to a body.
    pub fn attach_collider(
        &mut self,
        body: RigidBodyHandle,
        shape: ShapeDesc,
    ) -> Result<ColliderHandle, WorldError> {
        let builder = match shape {
            ShapeDesc::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents[0], half_extents[1], half_extents[2])
            }
            ShapeDesc::ConvexHull { points } => ColliderBuilder::convex_hull(&points)
                .ok_or(WorldError::ConvexHull {
                    points: points.len(),
                })?,
        };

        let collider = builder.active_events(ActiveEvents::COLLISION_EVENTS).build();
        Ok(self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies))
    }

    /// Create a revolute joint between two bodies.
    ///
    /// Anchors are in each body's local frame, the axis is shared. The motor
    /// is prepared (acceleration-based, default force bound) but idle until
    /// [`Self::configure_motor_velocity`] is called.
    pub fn create_revolute_joint(
        &mut self,
        anchor_a: Point3<f32>,
        anchor_b: Point3<f32>,
        axis: UnitVector3<f32>,
        body_a: RigidBodyHandle,
        body_b: RigidBodyHandle,
        wake_up: bool,
    ) -> ImpulseJointHandle {
        let joint = GenericJointBuilder::new(JointAxesMask::LOCKED_REVOLUTE_AXES)
            .local_anchor1(anchor_a)
            .local_anchor2(anchor_b)
            .local_axis1(axis)
            .local_axis2(axis)
            .motor_model(JointAxis::AngX, MotorModel::AccelerationBased)
            .motor_max_force(JointAxis::AngX, DEFAULT_MAX_FORCE)
            .build();

        self.impulse_joints.insert(body_a, body_b, joint, wake_up)
    }

    /// Drive a revolute joint's motor toward a target angular velocity,
    /// bounded by `max_force`.
    pub fn configure_motor_velocity(
        &mut self,
        joint: ImpulseJointHandle,
        target_velocity: f32,
        max_force: f32,
    ) {
        if let Some(joint) = self.impulse_joints.get_mut(joint, true) {
            joint
                .data
                .set_motor_velocity(JointAxis::AngX, target_velocity, DEFAULT_MOTOR_DAMPING);
            joint.data.set_motor_max_force(JointAxis::AngX, max_force);
            debug!(
                "Configured joint motor: target {} rad/s, max force {}",
                target_velocity, max_force
            );
        }
    }

    /// Enable or disable contact resolution between the two bodies linked by
    /// a joint. Both bodies still collide with everything else.
    pub fn set_joint_contacts_enabled(&mut self, joint: ImpulseJointHandle, enabled: bool) {
        if let Some(joint) = self.impulse_joints.get_mut(joint, true) {
            joint.data.set_contacts_enabled(enabled);
        }
    }

    /// Queue the pose a kinematic body will assume on the next [`Self::step`].
    pub fn set_next_kinematic_transform(
        &mut self,
        body: RigidBodyHandle,
        translation: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
    ) {
        if let Some(body) = self.bodies.get_mut(body) {
            body.set_next_kinematic_position(Isometry3::from_parts(translation.into(), rotation));
        }
    }

    /// Current pose of a body, as of the last step.
    pub fn body_transform(&self, body: RigidBodyHandle) -> (Vector3<f32>, UnitQuaternion<f32>) {
        let body = &self.bodies[body];
        let pose = body.position();
        (pose.translation.vector, pose.rotation)
    }

    /// Current angular velocity of a body.
    pub fn body_angular_velocity(&self, body: RigidBodyHandle) -> Vector3<f32> {
        self.bodies[body].angvel().clone()
    }

    /// Current linear velocity of a body.
    pub fn body_linear_velocity(&self, body: RigidBodyHandle) -> Vector3<f32> {
        self.bodies[body].linvel().clone()
    }

    /// Advance the simulation by one fixed tick, collecting contact and
    /// intersection events into `events`.
    pub fn step(&mut self, events: &mut EventQueue) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            events.collector(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::isometry_from_translation;
    use nalgebra::Vector3;

    fn test_settings() -> PhysicsSettings {
        PhysicsSettings::default()
    }

    fn ground(world: &mut PhysicsWorld) -> RigidBodyHandle {
        let body = world.create_static_body(isometry_from_translation([0.0, -0.1, 0.0]));
        world
            .attach_collider(
                body,
                ShapeDesc::Cuboid {
                    half_extents: [200.1, 0.1, 200.1],
                },
            )
            .unwrap();
        body
    }

    #[test]
    fn test_dynamic_body_falls_and_rests() {
        let mut world = PhysicsWorld::new(&test_settings());
        let mut events = EventQueue::new();

        ground(&mut world);
        let falling = world.create_dynamic_body(isometry_from_translation([0.0, 10.0, 0.0]), true);
        world
            .attach_collider(
                falling,
                ShapeDesc::Cuboid {
                    half_extents: [0.5, 0.5, 0.5],
                },
            )
            .unwrap();

        let (start, _) = world.body_transform(falling);

        // ~1.5 s of fall time, then plenty of settling.
        for _ in 0..600 {
            world.step(&mut events);
        }

        let (end, _) = world.body_transform(falling);
        assert!(end.y < start.y);
        // Resting on the ground plane (top surface at y = 0, half-extent 0.5).
        assert!((end.y - 0.5).abs() < 0.1, "resting y was {}", end.y);
        let vel = world.body_linear_velocity(falling);
        assert!(vel.norm() < 0.1, "still moving at {:?}", vel);
    }

    #[test]
    fn test_collision_events_collected() {
        let mut world = PhysicsWorld::new(&test_settings());
        let mut events = EventQueue::new();

        ground(&mut world);
        let falling = world.create_dynamic_body(isometry_from_translation([0.0, 2.0, 0.0]), true);
        world
            .attach_collider(
                falling,
                ShapeDesc::Cuboid {
                    half_extents: [0.5, 0.5, 0.5],
                },
            )
            .unwrap();

        for _ in 0..120 {
            world.step(&mut events);
        }

        let collisions = events.drain_collisions();
        assert!(!collisions.is_empty(), "expected a contact with the ground");
    }

    #[test]
    fn test_motor_reaches_target_velocity() {
        let mut world = PhysicsWorld::new(&test_settings());
        let mut events = EventQueue::new();

        // Anchor body high above the ground, rotor swinging in the horizontal
        // plane so gravity exerts no torque about the joint axis.
        let anchor = world.create_static_body(isometry_from_translation([0.0, 10.0, 0.0]));
        let rotor = world.create_dynamic_body(isometry_from_translation([2.0, 10.0, 0.0]), false);
        world
            .attach_collider(
                rotor,
                ShapeDesc::Cuboid {
                    half_extents: [0.5, 0.5, 0.5],
                },
            )
            .unwrap();

        let axis = UnitVector3::new_normalize(Vector3::new(0.0, 1.0, 0.0));
        let joint = world.create_revolute_joint(
            Point3::origin(),
            Point3::new(-2.0, 0.0, 0.0),
            axis,
            anchor,
            rotor,
            true,
        );
        let target = std::f32::consts::TAU;
        world.configure_motor_velocity(joint, target, DEFAULT_MAX_FORCE);

        for _ in 0..300 {
            world.step(&mut events);
        }

        let angvel = world.body_angular_velocity(rotor);
        assert!(
            (angvel.y.abs() - target).abs() < 0.5,
            "steady-state angular velocity was {:?}",
            angvel
        );
        assert!(angvel.x.abs() < 0.1 && angvel.z.abs() < 0.1);
    }

    #[test]
    fn test_kinematic_pose_applied_next_step() {
        let mut world = PhysicsWorld::new(&test_settings());
        let mut events = EventQueue::new();

        let body = world.create_kinematic_body(isometry_from_translation([0.0, 5.0, 0.0]), true);
        world
            .attach_collider(
                body,
                ShapeDesc::Cuboid {
                    half_extents: [0.5, 0.5, 0.5],
                },
            )
            .unwrap();

        let translation = Vector3::new(3.0, 7.0, -1.0);
        let rotation = UnitQuaternion::from_euler_angles(0.0, 0.5, 0.0);
        world.set_next_kinematic_transform(body, translation, rotation);

        // Queued pose is not visible until the step runs.
        let (before, _) = world.body_transform(body);
        assert!((before.y - 5.0).abs() < 1e-6);

        world.step(&mut events);

        let (after, rot) = world.body_transform(body);
        assert!((after - translation).norm() < 1e-4, "pose was {:?}", after);
        assert!(rot.angle_to(&rotation) < 1e-4);
    }

    #[test]
    fn test_contacts_disabled_pair_stays_at_rest() {
        let mut settings = test_settings();
        settings.gravity = [0.0, 0.0, 0.0];
        let mut world = PhysicsWorld::new(&settings);
        let mut events = EventQueue::new();

        // Two overlapping boxes linked by a revolute joint with contacts off:
        // no separation impulses, the pair stays put.
        let a = world.create_dynamic_body(isometry_from_translation([0.0, 5.0, 0.0]), false);
        let b = world.create_dynamic_body(isometry_from_translation([0.5, 5.0, 0.0]), false);
        for &body in &[a, b] {
            world
                .attach_collider(
                    body,
                    ShapeDesc::Cuboid {
                        half_extents: [1.0, 1.0, 1.0],
                    },
                )
                .unwrap();
        }
        let axis = UnitVector3::new_normalize(Vector3::new(0.0, 0.0, 1.0));
        let joint = world.create_revolute_joint(
            Point3::origin(),
            Point3::new(-0.5, 0.0, 0.0),
            axis,
            a,
            b,
            true,
        );
        world.set_joint_contacts_enabled(joint, false);

        for _ in 0..50 {
            world.step(&mut events);
        }

        assert!(world.body_linear_velocity(a).norm() < 1e-3);
        assert!(world.body_linear_velocity(b).norm() < 1e-3);
    }

    #[test]
    fn test_unjointed_overlapping_pair_separates() {
        let mut settings = test_settings();
        settings.gravity = [0.0, 0.0, 0.0];
        let mut world = PhysicsWorld::new(&settings);
        let mut events = EventQueue::new();

        let a = world.create_dynamic_body(isometry_from_translation([0.0, 5.0, 0.0]), false);
        let b = world.create_dynamic_body(isometry_from_translation([0.5, 5.0, 0.0]), false);
        for &body in &[a, b] {
            world
                .attach_collider(
                    body,
                    ShapeDesc::Cuboid {
                        half_extents: [1.0, 1.0, 1.0],
                    },
                )
                .unwrap();
        }

        for _ in 0..120 {
            world.step(&mut events);
        }

        let (pa, _) = world.body_transform(a);
        let (pb, _) = world.body_transform(b);
        assert!(
            (pb - pa).norm() > 0.5,
            "contact resolution should push the pair apart, distance {}",
            (pb - pa).norm()
        );
    }

    #[test]
    fn test_convex_hull_rejects_degenerate_points() {
        let mut world = PhysicsWorld::new(&test_settings());
        let body = world.create_dynamic_body(isometry_from_translation([0.0, 0.0, 0.0]), true);

        let result = world.attach_collider(
            body,
            ShapeDesc::ConvexHull {
                points: vec![Point3::origin(), Point3::origin(), Point3::origin()],
            },
        );
        assert!(matches!(result, Err(WorldError::ConvexHull { points: 3 })));
    }
}
