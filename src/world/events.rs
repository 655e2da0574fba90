//! Collection of contact/intersection events raised by the physics step.

use crossbeam_channel::{unbounded, Receiver, Sender};
use rapier3d::geometry::{ColliderSet, CollisionEvent, ContactPair};
use rapier3d::dynamics::RigidBodySet;
use rapier3d::math::Real;
use rapier3d::pipeline::EventHandler;

/// Channel-backed sink handed to the physics pipeline.
pub(crate) struct ChannelCollector {
    collision_tx: Sender<CollisionEvent>,
}

impl EventHandler for ChannelCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let _ = self.collision_tx.send(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // The demos only consume contact/intersection events.
    }
}

/// Queue of collision events, one construction per session.
///
/// Passed to every step; events accumulate until drained.
pub struct EventQueue {
    collector: ChannelCollector,
    collision_rx: Receiver<CollisionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (collision_tx, collision_rx) = unbounded();
        Self {
            collector: ChannelCollector { collision_tx },
            collision_rx,
        }
    }

    pub(crate) fn collector(&self) -> &ChannelCollector {
        &self.collector
    }

    /// Take every collision event collected since the last drain.
    pub fn drain_collisions(&mut self) -> Vec<CollisionEvent> {
        self.collision_rx.try_iter().collect()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
