/// Time-bounded linear movement toward a target
///
/// Every animated scene element carries a `Movement` describing where it is,
/// where it is going and how much time is left to get there. Once per frame
/// the owner calls `step` which advances the state and writes the result to
/// either a plain scene node or a physics body.

use glam::Vec3;
use rapier3d::dynamics::RigidBody;

use crate::physics::vec3_to_vector;

/// Anything that can be placed and oriented in the scene.
///
/// Cameras, lights and mesh instances all implement this so the stepper can
/// drive them without knowing which one it is holding.
pub trait SceneNode {
    /// Replace the node's position with a whole new value
    fn set_position(&mut self, position: Vec3);

    /// Orient the node toward a world-space point
    fn look_at(&mut self, target: Vec3);
}

/// Where a movement step writes its result.
///
/// A body-backed element receives velocity impulses; everything else gets its
/// transform written directly.
pub enum MoveTarget<'a> {
    Node(&'a mut dyn SceneNode),
    Body(&'a mut RigidBody),
}

/// An in-flight linear move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    /// Current position, advanced every step
    pub position: Vec3,

    /// Target position
    pub to: Vec3,

    /// Remaining duration in seconds. Zero means "snap" semantics; the last
    /// step may leave it slightly negative.
    pub time: f32,

    /// Optional orientation target, applied together with the position
    pub look_at: Option<Vec3>,
}

impl Movement {
    pub fn new(position: Vec3, to: Vec3, time: f32) -> Self {
        Self {
            position,
            to,
            time,
            look_at: None,
        }
    }

    pub fn with_look_at(mut self, look_at: Vec3) -> Self {
        self.look_at = Some(look_at);
        self
    }

    /// A movement that is already at rest at `position`
    pub fn snap_to(position: Vec3) -> Self {
        Self::new(position, position, 0.0)
    }

    /// Aim the movement at a new target, restarting the clock
    pub fn retarget(&mut self, to: Vec3, time: f32) {
        self.to = to;
        self.time = time;
    }

    /// True once the clock has run out and the position matches the target
    pub fn is_settled(&self) -> bool {
        self.time <= 0.0 && self.position == self.to
    }
}

/// Advance a movement by `delta_time` seconds and apply the result to
/// `target`.
///
/// While `time > 0` the position moves linearly toward `to`; the remaining
/// time may dip slightly below zero on the final step and nothing prevents
/// overshoot when `delta_time > time`. Once the clock has run out, a single
/// settle write is issued if the position and target still differ on any
/// axis, after which further calls are no-ops.
///
/// The division by `movement.time` only happens on the active branch, so no
/// NaN or infinity can escape. At most one positional write reaches the
/// target per call.
///
/// Panics if `delta_time` is not strictly positive.
pub fn step(delta_time: f32, movement: &mut Movement, target: MoveTarget<'_>) {
    assert!(
        delta_time > 0.0,
        "movement step requires a positive delta_time, got {delta_time}"
    );

    if movement.time > 0.0 {
        let distance = movement.to - movement.position;
        let speed = (distance / movement.time) * delta_time;

        movement.time -= delta_time;
        movement.position += speed;
        apply(movement, target, Some(speed));
    } else if movement.position != movement.to {
        // One-shot settle for residual drift; not a new motion.
        apply(movement, target, None);
    }
}

/// Write the movement's current state to the target exactly once.
///
/// `speed` is only available during active motion; the settle branch has no
/// meaningful velocity left, so a body is teleported instead of impulsed.
fn apply(movement: &Movement, target: MoveTarget<'_>, speed: Option<Vec3>) {
    match target {
        MoveTarget::Body(body) => match speed {
            Some(speed) => body.apply_impulse(vec3_to_vector(speed), true),
            None => body.set_translation(vec3_to_vector(movement.position), true),
        },
        MoveTarget::Node(node) => {
            node.set_position(movement.position);
            if let Some(look_at) = movement.look_at {
                node.look_at(look_at);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal node that records every write it receives
    #[derive(Default)]
    struct RecordingNode {
        position: Option<Vec3>,
        look_at: Option<Vec3>,
        position_writes: u32,
    }

    impl SceneNode for RecordingNode {
        fn set_position(&mut self, position: Vec3) {
            self.position = Some(position);
            self.position_writes += 1;
        }

        fn look_at(&mut self, target: Vec3) {
            self.look_at = Some(target);
        }
    }

    #[test]
    fn test_two_step_scenario() {
        let mut node = RecordingNode::default();
        let mut movement = Movement::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0);

        step(1.0, &mut movement, MoveTarget::Node(&mut node));
        assert_eq!(movement.position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(movement.time, 1.0);
        assert_eq!(node.position, Some(Vec3::new(5.0, 0.0, 0.0)));

        step(1.0, &mut movement, MoveTarget::Node(&mut node));
        assert_eq!(movement.position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(movement.time, 0.0);
        assert_eq!(node.position_writes, 2);
    }

    #[test]
    fn test_moves_strictly_closer_on_every_axis() {
        let mut node = RecordingNode::default();
        let mut movement = Movement::new(
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(4.0, 2.0, -1.0),
            1.5,
        );
        let before = (movement.to - movement.position).abs();

        step(0.5, &mut movement, MoveTarget::Node(&mut node));

        let after = (movement.to - movement.position).abs();
        assert!(after.x < before.x);
        assert!(after.y < before.y);
        assert!(after.z < before.z);
        assert_eq!(movement.time, 1.0);
    }

    #[test]
    fn test_settled_movement_is_a_no_op() {
        let mut node = RecordingNode::default();
        let mut movement = Movement::snap_to(Vec3::new(2.0, 2.0, 2.0));
        assert!(movement.is_settled());

        step(0.016, &mut movement, MoveTarget::Node(&mut node));
        assert_eq!(node.position_writes, 0);
        assert_eq!(node.position, None);
    }

    #[test]
    fn test_settle_writes_exactly_once() {
        let mut node = RecordingNode::default();
        // Clock already expired but the position never reached the target.
        let mut movement = Movement::new(Vec3::new(9.9, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), 0.0);

        step(0.016, &mut movement, MoveTarget::Node(&mut node));
        assert_eq!(node.position_writes, 1);
        assert_eq!(node.position, Some(Vec3::new(9.9, 0.0, 0.0)));
    }

    #[test]
    fn test_full_duration_reaches_target() {
        let mut node = RecordingNode::default();
        let mut movement = Movement::new(Vec3::ZERO, Vec3::new(8.0, 4.0, -2.0), 2.0);

        for _ in 0..8 {
            step(0.25, &mut movement, MoveTarget::Node(&mut node));
        }

        let error = (movement.position - movement.to).length();
        assert!(error < 1e-4, "residual error {error} too large");
    }

    #[test]
    fn test_look_at_forwarded_with_position() {
        let mut node = RecordingNode::default();
        let mut movement = Movement::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), 1.0)
            .with_look_at(Vec3::ZERO);

        step(0.5, &mut movement, MoveTarget::Node(&mut node));
        assert_eq!(node.look_at, Some(Vec3::ZERO));
    }

    #[test]
    #[should_panic(expected = "positive delta_time")]
    fn test_zero_delta_time_rejected() {
        let mut node = RecordingNode::default();
        let mut movement = Movement::new(Vec3::ZERO, Vec3::ONE, 1.0);
        step(0.0, &mut movement, MoveTarget::Node(&mut node));
    }
}
