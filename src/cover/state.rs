//! The cover's motion state machine
//!
//! Two independent pieces of state drive the book:
//! - hover: pointer position sets a target orientation that the current
//!   orientation chases by exponential smoothing,
//! - flip: while a flip is active its eased yaw overrides the smoothed yaw.
//!
//! Time is always passed in explicitly as the elapsed time since start.

use std::time::Duration;

use super::flip::FlipAnimation;
use super::rotation::Rotation;
use crate::config::motion::{FLOAT_AMPLITUDE, FLOAT_SPEED, SMOOTHING_FACTOR};

/// What the renderer applies to the book mesh after a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverPose {
    pub rotation: Rotation,
    /// Extra roll from an in-flight flip
    pub wobble: f32,
    /// Vertical float offset (scene units)
    pub offset_y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverState {
    current: Rotation,
    target: Rotation,
    hovering: bool,
    flip: Option<FlipAnimation>,
    wobble: f32,
    offset_y: f32,
}

impl Default for CoverState {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverState {
    /// Book at rest, nobody hovering, no flip
    pub fn new() -> Self {
        Self {
            current: Rotation::REST,
            target: Rotation::REST,
            hovering: false,
            flip: None,
            wobble: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn current(&self) -> Rotation {
        self.current
    }

    pub fn target(&self) -> Rotation {
        self.target
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_flipping(&self) -> bool {
        self.flip.is_some()
    }

    pub fn flip(&self) -> Option<&FlipAnimation> {
        self.flip.as_ref()
    }

    pub fn pose(&self) -> CoverPose {
        CoverPose {
            rotation: self.current,
            wobble: self.wobble,
            offset_y: self.offset_y,
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hovering = true;
    }

    /// Stop hovering and send the book back to rest
    pub fn pointer_leave(&mut self) {
        self.hovering = false;
        self.target = Rotation::REST;
    }

    /// Retarget from a normalized pointer position; ignored unless hovering
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.hovering {
            return;
        }
        self.target = Rotation::from_pointer(x, y);
    }

    /// Start a flip at `now`. Returns `false` if one is already running.
    pub fn click(&mut self, now: Duration) -> bool {
        if self.flip.is_some() {
            return false;
        }
        self.flip = Some(FlipAnimation::begin(now, self.current.yaw));
        true
    }

    /// Run one frame of motion at elapsed time `now`
    pub fn advance(&mut self, now: Duration) -> CoverPose {
        self.current.smooth_towards(self.target, SMOOTHING_FACTOR);

        if let Some(flip) = self.flip {
            let sample = flip.sample(now);
            self.current.yaw = sample.yaw;
            self.wobble = sample.wobble;

            if sample.finished() {
                self.flip = None;
                self.wobble = 0.0;
                // Hold the flipped side instead of smoothing back
                self.target.yaw = flip.target_yaw;
            }
        }

        self.offset_y = (now.as_secs_f32() * FLOAT_SPEED).sin() * FLOAT_AMPLITUDE;
        self.pose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::flip::{DURATION, FULL_TURN_YAW};

    const FRAME: Duration = Duration::from_millis(16);

    fn run_frames(state: &mut CoverState, start: Duration, frames: u32) -> Duration {
        let mut now = start;
        for _ in 0..frames {
            now += FRAME;
            state.advance(now);
        }
        now
    }

    #[test]
    fn starts_at_rest() {
        let state = CoverState::new();
        assert_eq!(state.current(), Rotation::REST);
        assert_eq!(state.target(), Rotation::REST);
        assert!(!state.is_hovering());
        assert!(!state.is_flipping());
    }

    #[test]
    fn pointer_move_requires_hover() {
        let mut state = CoverState::new();
        state.pointer_move(1.0, 1.0);
        assert_eq!(state.target(), Rotation::REST);

        state.pointer_enter();
        state.pointer_move(1.0, 1.0);
        assert_eq!(state.target().yaw, 0.5);
        assert_eq!(state.target().pitch, 0.3);

        // Same input, same target
        state.pointer_move(1.0, 1.0);
        assert_eq!(state.target(), Rotation::from_pointer(1.0, 1.0));
    }

    #[test]
    fn pointer_leave_is_idempotent() {
        let mut state = CoverState::new();
        state.pointer_enter();
        state.pointer_move(-0.4, 0.7);

        state.pointer_leave();
        let once = state.clone();
        state.pointer_leave();
        assert_eq!(state, once);
        assert_eq!(state.target(), Rotation::REST);
        assert!(!state.is_hovering());
    }

    #[test]
    fn leave_returns_smoothly_to_rest() {
        let mut state = CoverState::new();
        state.pointer_enter();
        state.pointer_move(1.0, 1.0);
        let now = run_frames(&mut state, Duration::ZERO, 60);

        state.pointer_leave();
        let before = state.current().max_gap(Rotation::REST);
        state.advance(now + FRAME);
        let after = state.current().max_gap(Rotation::REST);
        assert!(after < before);
        assert!(after > 0.8 * before);
    }

    #[test]
    fn converges_on_constant_target() {
        let mut state = CoverState::new();
        state.pointer_enter();
        state.pointer_move(0.5, 0.5);
        let target = state.target();
        let initial = state.current().max_gap(target);

        run_frames(&mut state, Duration::ZERO, 100);
        assert!(state.current().max_gap(target) <= initial * 0.9f32.powi(100) + 1e-6);
    }

    #[test]
    fn second_click_during_flip_is_ignored() {
        let mut state = CoverState::new();
        assert!(state.click(Duration::ZERO));
        let flip = *state.flip().unwrap();

        let now = run_frames(&mut state, Duration::ZERO, 10);
        assert!(!state.click(now));
        assert_eq!(state.flip(), Some(&flip));
    }

    #[test]
    fn flip_terminates_after_duration() {
        let mut state = CoverState::new();
        state.click(Duration::ZERO);

        state.advance(DURATION - Duration::from_millis(1));
        assert!(state.is_flipping());

        let pose = state.advance(DURATION);
        assert!(!state.is_flipping());
        assert_eq!(pose.wobble, 0.0);
        assert!((pose.rotation.yaw - FULL_TURN_YAW).abs() < 1e-6);
        assert_eq!(state.target().yaw, FULL_TURN_YAW);
    }

    #[test]
    fn flipped_side_is_held_then_flips_back() {
        let mut state = CoverState::new();
        state.click(Duration::ZERO);
        state.advance(DURATION);

        let now = run_frames(&mut state, DURATION, 30);
        assert!((state.current().yaw - FULL_TURN_YAW).abs() < 1e-5);

        // A full turn leaves a positive yaw, so the next flip returns to rest
        assert!(state.click(now));
        state.advance(now + DURATION);
        assert!((state.current().yaw - Rotation::REST.yaw).abs() < 1e-6);
    }

    #[test]
    fn wobble_only_while_flipping() {
        let mut state = CoverState::new();
        assert_eq!(state.advance(FRAME).wobble, 0.0);

        state.click(FRAME);
        let mid = state.advance(FRAME + DURATION / 2);
        assert!(mid.wobble > 0.09);
    }

    #[test]
    fn float_offset_is_bounded() {
        let mut state = CoverState::new();
        let mut now = Duration::ZERO;
        for _ in 0..1000 {
            now += FRAME;
            let pose = state.advance(now);
            assert!(pose.offset_y.abs() <= FLOAT_AMPLITUDE + 1e-6);
        }
    }
}
