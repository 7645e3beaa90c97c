use tracing::trace;

use super::scale::StepProfile;

/// Rate divisors for the slow (below threshold) and fast (above) halves.
const SLOW_RATE: usize = 4;
const FAST_RATE: usize = 1;

/// Outcome of poking a node's state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepStatus {
    /// Not moving; nothing happened
    Idle,
    /// Direction picked, the node will move on the next frame
    Armed,
    /// Mid-step
    Advancing,
    /// Step finished and settled at this checkpoint (0 or 1)
    Completed(f32),
}

/// Scale progression for a single node.
///
/// `direction == 0` means idle. `previous` always holds the last settled
/// checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleState {
    pub scale: f32,
    pub direction: f32,
    pub previous: f32,
}

impl ScaleState {
    pub fn is_idle(&self) -> bool {
        self.direction == 0.0
    }

    /// Arm a step heading away from the last checkpoint. Ignored unless idle.
    pub fn start_updating(&mut self) -> StepStatus {
        if !self.is_idle() {
            return StepStatus::Advancing;
        }
        self.direction = 1.0 - 2.0 * self.previous;
        StepStatus::Armed
    }

    /// Advance by one frame. Completion is detected by overshoot, then the
    /// scale snaps to the next checkpoint.
    pub fn update(&mut self, profile: &StepProfile) -> StepStatus {
        if self.is_idle() {
            return StepStatus::Idle;
        }
        self.scale += profile.update_value(self.scale, self.direction, SLOW_RATE, FAST_RATE);
        trace!(scale = self.scale, direction = self.direction, "scale step");
        if (self.scale - self.previous).abs() > 1.0 {
            self.scale = self.previous + self.direction;
            self.direction = 0.0;
            self.previous = self.scale;
            return StepStatus::Completed(self.previous);
        }
        StepStatus::Advancing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(state: &mut ScaleState) -> (f32, usize) {
        let profile = StepProfile::default();
        for frame in 1..=1000 {
            if let StepStatus::Completed(checkpoint) = state.update(&profile) {
                return (checkpoint, frame);
            }
        }
        panic!("step never completed");
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = ScaleState::default();
        assert!(state.is_idle());
        assert_eq!(state.scale, 0.0);
        assert_eq!(state.previous, 0.0);
    }

    #[test]
    fn test_start_updating_from_zero_heads_forward() {
        let mut state = ScaleState::default();
        assert_eq!(state.start_updating(), StepStatus::Armed);
        assert_eq!(state.direction, 1.0);
    }

    #[test]
    fn test_start_updating_from_one_heads_back() {
        let mut state = ScaleState {
            scale: 1.0,
            direction: 0.0,
            previous: 1.0,
        };
        assert_eq!(state.start_updating(), StepStatus::Armed);
        assert_eq!(state.direction, -1.0);
    }

    #[test]
    fn test_start_updating_while_advancing_is_ignored() {
        let mut state = ScaleState::default();
        state.start_updating();
        state.update(&StepProfile::default());
        let before = state;

        assert_eq!(state.start_updating(), StepStatus::Advancing);
        assert_eq!(state, before);
    }

    #[test]
    fn test_update_while_idle_is_noop() {
        let mut state = ScaleState::default();
        assert_eq!(state.update(&StepProfile::default()), StepStatus::Idle);
        assert_eq!(state, ScaleState::default());
    }

    #[test]
    fn test_slow_then_fast_rate() {
        let profile = StepProfile::default();
        let mut state = ScaleState::default();
        state.start_updating();

        state.update(&profile);
        assert!((state.scale - 0.0125).abs() < 1e-6);

        state.scale = 0.6;
        state.update(&profile);
        assert!((state.scale - 0.65).abs() < 1e-6);
    }

    #[test]
    fn test_forward_step_snaps_to_one() {
        let mut state = ScaleState::default();
        state.start_updating();

        let (checkpoint, frames) = run_to_completion(&mut state);

        assert_eq!(checkpoint, 1.0);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.previous, 1.0);
        assert!(state.is_idle());
        // 41 slow frames to cross the threshold, then 10 fast ones
        assert!((45..=60).contains(&frames), "took {frames} frames");
    }

    #[test]
    fn test_backward_step_snaps_to_zero() {
        let mut state = ScaleState {
            scale: 1.0,
            direction: 0.0,
            previous: 1.0,
        };
        state.start_updating();

        let (checkpoint, _) = run_to_completion(&mut state);

        assert_eq!(checkpoint, 0.0);
        assert_eq!(state.scale, 0.0);
        assert_eq!(state.previous, 0.0);
        assert!(state.is_idle());
    }

    #[test]
    fn test_checkpoints_alternate() {
        let mut state = ScaleState::default();
        for expected in [1.0, 0.0, 1.0, 0.0] {
            state.start_updating();
            let (checkpoint, _) = run_to_completion(&mut state);
            assert_eq!(checkpoint, expected);
            assert_eq!(state.direction, 0.0);
        }
    }
}
