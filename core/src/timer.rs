use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Whole-second elapsed counter advanced by an external clock.
///
/// The timer never reads a clock itself: whoever drives the game calls [`Timer::tick`] once per
/// second and the count only moves while the timer is running. Once stopped it stays stopped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    state: TimerState,
    elapsed_seconds: u32,
}

impl Timer {
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
            elapsed_seconds: 0,
        }
    }

    pub const fn state(&self) -> TimerState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running)
    }

    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Starts an idle timer, returns whether it changed state.
    pub fn start(&mut self) -> bool {
        if matches!(self.state, TimerState::Idle) {
            self.state = TimerState::Running;
            true
        } else {
            false
        }
    }

    /// Stops the timer for good, returns whether it was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.state = TimerState::Stopped;
        was_running
    }

    /// Advances one second if running and returns the new elapsed time.
    pub fn tick(&mut self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        Some(self.elapsed_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer_ignores_ticks() {
        let mut timer = Timer::new();

        assert_eq!(timer.tick(), None);
        assert_eq!(timer.elapsed_seconds(), 0);
    }

    #[test]
    fn running_timer_counts_ticks() {
        let mut timer = Timer::new();

        assert!(timer.start());
        assert_eq!(timer.tick(), Some(1));
        assert_eq!(timer.tick(), Some(2));
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn stopped_timer_cannot_restart() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();

        assert!(timer.stop());
        assert!(!timer.start());
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.elapsed_seconds(), 1);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn stopping_idle_timer_reports_not_running() {
        let mut timer = Timer::new();

        assert!(!timer.stop());
        assert_eq!(timer.state(), TimerState::Stopped);
    }
}
