/*
 * Clock Module
 *
 * The driver owns the simulation loop and feeds a scalar time delta into
 * each step call; StepClock is the default source of that scalar. It reports
 * the seconds elapsed since the previous reading and can be reset when
 * playback restarts, so a pause does not turn into one enormous step.
 */

use std::time::Instant;

pub struct StepClock {
    last: Instant,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous `delta` call (or construction/reset).
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    /// Re-arms the clock, discarding time accumulated while paused.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn delta_measures_elapsed_time() {
        let mut clock = StepClock::new();
        thread::sleep(Duration::from_millis(20));
        let dt = clock.delta();
        assert!(dt >= 0.02);
        // The second reading starts from the first, not from construction.
        assert!(clock.delta() < dt);
    }

    #[test]
    fn reset_discards_accumulated_time() {
        let mut clock = StepClock::new();
        thread::sleep(Duration::from_millis(20));
        clock.reset();
        assert!(clock.delta() < 0.02);
    }
}
