//! Simulation clock
//!
//! Fixed tick rate; each tick hands the guest the same delta in seconds.

use std::time::Duration;

/// Default simulation tick rate (60 Hz = 16.666ms per tick)
pub const DEFAULT_TICK_RATE_HZ: u32 = 60;

/// Fixed-step simulation clock.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    rate_hz: u32,
    tick_duration: Duration,
    tick_count: u64,
    accumulated_time: Duration,
}

impl SimulationClock {
    /// Clock ticking `rate_hz` times per second. A rate of zero is clamped to 1 Hz.
    pub fn new(rate_hz: u32) -> Self {
        let rate_hz = rate_hz.max(1);
        Self {
            rate_hz,
            tick_duration: Duration::from_secs(1) / rate_hz,
            tick_count: 0,
            accumulated_time: Duration::ZERO,
        }
    }

    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Elapsed seconds per tick, as passed to the update hook.
    pub fn delta_seconds(&self) -> f32 {
        self.tick_duration.as_secs_f32()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Advance one tick and return its delta in seconds.
    pub fn advance_tick(&mut self) -> f32 {
        self.tick_count += 1;
        self.accumulated_time += self.tick_duration;
        self.delta_seconds()
    }

    pub fn total_time(&self) -> Duration {
        self.accumulated_time
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clock_runs_at_60hz() {
        let clock = SimulationClock::default();
        assert_eq!(clock.rate_hz(), 60);
        assert!((clock.delta_seconds() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn advance_accumulates_time() {
        let mut clock = SimulationClock::new(10);
        for _ in 0..10 {
            let dt = clock.advance_tick();
            assert!((dt - 0.1).abs() < 1e-6);
        }
        assert_eq!(clock.tick_count(), 10);
        assert_eq!(clock.total_time(), Duration::from_secs(1));
    }

    #[test]
    fn zero_rate_is_clamped() {
        let clock = SimulationClock::new(0);
        assert_eq!(clock.rate_hz(), 1);
        assert_eq!(clock.tick_duration(), Duration::from_secs(1));
    }
}
