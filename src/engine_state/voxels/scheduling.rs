//! # Generation Scheduling
//!
//! Bounds how much chunk generation the world performs per frame.
//!
//! Generating and meshing a chunk is the most expensive thing a frame can do, so
//! when the camera moves into unexplored territory the world asks a
//! [`GenerationPolicy`] before generating each missing chunk. Chunks that are
//! refused are simply requested again on a later frame.

use web_time::{Duration, Instant};

use crate::config::GenerationConfig;

/// Decides whether another chunk may be generated right now.
pub trait GenerationPolicy: Send {
    /// Called once at the start of every visibility pass.
    fn begin_tick(&mut self);

    /// Asks for permission to generate one chunk. Returns `true` if granted.
    fn try_acquire(&mut self) -> bool;
}

/// Grants at most `max` generations per visibility pass.
#[derive(Debug, Clone)]
pub struct PerTickBudget {
    max: u32,
    used: u32,
}

impl PerTickBudget {
    pub fn new(max: u32) -> Self {
        PerTickBudget { max, used: 0 }
    }
}

impl GenerationPolicy for PerTickBudget {
    fn begin_tick(&mut self) {
        self.used = 0;
    }

    fn try_acquire(&mut self) -> bool {
        if self.used < self.max {
            self.used += 1;
            true
        } else {
            false
        }
    }
}

/// Grants at most one generation per slice of wall-clock time.
#[derive(Debug, Clone)]
pub struct TimeSliceBudget {
    slice: Duration,
    last_grant: Option<Instant>,
}

impl TimeSliceBudget {
    pub fn new(slice: Duration) -> Self {
        TimeSliceBudget {
            slice,
            last_grant: None,
        }
    }

    /// [`GenerationPolicy::try_acquire`] against an explicit clock reading.
    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        let ready = match self.last_grant {
            Some(last) => now.saturating_duration_since(last) >= self.slice,
            None => true,
        };
        if ready {
            self.last_grant = Some(now);
        }
        ready
    }
}

impl GenerationPolicy for TimeSliceBudget {
    fn begin_tick(&mut self) {}

    fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }
}

/// Grants every request. Generates the whole view window in one pass.
#[derive(Debug, Clone, Default)]
pub struct Unthrottled;

impl GenerationPolicy for Unthrottled {
    fn begin_tick(&mut self) {}

    fn try_acquire(&mut self) -> bool {
        true
    }
}

/// Builds the policy a config asks for.
pub fn policy_from_config(config: &GenerationConfig) -> Box<dyn GenerationPolicy> {
    match *config {
        GenerationConfig::PerTick { max } => Box::new(PerTickBudget::new(max)),
        GenerationConfig::TimeSlice { millis } => {
            Box::new(TimeSliceBudget::new(Duration::from_millis(millis)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_tick_budget_resets_each_tick() {
        let mut policy = PerTickBudget::new(2);
        policy.begin_tick();
        assert!(policy.try_acquire());
        assert!(policy.try_acquire());
        assert!(!policy.try_acquire());

        policy.begin_tick();
        assert!(policy.try_acquire());
    }

    #[test]
    fn time_slice_spaces_out_grants() {
        let mut policy = TimeSliceBudget::new(Duration::from_millis(100));
        let start = Instant::now();

        assert!(policy.try_acquire_at(start));
        assert!(!policy.try_acquire_at(start + Duration::from_millis(40)));
        assert!(!policy.try_acquire_at(start + Duration::from_millis(99)));
        assert!(policy.try_acquire_at(start + Duration::from_millis(100)));
        assert!(!policy.try_acquire_at(start + Duration::from_millis(150)));
    }

    #[test]
    fn unthrottled_always_grants() {
        let mut policy = Unthrottled;
        policy.begin_tick();
        assert!((0..100).all(|_| policy.try_acquire()));
    }
}
