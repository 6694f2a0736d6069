//! Time-driven gates and timers. Callers pass the current time in seconds,
//! so nothing here reads a clock and every timer is deterministic under test.

/// Rate limiter - lets a call through at most once per `limit` seconds
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    limit: f32,
    last_fire: Option<f32>,
}

impl Throttle {
    /// Create a throttle with the minimum spacing between firings
    pub fn new(limit: f32) -> Self {
        Self {
            limit,
            last_fire: None,
        }
    }

    /// Throttle from a millisecond interval
    pub fn from_millis(limit_ms: f32) -> Self {
        Self::new(limit_ms / 1000.0)
    }

    /// Returns true if a call at `now` is allowed through
    pub fn ready(&mut self, now: f32) -> bool {
        match self.last_fire {
            Some(last) if now - last < self.limit => false,
            _ => {
                self.last_fire = Some(now);
                true
            }
        }
    }

    /// Run `f` if allowed at `now`; returns whether it ran
    pub fn call<F: FnOnce()>(&mut self, now: f32, f: F) -> bool {
        let fire = self.ready(now);
        if fire {
            f();
        }
        fire
    }
}

/// Quiet-period gate - holds the latest value until `wait` seconds pass
/// without another trigger
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    wait: f32,
    pending: Option<(T, f32)>,
}

impl<T> Debounce<T> {
    pub fn new(wait: f32) -> Self {
        Self { wait, pending: None }
    }

    pub fn from_millis(wait_ms: f32) -> Self {
        Self::new(wait_ms / 1000.0)
    }

    /// Record a trigger; restarts the quiet period
    pub fn trigger(&mut self, now: f32, value: T) {
        self.pending = Some((value, now + self.wait));
    }

    /// Yield the pending value once its quiet period has elapsed
    pub fn poll(&mut self, now: f32) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Repeating timer - fires every `period` seconds, first firing one period
/// after creation
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    // f64: f32 seconds cannot resolve sub-second periods past 2^23 s
    period: f64,
    next_fire: f64,
}

impl Interval {
    pub fn new(start: f32, period: f32) -> Self {
        let period = f64::from(period);
        Self {
            period,
            next_fire: f64::from(start) + period,
        }
    }

    /// Number of firings due at `now`; catches up after a stall
    pub fn tick(&mut self, now: f32) -> u32 {
        let now = f64::from(now);
        if self.period <= 0.0 || now < self.next_fire {
            return 0;
        }

        let missed = ((now - self.next_fire) / self.period).floor();
        self.next_fire += (missed + 1.0) * self.period;
        (missed as u32).saturating_add(1)
    }

    pub fn period(&self) -> f32 {
        self.period as f32
    }
}

/// One-shot timer - fires once `duration` seconds after `start`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    started_at: f32,
    duration: f32,
    fired: bool,
}

impl Countdown {
    pub fn new(started_at: f32, duration: f32) -> Self {
        Self {
            started_at,
            duration,
            fired: false,
        }
    }

    /// Returns true exactly once, on the first tick at or past the deadline
    pub fn tick(&mut self, now: f32) -> bool {
        if self.fired || now < self.started_at + self.duration {
            return false;
        }
        self.fired = true;
        true
    }

    /// Progress [0, 1]
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_done(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_fires_first_call_then_waits() {
        let mut throttle = Throttle::new(0.1);

        assert!(throttle.ready(0.0));   // First fire immediate
        assert!(!throttle.ready(0.05)); // Too soon
        assert!(!throttle.ready(0.099));
        assert!(throttle.ready(0.1));   // Limit elapsed
        assert!(!throttle.ready(0.15));
    }

    #[test]
    fn throttle_call_runs_closure_only_when_ready() {
        let mut throttle = Throttle::from_millis(16.0);
        let mut count = 0;

        for i in 0..10 {
            throttle.call(i as f32 * 0.005, || count += 1);
        }

        // Calls at 0, 5, ..., 45 ms: fires at 0, 20, 40
        assert_eq!(count, 3);
    }

    #[test]
    fn debounce_waits_for_quiet_period() {
        let mut debounce = Debounce::new(0.25);

        debounce.trigger(0.0, (800, 600));
        debounce.trigger(0.1, (1024, 768));
        assert_eq!(debounce.poll(0.3), None); // Restarted at 0.1

        assert_eq!(debounce.poll(0.36), Some((1024, 768)));
        assert_eq!(debounce.poll(0.5), None); // Consumed
        assert!(!debounce.is_pending());
    }

    #[test]
    fn interval_counts_due_firings() {
        let mut interval = Interval::new(0.0, 0.5);

        assert_eq!(interval.tick(0.4), 0);
        assert_eq!(interval.tick(0.5), 1);
        assert_eq!(interval.tick(0.6), 0);
        assert_eq!(interval.tick(2.1), 3); // 1.0, 1.5, 2.0
    }

    #[test]
    fn interval_stays_exact_at_large_times() {
        let mut interval = Interval::new(0.0, 0.25);

        assert_eq!(interval.tick(8_388_608.0), 33_554_432); // 2^23 s
        assert_eq!(interval.tick(8_388_608.0), 0);
        assert_eq!(interval.tick(8_388_609.0), 4);
    }

    #[test]
    fn countdown_fires_once() {
        let mut timer = Countdown::new(1.0, 0.6);

        assert!(!timer.tick(1.3));
        assert!((timer.progress(1.3) - 0.5).abs() < 1e-5);
        assert!(timer.tick(1.65));
        assert!(!timer.tick(2.0));
        assert!(timer.is_done());
    }
}
