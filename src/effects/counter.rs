use serde::Deserialize;

use crate::config::{parse_int_attr, Attributes, FromAttributes};

/// How long a counter takes to reach its target, and the frame period the
/// per-tick increment is computed for
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterTiming {
    pub duration_ms: f32,
    pub frame_ms: f32,
}

impl Default for CounterTiming {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            frame_ms: 16.0,
        }
    }
}

impl CounterTiming {
    /// Number of ticks a counter is spread over
    pub fn steps(&self) -> f64 {
        (self.duration_ms as f64 / self.frame_ms.max(f32::EPSILON) as f64).max(1.0)
    }
}

/// `data-target` on a stat number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterConfig {
    pub target: i64,
}

impl FromAttributes for CounterConfig {
    fn from_attributes(attrs: &Attributes) -> Option<Self> {
        attrs.get("data-target")?;
        Some(Self {
            target: parse_int_attr(attrs, "data-target").unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub text: String,
    pub done: bool,
}

/// Counts from zero up to a target in fixed per-tick increments
#[derive(Debug, Clone)]
pub struct Counter {
    target: i64,
    increment: f64,
    current: f64,
    animated: bool,
    done: bool,
}

impl Counter {
    pub fn new(target: i64) -> Self {
        Self::with_timing(target, CounterTiming::default())
    }

    pub fn with_timing(target: i64, timing: CounterTiming) -> Self {
        Self {
            target,
            increment: target as f64 / timing.steps(),
            current: 0.0,
            animated: false,
            done: false,
        }
    }

    pub fn from_config(config: CounterConfig, timing: CounterTiming) -> Self {
        Self::with_timing(config.target, timing)
    }

    /// Begin counting. Returns false if the counter was already started;
    /// a counter never restarts.
    pub fn start(&mut self) -> bool {
        if self.animated {
            return false;
        }
        self.animated = true;
        true
    }

    /// Advance one frame and return what to display
    pub fn tick(&mut self) -> CounterFrame {
        if self.animated && !self.done {
            self.current += self.increment;
            if self.current >= self.target as f64 {
                self.done = true;
            }
        }
        self.frame()
    }

    /// What is currently displayed, without advancing
    pub fn frame(&self) -> CounterFrame {
        let value = self.value();
        CounterFrame {
            value,
            text: format_thousands(value),
            done: self.done,
        }
    }

    pub fn value(&self) -> i64 {
        if self.done {
            self.target
        } else {
            self.current.floor() as i64
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Group digits in threes with commas: `1500` -> `"1,500"`
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::attributes;

    fn run(counter: &mut Counter) -> Vec<CounterFrame> {
        let mut frames = Vec::new();
        for _ in 0..10_000 {
            let frame = counter.tick();
            let done = frame.done;
            frames.push(frame);
            if done {
                break;
            }
        }
        frames
    }

    #[test]
    fn counts_to_target_in_about_125_frames() {
        let mut counter = Counter::new(1500);
        counter.start();
        let frames = run(&mut counter);

        assert!((124..=126).contains(&frames.len()));
        let last = frames.last().unwrap();
        assert_eq!(last.value, 1500);
        assert_eq!(last.text, "1,500");
        assert!(last.done);
    }

    #[test]
    fn sequence_is_non_decreasing() {
        for target in [1, 7, 99, 1500, 250_000] {
            let mut counter = Counter::new(target);
            counter.start();
            let frames = run(&mut counter);
            assert!(frames.windows(2).all(|w| w[0].value <= w[1].value));
            assert_eq!(frames.last().unwrap().value, target);
        }
    }

    #[test]
    fn intermediate_values_are_floored() {
        let mut counter = Counter::new(100);
        counter.start();
        // 100 / 125 = 0.8 per frame
        assert_eq!(counter.tick().value, 0);
        assert_eq!(counter.tick().value, 1);
        assert_eq!(counter.tick().value, 2);
    }

    #[test]
    fn start_is_idempotent() {
        let mut counter = Counter::new(10);
        assert!(counter.start());
        run(&mut counter);
        assert!(!counter.start());
        assert_eq!(counter.tick().value, 10);
    }

    #[test]
    fn unstarted_counter_shows_zero() {
        let mut counter = Counter::new(500);
        assert_eq!(counter.tick().value, 0);
        assert!(!counter.is_done());
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut counter = Counter::new(0);
        counter.start();
        let frame = counter.tick();
        assert!(frame.done);
        assert_eq!(frame.text, "0");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-45000), "-45,000");
    }

    #[test]
    fn config_from_data_target() {
        let config = CounterConfig::from_attributes(&attributes([("data-target", "2500")])).unwrap();
        assert_eq!(config.target, 2500);

        let config = CounterConfig::from_attributes(&attributes([("data-target", "lots")])).unwrap();
        assert_eq!(config.target, 0);

        assert!(CounterConfig::from_attributes(&attributes([])).is_none());
    }
}
