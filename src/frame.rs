use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the loop started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Shared cancellation flag for a frame loop
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Owned frame source. Yields frames until its stop handle is triggered.
///
/// Use it in a loop: `for frame in frame_loop { ... }`
#[derive(Debug)]
pub struct FrameLoop {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
    stop: StopHandle,
}

impl FrameLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
            stop: StopHandle::new(),
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Seconds since the loop was created
    pub fn time(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameLoop {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.stop.is_stopped() {
            return None;
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

/// Counts frames and reports the rate once per second
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    window_start: Option<f32>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `time`; returns the rate when a second has passed
    pub fn record(&mut self, time: f32) -> Option<f32> {
        let start = *self.window_start.get_or_insert(time);
        self.frames += 1;

        let elapsed = time - start;
        if elapsed < 1.0 {
            return None;
        }

        let fps = self.frames as f32 / elapsed;
        self.frames = 0;
        self.window_start = Some(time);
        Some(fps)
    }
}

/// Frame loop running on its own thread
#[derive(Debug)]
pub struct HeadlessLoop {
    stop: StopHandle,
    thread: JoinHandle<u64>,
}

impl HeadlessLoop {
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Wait for the worker to exit; returns how many frames it ran
    pub fn join(self) -> thread::Result<u64> {
        self.thread.join()
    }
}

/// Run `tick` at roughly `fps` frames per second on a worker thread until
/// the returned loop is stopped or `tick` breaks
pub fn spawn_headless<F>(fps: u32, mut tick: F) -> HeadlessLoop
where
    F: FnMut(FrameInfo) -> ControlFlow<()> + Send + 'static,
{
    let frame_loop = FrameLoop::new();
    let stop = frame_loop.stop_handle();
    let worker_stop = stop.clone();
    let period = Duration::from_secs_f64(1.0 / fps.max(1) as f64);

    let thread = thread::spawn(move || {
        let mut frames = 0;
        for frame in frame_loop {
            let started = Instant::now();
            frames += 1;
            if tick(frame).is_break() {
                worker_stop.stop();
                break;
            }
            if let Some(rest) = period.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
        frames
    });

    HeadlessLoop { stop, thread }
}
