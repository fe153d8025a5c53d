use std::time::{Duration, Instant};

/// Frame step used when the loop runs at a fixed 60 Hz.
pub const FIXED_DELTA_TIME: f32 = 1.0 / 60.0;

/// Source of the per-frame `delta_time`, in seconds.
#[derive(Debug, Clone)]
pub enum FrameClock {
    /// Same step every frame. Makes runs reproducible.
    Fixed(f32),
    /// Wall-clock time since the previous tick. The first tick yields zero.
    Measured { last: Option<Instant> },
}

impl FrameClock {
    pub fn fixed(step: f32) -> Self {
        assert!(step > 0.0, "fixed step must be positive");
        FrameClock::Fixed(step)
    }

    pub fn measured() -> Self {
        FrameClock::Measured { last: None }
    }

    /// Delta time for the frame that starts now.
    pub fn tick(&mut self) -> f32 {
        match self {
            FrameClock::Fixed(step) => *step,
            FrameClock::Measured { last } => {
                let now = Instant::now();
                let dt = last.map_or(0.0, |prev| now.duration_since(prev).as_secs_f32());
                *last = Some(now);
                dt
            }
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::Fixed(FIXED_DELTA_TIME)
    }
}

/// Ring buffer of recent frame durations for FPS readouts.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    pub fn count(&self) -> usize {
        if self.filled {
            self.capacity
        } else {
            self.index
        }
    }

    fn recorded(&self) -> &[Duration] {
        &self.history[..self.count()]
    }

    pub fn average(&self) -> Duration {
        let samples = self.recorded();
        if samples.is_empty() {
            return Duration::ZERO;
        }
        samples.iter().sum::<Duration>() / samples.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.recorded().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.recorded().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    /// Frames per second over the recorded window; zero before any frame.
    pub fn average_fps(&self) -> f32 {
        let avg = self.average().as_secs_f32();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}
