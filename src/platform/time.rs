//! Elapsed-time sources

/// Monotonic time since start, in seconds
pub trait Clock {
    fn elapsed(&self) -> f64;

    /// Block the loop for `secs`; a no-op where the host drives frame pacing
    fn sleep(&mut self, secs: f64);
}

/// Wall clock backed by `std::time::Instant`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn sleep(&mut self, secs: f64) {
        if secs > 0.0 {
            std::thread::sleep(std::time::Duration::from_secs_f64(secs));
        }
    }
}

/// Clock that only moves when told to; sleeping advances it instantly
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, secs: f64) {
        self.now += secs;
    }

    pub fn set(&mut self, now: f64) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f64 {
        self.now
    }

    fn sleep(&mut self, secs: f64) {
        if secs > 0.0 {
            self.now += secs;
        }
    }
}
