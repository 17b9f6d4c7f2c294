use std::time::{Duration, Instant};

/// Time source for runs. Blocking waits go through here so tests can run on
/// virtual time.
pub trait Clock: Send + Sync {
	/// Time since the clock was created.
	fn elapsed(&self) -> Duration;
	fn sleep(&self, duration: Duration);
}

pub struct SystemClock {
	start: Instant,
}

impl SystemClock {
	pub fn new() -> Self {
		Self { start: Instant::now() }
	}
}

impl Default for SystemClock {
	fn default() -> Self {
		Self::new()
	}
}

impl Clock for SystemClock {
	fn elapsed(&self) -> Duration {
		self.start.elapsed()
	}

	fn sleep(&self, duration: Duration) {
		std::thread::sleep(duration);
	}
}
