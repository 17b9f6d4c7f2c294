use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop flag shared between the host and one run.
///
/// Setting it never interrupts anything; the run looks at it at its next
/// checkpoint.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.store(true, Ordering::Release);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clones_share_the_flag() {
		let token = CancellationToken::new();
		let other = token.clone();
		assert!(!other.is_cancelled());
		token.cancel();
		assert!(other.is_cancelled());
	}

	#[test]
	fn visible_across_threads() {
		let token = CancellationToken::new();
		let seen = {
			let token = token.clone();
			std::thread::spawn(move || {
				while !token.is_cancelled() {
					std::thread::yield_now();
				}
				true
			})
		};
		token.cancel();
		assert!(seen.join().unwrap());
	}
}
