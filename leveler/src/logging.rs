//! Process-wide tracing setup.
//!
//! Events go to stderr and into a [`LogBuffer`] that the host shows as the
//! operator log.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogLevel;

/// The most recent formatted log lines.
#[derive(Clone)]
pub struct LogBuffer {
	lines: Arc<Mutex<VecDeque<String>>>,
	capacity: usize,
}

impl Default for LogBuffer {
	fn default() -> Self {
		Self::with_capacity(Self::CAPACITY)
	}
}

impl LogBuffer {
	pub const CAPACITY: usize = 500;

	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
			capacity,
		}
	}

	pub fn lines(&self) -> Vec<String> {
		match self.lines.lock() {
			Ok(lines) => lines.iter().cloned().collect(),
			Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
		}
	}

	fn push(&self, text: &str) {
		let mut lines = self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
		for line in text.lines().filter(|l| !l.is_empty()) {
			if lines.len() == self.capacity {
				lines.pop_front();
			}
			lines.push_back(line.to_string());
		}
	}
}

/// Collects one formatted event and hands it to the buffer when dropped.
pub struct LineWriter {
	buffer: LogBuffer,
	pending: Vec<u8>,
}

impl io::Write for LineWriter {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.pending.extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl Drop for LineWriter {
	fn drop(&mut self) {
		if !self.pending.is_empty() {
			self.buffer.push(&String::from_utf8_lossy(&self.pending));
		}
	}
}

impl<'a> MakeWriter<'a> for LogBuffer {
	type Writer = LineWriter;

	fn make_writer(&'a self) -> Self::Writer {
		LineWriter {
			buffer: self.clone(),
			pending: Vec::new(),
		}
	}
}

/// Install the global subscriber. `RUST_LOG` wins over `level`.
pub fn init(level: LogLevel) -> LogBuffer {
	let buffer = LogBuffer::new();
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

	let installed = tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(io::stderr))
		.with(fmt::layer().with_ansi(false).with_target(false).with_writer(buffer.clone()))
		.try_init();
	if let Err(err) = installed {
		tracing::warn!(error = %err, "tracing subscriber already installed");
	}
	buffer
}
