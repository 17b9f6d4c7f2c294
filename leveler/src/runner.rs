//! Runs one training at a time on a background thread.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

use anyhow::{Context, bail};

use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::game;
use crate::registry::Training;
use crate::session::{Devices, Session};

/// Clears the active flag and sends the completion notification when the
/// worker exits, however it exits.
struct Finished {
	active: Arc<AtomicBool>,
	tx: Sender<()>,
}

impl Drop for Finished {
	fn drop(&mut self) {
		self.active.store(false, Ordering::Release);
		let _ = self.tx.send(());
	}
}

pub struct Runner {
	devices: Devices,
	active: Arc<AtomicBool>,
}

impl Runner {
	pub fn new(devices: Devices) -> Self {
		Self {
			devices,
			active: Arc::new(AtomicBool::new(false)),
		}
	}

	pub fn is_active(&self) -> bool {
		self.active.load(Ordering::Acquire)
	}

	/// Start `training` on a worker thread. Fails while another run is active
	/// or when `config` does not validate.
	pub fn start(&self, training: &'static Training, config: Config) -> anyhow::Result<RunHandle> {
		config.validate().context("invalid settings")?;
		if self
			.active
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			bail!("a training is already running");
		}

		let cancel = CancellationToken::new();
		let (tx, finished) = mpsc::channel();
		let guard = Finished {
			active: self.active.clone(),
			tx,
		};
		let session = Session::new(self.devices.clone(), config.keys.clone(), cancel.clone());

		let thread = std::thread::Builder::new()
			.name(format!("training-{}", training.id))
			.spawn(move || {
				let _guard = guard;
				let span = tracing::info_span!("training", id = training.id);
				let _enter = span.enter();
				work(training, &session, &config);
			})
			// The closure (and the guard in it) is dropped on failure, which resets the flag.
			.context("spawn training thread")?;

		tracing::info!(id = training.id, "training started");
		Ok(RunHandle {
			id: training.id,
			cancel,
			finished,
			done: false,
			thread: Some(thread),
		})
	}
}

fn work(training: &Training, session: &Session, config: &Config) {
	match catch_unwind(AssertUnwindSafe(|| (training.run)(session, config))) {
		Ok(Ok(completion)) => tracing::info!(%completion, "training ended"),
		Ok(Err(err)) => tracing::error!(error = %err, "training failed"),
		Err(_) => tracing::error!("training panicked"),
	}

	if let Err(err) = game::cleanup(session) {
		tracing::warn!(error = %err, "cleanup failed");
	}
}

/// The host's side of a run.
pub struct RunHandle {
	id: &'static str,
	cancel: CancellationToken,
	finished: Receiver<()>,
	done: bool,
	thread: Option<JoinHandle<()>>,
}

impl RunHandle {
	pub fn id(&self) -> &'static str {
		self.id
	}

	/// Ask the run to stop at its next checkpoint.
	pub fn stop(&self) {
		tracing::info!(id = self.id, "stop requested");
		self.cancel.cancel();
	}

	pub fn is_stopping(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Non-blocking; `true` once the worker has signalled completion.
	pub fn poll(&mut self) -> bool {
		if !self.done {
			match self.finished.try_recv() {
				Ok(()) | Err(TryRecvError::Disconnected) => self.finish(),
				Err(TryRecvError::Empty) => {}
			}
		}
		self.done
	}

	/// Block until the worker has signalled completion.
	pub fn wait(mut self) {
		if !self.done {
			let _ = self.finished.recv();
			self.finish();
		}
	}

	fn finish(&mut self) {
		self.done = true;
		if let Some(thread) = self.thread.take()
			&& thread.join().is_err()
		{
			tracing::error!(id = self.id, "training thread panicked");
		}
	}
}
