// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thread coordinator: run a work-step on a worker until told to stop
//!
//! `run()` starts a worker thread that calls the step in a loop. Between
//! iterations the loop polls a `stop_requested` signal; the step itself is
//! never interrupted. When the loop exits the phase leaves the running set
//! first and only then is `stopped` raised, so anyone woken from
//! `wait_for_stop()` sees a consistent state.
//!
//! Every run gets a new generation number. Stop requests record the
//! generation they were aimed at, so a `signal_stop()` that loses a race
//! with the natural end of one run cannot stop the next one.

use crate::error::CoordError;
use crate::phase::{Phase, PhaseCell};
use crate::step::WorkStep;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::{self, ThreadId};
use std::time::Duration;
use strand_sync::{Signal, Timeout, Worker};

/// Result of [`ThreadCoordinator::run`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// A worker was started for this run
    Started { generation: u64 },
    /// A run was already active; nothing was started
    AlreadyRunning,
}

/// Result of [`ThreadCoordinator::signal_stop`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopOutcome {
    Requested,
    NotRunning,
}

/// Re-check interval while waiting for a run to stop
const STOPPED_POLL: Timeout = Timeout::After(Duration::from_millis(10));

/// Signals created on the first run and reused afterwards.
#[derive(Debug, Default)]
struct RunSignals {
    stop_requested: Signal,
    stopped: Signal,
}

/// State shared between the coordinator handle and its worker thread.
struct Shared<S> {
    name: String,
    step: Mutex<S>,
    phase: PhaseCell,
    generation: AtomicU64,
    /// Highest generation a stop has been requested for
    stop_target: AtomicU64,
    /// Step calls made by the most recent run
    iterations: AtomicU64,
    /// Highest generation whose loop has exited
    stopped_generation: AtomicU64,
    signals: OnceLock<RunSignals>,
    loop_thread: Mutex<Option<ThreadId>>,
}

impl<S> Shared<S> {
    /// Aim a stop at `generation` and raise the signal.
    fn request_stop(&self, signals: &RunSignals, generation: u64) {
        self.stop_target.fetch_max(generation, Ordering::SeqCst);
        signals.stop_requested.set();
    }

    /// Poll for a stop aimed at `generation`, discarding stale requests.
    fn stop_observed(&self, signals: &RunSignals, generation: u64) -> bool {
        if !signals.stop_requested.wait(Timeout::ZERO).is_signaled() {
            return false;
        }
        if self.stop_target.load(Ordering::SeqCst) >= generation {
            return true;
        }

        signals.stop_requested.clear();
        // A current request may have landed between the read and the clear
        if self.stop_target.load(Ordering::SeqCst) >= generation {
            return true;
        }
        tracing::debug!(coordinator = %self.name, generation, "ignoring stale stop request");
        false
    }

    /// Block until the loop of `generation`, or a later one, has exited.
    fn wait_stopped(&self, signals: &RunSignals, generation: u64) {
        // `run()` clears `stopped` for the next generation, so the wait is bounded
        while self.stopped_generation.load(Ordering::SeqCst) < generation {
            signals.stopped.wait(STOPPED_POLL);
        }
    }

    fn on_loop_thread(&self) -> bool {
        *self.loop_thread.lock().unwrap_or_else(|e| e.into_inner()) == Some(thread::current().id())
    }
}

/// Runs the teardown when the loop exits, including by a panicking step.
struct LoopExit<'a, S> {
    shared: &'a Shared<S>,
    signals: &'a RunSignals,
    generation: u64,
}

impl<S> Drop for LoopExit<'_, S> {
    fn drop(&mut self) {
        let shared = self.shared;
        if thread::panicking() {
            tracing::error!(coordinator = %shared.name, generation = self.generation, "work step panicked");
        }

        shared.phase.set(Phase::Stopping);
        *shared.loop_thread.lock().unwrap_or_else(|e| e.into_inner()) = None;

        shared.phase.set(Phase::Stopped);
        shared
            .stopped_generation
            .fetch_max(self.generation, Ordering::SeqCst);
        self.signals.stopped.set();
        tracing::debug!(
            coordinator = %shared.name,
            generation = self.generation,
            iterations = shared.iterations.load(Ordering::SeqCst),
            "loop stopped"
        );
    }
}

/// Body of the worker thread for one run.
fn drive<S: WorkStep>(shared: Arc<Shared<S>>, generation: u64) {
    let Some(signals) = shared.signals.get() else {
        shared.phase.set(Phase::Stopped);
        return;
    };
    let _exit = LoopExit {
        shared: &shared,
        signals,
        generation,
    };

    *shared.loop_thread.lock().unwrap_or_else(|e| e.into_inner()) = Some(thread::current().id());
    let mut step = shared.step.lock().unwrap_or_else(|e| e.into_inner());
    tracing::debug!(coordinator = %shared.name, generation, "loop start");

    // Stops are polled between iterations, never during one
    let mut keep_going = true;
    loop {
        let wants_more = step.step(&mut keep_going);
        shared.iterations.fetch_add(1, Ordering::SeqCst);
        if !(wants_more && keep_going) {
            break;
        }
        if shared.stop_observed(signals, generation) {
            tracing::info!(coordinator = %shared.name, generation, "received stop request");
            keep_going = false;
        }
    }
}

/// Owns a client work-step and the worker thread that loops over it.
///
/// At most one run is active at a time. [`is_running`](Self::is_running) is
/// an advisory snapshot; use [`wait_for_stop`](Self::wait_for_stop) to
/// synchronize with the end of a run.
pub struct ThreadCoordinator<S> {
    shared: Arc<Shared<S>>,
    worker: Mutex<Option<Worker>>,
}

impl<S> ThreadCoordinator<S>
where
    S: WorkStep + Send + 'static,
{
    pub fn new(step: S) -> Self {
        Self::with_name("coordinator", step)
    }

    /// Name used for the worker thread and in log fields.
    pub fn with_name(name: impl Into<String>, step: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                name: name.into(),
                step: Mutex::new(step),
                phase: PhaseCell::new(),
                generation: AtomicU64::new(0),
                stop_target: AtomicU64::new(0),
                iterations: AtomicU64::new(0),
                stopped_generation: AtomicU64::new(0),
                signals: OnceLock::new(),
                loop_thread: Mutex::new(None),
            }),
            worker: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Start a run on a new worker thread.
    ///
    /// Calling this while a run is active is a no-op that returns
    /// [`RunOutcome::AlreadyRunning`]. Failing to create the thread returns
    /// an error and leaves the coordinator [`Phase::Stopped`].
    pub fn run(&self) -> Result<RunOutcome, CoordError> {
        let mut slot = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        let shared = &self.shared;

        if !shared.phase.get().can_start() {
            tracing::warn!(coordinator = %shared.name, "run requested while already running");
            return Ok(RunOutcome::AlreadyRunning);
        }

        // The previous worker raises `stopped` just before returning; joining
        // it keeps that from landing after the clear below.
        if let Some(previous) = slot.take() {
            if let Err(e) = previous.join() {
                tracing::warn!(coordinator = %shared.name, error = %e, "previous run ended abnormally");
            }
        }

        let signals = shared.signals.get_or_init(RunSignals::default);
        signals.stop_requested.clear();
        signals.stopped.clear();

        let generation = shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        shared.iterations.store(0, Ordering::SeqCst);
        shared.phase.set(Phase::Running);

        let worker = match Worker::spawn(
            shared.name.clone(),
            |(shared, generation): (Arc<Shared<S>>, u64)| drive(shared, generation),
            (Arc::clone(shared), generation),
        ) {
            Ok(worker) => worker,
            Err(e) => {
                tracing::error!(coordinator = %shared.name, error = %e, "failed to start worker");
                shared.phase.set(Phase::Stopped);
                shared.stopped_generation.fetch_max(generation, Ordering::SeqCst);
                signals.stopped.set();
                return Err(e.into());
            }
        };

        *slot = Some(worker);
        tracing::debug!(coordinator = %shared.name, generation, "run started");
        Ok(RunOutcome::Started { generation })
    }
}

impl<S> ThreadCoordinator<S> {
    /// Ask the active run to stop after its current iteration.
    pub fn signal_stop(&self) -> StopOutcome {
        let shared = &self.shared;
        // Generation before phase: a run that started in between is not the target
        let generation = shared.generation.load(Ordering::SeqCst);
        let phase = shared.phase.get();

        let Some(signals) = shared.signals.get().filter(|_| phase.is_running()) else {
            tracing::warn!(coordinator = %shared.name, %phase, "not running, cannot signal stop");
            return StopOutcome::NotRunning;
        };

        shared.phase.transition(Phase::Running, Phase::StopRequested);
        shared.request_stop(signals, generation);
        StopOutcome::Requested
    }

    /// Request a stop and block until the run has fully stopped.
    ///
    /// Returns immediately if the coordinator never ran or the last run has
    /// already stopped. Called from inside the work-step it only requests
    /// the stop, since waiting there could never finish.
    pub fn wait_for_stop(&self) {
        let shared = &self.shared;
        let Some(signals) = shared.signals.get() else {
            tracing::debug!(coordinator = %shared.name, "never started, skipping wait");
            return;
        };

        // Phase before generation: a run that started in between is the one to stop
        let phase = shared.phase.get();
        let generation = shared.generation.load(Ordering::SeqCst);
        if phase.can_start() {
            tracing::debug!(coordinator = %shared.name, %phase, "not running, skipping wait");
            return;
        }

        // Covers callers that never sent signal_stop
        shared.phase.transition(Phase::Running, Phase::StopRequested);
        shared.request_stop(signals, generation);

        if shared.on_loop_thread() {
            tracing::warn!(coordinator = %shared.name, "wait_for_stop called from the work step, not waiting");
            return;
        }

        shared.wait_stopped(signals, generation);
    }

    /// Advisory snapshot of whether a run is live.
    pub fn is_running(&self) -> bool {
        self.shared.phase.get().is_running()
    }

    pub fn phase(&self) -> Phase {
        self.shared.phase.get()
    }

    /// Generation of the most recent run; 0 before the first run.
    pub fn generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }

    /// Number of step calls made by the most recent run.
    pub fn iterations(&self) -> u64 {
        self.shared.iterations.load(Ordering::SeqCst)
    }

    /// Access the work-step. Blocks while a run is active.
    pub fn with_step<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut step = self.shared.step.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut step)
    }
}

impl<S> Drop for ThreadCoordinator<S> {
    fn drop(&mut self) {
        if self.shared.signals.get().is_none() {
            return;
        }
        self.wait_for_stop();

        let worker = self
            .worker
            .get_mut()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(worker) = worker {
            if let Err(e) = worker.join() {
                tracing::warn!(coordinator = %self.shared.name, error = %e, "worker ended abnormally");
            }
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
