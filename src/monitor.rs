//! Monitor sessions.
//!
//! Worker loop that samples one pixel per cycle and dispatches a tap
//! when the color matches an armed target.

use crate::color::Color;
use crate::config::MonitorConfig;
use crate::dispatch::ActionDispatcher;
use crate::error::{Error, Result};
use crate::frame::FrameSource;
use crate::registry::TargetRegistry;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Lifecycle of a monitor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonitorState {
    /// Created, never started.
    Idle,
    /// Worker loop is live.
    Running,
    /// Finished, one way or another. Sessions do not restart.
    Stopped,
}

/// Counters accumulated by a running session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// Completed cycles, including skipped ones.
    pub cycles: u64,
    /// Cycles where the source had no frame ready.
    pub frames_missed: u64,
    /// Cycles where sampling failed (watch point outside the frame).
    pub sample_errors: u64,
    /// Cycles where the sampled color matched an armed target.
    pub match_hits: u64,
    /// Taps dispatched successfully.
    pub dispatches: u64,
    /// Taps that failed to dispatch.
    pub dispatch_failures: u64,
    /// Most recently sampled color.
    pub last_color: Option<Color>,
}

/// A color-watch session.
///
/// Owns a worker thread running the sample/match/dispatch cycle on a
/// fixed delay. Sessions are one-shot: once stopped they cannot be
/// started again.
pub struct Monitor {
    config: MonitorConfig,
    registry: Arc<TargetRegistry>,
    state: Arc<Mutex<MonitorState>>,
    running: Arc<AtomicBool>,
    status: Arc<Mutex<MonitorStatus>>,
    worker: Option<JoinHandle<()>>,
}

impl Monitor {
    pub fn new(config: MonitorConfig, registry: Arc<TargetRegistry>) -> Self {
        Self {
            config,
            registry,
            state: Arc::new(Mutex::new(MonitorState::Idle)),
            running: Arc::new(AtomicBool::new(false)),
            status: Arc::new(Mutex::new(MonitorStatus::default())),
            worker: None,
        }
    }

    /// Start the worker loop. Only an idle session can start; a running
    /// one reports `AlreadyRunning` and a finished one `SessionFinished`.
    pub fn start<S, D>(&mut self, source: S, dispatcher: D) -> Result<()>
    where
        S: FrameSource + Send + 'static,
        D: ActionDispatcher + 'static,
    {
        {
            let mut state = self.state.lock();
            match *state {
                MonitorState::Idle => *state = MonitorState::Running,
                MonitorState::Running => return Err(Error::AlreadyRunning),
                MonitorState::Stopped => return Err(Error::SessionFinished),
            }
        }

        self.running.store(true, Ordering::SeqCst);

        let config = self.config;
        let registry = self.registry.clone();
        let running = self.running.clone();
        let state = self.state.clone();
        let status = self.status.clone();

        let handle = thread::Builder::new()
            .name("chromatap-monitor".to_string())
            .spawn(move || {
                run_monitor_loop(config, registry, running, state, status, source, dispatcher);
            });

        let handle = match handle {
            Ok(handle) => handle,
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                *self.state.lock() = MonitorState::Idle;
                return Err(Error::WorkerSpawn(err));
            }
        };

        self.worker = Some(handle);
        log::info!(
            "monitor started at {} (tolerance {}, every {:?})",
            self.config.coordinate,
            self.config.tolerance,
            self.config.poll_interval
        );
        Ok(())
    }

    /// Stop the session and wait for the worker to finish. Idempotent;
    /// also marks a never-started session as finished.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }

        let mut state = self.state.lock();
        if *state != MonitorState::Stopped {
            *state = MonitorState::Stopped;
            log::info!("monitor stopped");
        }
    }

    pub fn state(&self) -> MonitorState {
        *self.state.lock()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Copy of the session counters.
    pub fn status(&self) -> MonitorStatus {
        self.status.lock().clone()
    }

    pub fn config(&self) -> MonitorConfig {
        self.config
    }

    pub fn registry(&self) -> &Arc<TargetRegistry> {
        &self.registry
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_monitor_loop<S, D>(
    config: MonitorConfig,
    registry: Arc<TargetRegistry>,
    running: Arc<AtomicBool>,
    state: Arc<Mutex<MonitorState>>,
    status: Arc<Mutex<MonitorStatus>>,
    mut source: S,
    mut dispatcher: D,
) where
    S: FrameSource,
    D: ActionDispatcher,
{
    while running.load(Ordering::SeqCst) {
        if let Err(err) = run_cycle(&config, &registry, &status, &mut source, &mut dispatcher) {
            log::error!("frame source failed, ending session: {}", err);
            break;
        }
        status.lock().cycles += 1;

        sleep_poll_interval(&running, config.poll_interval);
    }

    running.store(false, Ordering::SeqCst);
    *state.lock() = MonitorState::Stopped;
    log::debug!("monitor worker exited");
}

fn run_cycle<S, D>(
    config: &MonitorConfig,
    registry: &TargetRegistry,
    status: &Mutex<MonitorStatus>,
    source: &mut S,
    dispatcher: &mut D,
) -> Result<()>
where
    S: FrameSource,
    D: ActionDispatcher,
{
    // A source error is the only thing that ends the session.
    let Some(frame) = source.acquire_latest()? else {
        log::trace!("no frame ready");
        status.lock().frames_missed += 1;
        return Ok(());
    };
    // The frame stays owned for exactly this cycle; every return path
    // below drops it.

    let color = match frame.sample(config.coordinate) {
        Ok(color) => color,
        Err(err) => {
            log::warn!("sample failed: {}", err);
            status.lock().sample_errors += 1;
            return Ok(());
        }
    };
    status.lock().last_color = Some(color);

    let snapshot = registry.snapshot();
    if !snapshot.enabled() || !snapshot.matches_any(color, config.tolerance) {
        return Ok(());
    }

    status.lock().match_hits += 1;
    log::info!(
        "color {} matched at {}, dispatching tap",
        color,
        config.coordinate
    );

    match dispatcher.dispatch(config.coordinate) {
        Ok(()) => status.lock().dispatches += 1,
        Err(err) => {
            log::warn!("dispatch failed: {}", err);
            status.lock().dispatch_failures += 1;
        }
    }

    Ok(())
}

/// Fixed delay between cycles, chunked so stop() stays responsive.
fn sleep_poll_interval(running: &AtomicBool, interval: Duration) {
    let chunk = Duration::from_millis(25);
    let mut remaining = interval;

    while !remaining.is_zero() {
        if !running.load(Ordering::SeqCst) {
            return;
        }
        let step = remaining.min(chunk);
        thread::sleep(step);
        remaining -= step;
    }
}
