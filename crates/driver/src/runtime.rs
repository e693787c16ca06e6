//! Driver runtime.
//!
//! Runs the engine on a background tokio task and bridges it to a synchronous
//! caller: input goes in through setter methods, snapshots come out through a
//! watch channel, and redraw or halt notifications through [`Driver::try_recv`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

use crate::core::{Config, GameState, RenderSnapshot, SavedState, StepKind, SwapRequest};
use crate::env::DriverSettings;
use crate::input::ExternalInput;
use crate::pacing::{should_signal_redraw, TickPacer};
use crate::types::FallFrom;

/// Notification from the worker task.
#[derive(Debug)]
pub enum DriverEvent {
    /// A new snapshot was published and the screen should be redrawn.
    Redraw { tick: u64, step: StepKind },
    /// The engine broke an invariant; the worker has stopped.
    Halted(anyhow::Error),
}

type SharedInput = Arc<Mutex<ExternalInput>>;

/// Running driver instance.
pub struct Driver {
    rt: Option<Runtime>,
    input: SharedInput,
    snapshot_rx: watch::Receiver<Arc<GameState>>,
    event_rx: mpsc::UnboundedReceiver<DriverEvent>,
}

impl Driver {
    /// Start a fresh random board.
    pub fn start(config: Config, seed: u32) -> Result<Self> {
        Self::launch(GameState::new(config, seed))
    }

    /// Start from `TILEFALL_*` environment variables.
    pub fn start_from_env() -> Result<Self> {
        let settings = DriverSettings::from_env();
        Self::start(settings.config, settings.seed)
    }

    /// Start from a previously exported board.
    pub fn resume(saved: &SavedState, seed: u32) -> Result<Self> {
        let state = GameState::restore(saved, seed).context("restoring saved state")?;
        Self::launch(state)
    }

    fn launch(state: GameState) -> Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("tilefall-driver")
            .enable_time()
            .build()
            .context("failed to create tokio runtime")?;

        let input = Arc::new(Mutex::new(ExternalInput::new(*state.config())));
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(state));
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        rt.spawn(run_loop(input.clone(), snapshot_tx, event_tx));

        Ok(Self {
            rt: Some(rt),
            input,
            snapshot_rx,
            event_rx,
        })
    }

    /// Latest published snapshot; may be one tick behind the worker.
    pub fn snapshot(&self) -> Arc<GameState> {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<GameState>> {
        self.snapshot_rx.clone()
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        self.snapshot().render_snapshot()
    }

    pub fn export(&self) -> SavedState {
        self.snapshot().export()
    }

    /// Queue a swap.
    ///
    /// Refused unless the latest snapshot is waiting for input and both cells
    /// are on its board. The engine checks again when it consumes the swap.
    pub fn submit_swap(&self, swap: SwapRequest) -> bool {
        let snapshot = self.snapshot();
        if snapshot.step_kind() != StepKind::WaitForInput || !swap.fits(snapshot.board().size()) {
            debug!(tick = snapshot.tick(), "swap refused");
            return false;
        }
        lock(&self.input).submit_swap(swap);
        true
    }

    pub fn set_fall_from(&self, fall_from: FallFrom) {
        lock(&self.input).set_fall_from(fall_from);
    }

    pub fn set_config(&self, config: Config) {
        lock(&self.input).set_config(config);
    }

    pub fn try_recv(&mut self) -> Option<DriverEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Stop the worker and wait briefly for it to wind down.
    pub fn shutdown(mut self) {
        if let Some(rt) = self.rt.take() {
            rt.shutdown_timeout(Duration::from_millis(100));
        }
        info!("driver stopped");
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        if let Some(rt) = self.rt.take() {
            rt.shutdown_background();
        }
    }
}

fn lock(input: &SharedInput) -> MutexGuard<'_, ExternalInput> {
    input.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_loop(
    input: SharedInput,
    snapshot_tx: watch::Sender<Arc<GameState>>,
    event_tx: mpsc::UnboundedSender<DriverEvent>,
) {
    let mut current = snapshot_tx.borrow().clone();
    info!(
        grid_size = current.config().grid_size,
        tick = current.tick(),
        "driver started"
    );

    loop {
        let pacer = TickPacer::from_config(lock(&input).config());
        match pacer.pause_before(current.tick()) {
            Some(pause) => tokio::time::sleep(pause).await,
            None => tokio::task::yield_now().await,
        }

        let mut next = (*current).clone();
        lock(&input).merge_into(&mut next);

        let previous = current.step_kind();
        let step = match next.advance().and_then(|step| next.check_invariants().map(|()| step)) {
            Ok(step) => step,
            Err(err) => {
                let err = anyhow::Error::new(err)
                    .context(format!("engine halted at tick {}", current.tick()));
                error!("driver halted: {err:#}");
                let _ = event_tx.send(DriverEvent::Halted(err));
                return;
            }
        };

        let next = Arc::new(next);
        snapshot_tx.send_replace(next.clone());

        if previous != step {
            debug!(
                tick = next.tick(),
                from = previous.as_str(),
                to = step.as_str(),
                "step changed"
            );
        }
        if should_signal_redraw(previous, step) {
            let _ = event_tx.send(DriverEvent::Redraw {
                tick: next.tick(),
                step,
            });
        }

        current = next;
    }
}
