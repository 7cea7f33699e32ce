// engine.rs - Simulation engine: run state, tick loop and driver notifications

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::grid::Grid;

/// Callbacks the driver receives from the engine.
///
/// Callbacks run on whichever thread caused the change (the caller's, or a
/// tokio worker for the tick loop) after the engine's lock is released, so
/// they may read the engine back.
pub trait EngineObserver: Send + Sync {
    /// The grid changed and should be repainted.
    fn on_change(&self) {}
    /// The engine went from `Running` to `Stopped`, for any reason.
    fn on_stop(&self) {}
    /// The engine stopped itself because a generation changed nothing.
    fn on_halt(&self) {}
}

/// The notifications of [`EngineObserver`] as values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    Changed,
    Stopped,
    Halted,
}

/// Fans engine notifications out to every subscribed receiver.
impl EngineObserver for broadcast::Sender<EngineEvent> {
    fn on_change(&self) {
        // No receivers is fine, nobody is listening.
        let _ = self.send(EngineEvent::Changed);
    }

    fn on_stop(&self) {
        let _ = self.send(EngineEvent::Stopped);
    }

    fn on_halt(&self) {
        let _ = self.send(EngineEvent::Halted);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

/// Everything guarded by the engine's single lock.
#[derive(Debug)]
struct EngineState {
    grid: Grid,
    run: RunState,
    /// Bumped by every `start`; a tick loop only advances while it matches.
    epoch: u64,
    generation: u64,
}

enum Advance {
    Stepped,
    Halted,
    /// The loop that asked is no longer the active one.
    Stale,
}

struct Shared {
    state: Mutex<EngineState>,
    observer: Arc<dyn EngineObserver>,
    tick_interval: Duration,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        // Every critical section leaves the state consistent, so a panic
        // elsewhere does not make it unusable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compute one generation. With `loop_epoch` set, only do so while the
    /// engine is still running under that epoch.
    fn advance(&self, loop_epoch: Option<u64>) -> Advance {
        let mut state = self.lock();
        if let Some(epoch) = loop_epoch {
            if !state.run.is_running() || state.epoch != epoch {
                return Advance::Stale;
            }
        }

        let next = state.grid.next_generation();
        let converged = state.run.is_running() && next == state.grid;
        state.grid = next;
        state.generation += 1;
        let generation = state.generation;

        if converged {
            // Stop and wipe in one critical section so no start or edit slips in between.
            state.run = RunState::Stopped;
            state.grid.clear();
            state.generation = 0;
            drop(state);
            info!(generation, "nothing alive or nothing changed, halting");
            self.observer.on_stop();
            self.observer.on_halt();
            self.observer.on_change();
            Advance::Halted
        } else {
            drop(state);
            debug!(generation, "generation computed");
            self.observer.on_change();
            Advance::Stepped
        }
    }

    fn stop(&self) {
        let mut state = self.lock();
        if !state.run.is_running() {
            return;
        }
        state.run = RunState::Stopped;
        let generation = state.generation;
        drop(state);
        info!(generation, "simulation stopped");
        self.observer.on_stop();
    }

    fn clear(&self) {
        let mut state = self.lock();
        state.grid.clear();
        state.generation = 0;
        drop(state);
        debug!("grid cleared");
        self.observer.on_change();
    }
}

/// Runs generations of one grid until stopped or until the grid stops changing.
///
/// The grid, the run state and the generation counter live behind one lock,
/// so each operation is atomic with respect to the others. Dropping the
/// engine ends its tick loop at the next wake-up.
pub struct SimulationEngine {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl SimulationEngine {
    /// Build a stopped engine with an all-dead grid.
    ///
    /// The tick loop is spawned on `runtime` when the simulation starts.
    pub fn new(
        config: &EngineConfig,
        runtime: Handle,
        observer: Arc<dyn EngineObserver>,
    ) -> Result<Self> {
        let tick_interval = config.tick_interval()?;
        let grid = Grid::new(config.grid_size)?;
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(EngineState {
                    grid,
                    run: RunState::Stopped,
                    epoch: 0,
                    generation: 0,
                }),
                observer,
                tick_interval,
            }),
            runtime,
        })
    }

    pub fn size(&self) -> usize {
        self.shared.lock().grid.size()
    }

    pub fn tick_interval(&self) -> Duration {
        self.shared.tick_interval
    }

    pub fn run_state(&self) -> RunState {
        self.shared.lock().run
    }

    pub fn is_running(&self) -> bool {
        self.run_state().is_running()
    }

    /// Generations computed since construction or the last clear.
    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<bool> {
        self.shared.lock().grid.get(x, y)
    }

    /// Copy of the current grid, for rendering.
    pub fn snapshot(&self) -> Grid {
        self.shared.lock().grid.clone()
    }

    /// Apply a pointer edit: a press (`extend == false`) toggles the cell, a
    /// drag continuation (`extend == true`) makes it alive.
    ///
    /// Allowed in any state. Returns the cell's new value.
    pub fn edit_cell(&self, x: usize, y: usize, extend: bool) -> Result<bool> {
        let alive = self.shared.lock().grid.edit(x, y, extend)?;
        debug!(x, y, extend, alive, "cell edited");
        self.shared.observer.on_change();
        Ok(alive)
    }

    /// Compute exactly one generation now.
    ///
    /// While running, a generation identical to the previous one halts the
    /// engine and clears the grid.
    pub fn step(&self) {
        self.shared.advance(None);
    }

    /// Start the tick loop. Does nothing if already running.
    pub fn start(&self) {
        let mut state = self.shared.lock();
        if state.run.is_running() {
            return;
        }
        state.run = RunState::Running;
        state.epoch += 1;
        let epoch = state.epoch;
        drop(state);

        info!(epoch, interval = ?self.shared.tick_interval, "simulation started");
        self.runtime.spawn(tick_loop(
            Arc::downgrade(&self.shared),
            epoch,
            self.shared.tick_interval,
        ));
    }

    /// Stop the tick loop. Does nothing, and notifies nobody, if already stopped.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Kill every cell. Never counts as a halt.
    pub fn clear(&self) {
        self.shared.clear();
    }
}

async fn tick_loop(shared: Weak<Shared>, epoch: u64, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;
        let Some(shared) = shared.upgrade() else {
            break;
        };
        match shared.advance(Some(epoch)) {
            Advance::Stepped => {}
            Advance::Halted | Advance::Stale => break,
        }
    }
    debug!(epoch, "tick loop exited");
}
