//! Driver module - runs the engine in the background
//!
//! The engine in `tilefall-core` only moves when asked to. This crate owns the
//! loop that asks: a single tokio task that, once per tick,
//!
//! 1. **Paces**: sleeps `tick_interval_ms` on every `sleep_every_n_ticks`-th tick
//! 2. **Merges input**: gravity, configuration and swaps parked by other threads
//! 3. **Advances**: one [`GameState::advance`](tilefall_core::GameState::advance)
//! 4. **Publishes**: swaps in the new `Arc<GameState>` and signals a redraw
//!
//! A broken engine invariant stops the loop for good and is reported once as
//! [`DriverEvent::Halted`]; start a new [`Driver`] to recover.
//!
//! # Example
//!
//! ```no_run
//! use tilefall_driver::{Driver, DriverEvent};
//! use tilefall_driver::core::Config;
//!
//! let mut driver = Driver::start(Config::default(), 7)?;
//! loop {
//!     match driver.try_recv() {
//!         Some(DriverEvent::Redraw { .. }) => {
//!             let frame = driver.render_snapshot();
//!             println!("tick {} shows {} tiles", frame.tick, frame.sprites.len());
//!         }
//!         Some(DriverEvent::Halted(err)) => return Err(err),
//!         None => std::thread::sleep(std::time::Duration::from_millis(16)),
//!     }
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Logging
//!
//! The driver emits `tracing` events (`info` on start and stop, `debug` on step
//! changes and dropped input, `error` on halt). Install a subscriber in the
//! host application to see them.

pub mod env;
pub mod input;
pub mod pacing;
pub mod runtime;

pub use tilefall_core as core;
pub use tilefall_types as types;

pub use env::DriverSettings;
pub use input::ExternalInput;
pub use pacing::{should_signal_redraw, TickPacer};
pub use runtime::{Driver, DriverEvent};
